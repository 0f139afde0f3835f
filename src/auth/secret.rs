use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Placeholder written wherever a secret would otherwise appear.
pub const MASK: &str = "********";

/// How [`Secret::scrub`] replaces occurrences of the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrubMode {
    /// The application-wide default, currently masking.
    #[default]
    Default,
    /// Remove the secret and leave nothing in its place.
    Delete,
    /// Replace the secret with [`MASK`].
    Mask,
}

/// Owns one sensitive value and only hands out operations derived from it.
///
/// The value is zeroed in memory when the secret is dropped. `Debug` and
/// `Display` print the mask, so a secret can sit inside logged structs.
pub struct Secret<T: Zeroize> {
    label: &'static str,
    value: Zeroizing<T>,
}

impl<T: Zeroize> Secret<T> {
    pub fn new(label: &'static str, value: T) -> Self {
        Self {
            label,
            value: Zeroizing::new(value),
        }
    }

    /// The kind of secret, e.g. `"Password"`.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The placeholder written in place of this secret.
    pub fn mask(&self) -> &'static str {
        MASK
    }

    pub(crate) fn expose(&self) -> &T {
        &self.value
    }

    /// A copy of the value that is itself zeroed on drop, for handing to
    /// work that outlives the borrow (e.g. a blocking task).
    pub(crate) fn expose_owned(&self) -> Zeroizing<T>
    where
        T: Clone,
    {
        self.value.clone()
    }
}

impl<T: Zeroize + AsRef<str>> Secret<T> {
    fn as_text(&self) -> &str {
        AsRef::<str>::as_ref(self.expose())
    }

    /// True when the plaintext occurs literally within `text`.
    ///
    /// An empty secret is never considered contained.
    pub fn is_contained_in(&self, text: &str) -> bool {
        let secret = self.as_text();
        !secret.is_empty() && text.contains(secret)
    }

    /// Replaces every literal occurrence of the plaintext in `text`.
    ///
    /// Matching is by substring, so characters that are special in regular
    /// expressions carry no meaning here.
    pub fn scrub(&self, text: &str, mode: ScrubMode) -> String {
        let replacement = match mode {
            ScrubMode::Delete => "",
            ScrubMode::Default | ScrubMode::Mask => self.mask(),
        };

        let secret = self.as_text();
        if secret.is_empty() {
            return text.to_string();
        }

        text.replace(secret, replacement)
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.label, self.mask())
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mask())
    }
}
