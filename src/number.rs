//! Lenient integer parsing for environment and query values.

/// Parses a leading base-10 integer out of `num_like`.
///
/// Leading whitespace and a single `+`/`-` sign are accepted, and parsing
/// stops at the first non-digit, so `"42px"` yields `42`. Input with no
/// leading digits, or a value outside the `i64` range, fails with
/// `NaN: <input>`.
pub fn parse_int_strict(num_like: &str) -> Result<i64, String> {
    let trimmed = num_like.trim_start();
    let unsigned = trimmed.trim_start_matches(&['+', '-'][..]);
    // Only a single sign character is allowed.
    let sign_len = trimmed.len() - unsigned.len();
    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    if sign_len > 1 || digits_len == 0 {
        return Err(format!("NaN: {}", num_like));
    }

    trimmed[..sign_len + digits_len]
        .parse::<i64>()
        .map_err(|_| format!("NaN: {}", num_like))
}
