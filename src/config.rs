use std::env;
use std::time::Duration;

use crate::auth::HASH_COST;
use crate::error::AppError;
use crate::number::parse_int_strict;
use crate::validation::{between_range, with_min};

/// bcrypt accepts work factors in this range.
const MIN_HASH_COST: i64 = 4;
const MAX_HASH_COST: i64 = 31;
const DEFAULT_HASH_TIMEOUT_MS: i64 = 5_000;

/// Process-wide settings, read once at startup and passed to whoever needs
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// bcrypt work factor for new hashes (`PASSWORD_HASH_COST`).
    pub hash_cost: u32,
    /// Deadline for a single hash (`PASSWORD_HASH_TIMEOUT_MS`).
    pub hash_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let hash_cost = read_int(
            "PASSWORD_HASH_COST",
            i64::from(HASH_COST),
            between_range(MIN_HASH_COST, MAX_HASH_COST),
        )?;
        let hash_timeout_ms =
            read_int("PASSWORD_HASH_TIMEOUT_MS", DEFAULT_HASH_TIMEOUT_MS, with_min(1))?;

        Ok(Self {
            // Both values were range-checked above.
            hash_cost: hash_cost as u32,
            hash_timeout: Duration::from_millis(hash_timeout_ms as u64),
        })
    }
}

fn read_int(
    name: &str,
    default: i64,
    validate: impl Fn(i64) -> Result<i64, String>,
) -> Result<i64, AppError> {
    match env::var(name) {
        Ok(raw) => parse_int_strict(&raw)
            .and_then(validate)
            .map_err(|msg| AppError::ConfigError(format!("{}: {}", name, msg))),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(AppError::ConfigError(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    }

    // Runs `test_logic` with the given variables set, restoring them after.
    fn with_vars<F>(vars: &[(&str, Option<&str>)], test_logic: F)
    where
        F: FnOnce(),
    {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let originals: Vec<_> = vars
            .iter()
            .map(|(name, _)| (name.to_string(), env::var(name).ok()))
            .collect();
        for (name, value) in vars {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(test_logic));

        for (name, original) in originals {
            match original {
                Some(value) => env::set_var(&name, value),
                None => env::remove_var(&name),
            }
        }

        if let Err(panic_payload) = result {
            std::panic::resume_unwind(panic_payload);
        }
    }

    #[test]
    fn test_config_defaults() {
        with_vars(
            &[("PASSWORD_HASH_COST", None), ("PASSWORD_HASH_TIMEOUT_MS", None)],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.hash_cost, HASH_COST);
                assert_eq!(config.hash_timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_config_custom_values() {
        with_vars(
            &[
                ("PASSWORD_HASH_COST", Some("12")),
                ("PASSWORD_HASH_TIMEOUT_MS", Some("250")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.hash_cost, 12);
                assert_eq!(config.hash_timeout, Duration::from_millis(250));
            },
        );
    }

    #[test]
    fn test_config_rejects_out_of_range_cost() {
        with_vars(&[("PASSWORD_HASH_COST", Some("40"))], || {
            match Config::from_env() {
                Err(AppError::ConfigError(msg)) => {
                    assert_eq!(msg, "PASSWORD_HASH_COST: the value cannot exceed 31")
                }
                other => panic!("Unexpected result: {:?}", other),
            }
        });
    }

    #[test]
    fn test_config_rejects_non_numeric_timeout() {
        with_vars(
            &[
                ("PASSWORD_HASH_COST", None),
                ("PASSWORD_HASH_TIMEOUT_MS", Some("soon")),
            ],
            || match Config::from_env() {
                Err(AppError::ConfigError(msg)) => {
                    assert_eq!(msg, "PASSWORD_HASH_TIMEOUT_MS: NaN: soon")
                }
                other => panic!("Unexpected result: {:?}", other),
            },
        );
    }
}
