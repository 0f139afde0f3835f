//! Duration formatting and deadlines for async work.

use std::fmt;
use std::future::Future;
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(60 * 60 * 24);
const WEEK: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Renders a duration in the largest unit it fills, with two decimals.
///
/// `stringify(Duration::from_millis(1500)) == "1.50sec"`
pub fn stringify(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if duration < Duration::from_millis(1) {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if duration < Duration::from_secs(1) {
        format!("{:.2}ms", secs * 1_000.0)
    } else if duration < MINUTE {
        format!("{:.2}sec", secs)
    } else if duration < HOUR {
        format!("{:.2}min", secs / MINUTE.as_secs_f64())
    } else if duration < DAY {
        format!("{:.2}hr", secs / HOUR.as_secs_f64())
    } else if duration < WEEK {
        format!("{:.2}day", secs / DAY.as_secs_f64())
    } else {
        format!("{:.2}wk", secs / WEEK.as_secs_f64())
    }
}

/// Raised when a deadline passes before the awaited work completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutError {
    message: String,
    timeout: Duration,
}

impl TimeoutError {
    pub fn new(message: impl Into<String>, timeout: Duration) -> Self {
        Self {
            message: message.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.message, stringify(self.timeout))
    }
}

impl std::error::Error for TimeoutError {}

/// Resolves `future`, or fails with a [`TimeoutError`] once `timeout` has
/// elapsed. The future is dropped on timeout.
///
/// `message` defaults to `"timeout exceeded"`.
pub async fn resolve_with_timeout<F>(
    future: F,
    timeout: Duration,
    message: Option<&str>,
) -> Result<F::Output, TimeoutError>
where
    F: Future,
{
    tokio::time::timeout(timeout, future).await.map_err(|_| {
        TimeoutError::new(message.unwrap_or("timeout exceeded"), timeout)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stringify_picks_largest_unit() {
        assert_eq!(stringify(Duration::from_micros(250)), "250.00µs");
        assert_eq!(stringify(Duration::from_millis(12)), "12.00ms");
        assert_eq!(stringify(Duration::from_millis(1500)), "1.50sec");
        assert_eq!(stringify(Duration::from_secs(90)), "1.50min");
        assert_eq!(stringify(Duration::from_secs(60 * 60 * 3)), "3.00hr");
        assert_eq!(stringify(Duration::from_secs(60 * 60 * 36)), "1.50day");
        assert_eq!(stringify(Duration::from_secs(60 * 60 * 24 * 14)), "2.00wk");
    }

    #[tokio::test]
    async fn test_resolves_before_deadline() {
        let value = resolve_with_timeout(async { 7 }, Duration::from_secs(1), None).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn test_times_out_with_default_message() {
        let slow = tokio::time::sleep(Duration::from_secs(10));
        let error = resolve_with_timeout(slow, Duration::from_millis(50), None)
            .await
            .unwrap_err();

        assert_eq!(error.timeout(), Duration::from_millis(50));
        assert_eq!(error.to_string(), "timeout exceeded: 50.00ms");
    }

    #[tokio::test]
    async fn test_times_out_with_custom_message() {
        let slow = tokio::time::sleep(Duration::from_secs(10));
        let error = resolve_with_timeout(slow, Duration::from_secs(2), Some("hash deadline"))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "hash deadline: 2.00sec");
    }
}
