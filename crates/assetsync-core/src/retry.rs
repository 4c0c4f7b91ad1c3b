//! Retry with a fixed pause between attempts

use std::fmt::Display;
use std::time::Duration;

/// Run `attempt_fn` up to `attempts` times, sleeping `wait` between tries.
///
/// Every error is treated as transient. Returns the first success, or the
/// error of the last attempt. `attempts == 0` still makes one attempt.
pub fn retry_fixed<T, E: Display>(
    label: &str,
    attempts: u32,
    wait: Duration,
    mut attempt_fn: impl FnMut() -> Result<T, E>,
) -> Result<T, E> {
    let attempts = attempts.max(1);
    let mut attempt = 1u32;
    loop {
        match attempt_fn() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < attempts => {
                log::debug!("{label}: attempt {attempt}/{attempts} failed: {e}, retrying...");
                attempt += 1;
                std::thread::sleep(wait);
            }
            Err(e) => {
                log::debug!("{label}: giving up after {attempts} attempts: {e}");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_success_returns_immediately() {
        let mut calls = 0;
        let result: Result<u32, String> = retry_fixed("t", 3, Duration::ZERO, || {
            calls += 1;
            Ok(7)
        });
        assert_eq!(result, Ok(7));
        assert_eq!(calls, 1);
    }

    #[test]
    fn recovers_on_later_attempt() {
        let mut calls = 0;
        let result = retry_fixed("t", 3, Duration::ZERO, || {
            calls += 1;
            if calls < 3 {
                Err(format!("boom {calls}"))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn exhaustion_returns_last_error() {
        let mut calls = 0;
        let result: Result<(), String> = retry_fixed("t", 3, Duration::ZERO, || {
            calls += 1;
            Err(format!("boom {calls}"))
        });
        assert_eq!(result, Err("boom 3".to_string()));
        assert_eq!(calls, 3);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let mut calls = 0;
        let result: Result<(), &str> = retry_fixed("t", 0, Duration::ZERO, || {
            calls += 1;
            Err("nope")
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn waits_between_attempts_only() {
        let start = std::time::Instant::now();
        let _: Result<(), &str> = retry_fixed("t", 3, Duration::from_millis(20), || Err("x"));
        // two gaps, no trailing wait
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(40));
        assert!(elapsed < Duration::from_millis(1000));
    }
}
