use std::fmt::Display;
use std::time::Duration;

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, the first one included
    pub max_retries: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Every attempt failed; carries the cause of the last one
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: usize,
    pub last_error: E,
}

impl RetryPolicy {
    pub fn new(max_retries: usize, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Run `op` until it succeeds or the attempts run out.
    ///
    /// `op` receives the 1-based attempt number. There is no delay before the
    /// first attempt or after the last one.
    pub fn run<T, E, F>(&self, what: &str, mut op: F) -> Result<T, Exhausted<E>>
    where
        E: Display,
        F: FnMut(usize) -> Result<T, E>,
    {
        let attempts = self.max_retries.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt) {
                Ok(value) => {
                    if attempt > 1 {
                        log::info!("{} succeeded on attempt {}/{}", what, attempt, attempts);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    log::error!("{} attempt {}/{} failed: {}", what, attempt, attempts, e);

                    if attempt >= attempts {
                        return Err(Exhausted {
                            attempts,
                            last_error: e,
                        });
                    }

                    std::thread::sleep(self.delay);
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_stops_after_max_retries() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let mut calls = 0;

        let result: Result<(), _> = policy.run("launch", |_| {
            calls += 1;
            Err(format!("boom {}", calls))
        });

        let exhausted = result.unwrap_err();
        assert_eq!(calls, 3);
        assert_eq!(exhausted.attempts, 3);
        assert_eq!(exhausted.last_error, "boom 3");
    }

    #[test]
    fn test_first_success_has_no_delay() {
        let policy = RetryPolicy::new(3, Duration::from_secs(5));
        let start = Instant::now();

        let result: Result<u32, Exhausted<String>> = policy.run("launch", |_| Ok(7));

        assert_eq!(result.unwrap(), 7);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_recovers_on_later_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let mut seen = Vec::new();

        let result = policy.run("navigate", |attempt| {
            seen.push(attempt);
            if attempt < 2 {
                Err("not yet")
            } else {
                Ok(attempt)
            }
        });

        assert_eq!(result.unwrap(), 2);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_zero_retries_still_attempts_once() {
        let policy = RetryPolicy::new(0, Duration::from_millis(1));
        let mut calls = 0;

        let result: Result<(), _> = policy.run("launch", |_| {
            calls += 1;
            Err("nope")
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
