use std::fmt;
use std::future::Future;
use tracing::{error, info, warn};

/// Result of a bounded retry loop
#[derive(Debug, PartialEq, Eq)]
pub enum RetryOutcome<T, E> {
    Succeeded { value: T, attempts: u32 },
    Exhausted { attempts: u32, last_error: E },
}

impl<T, E> RetryOutcome<T, E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Succeeded { .. })
    }
}

/// Runs `op` until it succeeds or `max_attempts` calls have failed
///
/// `op` receives the 1-based attempt number. There is no backoff between
/// attempts. A `max_attempts` of zero is treated as one.
pub async fn retry_bounded<T, E, F, Fut>(max_attempts: u32, mut op: F) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        info!("Attempt {}/{}", attempt, max_attempts);

        match op(attempt).await {
            Ok(value) => {
                info!("Succeeded on attempt {}", attempt);
                return RetryOutcome::Succeeded {
                    value,
                    attempts: attempt,
                };
            }
            Err(err) => {
                warn!("Attempt {}/{} failed: {}", attempt, max_attempts, err);
                if attempt >= max_attempts {
                    error!("Max attempts reached");
                    return RetryOutcome::Exhausted {
                        attempts: attempt,
                        last_error: err,
                    };
                }
                info!("Retrying...");
                attempt += 1;
            }
        }
    }
}
