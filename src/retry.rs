use crate::error::FetchError;
use std::future::Future;
use tracing::{debug, error, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How many times a single request may be attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }
}

/// How a retried request finished
#[derive(Debug, PartialEq)]
pub enum RetryOutcome<T> {
    Succeeded(T),
    Exhausted { attempts: u32, last_error: FetchError },
    Aborted(FetchError),
}

/// State of a bounded retry loop.
///
/// Starts in `Attempting { attempt: 1 }` and ends in `Done`. `attempt` never
/// exceeds `RetryPolicy::max_attempts`.
#[derive(Debug, PartialEq)]
pub enum RetryState<T> {
    Attempting { attempt: u32 },
    Done(RetryOutcome<T>),
}

impl<T> RetryState<T> {
    pub fn start() -> Self {
        RetryState::Attempting { attempt: 1 }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RetryState::Done(_))
    }

    /// Feed the result of the current attempt into the machine
    pub fn advance(self, policy: &RetryPolicy, result: Result<T, FetchError>) -> Self {
        let attempt = match self {
            RetryState::Attempting { attempt } => attempt,
            done => return done,
        };

        match result {
            Ok(value) => RetryState::Done(RetryOutcome::Succeeded(value)),
            Err(e) if !e.is_retryable() => RetryState::Done(RetryOutcome::Aborted(e)),
            Err(e) if attempt >= policy.max_attempts => {
                RetryState::Done(RetryOutcome::Exhausted {
                    attempts: attempt,
                    last_error: e,
                })
            }
            Err(_) => RetryState::Attempting {
                attempt: attempt + 1,
            },
        }
    }
}

/// Run `op` until it succeeds, fails permanently or runs out of attempts.
///
/// Retries happen immediately; there is no backoff between attempts.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 1;

    loop {
        debug!("{} (attempt {}/{})", label, attempt, policy.max_attempts);
        let result = op(attempt).await;

        // Log the failure here, `advance` consumes it
        let failure = result.as_ref().err().map(ToString::to_string);

        match (RetryState::Attempting { attempt }).advance(policy, result) {
            RetryState::Attempting { attempt: next } => {
                warn!(
                    "{} failed: {}, retrying ({}/{})",
                    label,
                    failure.unwrap_or_default(),
                    attempt,
                    policy.max_attempts
                );
                attempt = next;
            }
            RetryState::Done(outcome) => {
                match &outcome {
                    RetryOutcome::Exhausted {
                        attempts,
                        last_error,
                    } => error!("{} failed after {} attempts: {}", label, attempts, last_error),
                    RetryOutcome::Aborted(e) => error!("{} failed permanently: {}", label, e),
                    RetryOutcome::Succeeded(_) => {}
                }
                return outcome;
            }
        }
    }
}
