//! Retry/backoff state machine for translation requests.
//!
//! The machine is pure: callers feed it events and perform the sleeping and
//! requesting themselves.

use std::time::Duration;

/// Classification of one request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Ok,
    /// HTTP 429.
    RateLimited,
    /// Any other non-200 status, a connection error, or an unreadable body.
    TransientError,
    Timeout,
    /// A 200 whose JSON body has no translation. Retried without a pause.
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Idle,
    /// `attempt` is 1-based.
    Attempting { attempt: u32 },
    BackingOff { attempt: u32, delay: Duration },
    Succeeded,
    Exhausted { last: ResponseClass },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryEvent {
    Start,
    Response(ResponseClass),
    BackoffElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before the attempt after `attempt`: rate limiting backs off
    /// linearly with the attempt number, a malformed success is retried at
    /// once, other failures use the base delay.
    pub fn backoff_delay(&self, attempt: u32, class: ResponseClass) -> Duration {
        match class {
            ResponseClass::Ok | ResponseClass::Malformed => Duration::ZERO,
            ResponseClass::RateLimited => self.base_delay * attempt,
            ResponseClass::TransientError | ResponseClass::Timeout => self.base_delay,
        }
    }

    /// Advance the machine. Pairs with no defined transition leave the state as is.
    pub fn transition(&self, state: RetryState, event: RetryEvent) -> RetryState {
        match (state, event) {
            (RetryState::Idle, RetryEvent::Start) => RetryState::Attempting { attempt: 1 },
            (RetryState::Attempting { .. }, RetryEvent::Response(ResponseClass::Ok)) => {
                RetryState::Succeeded
            }
            (RetryState::Attempting { attempt }, RetryEvent::Response(class)) => {
                if attempt >= self.max_attempts {
                    RetryState::Exhausted { last: class }
                } else {
                    RetryState::BackingOff {
                        attempt,
                        delay: self.backoff_delay(attempt, class),
                    }
                }
            }
            (RetryState::BackingOff { attempt, .. }, RetryEvent::BackoffElapsed) => {
                RetryState::Attempting {
                    attempt: attempt + 1,
                }
            }
            (state, _) => state,
        }
    }
}
