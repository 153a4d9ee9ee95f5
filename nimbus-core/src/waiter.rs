//! Polling until a resource reaches a state

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::Error;

/// What one poll says about the awaited state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaiterState {
    Success,
    Retry,
    Failure(String),
}

#[derive(Debug, Clone, Copy)]
pub struct Waiter {
    pub name: &'static str,
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Waiter {
    pub fn new(name: &'static str, delay: Duration, max_attempts: u32) -> Self {
        Self {
            name,
            delay,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Call `poll` until `accept` reports success or failure
    ///
    /// Errors from `poll` are handed to `accept` too, since "not found" is
    /// often the awaited state. An error `accept` retries on is only returned
    /// once the attempts run out.
    pub async fn wait<T, F, Fut>(
        &self,
        mut poll: F,
        accept: impl Fn(&Result<T, Error>) -> WaiterState,
    ) -> Result<(), Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        for attempt in 1..=self.max_attempts {
            let outcome = poll().await;
            match accept(&outcome) {
                WaiterState::Success => return Ok(()),
                WaiterState::Failure(reason) => {
                    return Err(Error::WaiterFailure {
                        waiter: self.name,
                        reason,
                    })
                }
                WaiterState::Retry => {
                    debug!(waiter = self.name, attempt, "Waiter condition not met yet");
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        Err(Error::WaiterTimeout {
            waiter: self.name,
            attempts: self.max_attempts,
        })
    }
}
