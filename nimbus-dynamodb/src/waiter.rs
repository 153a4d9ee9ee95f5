//! Table waiters
//!
//! Both poll DescribeTable, by default every 20 seconds for at most 25
//! attempts. Pass a custom [`Waiter`] to the `_with` client methods to change
//! either.

use std::time::Duration;

use nimbus_core::{Error, ErrorCode, Waiter, WaiterState};

use crate::output::DescribeTableOutput;
use crate::types::TableStatus;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(20);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 25;

pub fn table_exists() -> Waiter {
    Waiter::new("TableExists", DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS)
}

pub fn table_not_exists() -> Waiter {
    Waiter::new("TableNotExists", DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS)
}

pub(crate) fn table_exists_state(outcome: &Result<DescribeTableOutput, Error>) -> WaiterState {
    match outcome {
        Ok(output) => {
            let status = output.table.as_ref().and_then(|t| t.table_status.as_ref());
            if status == Some(&TableStatus::Active) {
                WaiterState::Success
            } else {
                WaiterState::Retry
            }
        }
        Err(e) if e.is_code(&ErrorCode::ResourceNotFoundException) => WaiterState::Retry,
        Err(e) => WaiterState::Failure(e.to_string()),
    }
}

pub(crate) fn table_not_exists_state(outcome: &Result<DescribeTableOutput, Error>) -> WaiterState {
    match outcome {
        Ok(_) => WaiterState::Retry,
        Err(e) if e.is_code(&ErrorCode::ResourceNotFoundException) => WaiterState::Success,
        Err(e) => WaiterState::Failure(e.to_string()),
    }
}
