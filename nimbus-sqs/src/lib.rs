//! Amazon SQS client for Nimbus
//!
//! Query protocol, API version `2012-11-05`. Bound operations: CreateQueue,
//! DeleteQueue, GetQueueUrl and ListQueues (paginated).

mod client;
pub mod input;
pub mod output;
pub mod types;

pub use client::{SqsClient, SERVICE};
pub use input::{CreateQueueInput, DeleteQueueInput, GetQueueUrlInput, ListQueuesInput};
pub use output::{CreateQueueOutput, DeleteQueueOutput, GetQueueUrlOutput, ListQueuesOutput};
pub use types::QueueAttributeName;
