//! AWS CloudFormation client for Nimbus
//!
//! Query protocol, API version `2010-05-15`. Bound operations:
//! - DescribeStacks, DescribeStackEvents, ListStacks (paginated)
//! - DeleteStack

mod client;
pub mod input;
pub mod output;
pub mod types;

pub use client::{CloudFormationClient, SERVICE};
pub use input::{DeleteStackInput, DescribeStackEventsInput, DescribeStacksInput, ListStacksInput};
pub use output::{
    DeleteStackOutput, DescribeStackEventsOutput, DescribeStacksOutput, ListStacksOutput,
};
