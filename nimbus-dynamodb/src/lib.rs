//! Amazon DynamoDB client for Nimbus
//!
//! JSON 1.0 protocol with target prefix `DynamoDB_20120810`. Covers table
//! management, single item reads and writes, Query, Scan and PartiQL
//! statements (all three paginated), batch reads and writes, transactional
//! writes, and the `table_exists` / `table_not_exists` waiters.
//!
//! ```no_run
//! use nimbus_core::ClientConfig;
//! use nimbus_dynamodb::{DynamoDbClient, ScanInput};
//! use futures::TryStreamExt;
//!
//! # async fn run() -> Result<(), nimbus_core::Error> {
//! let client = DynamoDbClient::new(ClientConfig::load()?)?;
//! let mut items = client.scan_paginator(ScanInput::new("Thread")).items();
//! while let Some(item) = items.try_next().await? {
//!     println!("{:?}", item.get("Subject"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod attribute_value;
mod client;
pub mod input;
pub mod output;
pub mod types;
pub mod waiter;

pub use attribute_value::{AttributeValue, Blob, Item};
pub use client::{DynamoDbClient, SERVICE};
pub use input::{
    BatchGetItemInput, BatchWriteItemInput, CreateTableInput, DeleteItemInput, DeleteTableInput,
    DescribeTableInput, ExecuteStatementInput, GetItemInput, ListTablesInput, PutItemInput,
    QueryInput, ScanInput, TransactWriteItemsInput, UpdateItemInput, UpdateTableInput,
    UpdateTimeToLiveInput,
};
pub use output::{
    BatchGetItemOutput, BatchWriteItemOutput, CreateTableOutput, DeleteItemOutput,
    DeleteTableOutput, DescribeTableOutput, ExecuteStatementOutput, GetItemOutput,
    ListTablesOutput, PutItemOutput, QueryOutput, ScanOutput, TransactWriteItemsOutput,
    UpdateItemOutput, UpdateTableOutput, UpdateTimeToLiveOutput,
};
