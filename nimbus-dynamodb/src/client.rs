//! DynamoDB client

use async_trait::async_trait;
use nimbus_core::{
    AwsClient, ClientConfig, Dispatch, Error, Input, Operation, Paginator, Protocol,
    ServiceMetadata, Waiter,
};
use tracing::info;

use crate::input::{
    BatchGetItemInput, BatchWriteItemInput, CreateTableInput, DeleteItemInput, DeleteTableInput,
    DescribeTableInput, ExecuteStatementInput, GetItemInput, ListTablesInput, PutItemInput,
    QueryInput, ScanInput, TransactWriteItemsInput, UpdateItemInput, UpdateTableInput,
    UpdateTimeToLiveInput, API_VERSION,
};
use crate::output::{
    BatchGetItemOutput, BatchWriteItemOutput, CreateTableOutput, DeleteItemOutput,
    DeleteTableOutput, DescribeTableOutput, ExecuteStatementOutput, GetItemOutput,
    ListTablesOutput, PutItemOutput, QueryOutput, ScanOutput, TransactWriteItemsOutput,
    UpdateItemOutput, UpdateTableOutput, UpdateTimeToLiveOutput,
};
use crate::waiter;

pub const SERVICE: ServiceMetadata = ServiceMetadata {
    signing_name: "dynamodb",
    endpoint_prefix: "dynamodb",
    protocol: Protocol::Json,
    api_version: API_VERSION,
};

#[derive(Debug, Clone)]
pub struct DynamoDbClient {
    inner: AwsClient,
}

impl DynamoDbClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            inner: AwsClient::new(SERVICE, config)?,
        })
    }

    pub async fn create_table(&self, input: CreateTableInput) -> Result<CreateTableOutput, Error> {
        let table_name = input.table_name.clone();
        let output = self.inner.call(input).await?;
        info!(table = ?table_name, "Table creation requested");
        Ok(output)
    }

    pub async fn delete_table(&self, input: DeleteTableInput) -> Result<DeleteTableOutput, Error> {
        let table_name = input.table_name.clone();
        let output = self.inner.call(input).await?;
        info!(table = ?table_name, "Table deletion requested");
        Ok(output)
    }

    pub async fn describe_table(
        &self,
        input: DescribeTableInput,
    ) -> Result<DescribeTableOutput, Error> {
        self.inner.call(input).await
    }

    pub async fn list_tables(&self, input: ListTablesInput) -> Result<ListTablesOutput, Error> {
        self.inner.call(input).await
    }

    /// Table names across every page
    pub fn list_tables_paginator(&self, input: ListTablesInput) -> Paginator<Self, ListTablesInput> {
        Paginator::new(self.clone(), input)
    }

    pub async fn update_table(&self, input: UpdateTableInput) -> Result<UpdateTableOutput, Error> {
        let table_name = input.table_name.clone();
        let output = self.inner.call(input).await?;
        info!(table = ?table_name, "Table update requested");
        Ok(output)
    }

    pub async fn update_time_to_live(
        &self,
        input: UpdateTimeToLiveInput,
    ) -> Result<UpdateTimeToLiveOutput, Error> {
        self.inner.call(input).await
    }

    pub async fn put_item(&self, input: PutItemInput) -> Result<PutItemOutput, Error> {
        self.inner.call(input).await
    }

    pub async fn get_item(&self, input: GetItemInput) -> Result<GetItemOutput, Error> {
        self.inner.call(input).await
    }

    pub async fn delete_item(&self, input: DeleteItemInput) -> Result<DeleteItemOutput, Error> {
        self.inner.call(input).await
    }

    pub async fn update_item(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, Error> {
        self.inner.call(input).await
    }

    /// One page of results; see [`Self::query_paginator`]
    pub async fn query(&self, input: QueryInput) -> Result<QueryOutput, Error> {
        self.inner.call(input).await
    }

    pub fn query_paginator(&self, input: QueryInput) -> Paginator<Self, QueryInput> {
        Paginator::new(self.clone(), input)
    }

    pub async fn scan(&self, input: ScanInput) -> Result<ScanOutput, Error> {
        self.inner.call(input).await
    }

    pub fn scan_paginator(&self, input: ScanInput) -> Paginator<Self, ScanInput> {
        Paginator::new(self.clone(), input)
    }

    pub async fn execute_statement(
        &self,
        input: ExecuteStatementInput,
    ) -> Result<ExecuteStatementOutput, Error> {
        self.inner.call(input).await
    }

    pub fn execute_statement_paginator(
        &self,
        input: ExecuteStatementInput,
    ) -> Paginator<Self, ExecuteStatementInput> {
        Paginator::new(self.clone(), input)
    }

    pub async fn batch_get_item(
        &self,
        input: BatchGetItemInput,
    ) -> Result<BatchGetItemOutput, Error> {
        self.inner.call(input).await
    }

    pub async fn batch_write_item(
        &self,
        input: BatchWriteItemInput,
    ) -> Result<BatchWriteItemOutput, Error> {
        self.inner.call(input).await
    }

    pub async fn transact_write_items(
        &self,
        input: TransactWriteItemsInput,
    ) -> Result<TransactWriteItemsOutput, Error> {
        self.inner.call(input).await
    }

    /// Wait until the table is `ACTIVE`
    pub async fn table_exists(&self, input: DescribeTableInput) -> Result<(), Error> {
        self.table_exists_with(input, waiter::table_exists()).await
    }

    pub async fn table_exists_with(
        &self,
        input: DescribeTableInput,
        waiter: Waiter,
    ) -> Result<(), Error> {
        input.request()?;
        waiter
            .wait(
                || self.describe_table(input.clone()),
                waiter::table_exists_state,
            )
            .await
    }

    /// Wait until DescribeTable reports the table as gone
    pub async fn table_not_exists(&self, input: DescribeTableInput) -> Result<(), Error> {
        self.table_not_exists_with(input, waiter::table_not_exists()).await
    }

    pub async fn table_not_exists_with(
        &self,
        input: DescribeTableInput,
        waiter: Waiter,
    ) -> Result<(), Error> {
        input.request()?;
        waiter
            .wait(
                || self.describe_table(input.clone()),
                waiter::table_not_exists_state,
            )
            .await
    }
}

#[async_trait]
impl Dispatch for DynamoDbClient {
    async fn dispatch<O: Operation>(&self, operation: O) -> Result<O::Output, Error> {
        self.inner.call(operation).await
    }

    fn prefetch(&self) -> bool {
        self.inner.config().prefetch
    }
}
