//! SQS client

use async_trait::async_trait;
use nimbus_core::{
    AwsClient, ClientConfig, Dispatch, Error, Operation, Paginator, Protocol, ServiceMetadata,
};
use tracing::info;

use crate::input::{
    CreateQueueInput, DeleteQueueInput, GetQueueUrlInput, ListQueuesInput, API_VERSION,
};
use crate::output::{CreateQueueOutput, DeleteQueueOutput, GetQueueUrlOutput, ListQueuesOutput};

pub const SERVICE: ServiceMetadata = ServiceMetadata {
    signing_name: "sqs",
    endpoint_prefix: "sqs",
    protocol: Protocol::Query,
    api_version: API_VERSION,
};

#[derive(Debug, Clone)]
pub struct SqsClient {
    inner: AwsClient,
}

impl SqsClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            inner: AwsClient::new(SERVICE, config)?,
        })
    }

    /// Deletes the queue and its messages, even if it is not empty
    pub async fn delete_queue(&self, input: DeleteQueueInput) -> Result<DeleteQueueOutput, Error> {
        let queue_url = input.queue_url.clone();
        let output = self.inner.call(input).await?;
        info!(queue_url = ?queue_url, "Queue deleted");
        Ok(output)
    }

    pub async fn create_queue(&self, input: CreateQueueInput) -> Result<CreateQueueOutput, Error> {
        let output = self.inner.call(input).await?;
        info!(queue_url = %output.queue_url, "Queue created");
        Ok(output)
    }

    pub async fn get_queue_url(&self, input: GetQueueUrlInput) -> Result<GetQueueUrlOutput, Error> {
        self.inner.call(input).await
    }

    pub async fn list_queues(&self, input: ListQueuesInput) -> Result<ListQueuesOutput, Error> {
        self.inner.call(input).await
    }

    /// Queue URLs across every page
    pub fn list_queues_paginator(&self, input: ListQueuesInput) -> Paginator<Self, ListQueuesInput> {
        Paginator::new(self.clone(), input)
    }
}

#[async_trait]
impl Dispatch for SqsClient {
    async fn dispatch<O: Operation>(&self, operation: O) -> Result<O::Output, Error> {
        self.inner.call(operation).await
    }

    fn prefetch(&self) -> bool {
        self.inner.config().prefetch
    }
}
