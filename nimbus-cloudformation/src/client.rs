//! CloudFormation client

use async_trait::async_trait;
use nimbus_core::{
    AwsClient, ClientConfig, Dispatch, Error, Operation, Paginator, Protocol, ServiceMetadata,
};
use tracing::info;

use crate::input::{
    DeleteStackInput, DescribeStackEventsInput, DescribeStacksInput, ListStacksInput, API_VERSION,
};
use crate::output::{
    DeleteStackOutput, DescribeStackEventsOutput, DescribeStacksOutput, ListStacksOutput,
};

pub const SERVICE: ServiceMetadata = ServiceMetadata {
    signing_name: "cloudformation",
    endpoint_prefix: "cloudformation",
    protocol: Protocol::Query,
    api_version: API_VERSION,
};

#[derive(Debug, Clone)]
pub struct CloudFormationClient {
    inner: AwsClient,
}

impl CloudFormationClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            inner: AwsClient::new(SERVICE, config)?,
        })
    }

    /// First page of DescribeStacks; see [`Self::describe_stacks_paginator`]
    pub async fn describe_stacks(
        &self,
        input: DescribeStacksInput,
    ) -> Result<DescribeStacksOutput, Error> {
        self.inner.call(input).await
    }

    pub fn describe_stacks_paginator(
        &self,
        input: DescribeStacksInput,
    ) -> Paginator<Self, DescribeStacksInput> {
        Paginator::new(self.clone(), input)
    }

    pub async fn describe_stack_events(
        &self,
        input: DescribeStackEventsInput,
    ) -> Result<DescribeStackEventsOutput, Error> {
        self.inner.call(input).await
    }

    pub fn describe_stack_events_paginator(
        &self,
        input: DescribeStackEventsInput,
    ) -> Paginator<Self, DescribeStackEventsInput> {
        Paginator::new(self.clone(), input)
    }

    pub async fn list_stacks(&self, input: ListStacksInput) -> Result<ListStacksOutput, Error> {
        self.inner.call(input).await
    }

    pub fn list_stacks_paginator(&self, input: ListStacksInput) -> Paginator<Self, ListStacksInput> {
        Paginator::new(self.clone(), input)
    }

    pub async fn delete_stack(&self, input: DeleteStackInput) -> Result<DeleteStackOutput, Error> {
        let stack_name = input.stack_name.clone();
        let output = self.inner.call(input).await?;
        info!(stack = ?stack_name, "Stack deletion requested");
        Ok(output)
    }
}

#[async_trait]
impl Dispatch for CloudFormationClient {
    async fn dispatch<O: Operation>(&self, operation: O) -> Result<O::Output, Error> {
        self.inner.call(operation).await
    }

    fn prefetch(&self) -> bool {
        self.inner.config().prefetch
    }
}
