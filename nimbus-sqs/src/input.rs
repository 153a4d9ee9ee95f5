//! SQS operation inputs

use std::collections::BTreeMap;

use nimbus_core::operation::required;
use nimbus_core::{Error, Input, QueryBody, Request};

use crate::types::QueueAttributeName;

pub const API_VERSION: &str = "2012-11-05";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteQueueInput {
    /// Case-sensitive URL of the queue
    pub queue_url: Option<String>,
}

impl DeleteQueueInput {
    pub fn new(queue_url: impl Into<String>) -> Self {
        Self {
            queue_url: Some(queue_url.into()),
        }
    }
}

impl Input for DeleteQueueInput {
    const OPERATION: &'static str = "DeleteQueue";

    fn request(&self) -> Result<Request, Error> {
        let queue_url = required(&self.queue_url, Self::OPERATION, "QueueUrl")?;

        let mut body = QueryBody::new(Self::OPERATION, API_VERSION);
        body.param("QueueUrl", queue_url);
        Ok(Request::query_protocol(&body))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateQueueInput {
    /// Up to 80 characters; FIFO queue names end in `.fifo`
    pub queue_name: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub tags: BTreeMap<String, String>,
}

impl CreateQueueInput {
    pub fn new(queue_name: impl Into<String>) -> Self {
        Self {
            queue_name: Some(queue_name.into()),
            ..Self::default()
        }
    }

    pub fn attribute(mut self, name: QueueAttributeName, value: impl Into<String>) -> Self {
        self.attributes.insert(name.as_str().to_string(), value.into());
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

impl Input for CreateQueueInput {
    const OPERATION: &'static str = "CreateQueue";

    fn request(&self) -> Result<Request, Error> {
        let queue_name = required(&self.queue_name, Self::OPERATION, "QueueName")?;

        let mut body = QueryBody::new(Self::OPERATION, API_VERSION);
        body.param("QueueName", queue_name)
            .flattened_map("Attribute", "Name", "Value", &self.attributes)
            .flattened_map("Tag", "Key", "Value", &self.tags);
        Ok(Request::query_protocol(&body))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetQueueUrlInput {
    pub queue_name: Option<String>,
    /// Account that created the queue, when it is not the caller's
    pub queue_owner_aws_account_id: Option<String>,
}

impl GetQueueUrlInput {
    pub fn new(queue_name: impl Into<String>) -> Self {
        Self {
            queue_name: Some(queue_name.into()),
            queue_owner_aws_account_id: None,
        }
    }
}

impl Input for GetQueueUrlInput {
    const OPERATION: &'static str = "GetQueueUrl";

    fn request(&self) -> Result<Request, Error> {
        let queue_name = required(&self.queue_name, Self::OPERATION, "QueueName")?;

        let mut body = QueryBody::new(Self::OPERATION, API_VERSION);
        body.param("QueueName", queue_name).opt_param(
            "QueueOwnerAWSAccountId",
            self.queue_owner_aws_account_id.as_deref(),
        );
        Ok(Request::query_protocol(&body))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQueuesInput {
    pub queue_name_prefix: Option<String>,
    pub next_token: Option<String>,
    /// Page size, 1 to 1000
    pub max_results: Option<i32>,
}

impl ListQueuesInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.queue_name_prefix = Some(prefix.into());
        self
    }
}

impl Input for ListQueuesInput {
    const OPERATION: &'static str = "ListQueues";

    fn request(&self) -> Result<Request, Error> {
        let mut body = QueryBody::new(Self::OPERATION, API_VERSION);
        body.opt_param("QueueNamePrefix", self.queue_name_prefix.as_deref())
            .opt_param("NextToken", self.next_token.as_deref())
            .opt_param("MaxResults", self.max_results);
        Ok(Request::query_protocol(&body))
    }
}
