//! CloudFormation operation inputs

use nimbus_core::operation::required;
use nimbus_core::{Error, Input, QueryBody, Request};

use crate::types::StackStatus;

pub const API_VERSION: &str = "2010-05-15";

/// Describe one stack, or every stack in the region when no name is given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeStacksInput {
    /// Name or unique stack ID
    pub stack_name: Option<String>,
    pub next_token: Option<String>,
}

impl DescribeStacksInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack_name(mut self, stack_name: impl Into<String>) -> Self {
        self.stack_name = Some(stack_name.into());
        self
    }
}

impl Input for DescribeStacksInput {
    const OPERATION: &'static str = "DescribeStacks";

    fn request(&self) -> Result<Request, Error> {
        let mut body = QueryBody::new(Self::OPERATION, API_VERSION);
        body.opt_param("StackName", self.stack_name.as_deref())
            .opt_param("NextToken", self.next_token.as_deref());
        Ok(Request::query_protocol(&body))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeStackEventsInput {
    pub stack_name: Option<String>,
    pub next_token: Option<String>,
}

impl DescribeStackEventsInput {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: Some(stack_name.into()),
            next_token: None,
        }
    }
}

impl Input for DescribeStackEventsInput {
    const OPERATION: &'static str = "DescribeStackEvents";

    fn request(&self) -> Result<Request, Error> {
        let mut body = QueryBody::new(Self::OPERATION, API_VERSION);
        body.opt_param("StackName", self.stack_name.as_deref())
            .opt_param("NextToken", self.next_token.as_deref());
        Ok(Request::query_protocol(&body))
    }
}

/// List stack summaries, including deleted stacks from the last 90 days
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListStacksInput {
    pub next_token: Option<String>,
    /// Only stacks in one of these states; empty means all
    pub stack_status_filter: Vec<StackStatus>,
}

impl ListStacksInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StackStatus) -> Self {
        self.stack_status_filter.push(status);
        self
    }
}

impl Input for ListStacksInput {
    const OPERATION: &'static str = "ListStacks";

    fn request(&self) -> Result<Request, Error> {
        let mut body = QueryBody::new(Self::OPERATION, API_VERSION);
        body.opt_param("NextToken", self.next_token.as_deref())
            .member_list(
                "StackStatusFilter",
                self.stack_status_filter.iter().map(StackStatus::as_str),
            );
        Ok(Request::query_protocol(&body))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteStackInput {
    pub stack_name: Option<String>,
    /// Logical IDs of resources to keep, for stacks in `DELETE_FAILED`
    pub retain_resources: Vec<String>,
    pub role_arn: Option<String>,
    /// Idempotency token
    pub client_request_token: Option<String>,
}

impl DeleteStackInput {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: Some(stack_name.into()),
            ..Self::default()
        }
    }
}

impl Input for DeleteStackInput {
    const OPERATION: &'static str = "DeleteStack";

    fn request(&self) -> Result<Request, Error> {
        let stack_name = required(&self.stack_name, Self::OPERATION, "StackName")?;

        let mut body = QueryBody::new(Self::OPERATION, API_VERSION);
        body.param("StackName", stack_name)
            .member_list("RetainResources", &self.retain_resources)
            .opt_param("RoleARN", self.role_arn.as_deref())
            .opt_param("ClientRequestToken", self.client_request_token.as_deref());
        Ok(Request::query_protocol(&body))
    }
}
