//! CloudFormation operation results

use nimbus_core::{Error, Input, Operation, PaginatedOperation, Response, XmlNode};
use serde::Serialize;

use crate::input::{
    DeleteStackInput, DescribeStackEventsInput, DescribeStacksInput, ListStacksInput,
};
use crate::types::{Stack, StackEvent, StackSummary};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeStacksOutput {
    pub stacks: Vec<Stack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl DescribeStacksOutput {
    fn from_xml(result: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            stacks: result.list("Stacks", Stack::from_xml)?,
            next_token: result.opt_string("NextToken"),
        })
    }
}

impl Operation for DescribeStacksInput {
    type Output = DescribeStacksOutput;

    fn parse(response: Response) -> Result<Self::Output, Error> {
        DescribeStacksOutput::from_xml(&response.query_result(Self::OPERATION)?)
    }
}

impl PaginatedOperation for DescribeStacksInput {
    type Item = Stack;

    fn next_page(&self, output: &Self::Output) -> Option<Self> {
        output.next_token.as_ref().map(|token| Self {
            next_token: Some(token.clone()),
            ..self.clone()
        })
    }

    fn into_items(output: Self::Output) -> Vec<Stack> {
        output.stacks
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeStackEventsOutput {
    pub stack_events: Vec<StackEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl Operation for DescribeStackEventsInput {
    type Output = DescribeStackEventsOutput;

    fn parse(response: Response) -> Result<Self::Output, Error> {
        let result = response.query_result(Self::OPERATION)?;
        Ok(DescribeStackEventsOutput {
            stack_events: result.list("StackEvents", StackEvent::from_xml)?,
            next_token: result.opt_string("NextToken"),
        })
    }
}

impl PaginatedOperation for DescribeStackEventsInput {
    type Item = StackEvent;

    fn next_page(&self, output: &Self::Output) -> Option<Self> {
        output.next_token.as_ref().map(|token| Self {
            next_token: Some(token.clone()),
            ..self.clone()
        })
    }

    fn into_items(output: Self::Output) -> Vec<StackEvent> {
        output.stack_events
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListStacksOutput {
    pub stack_summaries: Vec<StackSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl Operation for ListStacksInput {
    type Output = ListStacksOutput;

    fn parse(response: Response) -> Result<Self::Output, Error> {
        let result = response.query_result(Self::OPERATION)?;
        Ok(ListStacksOutput {
            stack_summaries: result.list("StackSummaries", StackSummary::from_xml)?,
            next_token: result.opt_string("NextToken"),
        })
    }
}

impl PaginatedOperation for ListStacksInput {
    type Item = StackSummary;

    fn next_page(&self, output: &Self::Output) -> Option<Self> {
        output.next_token.as_ref().map(|token| Self {
            next_token: Some(token.clone()),
            ..self.clone()
        })
    }

    fn into_items(output: Self::Output) -> Vec<StackSummary> {
        output.stack_summaries
    }
}

/// DeleteStack has no result fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteStackOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Operation for DeleteStackInput {
    type Output = DeleteStackOutput;

    fn parse(response: Response) -> Result<Self::Output, Error> {
        let request_id = match response.request_id {
            Some(id) => Some(id),
            None => response
                .xml()?
                .child("ResponseMetadata")
                .and_then(|m| m.opt_string("RequestId")),
        };
        Ok(DeleteStackOutput { request_id })
    }
}
