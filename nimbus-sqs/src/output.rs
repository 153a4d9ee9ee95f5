//! SQS operation results

use nimbus_core::{Error, Input, Operation, PaginatedOperation, Response};
use serde::Serialize;

use crate::input::{CreateQueueInput, DeleteQueueInput, GetQueueUrlInput, ListQueuesInput};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteQueueOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Operation for DeleteQueueInput {
    type Output = DeleteQueueOutput;

    fn parse(response: Response) -> Result<Self::Output, Error> {
        let request_id = match response.request_id {
            Some(id) => Some(id),
            None => response
                .xml()?
                .child("ResponseMetadata")
                .and_then(|m| m.opt_string("RequestId")),
        };
        Ok(DeleteQueueOutput { request_id })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateQueueOutput {
    pub queue_url: String,
}

impl Operation for CreateQueueInput {
    type Output = CreateQueueOutput;

    fn parse(response: Response) -> Result<Self::Output, Error> {
        let result = response.query_result(Self::OPERATION)?;
        Ok(CreateQueueOutput {
            queue_url: result.required_string("QueueUrl")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetQueueUrlOutput {
    pub queue_url: String,
}

impl Operation for GetQueueUrlInput {
    type Output = GetQueueUrlOutput;

    fn parse(response: Response) -> Result<Self::Output, Error> {
        let result = response.query_result(Self::OPERATION)?;
        Ok(GetQueueUrlOutput {
            queue_url: result.required_string("QueueUrl")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListQueuesOutput {
    pub queue_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl Operation for ListQueuesInput {
    type Output = ListQueuesOutput;

    fn parse(response: Response) -> Result<Self::Output, Error> {
        let result = response.query_result(Self::OPERATION)?;
        // Flattened: one <QueueUrl> per queue, no wrapper
        Ok(ListQueuesOutput {
            queue_urls: result
                .children("QueueUrl")
                .filter(|n| !n.text.is_empty())
                .map(|n| n.text.clone())
                .collect(),
            next_token: result.opt_string("NextToken"),
        })
    }
}

impl PaginatedOperation for ListQueuesInput {
    type Item = String;

    fn next_page(&self, output: &Self::Output) -> Option<Self> {
        output.next_token.as_ref().map(|token| Self {
            next_token: Some(token.clone()),
            ..self.clone()
        })
    }

    fn into_items(output: Self::Output) -> Vec<String> {
        output.queue_urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    fn response(body: &'static str) -> Response {
        Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(body.as_bytes()),
            request_id: None,
        }
    }

    #[test]
    fn test_list_queues_example() {
        let output = ListQueuesInput::parse(response(
            r#"<ListQueuesResponse>
    <ListQueuesResult>
        <QueueUrl>https://sqs.us-east-2.amazonaws.com/123456789012/MyQueue</QueueUrl>
        <QueueUrl>https://sqs.us-east-2.amazonaws.com/123456789012/MyQueue2</QueueUrl>
        <NextToken>AQICAHhZ</NextToken>
    </ListQueuesResult>
    <ResponseMetadata>
        <RequestId>725275ae-0b9b-4762-b238-436d7c65a1ac</RequestId>
    </ResponseMetadata>
</ListQueuesResponse>"#,
        ))
        .unwrap();

        assert_eq!(output.queue_urls.len(), 2);
        assert!(output.queue_urls[1].ends_with("/MyQueue2"));

        let next = ListQueuesInput::new().prefix("My").next_page(&output).unwrap();
        assert_eq!(next.next_token.as_deref(), Some("AQICAHhZ"));
        assert_eq!(next.queue_name_prefix.as_deref(), Some("My"));
    }

    #[test]
    fn test_empty_list_queues() {
        let output = ListQueuesInput::parse(response(
            "<ListQueuesResponse><ListQueuesResult/></ListQueuesResponse>",
        ))
        .unwrap();
        assert!(output.queue_urls.is_empty());
        assert!(ListQueuesInput::new().next_page(&output).is_none());
    }

    #[test]
    fn test_get_queue_url_example() {
        let output = GetQueueUrlInput::parse(response(
            r#"<GetQueueUrlResponse>
    <GetQueueUrlResult>
        <QueueUrl>https://sqs.us-east-2.amazonaws.com/123456789012/MyQueue</QueueUrl>
    </GetQueueUrlResult>
    <ResponseMetadata>
        <RequestId>470a6f13-2ed9-4181-ad8a-2fdea142988e</RequestId>
    </ResponseMetadata>
</GetQueueUrlResponse>"#,
        ))
        .unwrap();
        assert_eq!(
            output.queue_url,
            "https://sqs.us-east-2.amazonaws.com/123456789012/MyQueue"
        );
    }

    #[test]
    fn test_create_queue_without_url() {
        let err = CreateQueueInput::parse(response(
            "<CreateQueueResponse><CreateQueueResult/></CreateQueueResponse>",
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_delete_queue_request_id() {
        let output = DeleteQueueInput::parse(response(
            "<DeleteQueueResponse><ResponseMetadata><RequestId>b5293cb5</RequestId></ResponseMetadata></DeleteQueueResponse>",
        ))
        .unwrap();
        assert_eq!(output.request_id.as_deref(), Some("b5293cb5"));
    }
}
