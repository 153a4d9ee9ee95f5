//! Running one command against its service

use nimbus_cloudformation::types::StackStatus;
use nimbus_cloudformation::{CloudFormationClient, DescribeStacksInput, ListStacksInput};
use nimbus_core::ClientConfig;
use nimbus_dynamodb::{DescribeTableInput, DynamoDbClient, ListTablesInput, ScanInput};
use nimbus_sqs::{DeleteQueueInput, ListQueuesInput, SqsClient};
use serde_json::Value;
use tracing::info;

use crate::{CloudFormationCommand, Command, DynamoDbCommand, SqsCommand};

pub async fn run(command: Command, config: ClientConfig) -> anyhow::Result<Value> {
    match command {
        Command::Cloudformation(command) => cloudformation(command, config).await,
        Command::Dynamodb(command) => dynamodb(command, config).await,
        Command::Sqs(command) => sqs(command, config).await,
    }
}

async fn cloudformation(
    command: CloudFormationCommand,
    config: ClientConfig,
) -> anyhow::Result<Value> {
    let client = CloudFormationClient::new(config)?;

    match command {
        CloudFormationCommand::DescribeStacks { stack_name, all } => {
            let mut input = DescribeStacksInput::new();
            input.stack_name = stack_name;
            if all {
                let stacks = client.describe_stacks_paginator(input).collect_items().await?;
                info!(count = stacks.len(), "Described stacks");
                Ok(serde_json::to_value(stacks)?)
            } else {
                Ok(serde_json::to_value(client.describe_stacks(input).await?)?)
            }
        }
        CloudFormationCommand::ListStacks { statuses } => {
            let input = statuses
                .iter()
                .map(|s| StackStatus::parse(s))
                .fold(ListStacksInput::new(), ListStacksInput::status);
            let summaries = client.list_stacks_paginator(input).collect_items().await?;
            info!(count = summaries.len(), "Listed stacks");
            Ok(serde_json::to_value(summaries)?)
        }
    }
}

async fn dynamodb(command: DynamoDbCommand, config: ClientConfig) -> anyhow::Result<Value> {
    let client = DynamoDbClient::new(config)?;

    match command {
        DynamoDbCommand::ListTables => {
            let names = client
                .list_tables_paginator(ListTablesInput::default())
                .collect_items()
                .await?;
            Ok(serde_json::to_value(names)?)
        }
        DynamoDbCommand::DescribeTable { table_name } => {
            let output = client.describe_table(DescribeTableInput::new(table_name)).await?;
            Ok(serde_json::to_value(output)?)
        }
        DynamoDbCommand::Scan { table_name } => {
            let items = client
                .scan_paginator(ScanInput::new(table_name))
                .collect_items()
                .await?;
            info!(count = items.len(), "Scanned items");
            Ok(serde_json::to_value(items)?)
        }
    }
}

async fn sqs(command: SqsCommand, config: ClientConfig) -> anyhow::Result<Value> {
    let client = SqsClient::new(config)?;

    match command {
        SqsCommand::ListQueues { prefix } => {
            let input = ListQueuesInput {
                queue_name_prefix: prefix,
                ..ListQueuesInput::new()
            };
            let urls = client.list_queues_paginator(input).collect_items().await?;
            Ok(serde_json::to_value(urls)?)
        }
        SqsCommand::DeleteQueue { queue_url } => {
            let output = client.delete_queue(DeleteQueueInput::new(queue_url)).await?;
            Ok(serde_json::to_value(output)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_test::{MockResponse, MockServer};
    use serde_json::json;

    #[tokio::test]
    async fn test_scan_prints_every_item() {
        let server = MockServer::start().await.unwrap();
        server.enqueue(
            "Scan",
            MockResponse::json(json!({
                "Items": [{"Id": {"S": "1"}}],
                "LastEvaluatedKey": {"Id": {"S": "1"}}
            })),
        );
        server.enqueue("Scan", MockResponse::json(json!({"Items": [{"Id": {"N": "2"}}]})));

        let output = run(
            Command::Dynamodb(DynamoDbCommand::Scan {
                table_name: "Thread".to_string(),
            }),
            server.config(),
        )
        .await
        .unwrap();

        assert_eq!(output, json!([{"Id": {"S": "1"}}, {"Id": {"N": "2"}}]));
    }

    #[tokio::test]
    async fn test_list_stacks_sends_status_filter() {
        let server = MockServer::start().await.unwrap();
        server.enqueue(
            "ListStacks",
            MockResponse::xml(
                "<ListStacksResponse><ListStacksResult><StackSummaries/></ListStacksResult></ListStacksResponse>",
            ),
        );

        let output = run(
            Command::Cloudformation(CloudFormationCommand::ListStacks {
                statuses: vec!["CREATE_COMPLETE".to_string()],
            }),
            server.config(),
        )
        .await
        .unwrap();

        assert_eq!(output, json!([]));
        assert_eq!(
            server.requests()[0].param("StackStatusFilter.member.1").as_deref(),
            Some("CREATE_COMPLETE")
        );
    }

    #[tokio::test]
    async fn test_list_queues_with_prefix() {
        let server = MockServer::start().await.unwrap();
        server.enqueue(
            "ListQueues",
            MockResponse::xml(
                "<ListQueuesResponse><ListQueuesResult><QueueUrl>http://q/orders</QueueUrl></ListQueuesResult></ListQueuesResponse>",
            ),
        );

        let output = run(
            Command::Sqs(SqsCommand::ListQueues {
                prefix: Some("ord".to_string()),
            }),
            server.config(),
        )
        .await
        .unwrap();

        assert_eq!(output, json!(["http://q/orders"]));
        assert_eq!(
            server.requests()[0].param("QueueNamePrefix").as_deref(),
            Some("ord")
        );
    }

    #[tokio::test]
    async fn test_service_error_is_reported() {
        let server = MockServer::start().await.unwrap();
        server.enqueue(
            "DescribeTable",
            MockResponse::json_error(
                http::StatusCode::BAD_REQUEST,
                "ResourceNotFoundException",
                "Table: Thread not found",
            ),
        );

        let err = run(
            Command::Dynamodb(DynamoDbCommand::DescribeTable {
                table_name: "Thread".to_string(),
            }),
            server.config(),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("ResourceNotFoundException"));
    }
}
