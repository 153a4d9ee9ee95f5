//! DynamoDB client against the mock endpoint

use std::time::Duration;

use futures::TryStreamExt;
use http::StatusCode;
use nimbus_core::{Error, ErrorCode, Waiter};
use nimbus_dynamodb::{
    AttributeValue, DescribeTableInput, DynamoDbClient, GetItemInput, Item, ListTablesInput,
    PutItemInput, ScanInput, TransactWriteItemsInput, UpdateTableInput,
};
use nimbus_dynamodb::types::{
    ProvisionedThroughput, Put, ReturnConsumedCapacity, TransactWriteItem,
};
use nimbus_test::{MockResponse, MockServer};
use serde_json::json;

fn key(id: &str) -> Item {
    [("Id".to_string(), AttributeValue::string(id))]
        .into_iter()
        .collect()
}

fn describe_table(status: &str) -> MockResponse {
    MockResponse::json(json!({
        "Table": {"TableName": "Thread", "TableStatus": status}
    }))
}

fn not_found() -> MockResponse {
    MockResponse::json_error(
        StatusCode::BAD_REQUEST,
        "ResourceNotFoundException",
        "Requested resource not found: Table: Thread not found",
    )
}

fn fast(name: &'static str) -> Waiter {
    Waiter::new(name, Duration::from_millis(10), 5)
}

#[tokio::test]
async fn test_put_item_wire_format() {
    let server = MockServer::start().await.unwrap();
    server.enqueue("PutItem", MockResponse::json(json!({})));

    let client = DynamoDbClient::new(server.config()).unwrap();
    let mut item = key("1");
    item.insert("Views".to_string(), AttributeValue::number(42));
    client
        .put_item(PutItemInput::new("Thread", item))
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.is_signed(), "{:?}", request.signature);
    assert_eq!(request.path, "/");
    assert_eq!(
        request.header("x-amz-target"),
        Some("DynamoDB_20120810.PutItem")
    );
    assert_eq!(
        request.header("content-type"),
        Some("application/x-amz-json-1.0")
    );
    assert_eq!(
        request.json(),
        json!({
            "TableName": "Thread",
            "Item": {"Id": {"S": "1"}, "Views": {"N": "42"}}
        })
    );
}

#[tokio::test]
async fn test_get_item_checks_crc32() {
    let server = MockServer::start().await.unwrap();
    server.enqueue(
        "GetItem",
        MockResponse::json(json!({"Item": {"Id": {"S": "1"}, "Subject": {"S": "Hello"}}}))
            .with_crc32(),
    );

    let client = DynamoDbClient::new(server.config()).unwrap();
    let output = client
        .get_item(GetItemInput::new("Thread", key("1")))
        .await
        .unwrap();

    assert_eq!(output.item.unwrap()["Subject"].as_s(), Some("Hello"));
}

#[tokio::test]
async fn test_crc32_mismatch() {
    let server = MockServer::start().await.unwrap();
    server.enqueue(
        "GetItem",
        MockResponse::json(json!({"Item": {"Id": {"S": "1"}}})).with_header("x-amz-crc32", "1"),
    );

    let client = DynamoDbClient::new(server.config().with_max_attempts(1)).unwrap();
    let err = client
        .get_item(GetItemInput::new("Thread", key("1")))
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::ChecksumMismatch { expected: 1, .. }),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_crc32_mismatch_is_retried() {
    let server = MockServer::start().await.unwrap();
    server.enqueue(
        "GetItem",
        MockResponse::json(json!({"Item": {"Id": {"S": "1"}}})).with_header("x-amz-crc32", "1"),
    );
    server.enqueue(
        "GetItem",
        MockResponse::json(json!({"Item": {"Id": {"S": "1"}}})).with_crc32(),
    );

    let client = DynamoDbClient::new(server.config()).unwrap();
    let output = client
        .get_item(GetItemInput::new("Thread", key("1")))
        .await
        .unwrap();

    assert_eq!(output.item.unwrap()["Id"].as_s(), Some("1"));
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].header("amz-sdk-request"), Some("attempt=1; max=3"));
    assert_eq!(requests[1].header("amz-sdk-request"), Some("attempt=2; max=3"));
    assert_eq!(
        requests[0].header("amz-sdk-invocation-id"),
        requests[1].header("amz-sdk-invocation-id")
    );
}

#[tokio::test]
async fn test_update_table_and_transact_write() {
    let server = MockServer::start().await.unwrap();
    server.enqueue(
        "UpdateTable",
        MockResponse::json(json!({
            "TableDescription": {
                "TableName": "Thread",
                "TableStatus": "UPDATING",
                "ProvisionedThroughput": {"ReadCapacityUnits": 7, "WriteCapacityUnits": 8}
            }
        })),
    );
    server.enqueue(
        "TransactWriteItems",
        MockResponse::json(json!({
            "ConsumedCapacity": [{"TableName": "Thread", "CapacityUnits": 4.0}]
        })),
    );

    let client = DynamoDbClient::new(server.config()).unwrap();
    let output = client
        .update_table(UpdateTableInput {
            provisioned_throughput: Some(ProvisionedThroughput {
                read_capacity_units: 7,
                write_capacity_units: 8,
            }),
            ..UpdateTableInput::new("Thread")
        })
        .await
        .unwrap();
    let throughput = output.table_description.unwrap().provisioned_throughput.unwrap();
    assert_eq!(throughput.read_capacity_units, Some(7));
    assert_eq!(throughput.write_capacity_units, Some(8));

    let output = client
        .transact_write_items(TransactWriteItemsInput {
            return_consumed_capacity: Some(ReturnConsumedCapacity::Total),
            client_request_token: Some("QWERTYUIOPQWERTYUIOP".to_string()),
            ..TransactWriteItemsInput::new(vec![TransactWriteItem::put(Put::new(
                "Thread",
                key("1"),
            ))])
        })
        .await
        .unwrap();
    assert_eq!(output.consumed_capacity.len(), 1);
    assert_eq!(output.consumed_capacity[0].capacity_units, Some(4.0));

    let requests = server.requests();
    assert_eq!(
        requests[1].header("x-amz-target"),
        Some("DynamoDB_20120810.TransactWriteItems")
    );
    assert_eq!(
        requests[1].json()["TransactItems"][0]["Put"]["TableName"],
        json!("Thread")
    );
    assert_eq!(
        requests[1].json()["ClientRequestToken"],
        json!("QWERTYUIOPQWERTYUIOP")
    );
}

#[tokio::test]
async fn test_json_error_code() {
    let server = MockServer::start().await.unwrap();
    server.enqueue("DescribeTable", not_found());

    let client = DynamoDbClient::new(server.config()).unwrap();
    let err = client
        .describe_table(DescribeTableInput::new("Thread"))
        .await
        .unwrap_err();

    assert!(err.is_code(&ErrorCode::ResourceNotFoundException));
    let service = err.as_service().unwrap();
    assert_eq!(service.status, StatusCode::BAD_REQUEST);
    assert!(service.message.contains("Thread not found"));
    // Client errors are not retried
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn test_scan_paginator_follows_last_evaluated_key() {
    let server = MockServer::start().await.unwrap();
    server.enqueue(
        "Scan",
        MockResponse::json(json!({
            "Items": [{"Id": {"S": "1"}}, {"Id": {"S": "2"}}],
            "Count": 2,
            "LastEvaluatedKey": {"Id": {"S": "2"}}
        })),
    );
    server.enqueue(
        "Scan",
        MockResponse::json(json!({"Items": [{"Id": {"S": "3"}}], "Count": 1})),
    );

    let client = DynamoDbClient::new(server.config()).unwrap();
    let items: Vec<Item> = client
        .scan_paginator(ScanInput {
            limit: Some(2),
            ..ScanInput::new("Thread")
        })
        .items()
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<_> = items.iter().map(|i| i["Id"].as_s().unwrap()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].json(), json!({"TableName": "Thread", "Limit": 2}));
    assert_eq!(
        requests[1].json(),
        json!({"TableName": "Thread", "Limit": 2, "ExclusiveStartKey": {"Id": {"S": "2"}}})
    );
}

#[tokio::test]
async fn test_list_tables_pages() {
    let server = MockServer::start().await.unwrap();
    server.enqueue(
        "ListTables",
        MockResponse::json(json!({"TableNames": ["Forum", "Reply"], "LastEvaluatedTableName": "Reply"})),
    );
    server.enqueue(
        "ListTables",
        MockResponse::json(json!({"TableNames": ["Thread"]})),
    );

    let client = DynamoDbClient::new(server.config().with_prefetch(false)).unwrap();
    let names = client
        .list_tables_paginator(ListTablesInput::default())
        .collect_items()
        .await
        .unwrap();

    assert_eq!(names, vec!["Forum", "Reply", "Thread"]);
    assert_eq!(
        server.requests()[1].json(),
        json!({"ExclusiveStartTableName": "Reply"})
    );
}

#[tokio::test]
async fn test_table_exists_waits_for_active() {
    let server = MockServer::start().await.unwrap();
    server.enqueue("DescribeTable", not_found());
    server.enqueue("DescribeTable", describe_table("CREATING"));
    server.enqueue("DescribeTable", describe_table("ACTIVE"));

    let client = DynamoDbClient::new(server.config()).unwrap();
    client
        .table_exists_with(DescribeTableInput::new("Thread"), fast("TableExists"))
        .await
        .unwrap();

    assert_eq!(server.request_count(), 3);
}

#[tokio::test]
async fn test_table_exists_times_out() {
    let server = MockServer::start().await.unwrap();
    for _ in 0..2 {
        server.enqueue("DescribeTable", describe_table("CREATING"));
    }

    let client = DynamoDbClient::new(server.config()).unwrap();
    let err = client
        .table_exists_with(
            DescribeTableInput::new("Thread"),
            Waiter::new("TableExists", Duration::from_millis(10), 2),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::WaiterTimeout {
            waiter: "TableExists",
            attempts: 2
        }
    ));
}

#[tokio::test]
async fn test_table_not_exists() {
    let server = MockServer::start().await.unwrap();
    server.enqueue("DescribeTable", describe_table("DELETING"));
    server.enqueue("DescribeTable", not_found());

    let client = DynamoDbClient::new(server.config()).unwrap();
    client
        .table_not_exists_with(DescribeTableInput::new("Thread"), fast("TableNotExists"))
        .await
        .unwrap();

    assert_eq!(server.request_count(), 2);
}

#[tokio::test]
async fn test_missing_table_name_sends_nothing() {
    let server = MockServer::start().await.unwrap();
    let client = DynamoDbClient::new(server.config()).unwrap();

    let err = client
        .table_exists(DescribeTableInput::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::MissingParameter {
            field: "TableName",
            ..
        }
    ));
    assert_eq!(server.request_count(), 0);
}
