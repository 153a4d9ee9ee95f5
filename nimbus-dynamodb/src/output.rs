//! DynamoDB operation results

use std::collections::HashMap;

use nimbus_core::{Error, Operation, PaginatedOperation, Response};
use serde::{Deserialize, Serialize};

use crate::attribute_value::Item;
use crate::input::{
    BatchGetItemInput, BatchWriteItemInput, CreateTableInput, DeleteItemInput, DeleteTableInput,
    DescribeTableInput, ExecuteStatementInput, GetItemInput, ListTablesInput, PutItemInput,
    QueryInput, ScanInput, TransactWriteItemsInput, UpdateItemInput, UpdateTableInput,
    UpdateTimeToLiveInput,
};
use crate::types::{
    ConsumedCapacity, ItemCollectionMetrics, KeysAndAttributes, TableDescription,
    TimeToLiveSpecification, WriteRequest,
};

/// Results are the JSON body as is
macro_rules! json_operation {
    ($($input:ty => $output:ty),* $(,)?) => {
        $(
            impl Operation for $input {
                type Output = $output;

                fn parse(response: Response) -> Result<$output, Error> {
                    response.json()
                }
            }
        )*
    };
}

json_operation! {
    CreateTableInput => CreateTableOutput,
    DeleteTableInput => DeleteTableOutput,
    DescribeTableInput => DescribeTableOutput,
    ListTablesInput => ListTablesOutput,
    UpdateTableInput => UpdateTableOutput,
    UpdateTimeToLiveInput => UpdateTimeToLiveOutput,
    PutItemInput => PutItemOutput,
    GetItemInput => GetItemOutput,
    DeleteItemInput => DeleteItemOutput,
    UpdateItemInput => UpdateItemOutput,
    QueryInput => QueryOutput,
    ScanInput => ScanOutput,
    ExecuteStatementInput => ExecuteStatementOutput,
    BatchGetItemInput => BatchGetItemOutput,
    BatchWriteItemInput => BatchWriteItemOutput,
    TransactWriteItemsInput => TransactWriteItemsOutput,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_description: Option<TableDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTableOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_description: Option<TableDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesOutput {
    #[serde(default)]
    pub table_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_table_name: Option<String>,
}

impl PaginatedOperation for ListTablesInput {
    type Item = String;

    fn next_page(&self, output: &ListTablesOutput) -> Option<Self> {
        let name = output.last_evaluated_table_name.clone()?;
        Some(Self {
            exclusive_start_table_name: Some(name),
            ..self.clone()
        })
    }

    fn into_items(output: ListTablesOutput) -> Vec<String> {
        output.table_names
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTableOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_description: Option<TableDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTimeToLiveOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_live_specification: Option<TimeToLiveSpecification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemOutput {
    /// Only present when `ReturnValues` asked for them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    /// `None` when no item has the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryOutput {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

impl PaginatedOperation for QueryInput {
    type Item = Item;

    fn next_page(&self, output: &QueryOutput) -> Option<Self> {
        let key = output.last_evaluated_key.clone()?;
        Some(Self {
            exclusive_start_key: Some(key),
            ..self.clone()
        })
    }

    fn into_items(output: QueryOutput) -> Vec<Item> {
        output.items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanOutput {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

impl PaginatedOperation for ScanInput {
    type Item = Item;

    fn next_page(&self, output: &ScanOutput) -> Option<Self> {
        let key = output.last_evaluated_key.clone()?;
        Some(Self {
            exclusive_start_key: Some(key),
            ..self.clone()
        })
    }

    fn into_items(output: ScanOutput) -> Vec<Item> {
        output.items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecuteStatementOutput {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Item>,
}

impl PaginatedOperation for ExecuteStatementInput {
    type Item = Item;

    fn next_page(&self, output: &ExecuteStatementOutput) -> Option<Self> {
        let token = output.next_token.clone()?;
        Some(Self {
            next_token: Some(token),
            ..self.clone()
        })
    }

    fn into_items(output: ExecuteStatementOutput) -> Vec<Item> {
        output.items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemOutput {
    /// Items read, by table name
    #[serde(default)]
    pub responses: HashMap<String, Vec<Item>>,
    /// Keys to send again in a later BatchGetItem
    #[serde(default)]
    pub unprocessed_keys: HashMap<String, KeysAndAttributes>,
    #[serde(default)]
    pub consumed_capacity: Vec<ConsumedCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteItemOutput {
    #[serde(default)]
    pub unprocessed_items: HashMap<String, Vec<WriteRequest>>,
    #[serde(default)]
    pub item_collection_metrics: HashMap<String, Vec<ItemCollectionMetrics>>,
    #[serde(default)]
    pub consumed_capacity: Vec<ConsumedCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactWriteItemsOutput {
    /// One entry per table written, when asked for
    #[serde(default)]
    pub consumed_capacity: Vec<ConsumedCapacity>,
    #[serde(default)]
    pub item_collection_metrics: HashMap<String, Vec<ItemCollectionMetrics>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute_value::AttributeValue;
    use crate::types::{KeyType, TableStatus};
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
    fn test_describe_table_example() {
        let output = DescribeTableInput::parse(response(
            r#"{
                "Table": {
                    "AttributeDefinitions": [
                        {"AttributeName": "ForumName", "AttributeType": "S"},
                        {"AttributeName": "Subject", "AttributeType": "S"}
                    ],
                    "CreationDateTime": 1.363729002358E9,
                    "ItemCount": 0,
                    "KeySchema": [
                        {"AttributeName": "ForumName", "KeyType": "HASH"},
                        {"AttributeName": "Subject", "KeyType": "RANGE"}
                    ],
                    "ProvisionedThroughput": {
                        "NumberOfDecreasesToday": 0,
                        "ReadCapacityUnits": 5,
                        "WriteCapacityUnits": 5
                    },
                    "TableName": "Thread",
                    "TableSizeBytes": 0,
                    "TableStatus": "ACTIVE"
                }
            }"#,
        ))
        .unwrap();

        let table = output.table.unwrap();
        assert_eq!(table.table_name.as_deref(), Some("Thread"));
        assert_eq!(table.table_status, Some(TableStatus::Active));
        assert_eq!(table.key_schema.unwrap()[1].key_type, KeyType::Range);
        assert_eq!(
            table.creation_date_time.unwrap().timestamp(),
            1_363_729_002
        );
        assert_eq!(table.provisioned_throughput.unwrap().read_capacity_units, Some(5));
    }

    #[test]
    fn test_query_example() {
        let output = QueryInput::parse(response(
            r#"{
                "ConsumedCapacity": {"CapacityUnits": 1, "TableName": "Reply"},
                "Count": 2,
                "Items": [
                    {"PostedBy": {"S": "User A"}, "Id": {"S": "Amazon DynamoDB#DynamoDB Thread 1"}},
                    {"PostedBy": {"S": "User B"}, "Id": {"S": "Amazon DynamoDB#DynamoDB Thread 1"}}
                ],
                "ScannedCount": 2,
                "LastEvaluatedKey": {"Id": {"S": "Amazon DynamoDB#DynamoDB Thread 1"}}
            }"#,
        ))
        .unwrap();

        assert_eq!(output.count, Some(2));
        assert_eq!(output.items[1]["PostedBy"].as_s(), Some("User B"));
        assert_eq!(
            output.consumed_capacity.as_ref().unwrap().capacity_units,
            Some(1.0)
        );

        let input = QueryInput {
            table_name: Some("Reply".to_string()),
            limit: Some(2),
            ..QueryInput::default()
        };
        let next = input.next_page(&output).unwrap();
        assert_eq!(next.limit, Some(2));
        assert_eq!(
            next.exclusive_start_key.unwrap()["Id"],
            AttributeValue::string("Amazon DynamoDB#DynamoDB Thread 1")
        );
    }

    #[test]
    fn test_list_tables_token() {
        let output = ListTablesInput::parse(response(
            r#"{"LastEvaluatedTableName": "Thread", "TableNames": ["Forum", "Reply", "Thread"]}"#,
        ))
        .unwrap();

        let next = ListTablesInput::default().next_page(&output).unwrap();
        assert_eq!(next.exclusive_start_table_name.as_deref(), Some("Thread"));
        assert_eq!(ListTablesInput::into_items(output).len(), 3);

        let last = ListTablesInput::parse(response(r#"{"TableNames": []}"#)).unwrap();
        assert!(ListTablesInput::default().next_page(&last).is_none());
    }

    #[test]
    fn test_get_item_without_match() {
        let output = GetItemInput::parse(response("{}")).unwrap();
        assert!(output.item.is_none());
    }

    #[test]
    fn test_batch_write_unprocessed() {
        let output = BatchWriteItemInput::parse(response(
            r#"{
                "UnprocessedItems": {
                    "Forum": [{"PutRequest": {"Item": {"Name": {"S": "Amazon S3"}}}}]
                }
            }"#,
        ))
        .unwrap();

        let pending = &output.unprocessed_items["Forum"][0];
        assert_eq!(
            pending.put_request.as_ref().unwrap().item["Name"].as_s(),
            Some("Amazon S3")
        );
        assert!(output.consumed_capacity.is_empty());
    }

    #[test]
    fn test_malformed_body() {
        let err = ScanInput::parse(response(r#"{"Items": 3}"#)).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_update_table_description() {
        let output = UpdateTableInput::parse(response(
            r#"{
                "TableDescription": {
                    "TableName": "Thread",
                    "TableStatus": "UPDATING",
                    "ProvisionedThroughput": {
                        "LastIncreaseDateTime": 1.3637299016E9,
                        "NumberOfDecreasesToday": 0,
                        "ReadCapacityUnits": 7,
                        "WriteCapacityUnits": 8
                    }
                }
            }"#,
        ))
        .unwrap();

        let table = output.table_description.unwrap();
        assert_eq!(table.table_status, Some(TableStatus::Updating));
        let throughput = table.provisioned_throughput.unwrap();
        assert_eq!(throughput.read_capacity_units, Some(7));
        assert_eq!(throughput.write_capacity_units, Some(8));
        assert!(throughput.last_increase_date_time.is_some());
    }

    #[test]
    fn test_transact_write_consumed_capacity() {
        let output = TransactWriteItemsInput::parse(response(
            r#"{"ConsumedCapacity": [{"TableName": "Thread", "CapacityUnits": 4.0, "WriteCapacityUnits": 4.0}]}"#,
        ))
        .unwrap();

        assert_eq!(output.consumed_capacity.len(), 1);
        assert_eq!(output.consumed_capacity[0].capacity_units, Some(4.0));
        assert!(output.item_collection_metrics.is_empty());

        let empty = TransactWriteItemsInput::parse(response("{}")).unwrap();
        assert!(empty.consumed_capacity.is_empty());
    }
}
