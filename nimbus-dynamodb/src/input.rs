//! DynamoDB operation inputs
//!
//! Every input serializes straight into its JSON 1.0 request body. Fields
//! the service requires are still `Option`s so an input can be built up
//! piecewise; they are checked when the request is built.

use std::collections::HashMap;

use nimbus_core::operation::required;
use nimbus_core::{Error, Input, Request};
use serde::Serialize;

use crate::attribute_value::{AttributeValue, Item};
use crate::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, GlobalSecondaryIndexUpdate,
    KeySchemaElement, KeysAndAttributes, LocalSecondaryIndex, ProvisionedThroughput,
    ReturnConsumedCapacity, ReturnItemCollectionMetrics, ReturnValue, Select, Tag,
    TimeToLiveSpecification, TransactWriteItem, WriteRequest,
};

pub const API_VERSION: &str = "2012-08-10";
pub const TARGET_PREFIX: &str = "DynamoDB_20120810";

fn json_request<T: Serialize>(operation: &str, body: &T) -> Result<Request, Error> {
    Request::json_1_0(&format!("{TARGET_PREFIX}.{operation}"), body)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_definitions: Option<Vec<AttributeDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_schema: Option<Vec<KeySchemaElement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_secondary_indexes: Option<Vec<LocalSecondaryIndex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_secondary_indexes: Option<Vec<GlobalSecondaryIndex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<BillingMode>,
    /// Required unless `billing_mode` is `PAY_PER_REQUEST`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<ProvisionedThroughput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_protection_enabled: Option<bool>,
}

impl Input for CreateTableInput {
    const OPERATION: &'static str = "CreateTable";

    fn request(&self) -> Result<Request, Error> {
        required(&self.attribute_definitions, Self::OPERATION, "AttributeDefinitions")?;
        required(&self.table_name, Self::OPERATION, "TableName")?;
        required(&self.key_schema, Self::OPERATION, "KeySchema")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTableInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

impl DeleteTableInput {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
        }
    }
}

impl Input for DeleteTableInput {
    const OPERATION: &'static str = "DeleteTable";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

impl DescribeTableInput {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
        }
    }
}

impl Input for DescribeTableInput {
    const OPERATION: &'static str = "DescribeTable";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesInput {
    /// Continue after this table; `LastEvaluatedTableName` of the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

impl Input for ListTablesInput {
    const OPERATION: &'static str = "ListTables";

    fn request(&self) -> Result<Request, Error> {
        json_request(Self::OPERATION, self)
    }
}

/// Throughput, billing mode or index changes to an existing table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTableInput {
    /// Only needed for attributes of indexes being created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_definitions: Option<Vec<AttributeDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<BillingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<ProvisionedThroughput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_secondary_index_updates: Option<Vec<GlobalSecondaryIndexUpdate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_protection_enabled: Option<bool>,
}

impl UpdateTableInput {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
            ..Self::default()
        }
    }
}

impl Input for UpdateTableInput {
    const OPERATION: &'static str = "UpdateTable";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTimeToLiveInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live_specification: Option<TimeToLiveSpecification>,
}

impl Input for UpdateTimeToLiveInput {
    const OPERATION: &'static str = "UpdateTimeToLive";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        required(
            &self.time_to_live_specification,
            Self::OPERATION,
            "TimeToLiveSpecification",
        )?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

impl PutItemInput {
    pub fn new(table_name: impl Into<String>, item: Item) -> Self {
        Self {
            table_name: Some(table_name.into()),
            item: Some(item),
            ..Self::default()
        }
    }
}

impl Input for PutItemInput {
    const OPERATION: &'static str = "PutItem";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        required(&self.item, Self::OPERATION, "Item")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

impl GetItemInput {
    pub fn new(table_name: impl Into<String>, key: Item) -> Self {
        Self {
            table_name: Some(table_name.into()),
            key: Some(key),
            ..Self::default()
        }
    }
}

impl Input for GetItemInput {
    const OPERATION: &'static str = "GetItem";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        required(&self.key, Self::OPERATION, "Key")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

impl DeleteItemInput {
    pub fn new(table_name: impl Into<String>, key: Item) -> Self {
        Self {
            table_name: Some(table_name.into()),
            key: Some(key),
            ..Self::default()
        }
    }
}

impl Input for DeleteItemInput {
    const OPERATION: &'static str = "DeleteItem";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        required(&self.key, Self::OPERATION, "Key")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Item>,
    /// e.g. `SET LastPostedBy = :val1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

impl Input for UpdateItemInput {
    const OPERATION: &'static str = "UpdateItem";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        required(&self.key, Self::OPERATION, "Key")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_condition_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    /// `false` reads the sort key in descending order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

impl Input for QueryInput {
    const OPERATION: &'static str = "Query";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<Item>,
    /// Parallel scan: this worker's segment out of `total_segments`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_segments: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

impl ScanInput {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
            ..Self::default()
        }
    }
}

impl Input for ScanInput {
    const OPERATION: &'static str = "Scan";

    fn request(&self) -> Result<Request, Error> {
        required(&self.table_name, Self::OPERATION, "TableName")?;
        json_request(Self::OPERATION, self)
    }
}

/// A PartiQL statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecuteStatementInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    /// Values for the `?` placeholders, in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<AttributeValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

impl ExecuteStatementInput {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: Some(statement.into()),
            ..Self::default()
        }
    }
}

impl Input for ExecuteStatementInput {
    const OPERATION: &'static str = "ExecuteStatement";

    fn request(&self) -> Result<Request, Error> {
        required(&self.statement, Self::OPERATION, "Statement")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemInput {
    /// Keys to read, by table name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_items: Option<HashMap<String, KeysAndAttributes>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

impl Input for BatchGetItemInput {
    const OPERATION: &'static str = "BatchGetItem";

    fn request(&self) -> Result<Request, Error> {
        required(&self.request_items, Self::OPERATION, "RequestItems")?;
        json_request(Self::OPERATION, self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteItemInput {
    /// Puts and deletes, by table name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_items: Option<HashMap<String, Vec<WriteRequest>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

impl Input for BatchWriteItemInput {
    const OPERATION: &'static str = "BatchWriteItem";

    fn request(&self) -> Result<Request, Error> {
        required(&self.request_items, Self::OPERATION, "RequestItems")?;
        json_request(Self::OPERATION, self)
    }
}

/// Up to 100 writes applied all together or not at all
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactWriteItemsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transact_items: Option<Vec<TransactWriteItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
    /// Makes a retried call idempotent for ten minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_request_token: Option<String>,
}

impl TransactWriteItemsInput {
    pub fn new(transact_items: Vec<TransactWriteItem>) -> Self {
        Self {
            transact_items: Some(transact_items),
            ..Self::default()
        }
    }
}

impl Input for TransactWriteItemsInput {
    const OPERATION: &'static str = "TransactWriteItems";

    fn request(&self) -> Result<Request, Error> {
        required(&self.transact_items, Self::OPERATION, "TransactItems")?;
        json_request(Self::OPERATION, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Projection, Put, ScalarAttributeType};
    use serde_json::{json, Value};

    fn body(request: &Request) -> Value {
        serde_json::from_slice(&request.body).unwrap()
    }

    #[test]
    fn test_create_table_body() {
        let input = CreateTableInput {
            attribute_definitions: Some(vec![
                AttributeDefinition::new("ForumName", ScalarAttributeType::S),
                AttributeDefinition::new("Subject", ScalarAttributeType::S),
                AttributeDefinition::new("LastPostDateTime", ScalarAttributeType::S),
            ]),
            table_name: Some("Thread".to_string()),
            key_schema: Some(vec![
                KeySchemaElement::hash("ForumName"),
                KeySchemaElement::range("Subject"),
            ]),
            local_secondary_indexes: Some(vec![LocalSecondaryIndex {
                index_name: "LastPostIndex".to_string(),
                key_schema: vec![
                    KeySchemaElement::hash("ForumName"),
                    KeySchemaElement::range("LastPostDateTime"),
                ],
                projection: Projection::keys_only(),
            }]),
            provisioned_throughput: Some(ProvisionedThroughput {
                read_capacity_units: 5,
                write_capacity_units: 5,
            }),
            tags: Some(vec![Tag::new("Owner", "BlueTeam")]),
            ..CreateTableInput::default()
        };

        let request = input.request().unwrap();
        assert_eq!(request.headers["x-amz-target"], "DynamoDB_20120810.CreateTable");
        assert_eq!(
            body(&request),
            json!({
                "AttributeDefinitions": [
                    {"AttributeName": "ForumName", "AttributeType": "S"},
                    {"AttributeName": "Subject", "AttributeType": "S"},
                    {"AttributeName": "LastPostDateTime", "AttributeType": "S"}
                ],
                "TableName": "Thread",
                "KeySchema": [
                    {"AttributeName": "ForumName", "KeyType": "HASH"},
                    {"AttributeName": "Subject", "KeyType": "RANGE"}
                ],
                "LocalSecondaryIndexes": [{
                    "IndexName": "LastPostIndex",
                    "KeySchema": [
                        {"AttributeName": "ForumName", "KeyType": "HASH"},
                        {"AttributeName": "LastPostDateTime", "KeyType": "RANGE"}
                    ],
                    "Projection": {"ProjectionType": "KEYS_ONLY"}
                }],
                "ProvisionedThroughput": {"ReadCapacityUnits": 5, "WriteCapacityUnits": 5},
                "Tags": [{"Key": "Owner", "Value": "BlueTeam"}]
            })
        );
    }

    #[test]
    fn test_put_item_body() {
        let item: Item = [
            ("ForumName".to_string(), AttributeValue::string("Amazon DynamoDB")),
            ("Subject".to_string(), AttributeValue::string("How do I update multiple items?")),
        ]
        .into_iter()
        .collect();

        let input = PutItemInput {
            condition_expression: Some("ForumName <> :f and Subject <> :s".to_string()),
            return_values: Some(ReturnValue::AllOld),
            ..PutItemInput::new("Thread", item)
        };

        assert_eq!(
            body(&input.request().unwrap()),
            json!({
                "TableName": "Thread",
                "Item": {
                    "ForumName": {"S": "Amazon DynamoDB"},
                    "Subject": {"S": "How do I update multiple items?"}
                },
                "ConditionExpression": "ForumName <> :f and Subject <> :s",
                "ReturnValues": "ALL_OLD"
            })
        );
    }

    #[test]
    fn test_empty_list_tables_body() {
        let request = ListTablesInput::default().request().unwrap();
        assert_eq!(&request.body[..], b"{}");
    }

    #[test]
    fn test_required_fields() {
        let err = DescribeTableInput::default().request().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameter {
                operation: "DescribeTable",
                field: "TableName"
            }
        ));

        let err = GetItemInput {
            table_name: Some("Thread".to_string()),
            ..GetItemInput::default()
        }
        .request()
        .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { field: "Key", .. }));

        let err = UpdateTimeToLiveInput {
            table_name: Some("Thread".to_string()),
            time_to_live_specification: None,
        }
        .request()
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameter {
                field: "TimeToLiveSpecification",
                ..
            }
        ));
    }

    #[test]
    fn test_execute_statement_parameters() {
        let input = ExecuteStatementInput {
            parameters: Some(vec![AttributeValue::string("Amazon DynamoDB")]),
            ..ExecuteStatementInput::new("SELECT * FROM \"Thread\" WHERE ForumName = ?")
        };
        assert_eq!(
            body(&input.request().unwrap()),
            json!({
                "Statement": "SELECT * FROM \"Thread\" WHERE ForumName = ?",
                "Parameters": [{"S": "Amazon DynamoDB"}]
            })
        );
    }

    #[test]
    fn test_update_table_body() {
        let input = UpdateTableInput {
            provisioned_throughput: Some(ProvisionedThroughput {
                read_capacity_units: 7,
                write_capacity_units: 8,
            }),
            ..UpdateTableInput::new("Thread")
        };

        let request = input.request().unwrap();
        assert_eq!(request.headers["x-amz-target"], "DynamoDB_20120810.UpdateTable");
        assert_eq!(
            body(&request),
            json!({
                "TableName": "Thread",
                "ProvisionedThroughput": {"ReadCapacityUnits": 7, "WriteCapacityUnits": 8}
            })
        );

        let err = UpdateTableInput::default().request().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameter {
                operation: "UpdateTable",
                field: "TableName"
            }
        ));
    }

    #[test]
    fn test_transact_write_items_body() {
        let item: Item = [
            ("ForumName".to_string(), AttributeValue::string("Amazon DynamoDB")),
            (
                "Tags".to_string(),
                AttributeValue::Ss(vec!["Update".to_string(), "HelpMe".to_string()]),
            ),
        ]
        .into_iter()
        .collect();

        let input = TransactWriteItemsInput {
            return_consumed_capacity: Some(ReturnConsumedCapacity::Total),
            client_request_token: Some("QWERTYUIOPQWERTYUIOP".to_string()),
            ..TransactWriteItemsInput::new(vec![TransactWriteItem::put(Put::new("Thread", item))])
        };

        let request = input.request().unwrap();
        assert_eq!(
            request.headers["x-amz-target"],
            "DynamoDB_20120810.TransactWriteItems"
        );
        assert_eq!(
            body(&request),
            json!({
                "TransactItems": [{
                    "Put": {
                        "Item": {
                            "ForumName": {"S": "Amazon DynamoDB"},
                            "Tags": {"SS": ["Update", "HelpMe"]}
                        },
                        "TableName": "Thread"
                    }
                }],
                "ReturnConsumedCapacity": "TOTAL",
                "ClientRequestToken": "QWERTYUIOPQWERTYUIOP"
            })
        );

        let err = TransactWriteItemsInput::default().request().unwrap_err();
        assert!(matches!(err, Error::MissingParameter { field: "TransactItems", .. }));
    }
}
