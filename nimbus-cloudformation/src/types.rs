//! CloudFormation value objects

use chrono::{DateTime, Utc};
use nimbus_core::{wire_enum, Error, XmlNode};
use serde::Serialize;

wire_enum! {
    /// Acknowledgement that a template may create IAM resources or expand macros
    pub enum Capability {
        Iam => "CAPABILITY_IAM",
        NamedIam => "CAPABILITY_NAMED_IAM",
        AutoExpand => "CAPABILITY_AUTO_EXPAND",
    }
}

wire_enum! {
    pub enum StackStatus {
        CreateInProgress => "CREATE_IN_PROGRESS",
        CreateFailed => "CREATE_FAILED",
        CreateComplete => "CREATE_COMPLETE",
        RollbackInProgress => "ROLLBACK_IN_PROGRESS",
        RollbackFailed => "ROLLBACK_FAILED",
        RollbackComplete => "ROLLBACK_COMPLETE",
        DeleteInProgress => "DELETE_IN_PROGRESS",
        DeleteFailed => "DELETE_FAILED",
        DeleteComplete => "DELETE_COMPLETE",
        UpdateInProgress => "UPDATE_IN_PROGRESS",
        UpdateCompleteCleanupInProgress => "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS",
        UpdateComplete => "UPDATE_COMPLETE",
        UpdateFailed => "UPDATE_FAILED",
        UpdateRollbackInProgress => "UPDATE_ROLLBACK_IN_PROGRESS",
        UpdateRollbackFailed => "UPDATE_ROLLBACK_FAILED",
        UpdateRollbackCompleteCleanupInProgress => "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS",
        UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
        ReviewInProgress => "REVIEW_IN_PROGRESS",
        ImportInProgress => "IMPORT_IN_PROGRESS",
        ImportComplete => "IMPORT_COMPLETE",
        ImportRollbackInProgress => "IMPORT_ROLLBACK_IN_PROGRESS",
        ImportRollbackFailed => "IMPORT_ROLLBACK_FAILED",
        ImportRollbackComplete => "IMPORT_ROLLBACK_COMPLETE",
    }
}

impl StackStatus {
    /// Whether the stack is still changing
    pub fn is_in_progress(&self) -> bool {
        self.as_str().ends_with("_IN_PROGRESS")
    }
}

wire_enum! {
    pub enum StackDriftStatus {
        Drifted => "DRIFTED",
        InSync => "IN_SYNC",
        /// Drift detection could not determine the state
        Undetermined => "UNKNOWN",
        NotChecked => "NOT_CHECKED",
    }
}

wire_enum! {
    pub enum ResourceStatus {
        CreateInProgress => "CREATE_IN_PROGRESS",
        CreateFailed => "CREATE_FAILED",
        CreateComplete => "CREATE_COMPLETE",
        DeleteInProgress => "DELETE_IN_PROGRESS",
        DeleteFailed => "DELETE_FAILED",
        DeleteComplete => "DELETE_COMPLETE",
        DeleteSkipped => "DELETE_SKIPPED",
        UpdateInProgress => "UPDATE_IN_PROGRESS",
        UpdateFailed => "UPDATE_FAILED",
        UpdateComplete => "UPDATE_COMPLETE",
        ImportFailed => "IMPORT_FAILED",
        ImportComplete => "IMPORT_COMPLETE",
        ImportInProgress => "IMPORT_IN_PROGRESS",
        ImportRollbackInProgress => "IMPORT_ROLLBACK_IN_PROGRESS",
        ImportRollbackFailed => "IMPORT_ROLLBACK_FAILED",
        ImportRollbackComplete => "IMPORT_ROLLBACK_COMPLETE",
        UpdateRollbackInProgress => "UPDATE_ROLLBACK_IN_PROGRESS",
        UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
        UpdateRollbackFailed => "UPDATE_ROLLBACK_FAILED",
        RollbackInProgress => "ROLLBACK_IN_PROGRESS",
        RollbackComplete => "ROLLBACK_COMPLETE",
        RollbackFailed => "ROLLBACK_FAILED",
    }
}

/// A stack, as returned by DescribeStacks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stack {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    pub stack_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_set_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    pub creation_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback_configuration: Option<RollbackConfiguration>,
    pub stack_status: StackStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_status_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_rollback: Option<bool>,
    #[serde(rename = "NotificationARNs", skip_serializing_if = "Option::is_none")]
    pub notification_arns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_in_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Output>>,
    #[serde(rename = "RoleARN", skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_termination_protection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_information: Option<StackDriftInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain_except_on_create: Option<bool>,
}

impl Stack {
    pub(crate) fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            stack_id: node.opt_string("StackId"),
            stack_name: node.required_string("StackName")?,
            change_set_id: node.opt_string("ChangeSetId"),
            description: node.opt_string("Description"),
            parameters: node.opt_list("Parameters", Parameter::from_xml)?,
            creation_time: node.required_timestamp("CreationTime")?,
            deletion_time: node.opt_timestamp("DeletionTime")?,
            last_updated_time: node.opt_timestamp("LastUpdatedTime")?,
            rollback_configuration: node
                .child("RollbackConfiguration")
                .map(RollbackConfiguration::from_xml)
                .transpose()?,
            stack_status: StackStatus::parse(&node.required_string("StackStatus")?),
            stack_status_reason: node.opt_string("StackStatusReason"),
            disable_rollback: node.opt_bool("DisableRollback")?,
            notification_arns: node.opt_string_list("NotificationARNs"),
            timeout_in_minutes: node.opt_i64("TimeoutInMinutes")?,
            capabilities: node
                .opt_string_list("Capabilities")
                .map(|list| list.iter().map(|c| Capability::parse(c)).collect()),
            outputs: node.opt_list("Outputs", Output::from_xml)?,
            role_arn: node.opt_string("RoleARN"),
            tags: node.opt_list("Tags", Tag::from_xml)?,
            enable_termination_protection: node.opt_bool("EnableTerminationProtection")?,
            parent_id: node.opt_string("ParentId"),
            root_id: node.opt_string("RootId"),
            drift_information: node
                .child("DriftInformation")
                .map(StackDriftInformation::from_xml)
                .transpose()?,
            retain_except_on_create: node.opt_bool("RetainExceptOnCreate")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_name: Option<String>,
}

impl Output {
    fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            output_key: node.opt_string("OutputKey"),
            output_value: node.opt_string("OutputValue"),
            description: node.opt_string("Description"),
            export_name: node.opt_string("ExportName"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_previous_value: Option<bool>,
    /// Value of an SSM parameter type, after resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_value: Option<String>,
}

impl Parameter {
    fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            parameter_key: node.opt_string("ParameterKey"),
            parameter_value: node.opt_string("ParameterValue"),
            use_previous_value: node.opt_bool("UsePreviousValue")?,
            resolved_value: node.opt_string("ResolvedValue"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RollbackConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback_triggers: Option<Vec<RollbackTrigger>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_time_in_minutes: Option<i64>,
}

impl RollbackConfiguration {
    fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            rollback_triggers: node.opt_list("RollbackTriggers", RollbackTrigger::from_xml)?,
            monitoring_time_in_minutes: node.opt_i64("MonitoringTimeInMinutes")?,
        })
    }
}

/// A CloudWatch alarm watched during stack operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RollbackTrigger {
    pub arn: String,
    /// Resource type of the alarm, e.g. `AWS::CloudWatch::Alarm`
    #[serde(rename = "Type")]
    pub kind: String,
}

impl RollbackTrigger {
    fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            arn: node.required_string("Arn")?,
            kind: node.required_string("Type")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackDriftInformation {
    pub stack_drift_status: StackDriftStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_check_timestamp: Option<DateTime<Utc>>,
}

impl StackDriftInformation {
    fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            stack_drift_status: StackDriftStatus::parse(&node.required_string("StackDriftStatus")?),
            last_check_timestamp: node.opt_timestamp("LastCheckTimestamp")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            key: node.required_string("Key")?,
            value: node.required_string("Value")?,
        })
    }
}

/// One entry of a stack's event history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackEvent {
    pub stack_id: String,
    pub event_id: String,
    pub stack_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_status: Option<ResourceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_status_reason: Option<String>,
    /// Properties used to create the resource, as a JSON string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_properties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_request_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_status: Option<String>,
}

impl StackEvent {
    pub(crate) fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            stack_id: node.required_string("StackId")?,
            event_id: node.required_string("EventId")?,
            stack_name: node.required_string("StackName")?,
            logical_resource_id: node.opt_string("LogicalResourceId"),
            physical_resource_id: node.opt_string("PhysicalResourceId"),
            resource_type: node.opt_string("ResourceType"),
            timestamp: node.required_timestamp("Timestamp")?,
            resource_status: node
                .opt_string("ResourceStatus")
                .map(|s| ResourceStatus::parse(&s)),
            resource_status_reason: node.opt_string("ResourceStatusReason"),
            resource_properties: node.opt_string("ResourceProperties"),
            client_request_token: node.opt_string("ClientRequestToken"),
            detailed_status: node.opt_string("DetailedStatus"),
        })
    }
}

/// Short form of a stack, as returned by ListStacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    pub stack_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_description: Option<String>,
    pub creation_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_time: Option<DateTime<Utc>>,
    pub stack_status: StackStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_status_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_information: Option<StackDriftInformation>,
}

impl StackSummary {
    pub(crate) fn from_xml(node: &XmlNode) -> Result<Self, Error> {
        Ok(Self {
            stack_id: node.opt_string("StackId"),
            stack_name: node.required_string("StackName")?,
            template_description: node.opt_string("TemplateDescription"),
            creation_time: node.required_timestamp("CreationTime")?,
            last_updated_time: node.opt_timestamp("LastUpdatedTime")?,
            deletion_time: node.opt_timestamp("DeletionTime")?,
            stack_status: StackStatus::parse(&node.required_string("StackStatus")?),
            stack_status_reason: node.opt_string("StackStatusReason"),
            parent_id: node.opt_string("ParentId"),
            root_id: node.opt_string("RootId"),
            drift_information: node
                .child("DriftInformation")
                .map(StackDriftInformation::from_xml)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        assert!(StackStatus::parse("UPDATE_ROLLBACK_IN_PROGRESS").is_in_progress());
        assert!(!StackStatus::CreateComplete.is_in_progress());
        assert_eq!(
            StackDriftStatus::parse("UNKNOWN"),
            StackDriftStatus::Undetermined
        );
        assert_eq!(
            Capability::parse("CAPABILITY_RESOURCE_POLICY"),
            Capability::Unknown("CAPABILITY_RESOURCE_POLICY".to_string())
        );
    }

    #[test]
    fn test_required_tag_fields() {
        let mut node = XmlNode::new("member");
        let mut key = XmlNode::new("Key");
        key.text = "env".to_string();
        node.children.push(key);

        let err = Tag::from_xml(&node).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
