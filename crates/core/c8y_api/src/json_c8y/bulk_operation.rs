use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

/// An operation applied to all the devices of a group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Re-run the failed operations of a previous bulk operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_parent_id: Option<String>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<OffsetDateTime>,

    /// Delay between two operations, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_ramp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_prototype: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// `ACTIVE`, `IN_PROGRESS`, `COMPLETED` or `DELETED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// `SCHEDULED`, `EXECUTING`, `EXECUTING_WITH_ERRORS`, `SUCCESSFUL`, `FAILED`, `CANCELED`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<BulkOperationProgress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperationProgress {
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub executing: u64,
    #[serde(default)]
    pub successful: u64,
    #[serde(default)]
    pub all: u64,
}

c8y_collection!(BulkOperationCollection<BulkOperation>, "bulkOperations");
