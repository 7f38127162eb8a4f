use super::ExternalId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use std::fmt;
use time::OffsetDateTime;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationStatus {
    Pending,
    Executing,
    Successful,
    Failed,
}

impl OperationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationStatus::Pending => "PENDING",
            OperationStatus::Executing => "EXECUTING",
            OperationStatus::Successful => "SUCCESSFUL",
            OperationStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A device operation, e.g. `c8y_Restart` or `c8y_SoftwareUpdate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_time: Option<OffsetDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OperationStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_operation_id: Option<String>,

    #[serde(
        rename = "deviceExternalIDs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_external_ids: Option<Vec<ExternalId>>,

    /// The operation fragments, e.g. `c8y_Restart: {}`
    #[serde(flatten)]
    pub fragments: Map<String, Value>,
}

impl Operation {
    pub fn new(device_id: impl Into<String>, description: impl Into<String>) -> Self {
        Operation {
            device_id: Some(device_id.into()),
            description: Some(description.into()),
            ..Operation::default()
        }
    }

    pub fn with_fragment(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fragments.insert(name.into(), value);
        self
    }

    /// An update moving an operation to a new status
    pub fn with_status(status: OperationStatus, failure_reason: Option<String>) -> Self {
        Operation {
            status: Some(status),
            failure_reason,
            ..Operation::default()
        }
    }
}

c8y_collection!(OperationCollection<Operation>, "operations");
