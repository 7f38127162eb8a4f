use super::ManagedObjectRef;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
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

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<OffsetDateTime>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub audit_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ManagedObjectRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<Value>,
}

impl AuditRecord {
    pub fn new(
        source: impl Into<ManagedObjectRef>,
        audit_type: impl Into<String>,
        activity: impl Into<String>,
        text: impl Into<String>,
        time: OffsetDateTime,
    ) -> Self {
        AuditRecord {
            source: Some(source.into()),
            audit_type: Some(audit_type.into()),
            activity: Some(activity.into()),
            text: Some(text.into()),
            time: Some(time),
            ..AuditRecord::default()
        }
    }
}

c8y_collection!(AuditRecordCollection<AuditRecord>, "auditRecords");
