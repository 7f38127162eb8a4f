use serde::Deserialize;
use serde::Serialize;

/// How long data of a given kind is kept before being removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    /// `ALARM`, `AUDIT`, `BULK_OPERATION`, `EVENT`, `MEASUREMENT`, `OPERATION` or `*`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_type: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// In days
    pub maximum_age: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
}

impl RetentionRule {
    pub fn new(data_type: impl Into<String>, maximum_age: u64) -> Self {
        RetentionRule {
            data_type: Some(data_type.into()),
            maximum_age,
            ..RetentionRule::default()
        }
    }
}

c8y_collection!(RetentionRuleCollection<RetentionRule>, "retentionRules");
