use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// A `category.key = value` setting of the tenant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

impl TenantOption {
    pub fn new(
        category: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        TenantOption {
            category: Some(category.into()),
            key: Some(key.into()),
            value: Some(value.into()),
            self_link: None,
        }
    }

    /// An update of the value only, category and key being given by the path
    pub fn with_value(value: impl Into<String>) -> Self {
        TenantOption {
            value: Some(value.into()),
            ..TenantOption::default()
        }
    }
}

c8y_collection!(TenantOptionCollection<TenantOption>, "options");

/// All the options of a category, by key
pub type CategoryOptions = BTreeMap<String, String>;
