use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use time::OffsetDateTime;

/// A device, a group, a binary or any other asset of the inventory
///
/// Hierarchy members (`childDevices`, `assetParents`, ...) are managed by the platform
/// through dedicated endpoints, and are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

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
    pub last_updated: Option<OffsetDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_parents: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_parents: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addition_parents: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_assets: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_devices: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_additions: Option<Value>,

    /// Custom fragments, e.g. `c8y_IsDevice` or `c8y_Hardware`
    #[serde(flatten)]
    pub fragments: Map<String, Value>,
}

impl ManagedObject {
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        ManagedObject {
            name: Some(name.into()),
            object_type: Some(object_type.into()),
            ..ManagedObject::default()
        }
    }

    /// A managed object flagged with the `c8y_IsDevice` fragment
    pub fn device(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        ManagedObject::new(name, object_type)
            .with_fragment("c8y_IsDevice", Value::Object(Map::new()))
    }

    pub fn with_fragment(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fragments.insert(name.into(), value);
        self
    }

    pub fn is_device(&self) -> bool {
        self.fragments.contains_key("c8y_IsDevice")
    }
}

c8y_collection!(ManagedObjectCollection<ManagedObject>, "managedObjects");

/// The description of a binary, sent as the `object` part of an upload
///
/// The platform stores it as a managed object along with the `file` part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinaryInfo {
    pub name: String,

    /// The media type of the binary
    #[serde(rename = "type")]
    pub content_type: String,

    #[serde(flatten)]
    pub fragments: Map<String, Value>,
}

impl BinaryInfo {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        BinaryInfo {
            name: name.into(),
            content_type: content_type.into(),
            fragments: Map::new(),
        }
    }
}
