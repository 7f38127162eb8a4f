use serde::Deserialize;
use serde::Serialize;

/// An identifier of a managed object in an external system, e.g. a serial number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalId {
    pub external_id: String,

    #[serde(rename = "type")]
    pub id_type: String,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_object: Option<ExternalIdTarget>,
}

impl ExternalId {
    pub fn new(id_type: impl Into<String>, external_id: impl Into<String>) -> Self {
        ExternalId {
            external_id: external_id.into(),
            id_type: id_type.into(),
            self_link: None,
            managed_object: None,
        }
    }

    /// The internal id of the managed object this external id points to
    pub fn internal_id(&self) -> Option<&str> {
        self.managed_object.as_ref().map(|mo| mo.id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdTarget {
    pub id: String,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

c8y_collection!(ExternalIdCollection<ExternalId>, "externalIds");
