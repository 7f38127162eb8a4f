use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// An authentication method offered on the login page (`BASIC`, `OAUTH2`, `OAUTH2_INTERNAL`)
///
/// Provider specific settings (OAuth2 endpoints, token configuration, ...) are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub option_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_management_source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_on_login_page: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_management_tenant_access: Option<bool>,

    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

c8y_collection!(LoginOptionCollection<LoginOption>, "loginOptions");

/// Restrict a login option to the management tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfigAccess {
    pub only_management_tenant_access: bool,
}
