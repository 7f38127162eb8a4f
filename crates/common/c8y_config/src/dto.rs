use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// The content of `c8y.toml`
///
/// Every setting is optional: the file can be missing and any value can be provided
/// by a `C8Y_` environment variable instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct C8yConfig {
    pub c8y: TenantConfig,
    pub bootstrap: BootstrapConfig,
    pub http: HttpConfig,
}

/// `[c8y]`: where to connect and with which credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantConfig {
    pub url: Option<String>,
    pub tenant: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,

    /// Takes precedence over `user` and `password`
    pub token: Option<String>,
}

/// `[bootstrap]`: the credentials used to request device credentials and application subscriptions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub tenant: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
    pub root_cert_path: Option<PathBuf>,

    /// `PERSISTENT`, `TRANSIENT`, `QUIESCENT` or `CEP`
    pub processing_mode: Option<String>,
}
