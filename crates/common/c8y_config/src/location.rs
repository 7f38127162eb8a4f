use crate::sources::extract_data;
use crate::sources::extract_from_toml_str;
use crate::sources::UnusedValueWarnings;
use crate::C8yConfig;
use crate::ConfigError;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_C8Y_CONFIG_PATH: &str = "/etc/c8y";
const C8Y_CONFIG_FILE: &str = "c8y.toml";
const USER_CONFIG_DIR: &str = ".c8y";

/// Information about where `c8y.toml` is located.
///
/// - System-wide under `/etc/c8y`
/// - User-local under `$HOME/.c8y`
/// - Or any custom directory
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct C8yConfigLocation {
    /// Root directory where `c8y.toml` and related files, such as root certificates, are located.
    pub config_root_path: PathBuf,

    /// Full path to the `c8y.toml` file.
    pub config_file_path: PathBuf,
}

impl Default for C8yConfigLocation {
    /// `c8y.toml` is located in `/etc/c8y`.
    fn default() -> Self {
        Self::from_custom_root(DEFAULT_C8Y_CONFIG_PATH)
    }
}

impl C8yConfigLocation {
    pub fn from_custom_root(config_root_path: impl AsRef<Path>) -> Self {
        let config_root_path = config_root_path.as_ref().to_path_buf();
        Self {
            config_file_path: config_root_path.join(C8Y_CONFIG_FILE),
            config_root_path,
        }
    }

    /// `c8y.toml` is located in `$HOME/.c8y`.
    pub fn from_users_home() -> Result<Self, ConfigError> {
        let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::from_custom_root(Path::new(&home).join(USER_CONFIG_DIR)))
    }

    pub fn config_root_path(&self) -> &Path {
        &self.config_root_path
    }

    pub fn config_file_path(&self) -> &Path {
        &self.config_file_path
    }

    /// Load the configuration, warning about unknown settings
    pub fn load(&self) -> Result<C8yConfig, ConfigError> {
        let (config, warnings) = self.load_with_warnings()?;
        warnings.emit();
        Ok(config)
    }

    pub fn load_with_warnings(&self) -> Result<(C8yConfig, UnusedValueWarnings), ConfigError> {
        debug!("Loading configuration from {:?}", self.config_file_path);
        extract_data(&self.config_file_path)
    }
}

impl C8yConfig {
    /// Read a configuration from a TOML string, ignoring the environment
    ///
    /// ```
    /// use c8y_config::C8yConfig;
    /// let config = C8yConfig::from_toml_str("[c8y]\nurl = \"example.cumulocity.com\"").unwrap();
    ///
    /// assert_eq!(config.c8y.url.as_deref(), Some("example.cumulocity.com"));
    /// assert_eq!(config.http.timeout_secs, None);
    /// ```
    pub fn from_toml_str(toml: &str) -> Result<C8yConfig, ConfigError> {
        let (config, warnings) = extract_from_toml_str(toml)?;
        warnings.emit();
        Ok(config)
    }
}
