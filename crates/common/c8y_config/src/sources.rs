use std::borrow::Cow;
use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;

use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Toml;
use figment::util::nest;
use figment::value::Dict;
use figment::value::Map;
use figment::value::Value;
use figment::Figment;
use figment::Metadata;
use figment::Profile;
use figment::Provider;
use serde::de::DeserializeOwned;

use crate::ConfigError;

const ENV_PREFIX: &str = "C8Y_";

/// Variables read by the command line tool and not part of `c8y.toml`
const IGNORED_VARIABLES: &[&str] = &["CONFIG_DIR", "LOG"];

#[derive(Default, Debug, PartialEq, Eq)]
#[must_use]
pub struct UnusedValueWarnings(Vec<String>);

impl UnusedValueWarnings {
    pub fn emit(self) {
        for warning in self.0 {
            tracing::warn!("{warning}");
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.0
    }
}

/// Extract the configuration data from the given TOML file and the `C8Y_` prefixed environment variables
///
/// The file is optional. Environment variables take precedence over the file.
pub fn extract_data<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<(T, UnusedValueWarnings), ConfigError> {
    let figment = Figment::new()
        .merge(Toml::file(path))
        .merge(C8yEnvProvider);
    extract_with_warnings(&figment)
}

/// Extract the configuration data from a TOML string, ignoring the environment
pub fn extract_from_toml_str<T: DeserializeOwned>(
    toml: &str,
) -> Result<(T, UnusedValueWarnings), ConfigError> {
    let figment = Figment::new().merge(Toml::string(toml));
    extract_with_warnings(&figment)
}

fn extract_with_warnings<T: DeserializeOwned>(
    figment: &Figment,
) -> Result<(T, UnusedValueWarnings), ConfigError> {
    let data = extract_exact(figment);

    let warnings = unused_value_warnings::<T>(figment)
        .ok()
        .map(UnusedValueWarnings)
        .unwrap_or_default();

    match data {
        Ok(data) => Ok((data, warnings)),
        Err(e) => {
            warnings.emit();
            Err(e)
        }
    }
}

fn unused_value_warnings<T: DeserializeOwned>(figment: &Figment) -> Result<Vec<String>, ConfigError> {
    let mut warnings = Vec::new();

    let de = extract_exact::<Value>(figment)?;

    let _: T = serde_ignored::deserialize(&de, |path| {
        let serde_path = path.to_string();

        let source = figment
            .find_metadata(&serde_path)
            .map(|metadata| ConfigurationSource::infer(&serde_path, metadata));

        if let Some(source) = source {
            warnings.push(format!(
                "Unknown configuration field {serde_path:?} from {source}"
            ));
        } else {
            warnings.push(format!("Unknown configuration field {serde_path:?}"));
        }
    })
    .map_err(ConfigError::Figment)?;

    Ok(warnings)
}

fn extract_exact<T: DeserializeOwned>(figment: &Figment) -> Result<T, ConfigError> {
    figment.extract().map_err(|error_list| {
        ConfigError::multiple_errors(error_list.into_iter().map(add_error_context).collect())
    })
}

fn add_error_context(mut error: figment::Error) -> ConfigError {
    use ConfigurationSource::*;
    if let Some(ref mut metadata) = error.metadata {
        match ConfigurationSource::infer(&error.path.join("."), metadata) {
            EnvVariable(variable) => {
                metadata.name = Cow::Owned(format!("{variable} environment variable"));
            }
            TomlFile(_) => {
                *metadata = metadata
                    .clone()
                    .interpolater(|_profile, path| path.join("."));
            }
            Unknown(_) => (),
        };
    }

    ConfigError::Figment(error)
}

enum ConfigurationSource {
    TomlFile(PathBuf),
    EnvVariable(String),
    Unknown(String),
}

impl ConfigurationSource {
    fn infer(path: &str, m: &Metadata) -> Self {
        m.source
            .as_ref()
            .and_then(|source| source.file_path().map(<_>::to_owned).map(Self::TomlFile))
            .or_else(|| variable_name(path).map(Self::EnvVariable))
            .unwrap_or_else(|| Self::Unknown(m.name.clone().into_owned()))
    }
}

impl Display for ConfigurationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TomlFile(path) => write!(f, "TOML file {}", path.display()),
            Self::EnvVariable(variable) => write!(f, "environment variable {variable}"),
            Self::Unknown(name) => write!(f, "{name}"),
        }
    }
}

/// Map the name of a `C8Y_` variable (prefix excluded) to a configuration key
///
/// The connection settings have short names (`C8Y_BASEURL`, `C8Y_USER`, ...).
/// Other settings are named after their section: `C8Y_HTTP_TIMEOUT_SECS` is `http.timeout_secs`.
pub fn config_key(variable: &str) -> String {
    let name = variable.to_ascii_lowercase();
    match name.as_str() {
        "baseurl" | "url" => "c8y.url".to_string(),
        "tenant" | "user" | "password" | "token" => format!("c8y.{name}"),
        _ => ["c8y", "bootstrap", "http"]
            .iter()
            .find_map(|section| {
                name.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .filter(|key| !key.is_empty())
                    .map(|key| format!("{section}.{key}"))
            })
            .unwrap_or(name),
    }
}

fn variable_name(key: &str) -> Option<String> {
    std::env::vars_os().find_map(|(k, _)| {
        let name = k.to_str()?.strip_prefix(ENV_PREFIX)?;
        (config_key(name) == key).then(|| format!("{ENV_PREFIX}{name}"))
    })
}

/// The `C8Y_` prefixed environment variables, empty ones excluded
struct C8yEnvProvider;

impl C8yEnvProvider {
    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).ignore(IGNORED_VARIABLES)
    }
}

impl Provider for C8yEnvProvider {
    fn metadata(&self) -> Metadata {
        Self::env().metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        for (name, value) in Self::env().iter() {
            if value.is_empty() {
                continue;
            }

            let key = config_key(name.as_str());
            let value = if key.starts_with("c8y.") || key.starts_with("bootstrap.") {
                // Credentials are strings, even when they look like numbers
                Value::from(value)
            } else if value.len() > 1 && value.starts_with('0') && !value.contains('.') {
                Value::from(value)
            } else {
                value.parse::<Value>().unwrap_or_else(|never| match never {})
            };

            if let Some(nested) = nest(&key, value).into_dict() {
                dict = merge(dict, nested);
            }
        }

        Ok(Profile::Default.collect(dict))
    }
}

fn merge(mut left: Dict, right: Dict) -> Dict {
    for (key, value) in right {
        let merged = match (left.remove(&key), value) {
            (Some(Value::Dict(_, a)), Value::Dict(tag, b)) => Value::Dict(tag, merge(a, b)),
            (_, value) => value,
        };
        left.insert(key, merged);
    }
    left
}
