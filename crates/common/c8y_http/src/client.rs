use crate::Credentials;
use crate::ProcessingMode;
use crate::QueryParams;
use crate::RestError;
use crate::RestRequest;
use c8y_config::C8yConfig;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::ACCEPT;
use reqwest::Certificate;
use reqwest::Method;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared client to a Cumulocity tenant
///
/// Holds the base address, the credentials and a pooled `reqwest::Client`.
/// Cloning is cheap and clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct C8yHttpClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
    bootstrap_credentials: Option<Credentials>,
    processing_mode: Option<ProcessingMode>,
}

impl C8yHttpClient {
    /// A client with default settings and no credentials
    pub fn new(base_url: &str) -> Result<Self, RestError> {
        C8yHttpClient::builder(base_url).build()
    }

    pub fn builder(base_url: &str) -> C8yHttpClientBuilder {
        C8yHttpClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Credentials of the bootstrap user, used before service user credentials are known
    pub fn bootstrap_credentials(&self) -> Option<&Credentials> {
        self.bootstrap_credentials.as_ref()
    }

    /// The processing mode applied to write requests that don't set one
    pub fn processing_mode(&self) -> Option<ProcessingMode> {
        self.processing_mode
    }

    /// A copy of this client authenticating with other credentials
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        C8yHttpClient {
            credentials: Some(credentials),
            ..self.clone()
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Start a request to the resource identified by a path template and its parameters
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), c8y_http::RestError> {
    /// use c8y_http::C8yHttpClient;
    /// use reqwest::Method;
    ///
    /// let c8y = C8yHttpClient::new("https://example.cumulocity.com")?;
    /// let event: serde_json::Value = c8y
    ///     .request(Method::GET, "/event/events/{id}", &["12345"])
    ///     .accept("application/vnd.com.nsn.cumulocity.event+json")
    ///     .send_json()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn request(&self, method: Method, template: &str, params: &[&str]) -> RestRequest<'_> {
        RestRequest::new(self, method, template, params)
    }

    pub fn get(&self, template: &str, params: &[&str]) -> RestRequest<'_> {
        self.request(Method::GET, template, params)
    }

    pub fn post(&self, template: &str, params: &[&str]) -> RestRequest<'_> {
        self.request(Method::POST, template, params)
    }

    pub fn put(&self, template: &str, params: &[&str]) -> RestRequest<'_> {
        self.request(Method::PUT, template, params)
    }

    pub fn delete(&self, template: &str, params: &[&str]) -> RestRequest<'_> {
        self.request(Method::DELETE, template, params)
    }

    /// Compose the full URL of a resource
    pub fn url_for(&self, path: &str, query: &QueryParams) -> Result<Url, RestError> {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}{path}"));
        url.set_query(None);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

/// Normalize a Cumulocity address, `https` being assumed when no scheme is given
pub fn parse_base_url(base_url: &str) -> Result<Url, RestError> {
    let base_url = base_url.trim();
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(Url::parse(base_url)?)
    } else {
        Ok(Url::parse(&format!("https://{base_url}"))?)
    }
}

pub struct C8yHttpClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    bootstrap_credentials: Option<Credentials>,
    processing_mode: Option<ProcessingMode>,
    timeout: Duration,
    root_certs: Vec<PathBuf>,
    http: Option<reqwest::Client>,
}

impl C8yHttpClientBuilder {
    pub fn new(base_url: &str) -> Self {
        C8yHttpClientBuilder {
            base_url: base_url.to_string(),
            credentials: None,
            bootstrap_credentials: None,
            processing_mode: None,
            timeout: DEFAULT_TIMEOUT,
            root_certs: vec![],
            http: None,
        }
    }

    pub fn credentials(self, credentials: Credentials) -> Self {
        C8yHttpClientBuilder {
            credentials: Some(credentials),
            ..self
        }
    }

    pub fn bootstrap_credentials(self, credentials: Credentials) -> Self {
        C8yHttpClientBuilder {
            bootstrap_credentials: Some(credentials),
            ..self
        }
    }

    pub fn processing_mode(self, processing_mode: ProcessingMode) -> Self {
        C8yHttpClientBuilder {
            processing_mode: Some(processing_mode),
            ..self
        }
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        C8yHttpClientBuilder { timeout, ..self }
    }

    /// Trust an additional PEM encoded root certificate
    pub fn root_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_certs.push(path.into());
        self
    }

    /// Use a pre-configured `reqwest::Client`
    ///
    /// The timeout and root certificates of this builder are then ignored.
    pub fn http_client(self, http: reqwest::Client) -> Self {
        C8yHttpClientBuilder {
            http: Some(http),
            ..self
        }
    }

    pub fn build(self) -> Result<C8yHttpClient, RestError> {
        let base_url = parse_base_url(&self.base_url)?;
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut default_headers = HeaderMap::new();
                default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

                let mut builder = reqwest::Client::builder()
                    .default_headers(default_headers)
                    .timeout(self.timeout);
                for path in self.root_certs {
                    let pem = std::fs::read(&path).map_err(|source| RestError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
                }
                builder.build()?
            }
        };

        Ok(C8yHttpClient {
            http,
            base_url,
            credentials: self.credentials,
            bootstrap_credentials: self.bootstrap_credentials,
            processing_mode: self.processing_mode,
        })
    }
}

/// The errors that could occur while building a `C8yHttpClient` from the configuration
#[derive(Debug, thiserror::Error)]
pub enum C8yHttpConfigBuildError {
    #[error("The Cumulocity URL is not set")]
    MissingUrl,

    #[error(transparent)]
    FromRestError(#[from] RestError),
}

impl TryFrom<&C8yConfig> for C8yHttpClient {
    type Error = C8yHttpConfigBuildError;

    fn try_from(config: &C8yConfig) -> Result<Self, Self::Error> {
        let base_url = config
            .c8y
            .url
            .as_deref()
            .ok_or(C8yHttpConfigBuildError::MissingUrl)?;

        let mut builder = C8yHttpClient::builder(base_url);

        if let Some(token) = &config.c8y.token {
            builder = builder.credentials(Credentials::bearer(token));
        } else if let (Some(user), Some(password)) = (&config.c8y.user, &config.c8y.password) {
            builder = builder.credentials(Credentials::Basic {
                tenant: config.c8y.tenant.clone(),
                user: user.clone(),
                password: password.clone(),
            });
        }

        if let (Some(user), Some(password)) = (&config.bootstrap.user, &config.bootstrap.password)
        {
            builder = builder.bootstrap_credentials(Credentials::Basic {
                tenant: config
                    .bootstrap
                    .tenant
                    .clone()
                    .or_else(|| config.c8y.tenant.clone()),
                user: user.clone(),
                password: password.clone(),
            });
        }

        if let Some(timeout) = config.http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        if let Some(path) = &config.http.root_cert_path {
            builder = builder.root_cert(path);
        }
        if let Some(mode) = &config.http.processing_mode {
            builder = builder.processing_mode(mode.parse()?);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_case::test_case;

    #[test_case("test_host", "https://test_host/")]
    #[test_case("https://tenant.cumulocity.com", "https://tenant.cumulocity.com/")]
    #[test_case("http://127.0.0.1:8001/c8y", "http://127.0.0.1:8001/c8y")]
    fn base_url_defaults_to_https(base_url: &str, expected: &str) {
        assert_eq!(parse_base_url(base_url).unwrap().as_str(), expected);
    }

    #[test]
    fn resource_paths_are_appended_to_the_base_path() {
        let c8y = C8yHttpClient::new("http://127.0.0.1:8001/c8y/").unwrap();
        let url = c8y
            .url_for("/inventory/managedObjects", &QueryParams::new())
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8001/c8y/inventory/managedObjects"
        );
    }

    #[test]
    fn url_has_no_query_string_when_no_parameter_is_given() {
        let c8y = C8yHttpClient::new("tenant.cumulocity.com").unwrap();
        let url = c8y.url_for("/event/events", &QueryParams::new()).unwrap();

        assert_eq!(url.as_str(), "https://tenant.cumulocity.com/event/events");
    }

    #[test]
    fn client_is_built_from_configuration() {
        let mut config = C8yConfig::default();
        config.c8y.url = Some("tenant.cumulocity.com".into());
        config.c8y.tenant = Some("t12345".into());
        config.c8y.user = Some("admin".into());
        config.c8y.password = Some("secret".into());
        config.bootstrap.user = Some("servicebootstrap_app".into());
        config.bootstrap.password = Some("bootstrap".into());
        config.http.processing_mode = Some("transient".into());

        let c8y = C8yHttpClient::try_from(&config).unwrap();

        assert_eq!(c8y.base_url().as_str(), "https://tenant.cumulocity.com/");
        assert_eq!(
            c8y.credentials().and_then(Credentials::username).as_deref(),
            Some("t12345/admin")
        );
        assert_eq!(
            c8y.bootstrap_credentials()
                .and_then(Credentials::username)
                .as_deref(),
            Some("t12345/servicebootstrap_app")
        );
        assert_eq!(c8y.processing_mode(), Some(ProcessingMode::Transient));
    }

    #[test]
    fn token_takes_precedence_over_user_and_password() {
        let mut config = C8yConfig::default();
        config.c8y.url = Some("tenant.cumulocity.com".into());
        config.c8y.user = Some("admin".into());
        config.c8y.password = Some("secret".into());
        config.c8y.token = Some("eyJhbGciOi".into());

        let c8y = C8yHttpClient::try_from(&config).unwrap();

        assert_eq!(c8y.credentials(), Some(&Credentials::bearer("eyJhbGciOi")));
    }

    #[test]
    fn configuration_without_url_is_rejected() {
        assert_matches!(
            C8yHttpClient::try_from(&C8yConfig::default()),
            Err(C8yHttpConfigBuildError::MissingUrl)
        );
    }
}
