use crate::body::json_without;
use crate::expand_path;
use crate::ByteStream;
use crate::C8yHttpClient;
use crate::Credentials;
use crate::ErrorEnvelope;
use crate::MultipartForm;
use crate::PathError;
use crate::ProcessingMode;
use crate::QueryParams;
use crate::QueryValue;
use crate::RequestBody;
use crate::RestError;
use crate::ToQuery;
use crate::PROCESSING_MODE_HEADER;
use bytes::Bytes;
use mime::Mime;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::warn;
use url::Url;

/// A request under construction
///
/// Errors detected while building the request (a path template not matching its parameters,
/// a body that cannot be serialized) are kept aside and returned when the request is sent.
#[must_use]
pub struct RestRequest<'a> {
    client: &'a C8yHttpClient,
    method: Method,
    path: Result<String, PathError>,
    query: QueryParams,
    headers: HeaderMap,
    body: Result<Option<RequestBody>, RestError>,
    credentials: Option<Credentials>,
    cancel: Option<CancellationToken>,
}

impl<'a> RestRequest<'a> {
    pub(crate) fn new(
        client: &'a C8yHttpClient,
        method: Method,
        template: &str,
        params: &[&str],
    ) -> Self {
        RestRequest {
            client,
            method,
            path: expand_path(template, params),
            query: QueryParams::new(),
            headers: HeaderMap::new(),
            body: Ok(None),
            credentials: None,
            cancel: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Add a query parameter, unless the value is absent
    pub fn query(mut self, name: &str, value: impl QueryValue) -> Self {
        self.query.add_if_required(name, value);
        self
    }

    /// Add a group of query parameters
    pub fn query_params(mut self, params: impl ToQuery) -> Self {
        params.append_to(&mut self.query);
        self
    }

    pub fn header(mut self, name: HeaderName, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(err) => self.body = Err(err.into()),
        }
        self
    }

    /// Set the media type expected in the response
    pub fn accept(self, media_type: &str) -> Self {
        self.header(ACCEPT, media_type)
    }

    /// Set the media type of the request body
    ///
    /// Only relevant for JSON bodies: raw and multipart bodies carry their own content type.
    pub fn content_type(self, media_type: &str) -> Self {
        self.header(CONTENT_TYPE, media_type)
    }

    /// Set the `X-Cumulocity-Processing-Mode` header
    ///
    /// When `None`, the default mode of the client (if any) is used.
    pub fn processing_mode(self, mode: Option<ProcessingMode>) -> Self {
        match mode.or(self.client.processing_mode()) {
            Some(mode) => self.header(PROCESSING_MODE_HEADER, mode.as_str()),
            None => self,
        }
    }

    /// Authenticate this request with other credentials than the client's ones
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Abort the request as soon as the token is cancelled
    pub fn cancel_on(mut self, token: Option<CancellationToken>) -> Self {
        self.cancel = token;
        self
    }

    /// Send a JSON document
    pub fn json<T: Serialize + ?Sized>(self, document: &T) -> Self {
        self.json_without(document, &[])
    }

    /// Send a JSON document, without the given server-managed fields
    pub fn json_without<T: Serialize + ?Sized>(mut self, document: &T, fields: &[&str]) -> Self {
        if self.body.is_ok() {
            self.body = json_without(document, fields).map(|json| Some(RequestBody::Json(json)));
        }
        self
    }

    /// Send raw bytes
    pub fn bytes(mut self, content: impl Into<Bytes>, mime: Mime) -> Self {
        if self.body.is_ok() {
            self.body = Ok(Some(RequestBody::Bytes {
                content: content.into(),
                mime,
            }));
        }
        self
    }

    /// Send a multipart form
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        if self.body.is_ok() {
            self.body = Ok(Some(RequestBody::Multipart(form)));
        }
        self
    }

    /// The URL this request will be sent to
    pub fn url(&self) -> Result<Url, RestError> {
        let path = self.path.clone()?;
        self.client.url_for(&path, &self.query)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body of this request, once server-managed fields have been stripped
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref().ok().and_then(Option::as_ref)
    }

    /// Send the request, returning the response if the status is a success
    pub async fn send(self) -> Result<Response, RestError> {
        let url = self.url()?;
        let RestRequest {
            client,
            method,
            headers,
            body,
            credentials,
            cancel,
            ..
        } = self;
        let endpoint = url.path().to_string();

        let mut request = client
            .http()
            .request(method.clone(), url.clone())
            .headers(headers.clone());
        if let Some(credentials) = credentials.as_ref().or(client.credentials()) {
            request = credentials.authenticate(request);
        }
        request = match body? {
            None => request,
            Some(RequestBody::Json(json)) => {
                let content = serde_json::to_vec(&json).map_err(RestError::Serialize)?;
                if headers.contains_key(CONTENT_TYPE) {
                    request.body(content)
                } else {
                    request.header(CONTENT_TYPE, "application/json").body(content)
                }
            }
            Some(RequestBody::Bytes { content, mime }) => request
                .header(CONTENT_TYPE, mime.as_ref())
                .body(content),
            Some(RequestBody::Multipart(form)) => request.multipart(form.into_form()?),
        };

        debug!(target: "c8y-http", "{method} {url}");
        let response = cancellable(cancel.as_ref(), request.send()).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match cancellable(cancel.as_ref(), response.text()).await {
            Ok(body) => body,
            Err(RestError::Cancelled) => return Err(RestError::Cancelled),
            Err(_) => String::new(),
        };
        warn!(target: "c8y-http", "{method} {endpoint} failed with status {status}");
        Err(RestError::Status {
            status,
            method,
            endpoint,
            envelope: ErrorEnvelope::parse(&body),
            body,
        })
    }

    /// Send the request and decode the JSON response
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, RestError> {
        let cancel = self.cancel.clone();
        let response = self.send().await?;
        let endpoint = response.url().path().to_string();
        let bytes = cancellable(cancel.as_ref(), response.bytes()).await?;
        serde_json::from_slice(&bytes).map_err(|source| RestError::Deserialize { endpoint, source })
    }

    /// Send the request, ignoring the response content
    pub async fn send_empty(self) -> Result<(), RestError> {
        let cancel = self.cancel.clone();
        let response = self.send().await?;
        cancellable(cancel.as_ref(), response.bytes()).await?;
        Ok(())
    }

    /// Send the request and return the response content unprocessed
    pub async fn send_stream(self) -> Result<ByteStream, RestError> {
        let cancel = self.cancel.clone();
        let response = self.send().await?;
        Ok(ByteStream::new(response, cancel))
    }
}

/// Await a future unless the token is cancelled first
pub(crate) async fn cancellable<T, E>(
    cancel: Option<&CancellationToken>,
    future: impl Future<Output = Result<T, E>>,
) -> Result<T, RestError>
where
    RestError: From<E>,
{
    match cancel {
        None => Ok(future.await?),
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(RestError::Cancelled),
            result = future => Ok(result?),
        },
    }
}
