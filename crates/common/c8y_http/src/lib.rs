//! A thin REST layer over the Cumulocity HTTP API
//!
//! Builds requests from resource path templates and optional query parameters,
//! authenticates them, and maps non-successful responses to [RestError].
mod body;
mod client;
mod credentials;
mod error;
mod path;
mod processing_mode;
mod query;
mod request;
mod response;

pub use body::json_without;
pub use body::strip_fields;
pub use body::FormPart;
pub use body::MultipartForm;
pub use body::RequestBody;
pub use client::parse_base_url;
pub use client::C8yHttpClient;
pub use client::C8yHttpClientBuilder;
pub use client::C8yHttpConfigBuildError;
pub use credentials::Credentials;
pub use error::ErrorEnvelope;
pub use error::ErrorKind;
pub use error::RestError;
pub use path::expand_path;
pub use path::PathError;
pub use processing_mode::ProcessingMode;
pub use processing_mode::PROCESSING_MODE_HEADER;
pub use query::QueryParams;
pub use query::QueryValue;
pub use query::ToQuery;
pub use request::RestRequest;
pub use response::ByteStream;

pub use reqwest::Method;
pub use reqwest::StatusCode;
pub use tokio_util::sync::CancellationToken;
