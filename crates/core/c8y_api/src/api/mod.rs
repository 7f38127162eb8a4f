//! One handle per REST resource
//!
//! A handle borrows the shared [C8yHttpClient] and only knows the path templates,
//! media types and server-managed fields of its endpoints.
use crate::json_c8y::BinaryInfo;
use bytes::Bytes;
use c8y_http::C8yHttpClient;
use c8y_http::CancellationToken;
use c8y_http::FormPart;
use c8y_http::Method;
use c8y_http::MultipartForm;
use c8y_http::ProcessingMode;
use c8y_http::QueryParams;
use c8y_http::RestError;
use c8y_http::RestRequest;
use c8y_http::ToQuery;
use mime::Mime;

/// Declare an API handle, with the settings shared by all the handles
macro_rules! api_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<'a> {
            ctx: $crate::api::ApiContext<'a>,
        }

        impl<'a> $name<'a> {
            pub fn new(c8y: &'a c8y_http::C8yHttpClient) -> Self {
                $name {
                    ctx: $crate::api::ApiContext::new(c8y),
                }
            }

            /// Abort the requests sent with this handle as soon as the token is cancelled
            pub fn cancel_on(self, token: c8y_http::CancellationToken) -> Self {
                $name {
                    ctx: self.ctx.cancel_on(token),
                }
            }

            /// Processing mode of the write requests sent with this handle
            pub fn processing_mode(self, mode: c8y_http::ProcessingMode) -> Self {
                $name {
                    ctx: self.ctx.processing_mode(mode),
                }
            }
        }
    };
}

mod alarms;
mod applications;
mod audits;
mod binaries;
mod bulk_operations;
mod current_application;
mod device_credentials;
mod events;
mod identity;
mod inventory;
mod login_options;
mod measurements;
mod notifications;
mod operations;
mod retention_rules;
mod tenant_options;

pub use alarms::*;
pub use applications::*;
pub use audits::*;
pub use binaries::*;
pub use bulk_operations::*;
pub use current_application::*;
pub use device_credentials::*;
pub use events::*;
pub use identity::*;
pub use inventory::*;
pub use login_options::*;
pub use measurements::*;
pub use notifications::*;
pub use operations::*;
pub use retention_rules::*;
pub use tenant_options::*;

/// Settings attached to every request sent by a handle
#[derive(Debug, Clone)]
pub(crate) struct ApiContext<'a> {
    c8y: &'a C8yHttpClient,
    cancel: Option<CancellationToken>,
    processing_mode: Option<ProcessingMode>,
}

impl<'a> ApiContext<'a> {
    pub(crate) fn new(c8y: &'a C8yHttpClient) -> Self {
        ApiContext {
            c8y,
            cancel: None,
            processing_mode: None,
        }
    }

    pub(crate) fn cancel_on(self, token: CancellationToken) -> Self {
        ApiContext {
            cancel: Some(token),
            ..self
        }
    }

    pub(crate) fn processing_mode(self, mode: ProcessingMode) -> Self {
        ApiContext {
            processing_mode: Some(mode),
            ..self
        }
    }

    fn request(&self, method: Method, template: &str, params: &[&str]) -> RestRequest<'a> {
        self.c8y
            .request(method, template, params)
            .cancel_on(self.cancel.clone())
    }

    pub(crate) fn get(&self, template: &str, params: &[&str]) -> RestRequest<'a> {
        self.request(Method::GET, template, params)
    }

    /// A request changing the platform state, hence tagged with the processing mode
    fn write(&self, method: Method, template: &str, params: &[&str]) -> RestRequest<'a> {
        self.request(method, template, params)
            .processing_mode(self.processing_mode)
    }

    pub(crate) fn post(&self, template: &str, params: &[&str]) -> RestRequest<'a> {
        self.write(Method::POST, template, params)
    }

    pub(crate) fn put(&self, template: &str, params: &[&str]) -> RestRequest<'a> {
        self.write(Method::PUT, template, params)
    }

    pub(crate) fn delete(&self, template: &str, params: &[&str]) -> RestRequest<'a> {
        self.write(Method::DELETE, template, params)
    }

    /// Authenticate a request as the bootstrap user, when one is configured
    pub(crate) fn as_bootstrap_user(&self, request: RestRequest<'a>) -> RestRequest<'a> {
        match self.c8y.bootstrap_credentials() {
            Some(credentials) => request.credentials(credentials.clone()),
            None => request,
        }
    }
}

/// Paging of a collection request
///
/// Pages are numbered from 1. The caller loops over the pages, using the `statistics`
/// of the returned collection to know when to stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub with_total_pages: Option<bool>,
    pub with_total_elements: Option<bool>,
}

impl Pagination {
    pub fn page_size(page_size: u32) -> Self {
        Pagination {
            page_size: Some(page_size),
            ..Pagination::default()
        }
    }

    pub fn page(self, current_page: u32) -> Self {
        Pagination {
            current_page: Some(current_page),
            ..self
        }
    }

    pub fn with_total_pages(self) -> Self {
        Pagination {
            with_total_pages: Some(true),
            ..self
        }
    }

    pub fn with_total_elements(self) -> Self {
        Pagination {
            with_total_elements: Some(true),
            ..self
        }
    }
}

impl ToQuery for Pagination {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("currentPage", self.current_page);
        query.add_if_required("pageSize", self.page_size);
        query.add_if_required("withTotalPages", self.with_total_pages);
        query.add_if_required("withTotalElements", self.with_total_elements);
    }
}

/// The multipart form of a binary upload: an `object` part describing the binary and a `file` part
pub(crate) fn object_and_file(
    info: &BinaryInfo,
    content: Bytes,
) -> Result<MultipartForm, RestError> {
    let mime: Mime = info
        .content_type
        .parse()
        .map_err(|_| RestError::InvalidMediaType(info.content_type.clone()))?;
    let file = FormPart::new("file", content, mime).with_file_name(&info.name);
    Ok(MultipartForm::new()
        .part(FormPart::json("object", info)?)
        .part(file))
}
