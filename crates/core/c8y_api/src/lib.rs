//! Typed client of the Cumulocity IoT REST API
//!
//! ```no_run
//! # async fn example() -> Result<(), c8y_api::RestError> {
//! use c8y_api::C8yClient;
//! use c8y_api::EventQuery;
//! use c8y_api::Pagination;
//! use c8y_http::C8yHttpClient;
//! use c8y_http::Credentials;
//!
//! let http = C8yHttpClient::builder("example.cumulocity.com")
//!     .credentials(Credentials::tenant_user("t12345", "admin", "secret"))
//!     .build()?;
//! let c8y = C8yClient::from(http);
//!
//! let events = c8y
//!     .events()
//!     .list(&EventQuery {
//!         event_type: Some("c8y_LocationUpdate".into()),
//!         pagination: Pagination::page_size(5),
//!         ..EventQuery::default()
//!     })
//!     .await?;
//! for event in events.items {
//!     println!("{:?}", event.text);
//! }
//! # Ok(())
//! # }
//! ```
pub mod json_c8y;
pub mod media_types;

mod api;

pub use api::*;
pub use c8y_http::ByteStream;
pub use c8y_http::C8yHttpClient;
pub use c8y_http::CancellationToken;
pub use c8y_http::ProcessingMode;
pub use c8y_http::RestError;

/// Entry point to all the API handles, sharing one HTTP client
#[derive(Debug, Clone)]
pub struct C8yClient {
    http: C8yHttpClient,
}

impl From<C8yHttpClient> for C8yClient {
    fn from(http: C8yHttpClient) -> Self {
        C8yClient { http }
    }
}

impl C8yClient {
    pub fn http(&self) -> &C8yHttpClient {
        &self.http
    }

    pub fn alarms(&self) -> Alarms<'_> {
        Alarms::new(&self.http)
    }

    pub fn applications(&self) -> Applications<'_> {
        Applications::new(&self.http)
    }

    pub fn audits(&self) -> Audits<'_> {
        Audits::new(&self.http)
    }

    pub fn binaries(&self) -> Binaries<'_> {
        Binaries::new(&self.http)
    }

    pub fn bulk_operations(&self) -> BulkOperations<'_> {
        BulkOperations::new(&self.http)
    }

    pub fn current_application(&self) -> CurrentApplication<'_> {
        CurrentApplication::new(&self.http)
    }

    pub fn device_credentials(&self) -> DeviceCredentialsApi<'_> {
        DeviceCredentialsApi::new(&self.http)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(&self.http)
    }

    pub fn identity(&self) -> Identity<'_> {
        Identity::new(&self.http)
    }

    pub fn inventory(&self) -> Inventory<'_> {
        Inventory::new(&self.http)
    }

    pub fn login_options(&self) -> LoginOptions<'_> {
        LoginOptions::new(&self.http)
    }

    pub fn measurements(&self) -> Measurements<'_> {
        Measurements::new(&self.http)
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(&self.http)
    }

    pub fn operations(&self) -> Operations<'_> {
        Operations::new(&self.http)
    }

    pub fn retention_rules(&self) -> RetentionRules<'_> {
        RetentionRules::new(&self.http)
    }

    pub fn tenant_options(&self) -> TenantOptions<'_> {
        TenantOptions::new(&self.http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c8y_http::Credentials;

    #[tokio::test]
    async fn handles_share_the_client_settings() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/event/events")
            .match_header("x-cumulocity-processing-mode", "QUIESCENT")
            .match_header("authorization", "Bearer my-token")
            .with_status(201)
            .with_body(r#"{"id": "1"}"#)
            .create_async()
            .await;

        let http = C8yHttpClient::builder(&server.url())
            .credentials(Credentials::bearer("my-token"))
            .processing_mode(ProcessingMode::Quiescent)
            .build()
            .unwrap();
        let c8y = C8yClient::from(http);
        let event = c8y
            .events()
            .create(&json_c8y::Event::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(event.id.as_deref(), Some("1"));
    }
}
