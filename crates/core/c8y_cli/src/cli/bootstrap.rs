use super::Output;
use c8y_api::C8yClient;
use c8y_http::CancellationToken;

#[derive(clap::Subcommand, Debug)]
pub enum BootstrapCmd {
    /// List the service users of the tenants subscribed to the application
    Subscriptions,
}

impl BootstrapCmd {
    pub fn description(&self) -> String {
        match self {
            BootstrapCmd::Subscriptions => "list the application subscriptions".to_string(),
        }
    }

    pub async fn execute(self, c8y: &C8yClient, cancel: CancellationToken) -> anyhow::Result<Output> {
        match self {
            BootstrapCmd::Subscriptions => {
                let users = c8y
                    .current_application()
                    .cancel_on(cancel)
                    .subscriptions()
                    .await?;
                Output::json(&users)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c8y_http::C8yHttpClient;
    use c8y_http::Credentials;
    use serde_json::json;

    #[tokio::test]
    async fn cancelled_command_fails() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/application/currentApplication/subscriptions")
            .expect(0)
            .create_async()
            .await;

        let c8y: C8yClient = C8yHttpClient::builder(&server.url())
            .bootstrap_credentials(Credentials::basic("servicebootstrap_app", "secret"))
            .build()
            .unwrap()
            .into();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = BootstrapCmd::Subscriptions
            .execute(&c8y, cancel)
            .await
            .unwrap_err();

        mock.assert_async().await;
        let error = error.downcast::<c8y_http::RestError>().unwrap();
        assert!(error.is_cancelled());
    }

    #[tokio::test]
    async fn service_users_are_printed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/application/currentApplication/subscriptions")
            .with_status(200)
            .with_body(r#"{"users": [{"tenant": "t777", "name": "service_app", "password": "p4ss"}]}"#)
            .create_async()
            .await;

        let c8y: C8yClient = C8yHttpClient::new(&server.url()).unwrap().into();
        let output = BootstrapCmd::Subscriptions
            .execute(&c8y, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            output,
            Output::Json(json!({
                "users": [{ "tenant": "t777", "name": "service_app", "password": "p4ss" }]
            }))
        );
    }
}
