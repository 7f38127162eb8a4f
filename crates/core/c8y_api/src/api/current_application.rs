use crate::json_c8y::Application;
use crate::json_c8y::ApplicationSetting;
use crate::json_c8y::ApplicationUserCollection;
use crate::media_types;
use c8y_http::RestError;

const CURRENT_APPLICATION: &str = "/application/currentApplication";
const CURRENT_APPLICATION_SETTINGS: &str = "/application/currentApplication/settings";
const CURRENT_APPLICATION_SUBSCRIPTIONS: &str = "/application/currentApplication/subscriptions";

const REMOVED_FIELDS: &[&str] = &["id", "self", "owner", "activeVersionId"];

api_handle!(
    /// The application (typically a microservice) whose credentials are used
    CurrentApplication
);

impl CurrentApplication<'_> {
    pub async fn get(&self) -> Result<Application, RestError> {
        self.ctx
            .get(CURRENT_APPLICATION, &[])
            .accept(media_types::APPLICATION)
            .send_json()
            .await
    }

    pub async fn update(&self, application: &Application) -> Result<Application, RestError> {
        self.ctx
            .put(CURRENT_APPLICATION, &[])
            .content_type(media_types::APPLICATION)
            .accept(media_types::APPLICATION)
            .json_without(application, REMOVED_FIELDS)
            .send_json()
            .await
    }

    /// The settings declared by the application manifest, with their current values
    pub async fn settings(&self) -> Result<Vec<ApplicationSetting>, RestError> {
        self.ctx
            .get(CURRENT_APPLICATION_SETTINGS, &[])
            .accept(media_types::APPLICATION_SETTINGS)
            .send_json()
            .await
    }

    /// The service users of the tenants subscribed to the application
    ///
    /// Only the bootstrap user is allowed to list them.
    pub async fn subscriptions(&self) -> Result<ApplicationUserCollection, RestError> {
        let request = self
            .ctx
            .get(CURRENT_APPLICATION_SUBSCRIPTIONS, &[])
            .accept(media_types::APPLICATION_USER_COLLECTION);
        self.ctx.as_bootstrap_user(request).send_json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::client;
    use c8y_http::C8yHttpClient;
    use c8y_http::Credentials;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn subscriptions_are_listed_as_the_bootstrap_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/application/currentApplication/subscriptions")
            // t12345/servicebootstrap_my-app:bootstrap-secret
            .match_header(
                "authorization",
                "Basic dDEyMzQ1L3NlcnZpY2Vib290c3RyYXBfbXktYXBwOmJvb3RzdHJhcC1zZWNyZXQ=",
            )
            .match_header("accept", media_types::APPLICATION_USER_COLLECTION)
            .with_status(200)
            .with_body(r#"{"users": [{"tenant": "t777", "name": "service_my-app", "password": "p4ss"}]}"#)
            .create_async()
            .await;

        let c8y = C8yHttpClient::builder(&server.url())
            .credentials(Credentials::tenant_user("t12345", "admin", "secret"))
            .bootstrap_credentials(Credentials::tenant_user(
                "t12345",
                "servicebootstrap_my-app",
                "bootstrap-secret",
            ))
            .build()
            .unwrap();
        let users = CurrentApplication::new(&c8y).subscriptions().await.unwrap();

        mock.assert_async().await;
        assert_eq!(users.users.len(), 1);
        assert_eq!(users.users[0].tenant, "t777");
        assert!(!format!("{:?}", users.users[0]).contains("p4ss"));
    }

    #[tokio::test]
    async fn settings_are_a_plain_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/application/currentApplication/settings")
            .match_header("accept", media_types::APPLICATION_SETTINGS)
            .with_status(200)
            .with_body(r#"[{"key": "poll.interval", "defaultValue": "60", "editable": true}]"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let settings = CurrentApplication::new(&c8y).settings().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            settings,
            vec![ApplicationSetting {
                key: "poll.interval".into(),
                default_value: Some("60".into()),
                editable: Some(true),
                ..ApplicationSetting::default()
            }]
        );
    }
}
