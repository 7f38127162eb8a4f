use super::Pagination;
use crate::json_c8y::CategoryOptions;
use crate::json_c8y::TenantOption;
use crate::json_c8y::TenantOptionCollection;
use crate::media_types;
use c8y_http::RestError;

const OPTIONS: &str = "/tenant/options";
const OPTION: &str = "/tenant/options/{category}/{key}";
const CATEGORY: &str = "/tenant/options/{category}";

api_handle!(
    /// `/tenant/options`
    TenantOptions
);

impl TenantOptions<'_> {
    pub async fn list(&self, pagination: &Pagination) -> Result<TenantOptionCollection, RestError> {
        self.ctx
            .get(OPTIONS, &[])
            .query_params(pagination)
            .accept(media_types::OPTION_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create(&self, option: &TenantOption) -> Result<TenantOption, RestError> {
        self.ctx
            .post(OPTIONS, &[])
            .content_type(media_types::OPTION)
            .accept(media_types::OPTION)
            .json_without(option, &["self"])
            .send_json()
            .await
    }

    pub async fn get(&self, category: &str, key: &str) -> Result<TenantOption, RestError> {
        self.ctx
            .get(OPTION, &[category, key])
            .accept(media_types::OPTION)
            .send_json()
            .await
    }

    /// Change the value of an option
    pub async fn update(
        &self,
        category: &str,
        key: &str,
        value: &str,
    ) -> Result<TenantOption, RestError> {
        self.ctx
            .put(OPTION, &[category, key])
            .content_type(media_types::OPTION)
            .accept(media_types::OPTION)
            .json(&TenantOption::with_value(value))
            .send_json()
            .await
    }

    pub async fn delete(&self, category: &str, key: &str) -> Result<(), RestError> {
        self.ctx.delete(OPTION, &[category, key]).send_empty().await
    }

    pub async fn get_category(&self, category: &str) -> Result<CategoryOptions, RestError> {
        self.ctx
            .get(CATEGORY, &[category])
            .accept(media_types::JSON)
            .send_json()
            .await
    }

    /// Set several options of a category at once
    pub async fn update_category(
        &self,
        category: &str,
        options: &CategoryOptions,
    ) -> Result<CategoryOptions, RestError> {
        self.ctx
            .put(CATEGORY, &[category])
            .content_type(media_types::JSON)
            .accept(media_types::JSON)
            .json(options)
            .send_json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::client;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn only_the_value_is_sent_on_update() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/tenant/options/alarm.type.mapping/c8y_Overheat")
            .match_header("content-type", media_types::OPTION)
            .match_body(Matcher::Json(json!({ "value": "MAJOR|Device overheated" })))
            .with_status(200)
            .with_body(r#"{"category": "alarm.type.mapping", "key": "c8y_Overheat", "value": "MAJOR|Device overheated"}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let option = TenantOptions::new(&c8y)
            .update("alarm.type.mapping", "c8y_Overheat", "MAJOR|Device overheated")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(option.key.as_deref(), Some("c8y_Overheat"));
    }

    #[tokio::test]
    async fn category_is_a_plain_map() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/tenant/options/configuration")
            .match_header("content-type", media_types::JSON)
            .match_body(Matcher::Json(json!({ "poll.interval": "60", "log.level": "debug" })))
            .with_status(200)
            .with_body(r#"{"poll.interval": "60", "log.level": "debug", "retries": "3"}"#)
            .create_async()
            .await;

        let options = CategoryOptions::from([
            ("poll.interval".to_string(), "60".to_string()),
            ("log.level".to_string(), "debug".to_string()),
        ]);

        let c8y = client(&server);
        let category = TenantOptions::new(&c8y)
            .update_category("configuration", &options)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(category.len(), 3);
        assert_eq!(category["retries"], "3");
    }
}
