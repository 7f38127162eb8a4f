use super::Pagination;
use crate::json_c8y::RetentionRule;
use crate::json_c8y::RetentionRuleCollection;
use crate::media_types;
use c8y_http::RestError;

const RETENTION_RULES: &str = "/retention/retentions";
const RETENTION_RULE: &str = "/retention/retentions/{id}";

const REMOVED_FIELDS: &[&str] = &["id", "self"];

api_handle!(
    /// `/retention/retentions`
    RetentionRules
);

impl RetentionRules<'_> {
    pub async fn list(&self, pagination: &Pagination) -> Result<RetentionRuleCollection, RestError> {
        self.ctx
            .get(RETENTION_RULES, &[])
            .query_params(pagination)
            .accept(media_types::RETENTION_RULE_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create(&self, rule: &RetentionRule) -> Result<RetentionRule, RestError> {
        self.ctx
            .post(RETENTION_RULES, &[])
            .content_type(media_types::RETENTION_RULE)
            .accept(media_types::RETENTION_RULE)
            .json_without(rule, REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<RetentionRule, RestError> {
        self.ctx
            .get(RETENTION_RULE, &[id])
            .accept(media_types::RETENTION_RULE)
            .send_json()
            .await
    }

    pub async fn update(&self, id: &str, rule: &RetentionRule) -> Result<RetentionRule, RestError> {
        self.ctx
            .put(RETENTION_RULE, &[id])
            .content_type(media_types::RETENTION_RULE)
            .accept(media_types::RETENTION_RULE)
            .json_without(rule, REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), RestError> {
        self.ctx.delete(RETENTION_RULE, &[id]).send_empty().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::client;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn rule_is_created_without_its_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/retention/retentions")
            .match_header("content-type", media_types::RETENTION_RULE)
            .match_header("accept", media_types::RETENTION_RULE)
            .match_body(Matcher::Json(json!({
                "dataType": "MEASUREMENT",
                "maximumAge": 30
            })))
            .with_status(201)
            .with_body(r#"{"id": "2", "dataType": "MEASUREMENT", "maximumAge": 30, "editable": true}"#)
            .create_async()
            .await;

        let mut rule = RetentionRule::new("MEASUREMENT", 30);
        rule.id = Some("0".into());

        let c8y = client(&server);
        let created = RetentionRules::new(&c8y).create(&rule).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.id.as_deref(), Some("2"));
        assert_eq!(created.editable, Some(true));
    }
}
