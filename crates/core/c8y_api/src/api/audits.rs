use super::Pagination;
use crate::json_c8y::AuditRecord;
use crate::json_c8y::AuditRecordCollection;
use crate::media_types;
use c8y_http::QueryParams;
use c8y_http::RestError;
use c8y_http::ToQuery;
use time::OffsetDateTime;

const AUDIT_RECORDS: &str = "/audit/auditRecords";
const AUDIT_RECORD: &str = "/audit/auditRecords/{id}";

const CREATE_REMOVED_FIELDS: &[&str] = &["id", "self", "creationTime"];

api_handle!(
    /// `/audit/auditRecords`
    Audits
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditQuery {
    pub application: Option<String>,
    pub date_from: Option<OffsetDateTime>,
    pub date_to: Option<OffsetDateTime>,
    pub revert: Option<bool>,
    pub source: Option<String>,
    pub audit_type: Option<String>,
    pub user: Option<String>,
    pub pagination: Pagination,
}

impl ToQuery for AuditQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("application", &self.application);
        query.add_if_required("dateFrom", self.date_from);
        query.add_if_required("dateTo", self.date_to);
        query.add_if_required("revert", self.revert);
        query.add_if_required("source", &self.source);
        query.add_if_required("type", &self.audit_type);
        query.add_if_required("user", &self.user);
        self.pagination.append_to(query);
    }
}

impl Audits<'_> {
    pub async fn list(&self, query: &AuditQuery) -> Result<AuditRecordCollection, RestError> {
        self.ctx
            .get(AUDIT_RECORDS, &[])
            .query_params(query)
            .accept(media_types::AUDIT_RECORD_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create(&self, record: &AuditRecord) -> Result<AuditRecord, RestError> {
        self.ctx
            .post(AUDIT_RECORDS, &[])
            .content_type(media_types::AUDIT_RECORD)
            .accept(media_types::AUDIT_RECORD)
            .json_without(record, CREATE_REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<AuditRecord, RestError> {
        self.ctx
            .get(AUDIT_RECORD, &[id])
            .accept(media_types::AUDIT_RECORD)
            .send_json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::client;
    use mockito::Matcher;
    use serde_json::json;
    use time::macros::datetime;

    #[tokio::test]
    async fn dates_are_sent_in_utc() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/audit/auditRecords?dateFrom=2024-03-01T10%3A00%3A00Z&user=admin",
            )
            .match_header("accept", media_types::AUDIT_RECORD_COLLECTION)
            .with_status(200)
            .with_body(r#"{"auditRecords": [{"id": "3", "activity": "Login", "user": "admin"}]}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let records = Audits::new(&c8y)
            .list(&AuditQuery {
                date_from: Some(datetime!(2024-03-01 12:00 +2)),
                user: Some("admin".into()),
                ..AuditQuery::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(records.items[0].activity.as_deref(), Some("Login"));
    }

    #[tokio::test]
    async fn creation_time_is_not_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/audit/auditRecords")
            .match_header("content-type", media_types::AUDIT_RECORD)
            .match_body(Matcher::Json(json!({
                "time": "2024-03-01T12:00:00Z",
                "type": "c8y_Config",
                "activity": "Configuration updated",
                "text": "New configuration pushed",
                "source": { "id": "4242" }
            })))
            .with_status(201)
            .with_body(r#"{"id": "8", "creationTime": "2024-03-01T12:00:00.000Z"}"#)
            .create_async()
            .await;

        let mut record = AuditRecord::new(
            "4242",
            "c8y_Config",
            "Configuration updated",
            "New configuration pushed",
            datetime!(2024-03-01 12:00 UTC),
        );
        record.creation_time = Some(datetime!(2024-01-01 00:00 UTC));

        let c8y = client(&server);
        let created = Audits::new(&c8y).create(&record).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.id.as_deref(), Some("8"));
    }
}
