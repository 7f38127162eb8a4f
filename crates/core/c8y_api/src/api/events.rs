use super::object_and_file;
use super::Pagination;
use crate::json_c8y::BinaryInfo;
use crate::json_c8y::Event;
use crate::json_c8y::EventBinary;
use crate::json_c8y::EventCollection;
use crate::media_types;
use bytes::Bytes;
use c8y_http::ByteStream;
use c8y_http::QueryParams;
use c8y_http::RestError;
use c8y_http::ToQuery;
use mime::Mime;
use time::OffsetDateTime;

const EVENTS: &str = "/event/events";
const EVENT: &str = "/event/events/{id}";
const EVENT_BINARY: &str = "/event/events/{id}/binaries";

const CREATE_REMOVED_FIELDS: &[&str] = &[
    "id",
    "self",
    "creationTime",
    "lastUpdated",
    "source.self",
    "source.name",
];

const UPDATE_REMOVED_FIELDS: &[&str] = &[
    "id",
    "self",
    "creationTime",
    "lastUpdated",
    "time",
    "type",
    "source",
];

api_handle!(
    /// `/event/events`
    Events
);

/// Filters of a request on the event collection
///
/// When deleting events, only the filters are used: paging is ignored by the platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub created_from: Option<OffsetDateTime>,
    pub created_to: Option<OffsetDateTime>,
    pub date_from: Option<OffsetDateTime>,
    pub date_to: Option<OffsetDateTime>,
    pub fragment_type: Option<String>,
    pub fragment_value: Option<String>,
    pub last_updated_from: Option<OffsetDateTime>,
    pub last_updated_to: Option<OffsetDateTime>,
    /// List the newest events first
    pub revert: Option<bool>,
    pub source: Option<String>,
    pub event_type: Option<String>,
    pub with_source_assets: Option<bool>,
    pub with_source_devices: Option<bool>,
    pub pagination: Pagination,
}

impl ToQuery for EventQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("createdFrom", self.created_from);
        query.add_if_required("createdTo", self.created_to);
        query.add_if_required("dateFrom", self.date_from);
        query.add_if_required("dateTo", self.date_to);
        query.add_if_required("fragmentType", &self.fragment_type);
        query.add_if_required("fragmentValue", &self.fragment_value);
        query.add_if_required("lastUpdatedFrom", self.last_updated_from);
        query.add_if_required("lastUpdatedTo", self.last_updated_to);
        query.add_if_required("revert", self.revert);
        query.add_if_required("source", &self.source);
        query.add_if_required("type", &self.event_type);
        query.add_if_required("withSourceAssets", self.with_source_assets);
        query.add_if_required("withSourceDevices", self.with_source_devices);
        self.pagination.append_to(query);
    }
}

impl Events<'_> {
    pub async fn list(&self, query: &EventQuery) -> Result<EventCollection, RestError> {
        self.ctx
            .get(EVENTS, &[])
            .query_params(query)
            .accept(media_types::EVENT_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create(&self, event: &Event) -> Result<Event, RestError> {
        self.ctx
            .post(EVENTS, &[])
            .content_type(media_types::EVENT)
            .accept(media_types::EVENT)
            .json_without(event, CREATE_REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn delete_many(&self, query: &EventQuery) -> Result<(), RestError> {
        self.ctx
            .delete(EVENTS, &[])
            .query_params(query)
            .send_empty()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Event, RestError> {
        self.ctx
            .get(EVENT, &[id])
            .accept(media_types::EVENT)
            .send_json()
            .await
    }

    /// Update the text and the custom fragments of an event
    pub async fn update(&self, id: &str, event: &Event) -> Result<Event, RestError> {
        self.ctx
            .put(EVENT, &[id])
            .content_type(media_types::EVENT)
            .accept(media_types::EVENT)
            .json_without(event, UPDATE_REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), RestError> {
        self.ctx.delete(EVENT, &[id]).send_empty().await
    }

    /// Download the attachment of an event
    pub async fn get_attachment(&self, id: &str) -> Result<ByteStream, RestError> {
        self.ctx
            .get(EVENT_BINARY, &[id])
            .accept(media_types::OCTET_STREAM)
            .send_stream()
            .await
    }

    /// Attach a binary to an event, which must not have one yet
    pub async fn upload_attachment(
        &self,
        id: &str,
        info: &BinaryInfo,
        content: impl Into<Bytes>,
    ) -> Result<EventBinary, RestError> {
        let form = object_and_file(info, content.into())?;
        self.ctx
            .post(EVENT_BINARY, &[id])
            .accept(media_types::JSON)
            .multipart(form)
            .send_json()
            .await
    }

    /// Replace the attachment of an event
    pub async fn replace_attachment(
        &self,
        id: &str,
        content: impl Into<Bytes>,
        mime: Mime,
    ) -> Result<EventBinary, RestError> {
        self.ctx
            .put(EVENT_BINARY, &[id])
            .accept(media_types::JSON)
            .bytes(content, mime)
            .send_json()
            .await
    }

    pub async fn delete_attachment(&self, id: &str) -> Result<(), RestError> {
        self.ctx.delete(EVENT_BINARY, &[id]).send_empty().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::client;
    use crate::json_c8y::ManagedObjectRef;
    use assert_matches::assert_matches;
    use c8y_http::CancellationToken;
    use c8y_http::ProcessingMode;
    use c8y_http::StatusCode;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use time::macros::datetime;

    #[tokio::test]
    async fn only_given_filters_are_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/event/events?type=myType&pageSize=5")
            .match_header("accept", media_types::EVENT_COLLECTION)
            .with_status(200)
            .with_body(r#"{"events": [], "statistics": {"currentPage": 1, "pageSize": 5}}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let events = Events::new(&c8y)
            .list(&EventQuery {
                event_type: Some("myType".into()),
                pagination: Pagination::page_size(5),
                ..EventQuery::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(events.items.is_empty());
    }

    #[tokio::test]
    async fn server_managed_fields_are_not_sent_on_create() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/event/events")
            .match_header("content-type", media_types::EVENT)
            .match_header("accept", media_types::EVENT)
            .match_header("x-cumulocity-processing-mode", Matcher::Missing)
            .match_body(Matcher::Json(json!({
                "time": "2024-03-01T12:00:00Z",
                "type": "c8y_LoginEvent",
                "text": "User logged in",
                "source": { "id": "4242" },
                "c8y_User": { "name": "jane" }
            })))
            .with_status(201)
            .with_body(
                json!({
                    "id": "1001",
                    "self": "https://t12345.cumulocity.com/event/events/1001",
                    "creationTime": "2024-03-01T12:00:01Z",
                    "time": "2024-03-01T12:00:00Z",
                    "type": "c8y_LoginEvent",
                    "text": "User logged in",
                    "source": { "id": "4242", "self": "https://t12345.cumulocity.com/inventory/managedObjects/4242" },
                    "c8y_User": { "name": "jane" }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let mut event = Event::new(
            ManagedObjectRef {
                id: "4242".into(),
                self_link: Some("https://t12345.cumulocity.com/inventory/managedObjects/4242".into()),
                name: Some("my device".into()),
            },
            "c8y_LoginEvent",
            "User logged in",
            datetime!(2024-03-01 12:00 UTC),
        )
        .with_fragment("c8y_User", json!({ "name": "jane" }));
        event.id = Some("stale".into());
        event.creation_time = Some(datetime!(2020-01-01 00:00 UTC));

        let c8y = client(&server);
        let created = Events::new(&c8y).create(&event).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.id.as_deref(), Some("1001"));
        assert_eq!(created.fragments.get("c8y_User"), Some(&json!({ "name": "jane" })));
    }

    #[tokio::test]
    async fn update_only_sends_text_and_fragments() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/event/events/1001")
            .match_header("x-cumulocity-processing-mode", "TRANSIENT")
            .match_body(Matcher::Json(json!({
                "text": "Updated",
                "c8y_Status": { "ok": true }
            })))
            .with_status(200)
            .with_body(r#"{"id": "1001", "text": "Updated"}"#)
            .create_async()
            .await;

        let event = Event::new("4242", "c8y_Status", "Updated", datetime!(2024-03-01 12:00 UTC))
            .with_fragment("c8y_Status", json!({ "ok": true }));

        let c8y = client(&server);
        Events::new(&c8y)
            .processing_mode(ProcessingMode::Transient)
            .update("1001", &event)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_many_sends_filters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/event/events")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("source".into(), "4242".into()),
                Matcher::UrlEncoded("dateTo".into(), "2024-01-01T00:00:00Z".into()),
            ]))
            .with_status(204)
            .create_async()
            .await;

        let c8y = client(&server);
        Events::new(&c8y)
            .delete_many(&EventQuery {
                source: Some("4242".into()),
                date_to: Some(datetime!(2024-01-01 00:00 UTC)),
                ..EventQuery::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn attachment_is_uploaded_as_object_and_file_parts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/event/events/1001/binaries")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=.+$".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="object""#.into()),
                Matcher::Regex(r#"\{"name":"syslog.txt","type":"text/plain"\}"#.into()),
                Matcher::Regex(r#"name="file"; filename="syslog.txt""#.into()),
                Matcher::Regex("kernel: boot".into()),
            ]))
            .with_status(201)
            .with_body(r#"{"name": "syslog.txt", "type": "text/plain", "length": 12, "source": "1001"}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let binary = Events::new(&c8y)
            .upload_attachment(
                "1001",
                &BinaryInfo::new("syslog.txt", "text/plain"),
                "kernel: boot",
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(binary.length, Some(12));
        assert_eq!(binary.source.as_deref(), Some("1001"));
    }

    #[tokio::test]
    async fn attachment_is_downloaded_unprocessed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/event/events/1001/binaries")
            .match_header("accept", media_types::OCTET_STREAM)
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("kernel: boot")
            .create_async()
            .await;

        let c8y = client(&server);
        let stream = Events::new(&c8y).get_attachment("1001").await.unwrap();

        assert_eq!(stream.content_type(), Some("text/plain"));
        assert_eq!(stream.collect_bytes().await.unwrap().as_ref(), b"kernel: boot");
    }

    #[tokio::test]
    async fn attachment_is_replaced_with_raw_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/event/events/1001/binaries")
            .match_header("content-type", "application/octet-stream")
            .match_body(vec![0u8, 1, 2, 3])
            .with_status(201)
            .with_body(r#"{"type": "application/octet-stream", "length": 4}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        Events::new(&c8y)
            .replace_attachment("1001", vec![0u8, 1, 2, 3], mime::APPLICATION_OCTET_STREAM)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_event_is_reported_with_its_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/event/events/404")
            .with_status(404)
            .with_header("content-type", media_types::ERROR)
            .with_body(r#"{"error": "event/Not Found", "message": "Finding event from database failed : No event for gid '404'!"}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let error = Events::new(&c8y).get("404").await.unwrap_err();

        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(error.envelope().map(|e| e.error.as_str()), Some("event/Not Found"));
    }

    #[tokio::test]
    async fn cancelled_handle_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/event/events/1001")
            .expect(0)
            .create_async()
            .await;

        let token = CancellationToken::new();
        token.cancel();

        let c8y = client(&server);
        let result = Events::new(&c8y).cancel_on(token).delete("1001").await;

        assert_matches!(result, Err(RestError::Cancelled));
        mock.assert_async().await;
    }
}
