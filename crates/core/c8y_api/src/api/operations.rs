use super::Pagination;
use crate::json_c8y::Operation;
use crate::json_c8y::OperationCollection;
use crate::json_c8y::OperationStatus;
use crate::media_types;
use c8y_http::QueryParams;
use c8y_http::QueryValue;
use c8y_http::RestError;
use c8y_http::ToQuery;
use time::OffsetDateTime;

const OPERATIONS: &str = "/devicecontrol/operations";
const OPERATION: &str = "/devicecontrol/operations/{id}";

const CREATE_REMOVED_FIELDS: &[&str] = &[
    "id",
    "self",
    "creationTime",
    "status",
    "failureReason",
    "deviceName",
    "bulkOperationId",
    "deviceExternalIDs",
];

const UPDATE_REMOVED_FIELDS: &[&str] = &[
    "id",
    "self",
    "creationTime",
    "deviceId",
    "deviceName",
    "bulkOperationId",
    "deviceExternalIDs",
];

api_handle!(
    /// `/devicecontrol/operations`
    Operations
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationQuery {
    /// The agent which executes the operations
    pub agent_id: Option<String>,
    pub bulk_operation_id: Option<String>,
    pub date_from: Option<OffsetDateTime>,
    pub date_to: Option<OffsetDateTime>,
    /// The target device
    pub device_id: Option<String>,
    pub fragment_type: Option<String>,
    pub revert: Option<bool>,
    pub status: Option<OperationStatus>,
    pub pagination: Pagination,
}

impl ToQuery for OperationQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("agentId", &self.agent_id);
        query.add_if_required("bulkOperationId", &self.bulk_operation_id);
        query.add_if_required("dateFrom", self.date_from);
        query.add_if_required("dateTo", self.date_to);
        query.add_if_required("deviceId", &self.device_id);
        query.add_if_required("fragmentType", &self.fragment_type);
        query.add_if_required("revert", self.revert);
        query.add_if_required("status", self.status);
        self.pagination.append_to(query);
    }
}

impl QueryValue for OperationStatus {
    fn to_query_value(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

impl Operations<'_> {
    pub async fn list(&self, query: &OperationQuery) -> Result<OperationCollection, RestError> {
        self.ctx
            .get(OPERATIONS, &[])
            .query_params(query)
            .accept(media_types::OPERATION_COLLECTION)
            .send_json()
            .await
    }

    /// Send an operation to a device; the operation is created with the `PENDING` status
    pub async fn create(&self, operation: &Operation) -> Result<Operation, RestError> {
        self.ctx
            .post(OPERATIONS, &[])
            .content_type(media_types::OPERATION)
            .accept(media_types::OPERATION)
            .json_without(operation, CREATE_REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn delete_many(&self, query: &OperationQuery) -> Result<(), RestError> {
        self.ctx
            .delete(OPERATIONS, &[])
            .query_params(query)
            .send_empty()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Operation, RestError> {
        self.ctx
            .get(OPERATION, &[id])
            .accept(media_types::OPERATION)
            .send_json()
            .await
    }

    /// Update an operation, typically its status as reported by the agent
    pub async fn update(&self, id: &str, operation: &Operation) -> Result<Operation, RestError> {
        self.ctx
            .put(OPERATION, &[id])
            .content_type(media_types::OPERATION)
            .accept(media_types::OPERATION)
            .json_without(operation, UPDATE_REMOVED_FIELDS)
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

    #[tokio::test]
    async fn pending_operations_of_an_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/devicecontrol/operations?agentId=4242&status=PENDING")
            .match_header("accept", media_types::OPERATION_COLLECTION)
            .with_status(200)
            .with_body(
                json!({
                    "operations": [{
                        "id": "9",
                        "deviceId": "4242",
                        "status": "PENDING",
                        "creationTime": "2024-03-01T12:00:00.000Z",
                        "c8y_Restart": {}
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let c8y = client(&server);
        let operations = Operations::new(&c8y)
            .list(&OperationQuery {
                agent_id: Some("4242".into()),
                status: Some(OperationStatus::Pending),
                ..OperationQuery::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        let operation = &operations.items[0];
        assert_eq!(operation.status, Some(OperationStatus::Pending));
        assert!(operation.fragments.contains_key("c8y_Restart"));
    }

    #[tokio::test]
    async fn status_is_not_sent_on_create() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/devicecontrol/operations")
            .match_body(Matcher::Json(json!({
                "deviceId": "4242",
                "description": "Restart device",
                "c8y_Restart": {}
            })))
            .with_status(201)
            .with_body(r#"{"id": "10", "status": "PENDING", "deviceId": "4242"}"#)
            .create_async()
            .await;

        let mut operation =
            Operation::new("4242", "Restart device").with_fragment("c8y_Restart", json!({}));
        operation.status = Some(OperationStatus::Successful);
        operation.device_name = Some("my device".into());

        let c8y = client(&server);
        let created = Operations::new(&c8y).create(&operation).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.id.as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn failed_operation_update() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/devicecontrol/operations/10")
            .match_body(Matcher::Json(json!({
                "status": "FAILED",
                "failureReason": "Device is busy"
            })))
            .with_status(200)
            .with_body(r#"{"id": "10", "status": "FAILED", "failureReason": "Device is busy"}"#)
            .create_async()
            .await;

        let mut update =
            Operation::with_status(OperationStatus::Failed, Some("Device is busy".into()));
        update.device_id = Some("4242".into());

        let c8y = client(&server);
        let operation = Operations::new(&c8y).update("10", &update).await.unwrap();

        mock.assert_async().await;
        assert_eq!(operation.failure_reason.as_deref(), Some("Device is busy"));
    }
}
