use super::Pagination;
use crate::json_c8y::BulkOperation;
use crate::json_c8y::BulkOperationCollection;
use crate::media_types;
use c8y_http::RestError;

const BULK_OPERATIONS: &str = "/devicecontrol/bulkoperations";
const BULK_OPERATION: &str = "/devicecontrol/bulkoperations/{id}";

const REMOVED_FIELDS: &[&str] = &["id", "self", "status", "generalStatus", "progress"];

api_handle!(
    /// `/devicecontrol/bulkoperations`
    BulkOperations
);

impl BulkOperations<'_> {
    pub async fn list(&self, pagination: &Pagination) -> Result<BulkOperationCollection, RestError> {
        self.ctx
            .get(BULK_OPERATIONS, &[])
            .query_params(pagination)
            .accept(media_types::BULK_OPERATION_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create(&self, bulk_operation: &BulkOperation) -> Result<BulkOperation, RestError> {
        self.ctx
            .post(BULK_OPERATIONS, &[])
            .content_type(media_types::BULK_OPERATION)
            .accept(media_types::BULK_OPERATION)
            .json_without(bulk_operation, REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<BulkOperation, RestError> {
        self.ctx
            .get(BULK_OPERATION, &[id])
            .accept(media_types::BULK_OPERATION)
            .send_json()
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        bulk_operation: &BulkOperation,
    ) -> Result<BulkOperation, RestError> {
        self.ctx
            .put(BULK_OPERATION, &[id])
            .content_type(media_types::BULK_OPERATION)
            .accept(media_types::BULK_OPERATION)
            .json_without(bulk_operation, REMOVED_FIELDS)
            .send_json()
            .await
    }

    /// Cancel a bulk operation which has not been started yet
    pub async fn delete(&self, id: &str) -> Result<(), RestError> {
        self.ctx.delete(BULK_OPERATION, &[id]).send_empty().await
    }
}
