use crate::json_c8y::ExternalId;
use crate::json_c8y::ExternalIdCollection;
use crate::media_types;
use c8y_http::RestError;

const GLOBAL_ID_EXTERNAL_IDS: &str = "/identity/globalIds/{id}/externalIds";
const EXTERNAL_ID: &str = "/identity/externalIds/{type}/{externalId}";

const CREATE_REMOVED_FIELDS: &[&str] = &["self", "managedObject"];

api_handle!(
    /// `/identity`: external ids of managed objects
    Identity
);

impl Identity<'_> {
    /// The external ids of a managed object, given its internal id
    pub async fn list_external_ids(&self, id: &str) -> Result<ExternalIdCollection, RestError> {
        self.ctx
            .get(GLOBAL_ID_EXTERNAL_IDS, &[id])
            .accept(media_types::EXTERNAL_ID_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create_external_id(
        &self,
        id: &str,
        external_id: &ExternalId,
    ) -> Result<ExternalId, RestError> {
        self.ctx
            .post(GLOBAL_ID_EXTERNAL_IDS, &[id])
            .content_type(media_types::EXTERNAL_ID)
            .accept(media_types::EXTERNAL_ID)
            .json_without(external_id, CREATE_REMOVED_FIELDS)
            .send_json()
            .await
    }

    /// Resolve an external id, e.g. a device serial number, into a managed object reference
    pub async fn get_external_id(
        &self,
        id_type: &str,
        external_id: &str,
    ) -> Result<ExternalId, RestError> {
        self.ctx
            .get(EXTERNAL_ID, &[id_type, external_id])
            .accept(media_types::EXTERNAL_ID)
            .send_json()
            .await
    }

    pub async fn delete_external_id(&self, id_type: &str, external_id: &str) -> Result<(), RestError> {
        self.ctx
            .delete(EXTERNAL_ID, &[id_type, external_id])
            .send_empty()
            .await
    }
}
