use super::Pagination;
use crate::json_c8y::Application;
use crate::json_c8y::ApplicationBinaries;
use crate::json_c8y::ApplicationCollection;
use crate::json_c8y::ApplicationType;
use crate::media_types;
use bytes::Bytes;
use c8y_http::FormPart;
use c8y_http::MultipartForm;
use c8y_http::QueryParams;
use c8y_http::QueryValue;
use c8y_http::RestError;
use c8y_http::ToQuery;
use mime::Mime;

const APPLICATIONS: &str = "/application/applications";
const APPLICATION: &str = "/application/applications/{id}";
const APPLICATION_CLONE: &str = "/application/applications/{id}/clone";
const APPLICATION_BINARIES: &str = "/application/applications/{id}/binaries";
const APPLICATION_BINARY: &str = "/application/applications/{id}/binaries/{binaryId}";
const APPLICATIONS_BY_NAME: &str = "/application/applicationsByName/{name}";
const APPLICATIONS_BY_TENANT: &str = "/application/applicationsByTenant/{tenantId}";
const APPLICATIONS_BY_OWNER: &str = "/application/applicationsByOwner/{tenantId}";
const APPLICATIONS_BY_USER: &str = "/application/applicationsByUser/{username}";

const REMOVED_FIELDS: &[&str] = &["id", "self", "owner", "activeVersionId"];

api_handle!(
    /// `/application/applications` and the lookups by name, tenant, owner or user
    Applications
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationQuery {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub provided_for: Option<String>,
    pub subscriber: Option<String>,
    pub tenant: Option<String>,
    pub application_type: Option<ApplicationType>,
    pub user: Option<String>,
    pub pagination: Pagination,
}

impl ToQuery for ApplicationQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("name", &self.name);
        query.add_if_required("owner", &self.owner);
        query.add_if_required("providedFor", &self.provided_for);
        query.add_if_required("subscriber", &self.subscriber);
        query.add_if_required("tenant", &self.tenant);
        query.add_if_required("type", self.application_type);
        query.add_if_required("user", &self.user);
        self.pagination.append_to(query);
    }
}

impl QueryValue for ApplicationType {
    fn to_query_value(&self) -> Option<String> {
        let value = match self {
            ApplicationType::Hosted => "HOSTED",
            ApplicationType::External => "EXTERNAL",
            ApplicationType::Microservice => "MICROSERVICE",
        };
        Some(value.to_string())
    }
}

impl Applications<'_> {
    pub async fn list(&self, query: &ApplicationQuery) -> Result<ApplicationCollection, RestError> {
        self.list_from(APPLICATIONS, &[], query).await
    }

    pub async fn create(&self, application: &Application) -> Result<Application, RestError> {
        self.ctx
            .post(APPLICATIONS, &[])
            .content_type(media_types::APPLICATION)
            .accept(media_types::APPLICATION)
            .json_without(application, REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Application, RestError> {
        self.ctx
            .get(APPLICATION, &[id])
            .accept(media_types::APPLICATION)
            .send_json()
            .await
    }

    pub async fn update(&self, id: &str, application: &Application) -> Result<Application, RestError> {
        self.ctx
            .put(APPLICATION, &[id])
            .content_type(media_types::APPLICATION)
            .accept(media_types::APPLICATION)
            .json_without(application, REMOVED_FIELDS)
            .send_json()
            .await
    }

    /// Delete an application
    ///
    /// With `force`, the application is deleted even if subscribed by some tenants.
    pub async fn delete(&self, id: &str, force: Option<bool>) -> Result<(), RestError> {
        self.ctx
            .delete(APPLICATION, &[id])
            .query("force", force)
            .send_empty()
            .await
    }

    /// Copy an application, its active binary included, under a new name
    pub async fn clone_application(&self, id: &str) -> Result<Application, RestError> {
        self.ctx
            .post(APPLICATION_CLONE, &[id])
            .accept(media_types::APPLICATION)
            .send_json()
            .await
    }

    pub async fn by_name(
        &self,
        name: &str,
        pagination: &Pagination,
    ) -> Result<ApplicationCollection, RestError> {
        self.list_from(APPLICATIONS_BY_NAME, &[name], pagination)
            .await
    }

    /// Applications available to a tenant, owned or subscribed
    pub async fn by_tenant(
        &self,
        tenant_id: &str,
        pagination: &Pagination,
    ) -> Result<ApplicationCollection, RestError> {
        self.list_from(APPLICATIONS_BY_TENANT, &[tenant_id], pagination)
            .await
    }

    pub async fn by_owner(
        &self,
        tenant_id: &str,
        pagination: &Pagination,
    ) -> Result<ApplicationCollection, RestError> {
        self.list_from(APPLICATIONS_BY_OWNER, &[tenant_id], pagination)
            .await
    }

    pub async fn by_user(
        &self,
        username: &str,
        pagination: &Pagination,
    ) -> Result<ApplicationCollection, RestError> {
        self.list_from(APPLICATIONS_BY_USER, &[username], pagination)
            .await
    }

    /// The archives uploaded for a hosted application or a microservice
    pub async fn list_binaries(&self, id: &str) -> Result<ApplicationBinaries, RestError> {
        self.ctx
            .get(APPLICATION_BINARIES, &[id])
            .accept(media_types::APPLICATION)
            .send_json()
            .await
    }

    /// Upload a zip archive, which becomes the active version of the application
    pub async fn upload_binary(
        &self,
        id: &str,
        file_name: &str,
        archive: impl Into<Bytes>,
    ) -> Result<Application, RestError> {
        let zip: Mime = "application/zip"
            .parse()
            .map_err(|_| RestError::InvalidMediaType("application/zip".to_string()))?;
        let form = MultipartForm::new()
            .part(FormPart::new("file", archive, zip).with_file_name(file_name));
        self.ctx
            .post(APPLICATION_BINARIES, &[id])
            .accept(media_types::APPLICATION)
            .multipart(form)
            .send_json()
            .await
    }

    pub async fn delete_binary(&self, id: &str, binary_id: &str) -> Result<(), RestError> {
        self.ctx
            .delete(APPLICATION_BINARY, &[id, binary_id])
            .send_empty()
            .await
    }

    async fn list_from(
        &self,
        template: &str,
        params: &[&str],
        query: impl ToQuery,
    ) -> Result<ApplicationCollection, RestError> {
        self.ctx
            .get(template, params)
            .query_params(query)
            .accept(media_types::APPLICATION_COLLECTION)
            .send_json()
            .await
    }
}
