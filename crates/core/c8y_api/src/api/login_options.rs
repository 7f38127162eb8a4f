use crate::json_c8y::AuthConfigAccess;
use crate::json_c8y::LoginOption;
use crate::json_c8y::LoginOptionCollection;
use crate::media_types;
use c8y_http::QueryParams;
use c8y_http::RestError;
use c8y_http::ToQuery;

const LOGIN_OPTIONS: &str = "/tenant/loginOptions";
const LOGIN_OPTION: &str = "/tenant/loginOptions/{typeOrId}";
const LOGIN_OPTION_RESTRICT: &str = "/tenant/loginOptions/{typeOrId}/restrict";

const REMOVED_FIELDS: &[&str] = &["id", "self"];

api_handle!(
    /// `/tenant/loginOptions`
    LoginOptions
);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginOptionQuery {
    /// Only the options of the management tenant
    pub management: Option<bool>,
    pub tenant_id: Option<String>,
}

impl ToQuery for LoginOptionQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("management", self.management);
        query.add_if_required("tenantId", &self.tenant_id);
    }
}

impl LoginOptions<'_> {
    /// The login options available on the login page
    ///
    /// This request is accepted without credentials.
    pub async fn list(&self, query: &LoginOptionQuery) -> Result<LoginOptionCollection, RestError> {
        self.ctx
            .get(LOGIN_OPTIONS, &[])
            .query_params(query)
            .accept(media_types::LOGIN_OPTION_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create(&self, option: &LoginOption) -> Result<LoginOption, RestError> {
        self.ctx
            .post(LOGIN_OPTIONS, &[])
            .content_type(media_types::LOGIN_OPTION)
            .accept(media_types::LOGIN_OPTION)
            .json_without(option, REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn get(&self, type_or_id: &str) -> Result<LoginOption, RestError> {
        self.ctx
            .get(LOGIN_OPTION, &[type_or_id])
            .accept(media_types::LOGIN_OPTION)
            .send_json()
            .await
    }

    pub async fn update(
        &self,
        type_or_id: &str,
        option: &LoginOption,
    ) -> Result<LoginOption, RestError> {
        self.ctx
            .put(LOGIN_OPTION, &[type_or_id])
            .content_type(media_types::LOGIN_OPTION)
            .accept(media_types::LOGIN_OPTION)
            .json_without(option, REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn delete(&self, type_or_id: &str) -> Result<(), RestError> {
        self.ctx.delete(LOGIN_OPTION, &[type_or_id]).send_empty().await
    }

    /// Restrict, or not, a login option of `target_tenant` to the management tenant
    pub async fn update_access(
        &self,
        type_or_id: &str,
        target_tenant: &str,
        access: AuthConfigAccess,
    ) -> Result<LoginOption, RestError> {
        self.ctx
            .put(LOGIN_OPTION_RESTRICT, &[type_or_id])
            .query("targetTenant", target_tenant)
            .content_type(media_types::JSON)
            .accept(media_types::LOGIN_OPTION)
            .json(&access)
            .send_json()
            .await
    }
}
