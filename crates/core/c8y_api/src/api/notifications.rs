use super::Pagination;
use crate::json_c8y::NotificationSubscription;
use crate::json_c8y::NotificationSubscriptionCollection;
use crate::json_c8y::NotificationToken;
use crate::json_c8y::NotificationTokenClaims;
use crate::json_c8y::UnsubscribeResult;
use crate::media_types;
use c8y_http::QueryParams;
use c8y_http::RestError;
use c8y_http::ToQuery;

const SUBSCRIPTIONS: &str = "/notification2/subscriptions";
const SUBSCRIPTION: &str = "/notification2/subscriptions/{id}";
const TOKEN: &str = "/notification2/token";
const UNSUBSCRIBE: &str = "/notification2/unsubscribe";

const CREATE_REMOVED_FIELDS: &[&str] = &["id", "self"];

api_handle!(
    /// `/notification2`: subscriptions and tokens of the notification 2.0 service
    Notifications
);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionQuery {
    /// `mo` or `tenant`
    pub context: Option<String>,
    pub source: Option<String>,
    pub subscription: Option<String>,
    pub type_filter: Option<String>,
    pub pagination: Pagination,
}

impl ToQuery for SubscriptionQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("context", &self.context);
        query.add_if_required("source", &self.source);
        query.add_if_required("subscription", &self.subscription);
        query.add_if_required("typeFilter", &self.type_filter);
        self.pagination.append_to(query);
    }
}

impl Notifications<'_> {
    pub async fn list_subscriptions(
        &self,
        query: &SubscriptionQuery,
    ) -> Result<NotificationSubscriptionCollection, RestError> {
        self.ctx
            .get(SUBSCRIPTIONS, &[])
            .query_params(query)
            .accept(media_types::SUBSCRIPTION_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create_subscription(
        &self,
        subscription: &NotificationSubscription,
    ) -> Result<NotificationSubscription, RestError> {
        self.ctx
            .post(SUBSCRIPTIONS, &[])
            .content_type(media_types::SUBSCRIPTION)
            .accept(media_types::SUBSCRIPTION)
            .json_without(subscription, CREATE_REMOVED_FIELDS)
            .send_json()
            .await
    }

    /// Delete all the subscriptions of a context, or of a source
    pub async fn delete_subscriptions(
        &self,
        context: Option<&str>,
        source: Option<&str>,
    ) -> Result<(), RestError> {
        self.ctx
            .delete(SUBSCRIPTIONS, &[])
            .query("context", context)
            .query("source", source)
            .send_empty()
            .await
    }

    pub async fn get_subscription(&self, id: &str) -> Result<NotificationSubscription, RestError> {
        self.ctx
            .get(SUBSCRIPTION, &[id])
            .accept(media_types::SUBSCRIPTION)
            .send_json()
            .await
    }

    pub async fn delete_subscription(&self, id: &str) -> Result<(), RestError> {
        self.ctx.delete(SUBSCRIPTION, &[id]).send_empty().await
    }

    /// Create the token a consumer connects to the notification websocket with
    pub async fn create_token(
        &self,
        claims: &NotificationTokenClaims,
    ) -> Result<NotificationToken, RestError> {
        self.ctx
            .post(TOKEN, &[])
            .content_type(media_types::JSON)
            .accept(media_types::JSON)
            .json(claims)
            .send_json()
            .await
    }

    /// Unsubscribe the subscriber a token has been issued for
    pub async fn unsubscribe(&self, token: &str) -> Result<UnsubscribeResult, RestError> {
        self.ctx
            .post(UNSUBSCRIBE, &[])
            .query("token", token)
            .accept(media_types::JSON)
            .send_json()
            .await
    }
}
