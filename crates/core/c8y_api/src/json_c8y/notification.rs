use super::ManagedObjectRef;
use serde::Deserialize;
use serde::Serialize;

/// A notification 2.0 subscription to the changes of a managed object or of the whole tenant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSubscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    /// `mo` or `tenant`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ManagedObjectRef>,

    /// The subscription name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_filter: Option<SubscriptionFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragments_to_copy: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_persistent: Option<bool>,
}

impl NotificationSubscription {
    /// A subscription to the changes of a managed object
    pub fn for_managed_object(
        subscription: impl Into<String>,
        source: impl Into<ManagedObjectRef>,
    ) -> Self {
        NotificationSubscription {
            context: Some("mo".to_string()),
            source: Some(source.into()),
            subscription: Some(subscription.into()),
            ..NotificationSubscription::default()
        }
    }

    /// A subscription to the changes of the whole tenant
    pub fn for_tenant(subscription: impl Into<String>) -> Self {
        NotificationSubscription {
            context: Some("tenant".to_string()),
            subscription: Some(subscription.into()),
            ..NotificationSubscription::default()
        }
    }

    pub fn with_filter(self, filter: SubscriptionFilter) -> Self {
        NotificationSubscription {
            subscription_filter: Some(filter),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionFilter {
    /// `alarms`, `alarmsWithChildren`, `events`, `eventsWithChildren`, `managedobjects`, `measurements`, `operations` or `*`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apis: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<String>,
}

c8y_collection!(NotificationSubscriptionCollection<NotificationSubscription>, "subscriptions");

/// The claims of a token granting access to a subscription
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTokenClaims {
    pub subscriber: String,

    pub subscription: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_minutes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_persistent: Option<bool>,
}

impl NotificationTokenClaims {
    pub fn new(subscriber: impl Into<String>, subscription: impl Into<String>) -> Self {
        NotificationTokenClaims {
            subscriber: subscriber.into(),
            subscription: subscription.into(),
            ..NotificationTokenClaims::default()
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationToken {
    pub token: String,
}

impl std::fmt::Debug for NotificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationToken").finish_non_exhaustive()
    }
}

/// The outcome of an unsubscription, `DONE` on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsubscribeResult {
    pub result: String,
}
