//! Vendor media types used for content negotiation
//!
//! Cumulocity expects `application/vnd.com.nsn.cumulocity.<resource>+json`
//! rather than plain `application/json` on most endpoints.

macro_rules! media_types {
    ($($name:ident => $resource:literal,)*) => {
        $(
            pub const $name: &str = concat!("application/vnd.com.nsn.cumulocity.", $resource, "+json");
        )*
    };
}

media_types! {
    ALARM => "alarm",
    ALARM_COLLECTION => "alarmcollection",
    APPLICATION => "application",
    APPLICATION_COLLECTION => "applicationcollection",
    APPLICATION_SETTINGS => "applicationsettings",
    APPLICATION_USER_COLLECTION => "applicationusercollection",
    AUDIT_RECORD => "auditrecord",
    AUDIT_RECORD_COLLECTION => "auditrecordcollection",
    BULK_OPERATION => "bulkoperation",
    BULK_OPERATION_COLLECTION => "bulkoperationcollection",
    DEVICE_CREDENTIALS => "devicecredentials",
    ERROR => "error",
    EVENT => "event",
    EVENT_COLLECTION => "eventcollection",
    EXTERNAL_ID => "externalid",
    EXTERNAL_ID_COLLECTION => "externalidcollection",
    LOGIN_OPTION => "loginoption",
    LOGIN_OPTION_COLLECTION => "loginoptioncollection",
    MANAGED_OBJECT => "managedobject",
    MANAGED_OBJECT_COLLECTION => "managedobjectcollection",
    MEASUREMENT => "measurement",
    MEASUREMENT_COLLECTION => "measurementcollection",
    OPERATION => "operation",
    OPERATION_COLLECTION => "operationcollection",
    OPTION => "option",
    OPTION_COLLECTION => "optioncollection",
    RETENTION_RULE => "retentionrule",
    RETENTION_RULE_COLLECTION => "retentionrulecollection",
    SUBSCRIPTION => "subscription",
    SUBSCRIPTION_COLLECTION => "subscriptioncollection",
}

pub const JSON: &str = "application/json";
pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain";
