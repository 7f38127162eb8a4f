use super::Pagination;
use crate::json_c8y::Alarm;
use crate::json_c8y::AlarmCollection;
use crate::json_c8y::AlarmSeverity;
use crate::json_c8y::AlarmStatus;
use crate::media_types;
use c8y_http::QueryParams;
use c8y_http::QueryValue;
use c8y_http::RestError;
use c8y_http::ToQuery;
use time::OffsetDateTime;

const ALARMS: &str = "/alarm/alarms";
const ALARM: &str = "/alarm/alarms/{id}";
const ALARM_COUNT: &str = "/alarm/alarms/count";

const CREATE_REMOVED_FIELDS: &[&str] = &[
    "id",
    "self",
    "creationTime",
    "lastUpdated",
    "count",
    "firstOccurrenceTime",
    "source.self",
    "source.name",
];

const UPDATE_REMOVED_FIELDS: &[&str] = &[
    "id",
    "self",
    "creationTime",
    "lastUpdated",
    "count",
    "firstOccurrenceTime",
    "time",
    "type",
    "source",
];

api_handle!(
    /// `/alarm/alarms`
    Alarms
);

/// Filters of a request on the alarm collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlarmQuery {
    pub created_from: Option<OffsetDateTime>,
    pub created_to: Option<OffsetDateTime>,
    pub date_from: Option<OffsetDateTime>,
    pub date_to: Option<OffsetDateTime>,
    pub last_updated_from: Option<OffsetDateTime>,
    pub last_updated_to: Option<OffsetDateTime>,
    pub resolved: Option<bool>,
    pub severity: Option<AlarmSeverity>,
    pub source: Option<String>,
    pub status: Vec<AlarmStatus>,
    pub alarm_type: Vec<String>,
    pub with_source_assets: Option<bool>,
    pub with_source_devices: Option<bool>,
    pub pagination: Pagination,
}

impl ToQuery for AlarmQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("createdFrom", self.created_from);
        query.add_if_required("createdTo", self.created_to);
        query.add_if_required("dateFrom", self.date_from);
        query.add_if_required("dateTo", self.date_to);
        query.add_if_required("lastUpdatedFrom", self.last_updated_from);
        query.add_if_required("lastUpdatedTo", self.last_updated_to);
        query.add_if_required("resolved", self.resolved);
        query.add_if_required("severity", self.severity);
        query.add_if_required("source", &self.source);
        query.add_if_required("status", &self.status);
        query.add_if_required("type", &self.alarm_type);
        query.add_if_required("withSourceAssets", self.with_source_assets);
        query.add_if_required("withSourceDevices", self.with_source_devices);
        self.pagination.append_to(query);
    }
}

impl QueryValue for AlarmSeverity {
    fn to_query_value(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

impl QueryValue for AlarmStatus {
    fn to_query_value(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

impl Alarms<'_> {
    pub async fn list(&self, query: &AlarmQuery) -> Result<AlarmCollection, RestError> {
        self.ctx
            .get(ALARMS, &[])
            .query_params(query)
            .accept(media_types::ALARM_COLLECTION)
            .send_json()
            .await
    }

    /// Raise an alarm
    ///
    /// If an active alarm of the same type exists for the same source,
    /// the platform increments its `count` instead of creating a new one.
    pub async fn create(&self, alarm: &Alarm) -> Result<Alarm, RestError> {
        self.ctx
            .post(ALARMS, &[])
            .content_type(media_types::ALARM)
            .accept(media_types::ALARM)
            .json_without(alarm, CREATE_REMOVED_FIELDS)
            .send_json()
            .await
    }

    /// Update all the alarms matching the filters, e.g. to clear them
    pub async fn update_many(&self, query: &AlarmQuery, update: &Alarm) -> Result<(), RestError> {
        self.ctx
            .put(ALARMS, &[])
            .query_params(query)
            .content_type(media_types::ALARM)
            .json_without(update, UPDATE_REMOVED_FIELDS)
            .send_empty()
            .await
    }

    pub async fn delete_many(&self, query: &AlarmQuery) -> Result<(), RestError> {
        self.ctx
            .delete(ALARMS, &[])
            .query_params(query)
            .send_empty()
            .await
    }

    /// Number of alarms matching the filters, paging aside
    pub async fn count(&self, query: &AlarmQuery) -> Result<u64, RestError> {
        let query = AlarmQuery {
            pagination: Pagination::default(),
            ..query.clone()
        };
        self.ctx
            .get(ALARM_COUNT, &[])
            .query_params(&query)
            .accept("text/plain, application/json")
            .send_json()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Alarm, RestError> {
        self.ctx
            .get(ALARM, &[id])
            .accept(media_types::ALARM)
            .send_json()
            .await
    }

    pub async fn update(&self, id: &str, alarm: &Alarm) -> Result<Alarm, RestError> {
        self.ctx
            .put(ALARM, &[id])
            .content_type(media_types::ALARM)
            .accept(media_types::ALARM)
            .json_without(alarm, UPDATE_REMOVED_FIELDS)
            .send_json()
            .await
    }
}
