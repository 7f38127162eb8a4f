use super::Pagination;
use crate::json_c8y::Measurement;
use crate::json_c8y::MeasurementCollection;
use crate::media_types;
use c8y_http::json_without;
use c8y_http::QueryParams;
use c8y_http::RestError;
use c8y_http::ToQuery;
use serde_json::json;
use time::OffsetDateTime;

const MEASUREMENTS: &str = "/measurement/measurements";
const MEASUREMENT: &str = "/measurement/measurements/{id}";

const CREATE_REMOVED_FIELDS: &[&str] = &["id", "self", "source.self", "source.name"];

api_handle!(
    /// `/measurement/measurements`
    Measurements
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementQuery {
    pub date_from: Option<OffsetDateTime>,
    pub date_to: Option<OffsetDateTime>,
    pub revert: Option<bool>,
    pub source: Option<String>,
    pub measurement_type: Option<String>,
    pub value_fragment_series: Option<String>,
    pub value_fragment_type: Option<String>,
    pub pagination: Pagination,
}

impl ToQuery for MeasurementQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("dateFrom", self.date_from);
        query.add_if_required("dateTo", self.date_to);
        query.add_if_required("revert", self.revert);
        query.add_if_required("source", &self.source);
        query.add_if_required("type", &self.measurement_type);
        query.add_if_required("valueFragmentSeries", &self.value_fragment_series);
        query.add_if_required("valueFragmentType", &self.value_fragment_type);
        self.pagination.append_to(query);
    }
}

impl Measurements<'_> {
    pub async fn list(&self, query: &MeasurementQuery) -> Result<MeasurementCollection, RestError> {
        self.ctx
            .get(MEASUREMENTS, &[])
            .query_params(query)
            .accept(media_types::MEASUREMENT_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create(&self, measurement: &Measurement) -> Result<Measurement, RestError> {
        self.ctx
            .post(MEASUREMENTS, &[])
            .content_type(media_types::MEASUREMENT)
            .accept(media_types::MEASUREMENT)
            .json_without(measurement, CREATE_REMOVED_FIELDS)
            .send_json()
            .await
    }

    /// Create several measurements with a single request
    pub async fn create_many(
        &self,
        measurements: &[Measurement],
    ) -> Result<MeasurementCollection, RestError> {
        let measurements = measurements
            .iter()
            .map(|measurement| json_without(measurement, CREATE_REMOVED_FIELDS))
            .collect::<Result<Vec<_>, _>>()?;
        self.ctx
            .post(MEASUREMENTS, &[])
            .content_type(media_types::MEASUREMENT_COLLECTION)
            .accept(media_types::MEASUREMENT_COLLECTION)
            .json(&json!({ "measurements": measurements }))
            .send_json()
            .await
    }

    pub async fn delete_many(&self, query: &MeasurementQuery) -> Result<(), RestError> {
        self.ctx
            .delete(MEASUREMENTS, &[])
            .query_params(query)
            .send_empty()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Measurement, RestError> {
        self.ctx
            .get(MEASUREMENT, &[id])
            .accept(media_types::MEASUREMENT)
            .send_json()
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), RestError> {
        self.ctx.delete(MEASUREMENT, &[id]).send_empty().await
    }
}
