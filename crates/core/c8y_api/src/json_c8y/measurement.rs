use super::ManagedObjectRef;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use serde_json::Map;
use serde_json::Value;
use time::OffsetDateTime;

/// A measurement: a set of `fragment.series` values taken at a given time
///
/// ```json
/// {
///     "source": { "id": "4242" },
///     "type": "c8y_TemperatureMeasurement",
///     "time": "2024-03-01T12:00:00Z",
///     "c8y_Temperature": { "T": { "value": 21.5, "unit": "C" } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<OffsetDateTime>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub measurement_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ManagedObjectRef>,

    /// The measured values, grouped by fragment and series
    #[serde(flatten)]
    pub fragments: Map<String, Value>,
}

impl Measurement {
    pub fn new(
        source: impl Into<ManagedObjectRef>,
        measurement_type: impl Into<String>,
        time: OffsetDateTime,
    ) -> Self {
        Measurement {
            source: Some(source.into()),
            measurement_type: Some(measurement_type.into()),
            time: Some(time),
            ..Measurement::default()
        }
    }

    /// Add a value to the `fragment.series` of this measurement
    pub fn with_value(
        mut self,
        fragment: &str,
        series: &str,
        value: f64,
        unit: Option<&str>,
    ) -> Self {
        let value = match unit {
            Some(unit) => json!({ "value": value, "unit": unit }),
            None => json!({ "value": value }),
        };
        match self.fragments.get_mut(fragment).and_then(Value::as_object_mut) {
            Some(fragment) => {
                fragment.insert(series.to_string(), value);
            }
            None => {
                self.fragments
                    .insert(fragment.to_string(), json!({ series: value }));
            }
        }
        self
    }

    /// The value of a `fragment.series`, if any
    pub fn value(&self, fragment: &str, series: &str) -> Option<f64> {
        self.fragments
            .get(fragment)?
            .get(series)?
            .get("value")?
            .as_f64()
    }
}

c8y_collection!(MeasurementCollection<Measurement>, "measurements");

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[test]
    fn values_are_grouped_by_fragment_and_series() {
        let measurement =
            Measurement::new("4242", "c8y_Electric", datetime!(2024-03-01 12:00 UTC))
                .with_value("c8y_Electric", "voltage", 230.0, Some("V"))
                .with_value("c8y_Electric", "current", 1.5, Some("A"));

        assert_eq!(
            serde_json::to_value(&measurement).unwrap(),
            json!({
                "time": "2024-03-01T12:00:00Z",
                "type": "c8y_Electric",
                "source": { "id": "4242" },
                "c8y_Electric": {
                    "voltage": { "value": 230.0, "unit": "V" },
                    "current": { "value": 1.5, "unit": "A" }
                }
            })
        );
        assert_eq!(measurement.value("c8y_Electric", "current"), Some(1.5));
        assert_eq!(measurement.value("c8y_Electric", "power"), None);
    }
}
