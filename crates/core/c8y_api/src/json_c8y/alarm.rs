use super::ManagedObjectRef;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use std::fmt;
use time::OffsetDateTime;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlarmSeverity {
    Critical,
    Major,
    Minor,
    Warning,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlarmStatus {
    Active,
    Acknowledged,
    Cleared,
}

impl AlarmSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AlarmSeverity::Critical => "CRITICAL",
            AlarmSeverity::Major => "MAJOR",
            AlarmSeverity::Minor => "MINOR",
            AlarmSeverity::Warning => "WARNING",
        }
    }
}

impl AlarmStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AlarmStatus::Active => "ACTIVE",
            AlarmStatus::Acknowledged => "ACKNOWLEDGED",
            AlarmStatus::Cleared => "CLEARED",
        }
    }
}

impl fmt::Display for AlarmSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_time: Option<OffsetDateTime>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<OffsetDateTime>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<OffsetDateTime>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_occurrence_time: Option<OffsetDateTime>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub alarm_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<AlarmSeverity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AlarmStatus>,

    /// Number of times the alarm has been raised while active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ManagedObjectRef>,

    #[serde(flatten)]
    pub fragments: Map<String, Value>,
}

impl Alarm {
    pub fn new(
        source: impl Into<ManagedObjectRef>,
        alarm_type: impl Into<String>,
        text: impl Into<String>,
        severity: AlarmSeverity,
        time: OffsetDateTime,
    ) -> Self {
        Alarm {
            source: Some(source.into()),
            alarm_type: Some(alarm_type.into()),
            text: Some(text.into()),
            severity: Some(severity),
            time: Some(time),
            ..Alarm::default()
        }
    }

    /// An update that only changes the status of an alarm
    pub fn with_status(status: AlarmStatus) -> Self {
        Alarm {
            status: Some(status),
            ..Alarm::default()
        }
    }

    pub fn with_fragment(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fragments.insert(name.into(), value);
        self
    }
}

c8y_collection!(AlarmCollection<Alarm>, "alarms");
