use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::models::coerce::{coerce_json_or_default, Metadata};
use crate::registry::FromMetadata;

task_config! {
    /// Configuration for the Read Service Alerts task.
    pub struct ReadServiceAlertsTaskConfig for ReadServiceAlerts {
        adp_readServiceAlerts_blacklist: String = String::new(),
        /// Free-form; the service accepts a date string or a structured value.
        adp_readServiceAlerts_date: Value = Value::Null,
        adp_readServiceAlerts_lastDate: String = String::new(),
        adp_readServiceAlerts_listOfProperties: String = String::new(),
        adp_readServiceAlerts_maximum: String = String::new(),
        adp_readServiceAlerts_outputJson: String = "adp_readServiceAlerts_json_output".into(),
        adp_abortWfOnFailure: bool = true,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceAlert {
    pub message: String,
    pub id: String,
    pub identification: String,
    pub alternative_identification: String,
    pub host_name: String,
    pub applications: Vec<String>,
    pub severity: String,
    #[serde(deserialize_with = "report_timestamp")]
    pub report_on: Option<DateTime<Utc>>,
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an alert timestamp. Offset-less values are taken as UTC.
fn parse_report_on(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn report_timestamp<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(d)? {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_report_on(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid reportOn timestamp {s:?}"))),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid reportOn epoch {n}"))),
        Some(other) => Err(de::Error::custom(format!(
            "invalid reportOn value {other}"
        ))),
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadServiceAlertsResult {
    pub adp_readServiceAlerts_json_output: Vec<ServiceAlert>,
}

impl ReadServiceAlertsResult {
    pub fn by_severity<'a>(&'a self, severity: &'a str) -> impl Iterator<Item = &'a ServiceAlert> {
        self.adp_readServiceAlerts_json_output
            .iter()
            .filter(move |a| a.severity.eq_ignore_ascii_case(severity))
    }
}

impl FromMetadata for ReadServiceAlertsResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_readServiceAlerts_json_output: coerce_json_or_default(
                metadata,
                "adp_readServiceAlerts_json_output",
            )?,
        })
    }
}
