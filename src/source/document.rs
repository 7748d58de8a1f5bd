//! Wire types for the SQL detail document.
//!
//! These match the JSON served at `ws/sql/{sqlId}`. Numeric fields that are
//! missing or `null` decode as 0, and whole numbers are written back as
//! integers. Fields this crate does not interpret are kept in `extra` so an
//! exported document carries them through unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The SQL detail document for one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlDocument {
    /// Full statement text, when the server could find it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,

    /// One entry per recorded execution plan.
    pub execution_plans: Vec<ExecutionPlan>,

    /// Sessions ranked by activity, highest first.
    pub top_sessions: Vec<SessionRecord>,

    /// Wait event names present in `top_sessions`, in chart order.
    #[serde(default)]
    pub keys: Vec<String>,

    /// Average active sessions by wait event over time.
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Timing breakdown of one execution plan.
///
/// All durations share a unit (microseconds as served by the monitor).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_hash_value: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executions: Option<u64>,

    #[serde(default, deserialize_with = "zero_if_null", serialize_with = "number")]
    pub elapsed_time: f64,

    #[serde(default, deserialize_with = "zero_if_null", serialize_with = "number")]
    pub cpu_time: f64,

    #[serde(default, deserialize_with = "zero_if_null", serialize_with = "number")]
    pub user_io_wait_time: f64,

    #[serde(default, deserialize_with = "zero_if_null", serialize_with = "number")]
    pub concurrency_wait_time: f64,

    #[serde(default, deserialize_with = "zero_if_null", serialize_with = "number")]
    pub application_wait_time: f64,

    #[serde(default, deserialize_with = "zero_if_null", serialize_with = "number")]
    pub cluster_wait_time: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExecutionPlan {
    /// Sum of the named wait categories, CPU included.
    pub fn named_waits(&self) -> f64 {
        self.cpu_time
            + self.user_io_wait_time
            + self.concurrency_wait_time
            + self.application_wait_time
            + self.cluster_wait_time
    }
}

/// Activity of one session against the statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sid: Option<String>,

    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Total activity samples attributed to the session.
    #[serde(default, deserialize_with = "zero_if_null", serialize_with = "number")]
    pub activity: f64,

    /// Share of the statement's total activity, 0-100.
    #[serde(default, deserialize_with = "zero_if_null", serialize_with = "number")]
    pub percentage_total_activity: f64,

    /// Activity samples by wait event name.
    #[serde(
        default,
        deserialize_with = "zero_if_null_values",
        serialize_with = "number_values"
    )]
    pub activity_by_event: BTreeMap<String, f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionRecord {
    /// Activity recorded for `event`, 0 when absent.
    pub fn event_activity(&self, event: &str) -> f64 {
        self.activity_by_event.get(event).copied().unwrap_or(0.0)
    }
}

/// Average active sessions per wait event at one sampling instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,

    #[serde(
        default,
        deserialize_with = "zero_if_null_values",
        serialize_with = "number_values"
    )]
    pub values: BTreeMap<String, f64>,
}

impl Snapshot {
    /// Value recorded for `event`, 0 when absent.
    pub fn value(&self, event: &str) -> f64 {
        self.values.get(event).copied().unwrap_or(0.0)
    }
}

/// Write whole numbers as integers so `50` does not come back as `50.0`.
pub(crate) fn number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Beyond 2^53 an f64 no longer holds every integer exactly.
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn number_values<S>(values: &BTreeMap<String, f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    struct Number(f64);

    impl Serialize for Number {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            number(&self.0, serializer)
        }
    }

    serializer.collect_map(values.iter().map(|(k, v)| (k, Number(*v))))
}

fn zero_if_null_values<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<BTreeMap<String, Option<f64>>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or(0.0)))
        .collect())
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}
