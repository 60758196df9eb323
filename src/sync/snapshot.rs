use std::collections::HashSet;

use serde_json::{Map, Value};

use super::SyncError;

/// Status value the server reports for an activity that is not running.
pub const IDLE_STATUS: &str = "Idle";

/// Display-ready header strings. Opaque to the client, passed through verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub start_time_pretty: String,
    pub day_length: String,
    pub total_activity_time: String,
    pub time_left: String,
}

/// A single activity as reported by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRecord {
    pub name: String,
    pub logged_pretty: String,
    pub status: String,
}

impl ActivityRecord {
    pub fn is_active(&self) -> bool {
        self.status != IDLE_STATUS
    }

    /// Text shown on the activity's control.
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.logged_pretty)
    }
}

/// One server response, validated. Activity names are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub summary: DaySummary,
    pub activities: Vec<ActivityRecord>,
}

/// Validates a raw server response.
///
/// Only `activities` and each record's `name` and `status` are required.
/// Header strings and `logged_pretty` default to empty when absent. A
/// duplicate activity name is rejected rather than silently merged.
pub fn parse_snapshot(raw: &Value) -> Result<Snapshot, SyncError> {
    let object = raw
        .as_object()
        .ok_or_else(|| malformed("response is not an object"))?;
    let records = match object.get("activities") {
        Some(Value::Array(records)) => records,
        Some(_) => return Err(malformed("`activities` is not a sequence")),
        None => return Err(malformed("missing `activities`")),
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut activities = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let record = record
            .as_object()
            .ok_or_else(|| malformed(format!("activity #{index} is not an object")))?;
        let name = required_str(record, "name", index)?;
        let status = status_text(record, index)?;
        if !seen.insert(name.clone()) {
            return Err(malformed(format!("duplicate activity name `{name}`")));
        }
        activities.push(ActivityRecord {
            name,
            logged_pretty: optional_str(record, "logged_pretty"),
            status,
        });
    }

    Ok(Snapshot {
        summary: DaySummary {
            start_time_pretty: optional_str(object, "start_time_pretty"),
            day_length: optional_str(object, "day_length"),
            total_activity_time: optional_str(object, "total_activity_time"),
            time_left: optional_str(object, "time_left"),
        },
        activities,
    })
}

fn required_str(
    record: &Map<String, Value>,
    field: &str,
    index: usize,
) -> Result<String, SyncError> {
    match record.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(malformed(format!("activity #{index}: `{field}` is not a string"))),
        None => Err(malformed(format!("activity #{index}: missing `{field}`"))),
    }
}

/// The server may report a running activity as a structured value such as
/// `{"ActiveSince": 1709625600}`; only the exact string `Idle` means idle.
fn status_text(record: &Map<String, Value>, index: usize) -> Result<String, SyncError> {
    match record.get("status") {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Null) | None => Err(malformed(format!("activity #{index}: missing `status`"))),
        Some(other) => Ok(other.to_string()),
    }
}

fn optional_str(object: &Map<String, Value>, field: &str) -> String {
    match object.get(field) {
        Some(Value::String(value)) => value.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn malformed(reason: impl Into<String>) -> SyncError {
    SyncError::MalformedSnapshot(reason.into())
}
