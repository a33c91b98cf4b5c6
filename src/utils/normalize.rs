//! Normalization of raw Indico export records.
//!
//! The export API is not contractually typed: any field may be missing,
//! null, or carry a different JSON type than usual. Every function here is
//! total over `serde_json::Value` and falls back to a documented default:
//! - strings and identifiers → `""` (numbers are rendered as text)
//! - durations and sizes → `0` (floats truncate, numeric strings parse)
//! - lists → empty
//! - flags → `false`

use serde_json::Value;

use crate::models::{Attachment, Contribution, Event, Person, Schedule};

/// Normalize one raw contribution record.
///
/// # Examples
///
/// ```
/// use indico_harvest::utils::normalize_contribution;
/// use serde_json::json;
///
/// let c = normalize_contribution(&json!({"id": 7, "title": "Beam loading"}));
/// assert_eq!(c.id, "7");
/// assert_eq!(c.title, "Beam loading");
/// assert_eq!(c.attachment_count, 0);
/// ```
pub fn normalize_contribution(raw: &Value) -> Contribution {
    let start = schedule(raw.get("startDate"));
    let end = schedule(raw.get("endDate"));

    let mut contribution = Contribution {
        id: text(raw, "id"),
        db_id: text(raw, "db_id"),
        friendly_id: text(raw, "friendly_id"),
        title: text(raw, "title"),
        kind: text(raw, "type"),
        description: text(raw, "description"),
        start_date: start.date,
        start_time: start.time,
        end_date: end.date,
        end_time: end.time,
        duration: integer(raw, "duration"),
        location: text(raw, "location"),
        room: text(raw, "room"),
        url: text(raw, "url"),
        session: loose_text(raw.get("session")),
        track: loose_text(raw.get("track")),
        board_number: text(raw, "board_number"),
        code: text(raw, "code"),
        keywords: items(raw, "keywords").map(scalar_text).collect(),
        speakers: people(raw, "speakers"),
        primary_authors: people(raw, "primaryauthors"),
        coauthors: people(raw, "coauthors"),
        ..Default::default()
    };

    let attachments = items(raw, "folders")
        .flat_map(|folder| items(folder, "attachments"))
        .map(attachment)
        .collect();
    contribution.set_attachments(attachments);

    contribution
}

/// Normalize the raw event document, including all of its contributions.
pub fn normalize_event(raw: &Value) -> Event {
    Event {
        title: text(raw, "title"),
        id: text(raw, "id"),
        start_date: schedule(raw.get("startDate")),
        end_date: schedule(raw.get("endDate")),
        location: text(raw, "location"),
        url: text(raw, "url"),
        contributions: items(raw, "contributions")
            .map(normalize_contribution)
            .collect(),
    }
}

fn person(raw: &Value) -> Person {
    Person {
        name: text(raw, "fullName"),
        first_name: text(raw, "first_name"),
        last_name: text(raw, "last_name"),
        affiliation: text(raw, "affiliation"),
        id: text(raw, "id"),
    }
}

fn people(raw: &Value, key: &str) -> Vec<Person> {
    items(raw, key).map(person).collect()
}

fn attachment(raw: &Value) -> Attachment {
    Attachment {
        id: text(raw, "id"),
        title: text(raw, "title"),
        filename: text(raw, "filename"),
        download_url: text(raw, "download_url"),
        content_type: text(raw, "content_type"),
        size: u64::try_from(integer(raw, "size")).unwrap_or(0),
        modified_dt: text(raw, "modified_dt"),
        is_protected: raw
            .get("is_protected")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

/// A `{date, time, tz}` object; an absent or null parent yields empty parts.
fn schedule(raw: Option<&Value>) -> Schedule {
    match raw {
        Some(obj) if obj.is_object() => Schedule {
            date: text(obj, "date"),
            time: text(obj, "time"),
            tz: text(obj, "tz"),
        },
        _ => Schedule::default(),
    }
}

/// Iterate the array at `key`, or nothing if it is absent or not an array.
fn items<'a>(raw: &'a Value, key: &str) -> std::slice::Iter<'a, Value> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|list| list.iter())
        .unwrap_or_default()
}

/// String field; numbers and booleans are rendered, anything else is empty.
fn text(raw: &Value, key: &str) -> String {
    raw.get(key).map(scalar_text).unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Coerce any JSON value to text. Falsy values (null, false, 0, "", [], {})
/// become empty; objects and arrays are rendered as compact JSON.
fn loose_text(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if is_falsy(value) {
        return String::new();
    }
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => scalar_text(value),
        other => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Integer field accepting ints, floats (truncated) and numeric strings.
fn integer(raw: &Value, key: &str) -> i64 {
    match raw.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}
