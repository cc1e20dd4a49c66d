use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::store::{Document, Fields};

/// Format used when writing a due date into a document.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used when showing a due date in the project table.
pub const DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Shown in place of a missing due date.
pub const NO_DUE_DATE: &str = "N/A";

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    New,
    InProgress,
    Completed,
    Pending,
}

impl ProjectStatus {
    pub fn all() -> &'static [ProjectStatus] {
        &[
            ProjectStatus::New,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::Pending,
        ]
    }

    /// The exact string stored in documents and shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::New => "New",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Pending => "Pending",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.label() == label)
    }
}

/// The fields the board writes into a project document, keyed the way the
/// collection names them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub due_date: Option<String>,
    pub status: String,
}

impl ProjectFields {
    pub fn into_document_fields(self) -> Result<Fields, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "project fields serialized to a non-object: {other}"
            ))),
        }
    }
}

/// A project as materialized from the store.
///
/// Field values are kept in their stored representation; the board never
/// edits a `Project` in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub due_date: Option<String>,
    pub status: String,
}

impl Project {
    /// Materialize a project from a store document (its id plus its fields).
    ///
    /// Documents may be written by other clients, so every field is read
    /// leniently and any document yields a row.
    pub fn from_document(doc: &Document) -> Self {
        let fields = &doc.fields;
        Self {
            id: doc.id.clone(),
            title: text_field(fields, "title"),
            description: text_field(fields, "description"),
            tech_stack: text_field(fields, "techStack"),
            due_date: due_date_field(fields),
            status: text_field(fields, "status"),
        }
    }

    /// The due date as a date value, if one is stored and parses.
    pub fn due_date_value(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_stored_date)
    }

    /// Due date column text: localized date, the raw stored text when it
    /// does not parse, or "N/A" when absent.
    pub fn due_date_display(&self) -> String {
        match (&self.due_date, self.due_date_value()) {
            (_, Some(date)) => format_display_date(date),
            (Some(raw), None) => raw.clone(),
            (None, None) => NO_DUE_DATE.to_string(),
        }
    }

    pub fn status_value(&self) -> Option<ProjectStatus> {
        ProjectStatus::from_label(&self.status)
    }
}

/// Scalars become their text; null, missing, and nested values become empty.
fn text_field(fields: &Fields, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Reads `dueDate` as text. Numbers are epoch milliseconds and objects carry
/// a `seconds` timestamp; both are normalized to the stored date format.
fn due_date_field(fields: &Fields) -> Option<String> {
    match fields.get("dueDate")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(
            n.as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| format_stored_date(dt.date_naive()))
                .unwrap_or_else(|| n.to_string()),
        ),
        Value::Object(map) => map
            .get("seconds")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| format_stored_date(dt.date_naive())),
        _ => None,
    }
}

/// Parse a stored due date. Accepts ISO dates, RFC 3339 timestamps, and
/// slash-separated dates.
pub fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, STORED_DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%Y/%m/%d").ok()
}

pub fn format_stored_date(date: NaiveDate) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}
