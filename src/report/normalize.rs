// src/report/normalize.rs
//! Coerces the backend's assorted envelope shapes into one canonical form.
//!
//! Observed variants put the success marker in `result` or `status`, the rows
//! in `data`, `list` or `data.list`, the count in `total` or `count`, and an
//! export link in half a dozen places. Every page goes through these
//! functions instead of poking at the raw JSON.

use serde_json::Value;

pub const NO_LINK_MESSAGE: &str = "Report generated but no download link was provided";
pub const EXPORT_FAILED_MESSAGE: &str = "Failed to generate report";

const NO_DATA_PATTERNS: [&str; 5] = [
    "no data",
    "not found",
    "empty",
    "no records",
    "record not found",
];

/// Canonical view of any backend response.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub ok: bool,
    pub rows: Vec<Value>,
    pub total: u64,
    pub message: Option<String>,
}

/// Result of an export request, derived purely from the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Ready { download_url: String },
    /// Benign: the backend found nothing to export.
    Empty { message: String },
    Failed { message: String },
}

pub fn normalize(response: &Value) -> Normalized {
    let rows = extract_rows(response);
    let total = extract_total(response, rows.len());
    Normalized {
        ok: is_success(response),
        rows,
        total,
        message: message(response),
    }
}

pub fn is_success(response: &Value) -> bool {
    ["result", "status"].iter().any(|key| {
        response
            .get(*key)
            .and_then(Value::as_str)
            .map(|s| s.trim().eq_ignore_ascii_case("success"))
            .unwrap_or(false)
    })
}

pub fn extract_rows(response: &Value) -> Vec<Value> {
    let candidates = [
        response.get("data"),
        response.get("list"),
        response.get("data").and_then(|d| d.get("list")),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// `total`, then `count`, then the number of rows. A present-but-garbage
/// count is taken as 0 rather than falling through.
pub fn extract_total(response: &Value, row_count: usize) -> u64 {
    ["total", "count"]
        .iter()
        .filter_map(|key| response.get(*key))
        .find(|v| !v.is_null())
        .map(|v| to_count(Some(v)))
        .unwrap_or(row_count as u64)
}

/// Numeric-safe conversion: anything that does not read as a number is 0.
pub fn to_num(value: Option<&Value>) -> f64 {
    let n = match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(_) => 0.0,
    };

    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// [`to_num`] clamped to a non-negative whole number.
pub fn to_count(value: Option<&Value>) -> u64 {
    let n = to_num(value);
    if n <= 0.0 {
        0
    } else {
        n.floor() as u64
    }
}

pub fn extract_url(response: &Value) -> Option<String> {
    let data = response.get("data");
    let candidates = [
        data,
        data.and_then(|d| d.get("url")),
        data.and_then(|d| d.get("link")),
        data.and_then(|d| d.get("data")),
        response.get("url"),
        response.get("link"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn message(response: &Value) -> Option<String> {
    response
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn is_no_data_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    NO_DATA_PATTERNS.iter().any(|p| lower.contains(p))
}

pub fn classify_export(response: &Value) -> ExportOutcome {
    let msg = message(response);

    if !is_success(response) {
        return ExportOutcome::Failed {
            message: msg.unwrap_or_else(|| EXPORT_FAILED_MESSAGE.to_string()),
        };
    }

    if let Some(download_url) = extract_url(response) {
        return ExportOutcome::Ready { download_url };
    }

    match msg {
        Some(message) if is_no_data_message(&message) => ExportOutcome::Empty { message },
        _ => ExportOutcome::Failed {
            message: NO_LINK_MESSAGE.to_string(),
        },
    }
}
