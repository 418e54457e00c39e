// src/dashboard.rs
//! Role dashboard panels: summary cards, gender split and per-district bars.
//!
//! The three panels come from independent endpoints and are fetched
//! concurrently; one failing panel does not hide the others.

use serde_json::{Map, Value};
use std::thread;
use tracing::warn;

use crate::auth::roles::Role;
use crate::backend::{Backend, BackendError, SessionExpired};
use crate::report::normalize::{extract_rows, is_success, message, to_num};
use crate::report::failure_text;

pub const CARDS_PATH: &str = "/dashboard/cards";
pub const GENDER_PATH: &str = "/dashboard/gender";
pub const DISTRICT_BARS_PATH: &str = "/dashboard/district-counts";

const PANEL_FAILED: &str = "Data unavailable";
const LABEL_KEYS: [&str; 6] = ["label", "name", "title", "district", "gender", "key"];
const VALUE_KEYS: [&str; 4] = ["value", "count", "total", "y"];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

pub type Panel = Result<Vec<ChartPoint>, String>;

#[derive(Debug)]
pub struct DashboardData {
    pub cards: Panel,
    pub gender: Panel,
    pub districts: Panel,
}

/// Fan out the three panel requests, then wait for all of them.
pub fn load_dashboard(backend: &dyn Backend, role: Role) -> Result<DashboardData, SessionExpired> {
    let query = vec![("role".to_string(), role.as_str().to_string())];

    let (cards, gender, districts) = thread::scope(|s| {
        let cards = s.spawn(|| backend.get(CARDS_PATH, &query));
        let gender = s.spawn(|| backend.get(GENDER_PATH, &query));
        let districts = s.spawn(|| backend.get(DISTRICT_BARS_PATH, &query));
        (join(cards), join(gender), join(districts))
    });

    Ok(DashboardData {
        cards: panel(CARDS_PATH, cards)?,
        gender: panel(GENDER_PATH, gender)?,
        districts: panel(DISTRICT_BARS_PATH, districts)?,
    })
}

fn join(
    handle: thread::ScopedJoinHandle<'_, Result<Value, BackendError>>,
) -> Result<Value, BackendError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(BackendError::Transport("panel request panicked".to_string())))
}

fn panel(path: &str, response: Result<Value, BackendError>) -> Result<Panel, SessionExpired> {
    match response {
        Ok(v) => Ok(series(&v)),
        Err(BackendError::SessionExpired) => Err(SessionExpired),
        Err(e) => {
            warn!(path, error = %e, "dashboard panel failed");
            Ok(Err(failure_text(&e, PANEL_FAILED)))
        }
    }
}

/// Coerce a chart payload into points. Accepts rows of
/// `{label|name|..., value|count|...}` or a flat object of name -> number,
/// either bare or under `data`.
pub fn series(response: &Value) -> Panel {
    if !is_success(response) {
        return Err(message(response).unwrap_or_else(|| PANEL_FAILED.to_string()));
    }

    if let Some(obj) = response.get("data").and_then(Value::as_object) {
        if obj.get("list").is_none() {
            return Ok(object_points(obj));
        }
    }

    Ok(extract_rows(response).iter().filter_map(row_point).collect())
}

fn object_points(obj: &Map<String, Value>) -> Vec<ChartPoint> {
    obj.iter()
        .filter(|(_, v)| v.is_number() || v.is_string())
        .map(|(k, v)| ChartPoint {
            label: humanize(k),
            value: to_num(Some(v)),
        })
        .collect()
}

fn row_point(row: &Value) -> Option<ChartPoint> {
    let label = LABEL_KEYS
        .iter()
        .filter_map(|k| row.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())?;

    let value = VALUE_KEYS
        .iter()
        .find_map(|k| row.get(*k))
        .map(|v| to_num(Some(v)))
        .unwrap_or(0.0);

    Some(ChartPoint {
        label: label.to_string(),
        value,
    })
}

/// `total_workshops` -> `Total Workshops`
pub fn humanize(key: &str) -> String {
    key.split(|c: char| c == '_' || c == '-' || c == ' ')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Each point's share of the total, in percent. All zeros when empty.
pub fn shares(points: &[ChartPoint]) -> Vec<f64> {
    let sum: f64 = points.iter().map(|p| p.value.max(0.0)).sum();
    points
        .iter()
        .map(|p| if sum > 0.0 { p.value.max(0.0) * 100.0 / sum } else { 0.0 })
        .collect()
}
