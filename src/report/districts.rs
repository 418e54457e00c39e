// src/report/districts.rs
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::backend::{Backend, BackendError, SessionExpired};
use crate::report::normalize::extract_rows;

pub const DISTRICTS_PATH: &str = "/districts";

const NAME_KEYS: [&str; 3] = ["district", "name", "district_name"];

/// Reference record as the lookup endpoint usually returns it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct District {
    pub district: String,
    #[serde(default)]
    pub division: String,
}

/// District names for the filter dropdown, fetched once per page view.
#[derive(Debug, Default)]
pub struct DistrictDirectory {
    names: Vec<String>,
    records: Vec<District>,
    error: Option<String>,
}

impl DistrictDirectory {
    /// One lookup, no retry. Failures leave the list empty so the page
    /// falls back to a free-text input.
    pub fn load(backend: &dyn Backend) -> Result<Self, SessionExpired> {
        match backend.get(DISTRICTS_PATH, &[]) {
            Ok(response) => {
                let dir = Self::from_response(&response);
                debug!(count = dir.names.len(), "districts loaded");
                Ok(dir)
            }
            Err(BackendError::SessionExpired) => Err(SessionExpired),
            Err(e) => {
                warn!(error = %e, "district lookup failed");
                Ok(Self {
                    error: Some(e.to_string()),
                    ..Self::default()
                })
            }
        }
    }

    pub fn from_response(response: &Value) -> Self {
        let entries = match response.as_array() {
            Some(arr) => arr.clone(),
            None => extract_rows(response),
        };

        let records = entries
            .iter()
            .filter_map(|e| serde_json::from_value::<District>(e.clone()).ok())
            .collect();

        Self {
            names: district_names(&entries),
            records,
            error: None,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names under their division, in first-seen order. Names with no known
    /// division are grouped under an empty label.
    pub fn by_division(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

        for name in &self.names {
            let division = self
                .records
                .iter()
                .find(|r| r.district.trim() == name)
                .map(|r| r.division.trim())
                .unwrap_or("");

            match groups.iter_mut().find(|(d, _)| *d == division) {
                Some((_, names)) => names.push(name),
                None => groups.push((division, vec![name.as_str()])),
            }
        }

        groups
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Empty list means the page must offer a text input instead.
    pub fn needs_text_input(&self) -> bool {
        self.names.is_empty()
    }
}

/// Unique, non-empty names in server order.
pub fn district_names(entries: &[Value]) -> Vec<String> {
    let mut seen = HashSet::new();

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.as_str()),
            Value::Object(_) => NAME_KEYS
                .iter()
                .filter_map(|k| entry.get(*k).and_then(Value::as_str))
                .map(str::trim)
                .find(|s| !s.is_empty()),
            _ => None,
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}
