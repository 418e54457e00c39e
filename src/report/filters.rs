// src/report/filters.rs
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameters of one report page. Lives for a single page view;
/// nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub district: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Row cursor, always a multiple of the report's page size.
    pub offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    District,
    /// Both `start_date` and `end_date`.
    DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub messages: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join(" "))
    }
}

impl std::error::Error for ValidationError {}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Round `offset` down to a page boundary.
pub fn snap_offset(offset: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    offset - offset % page_size
}

impl FilterState {
    pub fn from_params(params: &HashMap<String, String>, page_size: u64) -> Self {
        let offset = params
            .get("offset")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0);

        Self {
            district: non_empty(params.get("district")),
            start_date: non_empty(params.get("start_date")),
            end_date: non_empty(params.get("end_date")),
            offset: snap_offset(offset, page_size),
        }
    }

    /// Back to the state of a freshly mounted page.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn with_offset(&self, offset: u64) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    pub fn has(&self, field: FilterField) -> bool {
        match field {
            FilterField::District => self.district.is_some(),
            FilterField::DateRange => self.start_date.is_some() && self.end_date.is_some(),
        }
    }

    /// Fields shared by the view query and the export request.
    pub fn export_fields(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(d) = &self.district {
            out.push(("district".to_string(), d.clone()));
        }
        if let Some(s) = &self.start_date {
            out.push(("start_date".to_string(), s.clone()));
        }
        if let Some(e) = &self.end_date {
            out.push(("end_date".to_string(), e.clone()));
        }
        out
    }

    pub fn query_pairs(&self, page_size: u64) -> Vec<(String, String)> {
        let mut out = self.export_fields();
        out.push(("offset".to_string(), self.offset.to_string()));
        out.push(("limit".to_string(), page_size.to_string()));
        out
    }

    /// Query string for links back to the report page.
    pub fn link_query(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.export_fields() {
            ser.append_pair(&k, &v);
        }
        ser.append_pair("offset", &self.offset.to_string());
        ser.append_pair("apply", "1");
        ser.finish()
    }

    /// Checks required fields plus date sanity. Dates are checked even when
    /// optional: half a range or an inverted range is never sent.
    pub fn validate(&self, required: &[FilterField]) -> Result<(), ValidationError> {
        let mut messages = Vec::new();

        if required.contains(&FilterField::District) && !self.has(FilterField::District) {
            messages.push("Please select a district.".to_string());
        }

        let range_required = required.contains(&FilterField::DateRange);
        match (&self.start_date, &self.end_date) {
            (None, None) if range_required => {
                messages.push("Please select both a start date and an end date.".to_string());
            }
            (Some(_), None) | (None, Some(_)) => {
                messages.push("Please select both a start date and an end date.".to_string());
            }
            (Some(start), Some(end)) => {
                let parsed = (
                    NaiveDate::parse_from_str(start, DATE_FORMAT),
                    NaiveDate::parse_from_str(end, DATE_FORMAT),
                );
                match parsed {
                    (Ok(s), Ok(e)) if s > e => {
                        messages.push("Start date cannot be after end date.".to_string());
                    }
                    (Ok(_), Ok(_)) => {}
                    _ => messages.push("Dates must use the YYYY-MM-DD format.".to_string()),
                }
            }
            (None, None) => {}
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { messages })
        }
    }
}
