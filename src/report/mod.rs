// src/report/mod.rs
//! The report workflow: filters, district lookup, paged queries and exports.

pub mod catalog;
pub mod districts;
pub mod export;
pub mod filters;
pub mod normalize;
pub mod query;

pub use catalog::{Purpose, ReportSpec};
pub use districts::DistrictDirectory;
pub use export::{ExportJob, ExportStatus, ReportExportEngine};
pub use filters::{FilterField, FilterState};
pub use query::ReportQueryEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// Message shown to the user above the report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: Level::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: Level::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: Level::Error, text: text.into() }
    }
}

/// Error text for a failed call: the error's own message, else `fallback`.
pub(crate) fn failure_text(err: &crate::backend::BackendError, fallback: &str) -> String {
    let msg = err.to_string();
    if msg.trim().is_empty() {
        fallback.to_string()
    } else {
        msg
    }
}
