// src/report/query.rs
use serde_json::Value;
use tracing::{debug, warn};

use super::catalog::{Purpose, ReportSpec};
use super::filters::{snap_offset, FilterState, ValidationError};
use super::normalize::normalize;
use super::{failure_text, Notice};
use crate::backend::{Backend, BackendError, SessionExpired};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load report";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Required filters missing; nothing was sent.
    Invalid(ValidationError),
    Failed(String),
    /// A newer request was issued before this one completed.
    Stale,
}

/// Issued by [`ReportQueryEngine::begin`]; only the newest ticket may
/// update the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    offset: u64,
}

/// One page of rows for one report, plus the pagination cursor.
pub struct ReportQueryEngine {
    spec: &'static ReportSpec,
    filters: FilterState,
    rows: Vec<Value>,
    total: u64,
    offset: u64,
    loading: bool,
    generation: u64,
    notice: Option<Notice>,
}

impl ReportQueryEngine {
    pub fn new(spec: &'static ReportSpec) -> Self {
        Self {
            spec,
            filters: FilterState::default(),
            rows: Vec::new(),
            total: 0,
            offset: 0,
            loading: false,
            generation: 0,
            notice: None,
        }
    }

    pub fn spec(&self) -> &'static ReportSpec {
        self.spec
    }

    pub fn page_size(&self) -> u64 {
        self.spec.page_size
    }

    /// Validate and reserve a request slot. Sets `loading`.
    pub fn begin(
        &mut self,
        filters: &FilterState,
        offset_override: Option<u64>,
    ) -> Result<LoadTicket, ValidationError> {
        self.spec.validate(filters, Purpose::View)?;

        let offset = snap_offset(
            offset_override.unwrap_or(filters.offset),
            self.spec.page_size,
        );
        self.filters = filters.with_offset(offset);
        self.generation += 1;
        self.loading = true;

        Ok(LoadTicket {
            generation: self.generation,
            offset,
        })
    }

    /// Apply a response. Responses for superseded tickets are dropped
    /// (session expiry still propagates).
    pub fn finish(
        &mut self,
        ticket: LoadTicket,
        response: Result<Value, BackendError>,
    ) -> Result<LoadOutcome, SessionExpired> {
        let current = ticket.generation == self.generation;

        if matches!(response, Err(BackendError::SessionExpired)) {
            if current {
                self.loading = false;
            }
            return Err(SessionExpired);
        }

        if !current {
            debug!(
                report = self.spec.key,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale report response"
            );
            return Ok(LoadOutcome::Stale);
        }

        self.loading = false;

        let failure = match response {
            Ok(value) => {
                let page = normalize(&value);
                if page.ok {
                    self.rows = page.rows;
                    self.total = page.total;
                    self.offset = ticket.offset;
                    self.notice = None;
                    return Ok(LoadOutcome::Loaded);
                }
                page.message
                    .unwrap_or_else(|| LOAD_FAILED_MESSAGE.to_string())
            }
            Err(e) => failure_text(&e, LOAD_FAILED_MESSAGE),
        };

        warn!(report = self.spec.key, error = %failure, "report load failed");
        self.rows.clear();
        self.total = 0;
        self.notice = Some(Notice::error(failure.clone()));
        Ok(LoadOutcome::Failed(failure))
    }

    /// Fetch one page. `offset_override` replaces the filter's offset.
    pub fn load(
        &mut self,
        backend: &dyn Backend,
        filters: &FilterState,
        offset_override: Option<u64>,
    ) -> Result<LoadOutcome, SessionExpired> {
        let ticket = match self.begin(filters, offset_override) {
            Ok(ticket) => ticket,
            Err(invalid) => {
                self.notice = Some(Notice::warning(invalid.to_string()));
                return Ok(LoadOutcome::Invalid(invalid));
            }
        };

        let query = self.filters.query_pairs(self.spec.page_size);
        let response = backend.get(self.spec.query_path, &query);
        self.finish(ticket, response)
    }

    /// `None` when already on the last page.
    pub fn next(&mut self, backend: &dyn Backend) -> Result<Option<LoadOutcome>, SessionExpired> {
        match self.next_offset() {
            Some(offset) => {
                let filters = self.filters.clone();
                self.load(backend, &filters, Some(offset)).map(Some)
            }
            None => Ok(None),
        }
    }

    /// `None` when already on the first page.
    pub fn prev(&mut self, backend: &dyn Backend) -> Result<Option<LoadOutcome>, SessionExpired> {
        match self.prev_offset() {
            Some(offset) => {
                let filters = self.filters.clone();
                self.load(backend, &filters, Some(offset)).map(Some)
            }
            None => Ok(None),
        }
    }

    pub fn can_prev(&self) -> bool {
        self.offset > 0
    }

    pub fn can_next(&self) -> bool {
        self.offset.saturating_add(self.spec.page_size) < self.total
    }

    pub fn next_offset(&self) -> Option<u64> {
        self.can_next().then(|| self.offset.saturating_add(self.spec.page_size))
    }

    pub fn prev_offset(&self) -> Option<u64> {
        self.can_prev()
            .then(|| self.offset.saturating_sub(self.spec.page_size))
    }

    pub fn showing_label(&self) -> String {
        if self.rows.is_empty() {
            return format!("Showing 0 of {}", self.total);
        }
        format!(
            "Showing {}–{} of {}",
            self.offset.saturating_add(1),
            self.offset.saturating_add(self.rows.len() as u64),
            self.total
        )
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}
