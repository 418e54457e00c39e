// src/report/export.rs
use tracing::{info, warn};

use super::catalog::{Purpose, ReportSpec};
use super::filters::FilterState;
use super::normalize::{classify_export, ExportOutcome, EXPORT_FAILED_MESSAGE};
use super::{failure_text, Notice};
use crate::backend::{Backend, BackendError, Credentials, SessionExpired};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    Pending,
    Ready,
    Empty,
    Failed,
}

/// Page-local record of the last export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub status: ExportStatus,
    pub download_url: Option<String>,
    pub message: Option<String>,
}

impl Default for ExportJob {
    fn default() -> Self {
        Self {
            status: ExportStatus::Pending,
            download_url: None,
            message: None,
        }
    }
}

impl ExportJob {
    pub fn notice(&self) -> Option<Notice> {
        let message = self.message.clone()?;
        match self.status {
            ExportStatus::Empty => Some(Notice::info(message)),
            ExportStatus::Failed => Some(Notice::error(message)),
            ExportStatus::Pending => Some(Notice::warning(message)),
            ExportStatus::Ready => None,
        }
    }
}

/// Asks the backend to build a downloadable file and keeps its link.
///
/// Opening the link is left to the user; generating never triggers the
/// download itself.
pub struct ReportExportEngine {
    spec: &'static ReportSpec,
    job: ExportJob,
}

impl ReportExportEngine {
    pub fn new(spec: &'static ReportSpec) -> Self {
        Self {
            spec,
            job: ExportJob::default(),
        }
    }

    /// One round trip per call, never cached. A validation failure leaves the
    /// job `Pending` with the reason in `message`.
    pub fn generate(
        &mut self,
        backend: &dyn Backend,
        creds: Option<&Credentials>,
        filters: &FilterState,
    ) -> Result<&ExportJob, SessionExpired> {
        if let Err(invalid) = self.spec.validate(filters, Purpose::Export) {
            self.job = ExportJob {
                message: Some(invalid.to_string()),
                ..ExportJob::default()
            };
            return Ok(&self.job);
        }

        let outcome = match backend.post_form(creds, self.spec.export_path, &filters.export_fields()) {
            Ok(response) => classify_export(&response),
            Err(BackendError::SessionExpired) => return Err(SessionExpired),
            Err(e) => ExportOutcome::Failed {
                message: failure_text(&e, EXPORT_FAILED_MESSAGE),
            },
        };

        self.job = match outcome {
            ExportOutcome::Ready { download_url } => {
                info!(report = self.spec.key, url = %download_url, "export ready");
                ExportJob {
                    status: ExportStatus::Ready,
                    download_url: Some(download_url),
                    message: None,
                }
            }
            ExportOutcome::Empty { message } => ExportJob {
                status: ExportStatus::Empty,
                download_url: None,
                message: Some(message),
            },
            ExportOutcome::Failed { message } => {
                warn!(report = self.spec.key, error = %message, "export failed");
                ExportJob {
                    status: ExportStatus::Failed,
                    download_url: None,
                    message: Some(message),
                }
            }
        };

        Ok(&self.job)
    }

    pub fn job(&self) -> &ExportJob {
        &self.job
    }

    pub fn clear(&mut self) {
        self.job = ExportJob::default();
    }
}
