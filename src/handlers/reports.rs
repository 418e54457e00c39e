// src/handlers/reports.rs
use std::collections::HashMap;
use tracing::debug;

use crate::app::App;
use crate::auth::SessionContext;
use crate::errors::ServerError;
use crate::handlers::guard;
use crate::report::{catalog, DistrictDirectory, FilterState, Purpose, ReportExportEngine, ReportQueryEngine};
use crate::responses::{html_response, ResultResp};
use crate::templates::pages::{report_page, ReportVm};

/// Reports without required view filters load straight away; the rest wait
/// for the user to press Apply.
pub fn show(
    app: &App,
    ctx: &SessionContext,
    key: &str,
    params: &HashMap<String, String>,
) -> ResultResp {
    let spec = catalog::find(key).ok_or(ServerError::NotFound)?;
    let session = match guard(ctx, spec.roles) {
        Ok(session) => session,
        Err(resp) => return resp,
    };
    let backend = app.backend.as_ref();

    let districts = DistrictDirectory::load(backend)?;
    let filters = FilterState::from_params(params, spec.page_size);

    let applied = params.contains_key("apply") || spec.required(Purpose::View).is_empty();
    let mut engine = ReportQueryEngine::new(spec);
    let query = if applied {
        let outcome = engine.load(backend, &filters, None)?;
        debug!(report = spec.key, ?outcome, total = engine.total(), "report loaded");
        Some(&engine)
    } else {
        None
    };

    html_response(report_page(&ReportVm {
        session,
        spec,
        filters: &filters,
        districts: &districts,
        query,
        export: None,
    }))
}

pub fn export(
    app: &App,
    ctx: &SessionContext,
    key: &str,
    form: &HashMap<String, String>,
) -> ResultResp {
    let spec = catalog::find(key).ok_or(ServerError::NotFound)?;
    let session = match guard(ctx, spec.roles) {
        Ok(session) => session,
        Err(resp) => return resp,
    };
    let backend = app.backend.as_ref();

    let filters = FilterState::from_params(form, spec.page_size);
    let creds = session.credentials();
    let mut exporter = ReportExportEngine::new(spec);
    exporter.generate(backend, Some(&creds), &filters)?;

    let districts = DistrictDirectory::load(backend)?;

    html_response(report_page(&ReportVm {
        session,
        spec,
        filters: &filters,
        districts: &districts,
        query: None,
        export: Some(exporter.job()),
    }))
}
