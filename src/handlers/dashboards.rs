// src/handlers/dashboards.rs
use crate::app::App;
use crate::auth::{Role, SessionContext};
use crate::dashboard::load_dashboard;
use crate::handlers::guard;
use crate::responses::{html_response, ResultResp};
use crate::templates::pages::{dashboard_page, DashboardVm};

/// `/admin`, `/subadmin`, `/rbi`, `/vle`: each only for its own role.
pub fn show(app: &App, ctx: &SessionContext, role: Role) -> ResultResp {
    let session = match guard(ctx, &[role]) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let data = load_dashboard(app.backend.as_ref(), session.role)?;
    html_response(dashboard_page(&DashboardVm { session, data }))
}
