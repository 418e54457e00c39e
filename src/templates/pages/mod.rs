pub mod dashboard;
pub mod login;
pub mod report;
pub mod session_expired;

pub use dashboard::{dashboard_page, DashboardVm};
pub use login::login_page;
pub use report::{report_page, ReportVm};
pub use session_expired::session_expired_page;
