mod auth_tests;
mod dashboard_tests;
mod expiry_tests;
mod report_tests;
