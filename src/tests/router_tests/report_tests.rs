// src/tests/router_tests/report_tests.rs
use crate::report::districts::DISTRICTS_PATH;
use crate::tests::fake_backend::FakeBackend;
use crate::tests::utils::{body_text, get, location, post_form, sign_in, test_app};
use serde_json::{json, Value};

const CITIZENS: &str = "/reports/citizens";
const CITIZENS_EXPORT: &str = "/reports/citizens/export";

fn citizens(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| json!({ "name": format!("Citizen {i}"), "gender": "F", "village": "Warud" }))
            .collect(),
    )
}

fn districts() -> Value {
    json!({
        "result": "success",
        "data": [
            { "id": 1, "district": "Amravati", "division": "Amravati" },
            { "id": 2, "district": "Akola", "division": "Amravati" }
        ]
    })
}

#[test]
fn applied_filters_load_first_page() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond(CITIZENS, json!({ "status": "Success", "data": citizens(5), "count": 37 }));
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let resp = get(
        &app,
        "/reports/citizen-records?district=Amravati&start_date=2025-01-01&end_date=2025-01-31&offset=0&apply=1",
        Some(&cookie),
    );
    assert_eq!(resp.status(), 200);

    assert_eq!(backend.calls_to(CITIZENS), 1);
    let call = backend.last_call(CITIZENS).unwrap();
    assert_eq!(call.param("district"), Some("Amravati"));
    assert_eq!(call.param("start_date"), Some("2025-01-01"));
    assert_eq!(call.param("end_date"), Some("2025-01-31"));
    assert_eq!(call.param("offset"), Some("0"));
    assert_eq!(call.param("limit"), Some("5"));
    // Reads are never augmented.
    assert!(call.creds.is_none());

    let body = body_text(resp);
    assert!(body.contains("Showing 1–5 of 37"));
    assert!(body.contains("Citizen 4"));
    assert!(body.contains("class=\"next\""));
    assert!(body.contains("offset=5"));
    assert!(body.contains("prev disabled"));
    // The selected district stays selected, under its division.
    assert!(body.contains("<optgroup label=\"Amravati\">"));
    assert!(body.contains("<option value=\"Amravati\" selected>"));
}

#[test]
fn second_page_uses_the_link_offset() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond(CITIZENS, json!({ "status": "success", "data": citizens(5), "count": 37 }));
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "vle");

    let resp = get(
        &app,
        "/reports/citizen-records?district=Amravati&start_date=2025-01-01&end_date=2025-01-31&offset=5&apply=1",
        Some(&cookie),
    );
    let body = body_text(resp);

    assert_eq!(backend.last_call(CITIZENS).unwrap().param("offset"), Some("5"));
    assert!(body.contains("Showing 6–10 of 37"));
    assert!(body.contains("class=\"prev\""));
}

#[test]
fn missing_required_filters_block_the_request() {
    let backend = FakeBackend::new().respond(DISTRICTS_PATH, districts());
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let resp = get(&app, "/reports/citizen-records?apply=1", Some(&cookie));
    assert_eq!(resp.status(), 200);
    assert_eq!(backend.calls_to(CITIZENS), 0);

    let body = body_text(resp);
    assert!(body.contains("Please select a district."));
    assert!(body.contains("class=\"notice notice-warning\""));
}

#[test]
fn page_waits_for_apply_when_filters_are_required() {
    let backend = FakeBackend::new().respond(DISTRICTS_PATH, districts());
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let body = body_text(get(&app, "/reports/citizen-records", Some(&cookie)));
    assert!(body.contains("press Apply"));
    assert_eq!(backend.calls_to(CITIZENS), 0);
    assert_eq!(backend.calls_to(DISTRICTS_PATH), 1);
}

#[test]
fn report_without_required_filters_loads_immediately() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond(
            "/reports/district-status",
            json!({ "result": "success", "data": [{ "district": "Akola", "workshops": 4 }] }),
        );
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "rbi");

    let body = body_text(get(&app, "/reports/district-status", Some(&cookie)));
    assert_eq!(backend.calls_to("/reports/district-status"), 1);
    assert!(body.contains("Showing 1–1 of 1"));
    assert!(body.contains("Akola"));
}

#[test]
fn failed_district_lookup_falls_back_to_text_input() {
    let backend = FakeBackend::new().fail_get(DISTRICTS_PATH);
    let (app, _) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let body = body_text(get(&app, "/reports/gender-participation", Some(&cookie)));
    assert!(body.contains("type=\"text\" name=\"district\""));
    assert!(!body.contains("<select name=\"district\""));
    assert!(body.contains("District list unavailable: connection refused"));
}

#[test]
fn backend_error_message_is_shown_verbatim() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond(
            "/reports/gender-participation",
            json!({ "result": "Error", "message": "District not mapped to any division" }),
        );
    let (app, _) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let body = body_text(get(
        &app,
        "/reports/gender-participation?district=Akola&apply=1",
        Some(&cookie),
    ));
    assert!(body.contains("District not mapped to any division"));
    assert!(body.contains("class=\"notice notice-error\""));
    assert!(body.contains("No records found."));
}

#[test]
fn reports_are_role_gated() {
    let (app, _) = test_app(FakeBackend::new());

    let resp = get(&app, "/reports/citizen-records", None);
    assert_eq!(location(&resp), "/login");

    // RBI users cannot see citizen records.
    let cookie = sign_in(&app, "rbi");
    let resp = get(&app, "/reports/citizen-records", Some(&cookie));
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/rbi");
}

#[test]
fn unknown_report_is_not_found() {
    let (app, _) = test_app(FakeBackend::new());
    let cookie = sign_in(&app, "admin");
    let req = http::Request::builder()
        .uri("/reports/nope")
        .header("Cookie", cookie)
        .body(astra::Body::empty())
        .unwrap();
    assert!(matches!(
        crate::router::handle(req, &app),
        Err(crate::errors::ServerError::NotFound)
    ));
}

#[test]
fn export_ready_links_to_download_with_credentials_attached() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond(
            CITIZENS_EXPORT,
            json!({ "result": "success", "data": { "url": "https://files.example.org/r.xlsx" } }),
        );
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "subadmin");

    let resp = post_form(&app, "/reports/citizen-records/export", "district=Akola", Some(&cookie));
    assert_eq!(resp.status(), 200);

    let call = backend.last_call(CITIZENS_EXPORT).unwrap();
    assert_eq!(call.param("district"), Some("Akola"));
    let creds = call.creds.unwrap();
    assert_eq!(creds.session_token, "backend-token");
    assert_eq!(creds.user_id, "42");

    let body = body_text(resp);
    assert!(body.contains("href=\"https://files.example.org/r.xlsx\""));
    assert!(body.contains("target=\"_blank\""));
}

#[test]
fn export_with_no_data_is_informational() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond(
            CITIZENS_EXPORT,
            json!({ "result": "Success", "message": "No data found", "data": "" }),
        );
    let (app, _) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let body = body_text(post_form(
        &app,
        "/reports/citizen-records/export",
        "district=X",
        Some(&cookie),
    ));
    assert!(body.contains("No data found"));
    assert!(body.contains("class=\"notice notice-info\""));
    assert!(!body.contains("class=\"notice notice-error\""));
    assert!(!body.contains("Open report"));
}

#[test]
fn export_without_link_is_an_error() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond("/reports/district-status/export", json!({ "result": "Success", "data": "" }));
    let (app, _) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let body = body_text(post_form(&app, "/reports/district-status/export", "", Some(&cookie)));
    assert!(body.contains("Report generated but no download link was provided"));
    assert!(body.contains("class=\"notice notice-error\""));
}

#[test]
fn export_validation_skips_backend() {
    let backend = FakeBackend::new().respond(DISTRICTS_PATH, districts());
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let body = body_text(post_form(&app, "/reports/citizen-records/export", "", Some(&cookie)));
    assert!(body.contains("Please select a district."));
    assert_eq!(backend.calls_to(CITIZENS_EXPORT), 0);
}

#[test]
fn huge_offset_renders_without_overflow() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond(
            "/reports/district-status",
            json!({ "result": "success", "data": [{ "district": "Akola" }], "total": 3 }),
        );
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let resp = get(
        &app,
        "/reports/district-status?offset=18446744073709551615&apply=1",
        Some(&cookie),
    );
    assert_eq!(resp.status(), 200);

    // Snapped down to a page boundary before it is sent.
    let sent = backend.last_call("/reports/district-status").unwrap();
    assert_eq!(sent.param("offset"), Some("18446744073709551610"));

    let body = body_text(resp);
    assert!(body.contains("Showing 18446744073709551611–18446744073709551611 of 3"));
    assert!(body.contains("next disabled"));
}

#[test]
fn export_link_with_script_scheme_is_not_clickable() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, districts())
        .respond(
            CITIZENS_EXPORT,
            json!({ "result": "success", "data": { "url": "javascript:alert(1)" } }),
        );
    let (app, _) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let body = body_text(post_form(
        &app,
        "/reports/citizen-records/export",
        "district=Akola",
        Some(&cookie),
    ));
    assert!(!body.contains("href=\"javascript:"));
    assert!(!body.contains("Open report"));
    assert!(body.contains("<code>javascript:alert(1)</code>"));
}
