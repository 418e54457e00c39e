// src/tests/router_tests/dashboard_tests.rs
use crate::dashboard::{CARDS_PATH, DISTRICT_BARS_PATH, GENDER_PATH};
use crate::tests::fake_backend::FakeBackend;
use crate::tests::utils::{body_text, get, sign_in, test_app};
use serde_json::json;

#[test]
fn admin_dashboard_renders_all_panels() {
    let backend = FakeBackend::new()
        .respond(
            CARDS_PATH,
            json!({ "status": "success", "data": { "total_workshops": 12, "total_citizens": 340 } }),
        )
        .respond(
            GENDER_PATH,
            json!({ "result": "success", "data": [
                { "gender": "Female", "count": 3 },
                { "gender": "Male", "count": 1 }
            ] }),
        )
        .respond(
            DISTRICT_BARS_PATH,
            json!({ "result": "success", "data": [{ "district": "Akola", "count": 7 }] }),
        );
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let resp = get(&app, "/admin", Some(&cookie));
    assert_eq!(resp.status(), 200);
    let body = body_text(resp);

    assert!(body.contains("Admin Dashboard"));
    assert!(body.contains("Total Workshops"));
    assert!(body.contains("340"));
    assert!(body.contains("75.0%"));
    assert!(body.contains("Akola"));
    // Admins see every report link.
    assert!(body.contains("href=\"/reports/citizen-records\""));

    let call = backend.last_call(CARDS_PATH).unwrap();
    assert_eq!(call.param("role"), Some("admin"));
}

#[test]
fn one_failing_panel_does_not_hide_the_others() {
    let backend = FakeBackend::new()
        .respond(
            CARDS_PATH,
            json!({ "status": "success", "data": { "total_workshops": 5 } }),
        )
        .fail_get(GENDER_PATH)
        .respond(
            DISTRICT_BARS_PATH,
            json!({ "result": "Error", "message": "Counts are being recalculated" }),
        );
    let (app, _) = test_app(backend);
    let cookie = sign_in(&app, "rbi");

    let body = body_text(get(&app, "/rbi", Some(&cookie)));
    assert!(body.contains("Total Workshops"));
    assert!(body.contains("connection refused"));
    assert!(body.contains("Counts are being recalculated"));
    // RBI users are not offered citizen records.
    assert!(!body.contains("href=\"/reports/citizen-records\""));
}
