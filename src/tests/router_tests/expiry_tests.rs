// src/tests/router_tests/expiry_tests.rs
use crate::dashboard::CARDS_PATH;
use crate::report::districts::DISTRICTS_PATH;
use crate::tests::fake_backend::FakeBackend;
use crate::tests::utils::{body_text, get, location, post_form, set_cookie, sign_in, test_app};
use serde_json::json;

fn assert_expired_page(resp: astra::Response) {
    assert_eq!(resp.status(), 200);
    assert!(set_cookie(&resp).contains("Max-Age=0"));

    let body = body_text(resp);
    assert!(body.contains("Your session has expired. Please log in again."));
    assert!(body.contains("content=\"2;url=/login\""));
}

#[test]
fn expired_report_load_signs_the_user_out() {
    let backend = FakeBackend::new()
        .respond(DISTRICTS_PATH, json!({ "result": "success", "data": [] }))
        .expire_on("/reports/citizens");
    let (app, _) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let resp = get(
        &app,
        "/reports/citizen-records?district=Akola&start_date=2025-01-01&end_date=2025-01-31&apply=1",
        Some(&cookie),
    );
    assert_expired_page(resp);

    // The stored session is gone, not just the browser cookie.
    let resp = get(&app, "/admin", Some(&cookie));
    assert_eq!(location(&resp), "/login");
}

#[test]
fn expired_district_lookup_signs_the_user_out() {
    let (app, _) = test_app(FakeBackend::new().expire_on(DISTRICTS_PATH));
    let cookie = sign_in(&app, "admin");

    assert_expired_page(get(&app, "/reports/gender-participation", Some(&cookie)));
}

#[test]
fn expired_export_signs_the_user_out() {
    let (app, backend) = test_app(FakeBackend::new().expire_on("/reports/citizens/export"));
    let cookie = sign_in(&app, "vle");

    let resp = post_form(&app, "/reports/citizen-records/export", "district=Akola", Some(&cookie));
    assert_expired_page(resp);
    // Nothing else is requested after the 440.
    assert_eq!(backend.calls_to(DISTRICTS_PATH), 0);
}

#[test]
fn expired_dashboard_signs_the_user_out() {
    let (app, _) = test_app(FakeBackend::new().expire_on(CARDS_PATH));
    let cookie = sign_in(&app, "subadmin");

    assert_expired_page(get(&app, "/subadmin", Some(&cookie)));

    let resp = get(&app, "/", Some(&cookie));
    assert_eq!(location(&resp), "/login");
}

#[test]
fn expiry_notice_page_is_reachable_directly() {
    let (app, _) = test_app(FakeBackend::new());
    let body = body_text(get(&app, "/session-expired", None));
    assert!(body.contains("Session expired"));
    assert!(body.contains("href=\"/login\""));
}

#[test]
fn expiry_page_is_shown_even_if_the_session_cannot_be_revoked() {
    let (app, _) = test_app(FakeBackend::new().expire_on(CARDS_PATH));
    let cookie = sign_in(&app, "admin");

    app.db
        .with_conn(|conn| {
            conn.execute_batch(
                "create trigger sessions_locked before update on sessions
                 begin select raise(abort, 'sessions are locked'); end;",
            )
            .map_err(|e| crate::errors::ServerError::DbError(e.to_string()))
        })
        .unwrap();

    assert_expired_page(get(&app, "/admin", Some(&cookie)));
}
