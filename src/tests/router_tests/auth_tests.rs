// src/tests/router_tests/auth_tests.rs
use crate::tests::fake_backend::FakeBackend;
use crate::tests::utils::{body_text, get, location, post_form, set_cookie, sign_in, test_app};
use serde_json::json;

#[test]
fn login_page_loads_successfully() {
    let (app, _) = test_app(FakeBackend::new());

    let resp = get(&app, "/login", None);
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("name=\"username\""));
    assert!(body.contains("name=\"password\""));
}

#[test]
fn root_sends_visitors_to_login_and_users_home() {
    let (app, _) = test_app(FakeBackend::new());

    let resp = get(&app, "/", None);
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/login");

    let cookie = sign_in(&app, "RBI");
    let resp = get(&app, "/", Some(&cookie));
    assert_eq!(location(&resp), "/rbi");

    // Already signed in: the login page bounces home too.
    let resp = get(&app, "/login", Some(&cookie));
    assert_eq!(location(&resp), "/rbi");
}

#[test]
fn successful_login_sets_cookie_and_redirects_to_role_home() {
    let backend = FakeBackend::new().respond(
        "/login",
        json!({
            "result": "success",
            "data": { "session_token": "srv-tok", "user_id": 7, "user_type": "Sub-Admin" }
        }),
    );
    let (app, backend) = test_app(backend);

    let resp = post_form(&app, "/login", "username=asha&password=secret", None);
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/subadmin");

    let cookie_header = set_cookie(&resp).to_string();
    assert!(cookie_header.starts_with("outreach_session="));
    assert!(cookie_header.contains("HttpOnly"));

    // Login itself goes out without credentials.
    let call = backend.last_call("/login").unwrap();
    assert_eq!(call.body, Some(json!({ "username": "asha", "password": "secret" })));
    assert!(call.creds.is_none());

    // The cookie now opens the role's pages.
    let cookie = cookie_header.split(';').next().unwrap().to_string();
    let resp = get(&app, "/", Some(&cookie));
    assert_eq!(location(&resp), "/subadmin");
}

#[test]
fn refused_login_shows_backend_message() {
    let backend = FakeBackend::new().respond(
        "/login",
        json!({ "result": "error", "message": "Invalid username or password" }),
    );
    let (app, _) = test_app(backend);

    let resp = post_form(&app, "/login", "username=asha&password=wrong", None);
    assert_eq!(resp.status(), 200);
    assert_eq!(set_cookie(&resp), "");

    let body = body_text(resp);
    assert!(body.contains("Invalid username or password"));
    assert!(body.contains("value=\"asha\""));
}

#[test]
fn empty_login_form_never_reaches_backend() {
    let (app, backend) = test_app(FakeBackend::new());

    let resp = post_form(&app, "/login", "username=&password=", None);
    let body = body_text(resp);
    assert!(body.contains("Please enter your username and password."));
    assert!(backend.calls().is_empty());
}

#[test]
fn unknown_account_type_is_refused() {
    let backend = FakeBackend::new().respond(
        "/login",
        json!({ "status": "success", "session_token": "t", "user_id": "1", "user_type": "citizen" }),
    );
    let (app, _) = test_app(backend);

    let resp = post_form(&app, "/login", "username=x&password=y", None);
    assert_eq!(resp.status(), 200);
    assert!(body_text(resp).contains("This account type cannot use the dashboard."));
}

#[test]
fn dashboards_are_role_gated() {
    let (app, _) = test_app(FakeBackend::new());

    let resp = get(&app, "/admin", None);
    assert_eq!(location(&resp), "/login");

    let cookie = sign_in(&app, "vle");
    let resp = get(&app, "/admin", Some(&cookie));
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/vle");
}

#[test]
fn logout_notifies_backend_and_clears_cookie() {
    let backend = FakeBackend::new().respond("/logout", json!({ "result": "success" }));
    let (app, backend) = test_app(backend);
    let cookie = sign_in(&app, "admin");

    let resp = post_form(&app, "/logout", "", Some(&cookie));
    assert_eq!(location(&resp), "/login");
    assert!(set_cookie(&resp).contains("Max-Age=0"));

    let call = backend.last_call("/logout").unwrap();
    let creds = call.creds.unwrap();
    assert_eq!(creds.session_token, "backend-token");
    assert_eq!(creds.user_id, "42");

    // The old cookie no longer maps to a session.
    let resp = get(&app, "/admin", Some(&cookie));
    assert_eq!(location(&resp), "/login");
}

#[test]
fn logout_survives_backend_failure() {
    let (app, _) = test_app(FakeBackend::new().fail_post("/logout"));
    let cookie = sign_in(&app, "admin");

    let resp = post_form(&app, "/logout", "", Some(&cookie));
    assert_eq!(location(&resp), "/login");

    let resp = get(&app, "/", Some(&cookie));
    assert_eq!(location(&resp), "/login");
}

#[test]
fn unknown_paths_are_not_found() {
    let (app, _) = test_app(FakeBackend::new());
    let req = http::Request::builder()
        .uri("/nowhere/at/all")
        .body(astra::Body::empty())
        .unwrap();
    assert!(matches!(
        crate::router::handle(req, &app),
        Err(crate::errors::ServerError::NotFound)
    ));
}
