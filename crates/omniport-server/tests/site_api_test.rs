//! Admin site HTTP integration tests
//!
//! Exercises login, access gating and the index views of the mounted
//! omnipotence site.

#[macro_use]
mod common;

use actix_web::{
    http::{StatusCode, header},
    test,
};
use serde_json::Value;

use common::{MAINTAINER, RETIRED, ROOT, STAFF, TEST_PASSWORD, app_state, token_for};
use omniport_auth::model::SESSION_COOKIE;

fn bearer(username: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token_for(username)))
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn test_health() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "UP");
}

#[actix_web::test]
async fn test_login_page_shows_branding() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/login/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["branding"]["siteHeader"], "Omniport administration");
    assert_eq!(body["data"]["branding"]["siteTitle"], "Omniport administration");
    assert_eq!(body["data"]["branding"]["indexTitle"], "Omniport administration");
    assert_eq!(body["data"]["fields"][0]["name"], "username");
    assert_eq!(body["data"]["next"], "/omnipotence/");
}

#[actix_web::test]
async fn test_login_page_redirects_when_already_permitted() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/login/?next=/omnipotence/kernel/")
        .insert_header(bearer(MAINTAINER))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/omnipotence/kernel/");
}

#[actix_web::test]
async fn test_login_maintainer_succeeds() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::post()
        .uri("/omnipotence/login/")
        .set_form([("username", MAINTAINER), ("password", TEST_PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("session cookie");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.path(), Some("/omnipotence/"));
    assert_eq!(cookie.http_only(), Some(true));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["username"], MAINTAINER);
    assert_eq!(body["data"]["redirect"], "/omnipotence/");
    assert!(body["data"]["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_web::test]
async fn test_login_superuser_succeeds() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::post()
        .uri("/omnipotence/login/")
        .set_form([("username", ROOT), ("password", TEST_PASSWORD)])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
}

#[actix_web::test]
async fn test_login_staff_without_rights_is_rejected() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::post()
        .uri("/omnipotence/login/")
        .set_form([("username", STAFF), ("password", TEST_PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.response().cookies().all(|c| c.name() != SESSION_COOKIE));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 20002);
    assert_eq!(body["data"]["errors"][0]["code"], "invalid_login");
    assert_eq!(
        body["message"],
        "Please enter the correct username and password for a staff account. \
         Note that both fields may be case-sensitive."
    );
}

#[actix_web::test]
async fn test_login_inactive_superuser_gets_same_error() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::post()
        .uri("/omnipotence/login/")
        .set_form([("username", RETIRED), ("password", TEST_PASSWORD)])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["errors"][0]["code"], "invalid_login");
}

#[actix_web::test]
async fn test_login_wrong_password_gets_same_error() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::post()
        .uri("/omnipotence/login/")
        .set_form([("username", MAINTAINER), ("password", "wrong")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["errors"][0]["code"], "invalid_login");
}

#[actix_web::test]
async fn test_login_missing_password() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::post()
        .uri("/omnipotence/login/")
        .set_form([("username", MAINTAINER)])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["code"], "required");
    assert_eq!(errors[0]["field"], "password");
}

#[actix_web::test]
async fn test_index_redirects_anonymous_to_login() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get().uri("/omnipotence/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/omnipotence/login/?next=%2Fomnipotence%2F");
}

#[actix_web::test]
async fn test_index_redirects_staff_without_rights() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .insert_header(bearer(STAFF))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_index_redirects_invalid_token() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_index_lists_synchronized_apps() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .insert_header(bearer(MAINTAINER))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["branding"]["indexTitle"], "Omniport administration");
    let labels: Vec<&str> = body["data"]["appList"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|app| app["appLabel"].as_str())
        .collect();
    assert_eq!(labels, vec!["categories", "helpcentre", "kernel"]);
}

#[actix_web::test]
async fn test_session_cookie_authenticates() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, token_for(ROOT)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_app_index() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/kernel/")
        .insert_header(bearer(MAINTAINER))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let apps = body["data"]["appList"].as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["appUrl"], "/omnipotence/kernel/");

    let req = test::TestRequest::get()
        .uri("/omnipotence/nosuchapp/")
        .insert_header(bearer(MAINTAINER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_change_list_uses_enhanced_admin() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/kernel/student/")
        .insert_header(bearer(MAINTAINER))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["admin"], "EnhancedModelAdmin");
    assert_eq!(body["data"]["listPerPage"], 50);
    assert_eq!(body["data"]["ordering"][0], "-id");
}

#[actix_web::test]
async fn test_change_list_unknown_model() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/kernel/spaceship/")
        .insert_header(bearer(MAINTAINER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 20004);
}

#[actix_web::test]
async fn test_change_list_requires_permission() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::get()
        .uri("/omnipotence/kernel/person/")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/omnipotence/login/?next="));
}

#[actix_web::test]
async fn test_logout_clears_session_cookie() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::post()
        .uri("/omnipotence/logout/")
        .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, token_for(MAINTAINER)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("removal cookie");
    assert!(cookie.value().is_empty());
}

#[actix_web::test]
async fn test_token_is_rejected_after_logout() {
    let app = admin_app!(app_state());

    let req = test::TestRequest::post()
        .uri("/omnipotence/login/")
        .set_form([("username", MAINTAINER), ("password", TEST_PASSWORD)])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["data"]["accessToken"]
        .as_str()
        .expect("access token")
        .to_string();

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, token.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/omnipotence/logout/")
        .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, token.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/omnipotence/login/"));

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_bearer_logout_leaves_other_sessions_valid() {
    let app = admin_app!(app_state());
    let revoked = token_for(MAINTAINER);
    let other = token_for(MAINTAINER);

    let req = test::TestRequest::post()
        .uri("/omnipotence/logout/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", revoked)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", revoked)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);

    let req = test::TestRequest::get()
        .uri("/omnipotence/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", other)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
