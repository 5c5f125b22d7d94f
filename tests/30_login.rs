mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{employee_body, supervisor_body, visitor_body, TestApp};

#[tokio::test]
async fn register_then_login_visitor() -> Result<()> {
    let app = TestApp::new();

    let res = app.register("visitor", visitor_body("a@x.com", "pw123")).await?;
    assert_eq!(res.status, StatusCode::CREATED);

    let res = app
        .post("/auth/login/visitor", None, json!({ "email": "a@x.com", "password": "pw123" }))
        .await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["message"], "Visitor login successful");
    assert_eq!(res.body["data"]["role"], "visitor");
    assert_eq!(res.body["data"]["username"], "a");
    assert_eq!(res.body["data"]["token_type"], "Bearer");
    assert!(res.body["data"]["access_token"].is_string());
    assert!(res.body["data"]["refresh_token"].is_string());

    let res = app
        .post("/auth/login/visitor", None, json!({ "email": "a@x.com", "password": "wrong" }))
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    Ok(())
}

#[tokio::test]
async fn unknown_email_looks_like_a_bad_password() -> Result<()> {
    let app = TestApp::new();
    app.register("visitor", visitor_body("a@x.com", "pw123")).await?;

    let unknown = app
        .post("/auth/login/visitor", None, json!({ "email": "nobody@x.com", "password": "pw123" }))
        .await?;
    let wrong = app
        .post("/auth/login/visitor", None, json!({ "email": "a@x.com", "password": "pw124" }))
        .await?;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
    Ok(())
}

#[tokio::test]
async fn correct_password_on_wrong_portal_is_a_role_mismatch() -> Result<()> {
    let app = TestApp::new();
    app.register("supervisor", supervisor_body("s@x.com", "1 Main St", "Town Museum")).await?;
    app.register("visitor", visitor_body("v@x.com", "pw123")).await?;

    let res = app
        .post("/auth/login/visitor", None, json!({ "email": "s@x.com", "password": "pw123" }))
        .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["code"], "ROLE_MISMATCH");

    let res = app
        .post("/auth/login/staff", None, json!({ "email": "v@x.com", "password": "pw123" }))
        .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    // Wrong password still wins over the role check
    let res = app
        .post("/auth/login/visitor", None, json!({ "email": "s@x.com", "password": "nope" }))
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn staff_portal_resolves_supervisor_and_employee() -> Result<()> {
    let app = TestApp::new();
    app.register("supervisor", supervisor_body("boss@x.com", "1 Main St", "Town Museum")).await?;
    app.register("employee", employee_body("e@x.com", "boss@x.com", "1 Main St")).await?;

    let res = app
        .post("/auth/login/staff", None, json!({ "email": "boss@x.com", "password": "pw123" }))
        .await?;
    assert_eq!(res.body["data"]["role"], "supervisor");
    assert_eq!(res.body["message"], "Supervisor login successful");

    let res = app
        .post("/auth/login/staff", None, json!({ "email": "e@x.com", "password": "pw123" }))
        .await?;
    assert_eq!(res.body["data"]["role"], "employee");
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let app = TestApp::new();

    let res = app.post("/auth/login/visitor", None, json!({ "email": "a@x.com" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "MISSING_FIELD");
    Ok(())
}

#[tokio::test]
async fn whoami_and_refresh() -> Result<()> {
    let app = TestApp::new();
    app.register("visitor", visitor_body("a@x.com", "pw123")).await?;
    let login = app
        .post("/auth/login/visitor", None, json!({ "email": "a@x.com", "password": "pw123" }))
        .await?;
    let access = login.body["data"]["access_token"].as_str().unwrap_or_default().to_string();
    let refresh = login.body["data"]["refresh_token"].as_str().unwrap_or_default().to_string();

    let res = app.get("/api/auth/whoami", Some(&access)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["email"], "a@x.com");
    assert_eq!(res.body["data"]["role"], "visitor");

    // A refresh token is not accepted as an access token
    let res = app.get("/api/auth/whoami", Some(&refresh)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.post("/auth/refresh", None, json!({ "refresh_token": refresh })).await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["data"]["email"], "a@x.com");
    assert!(res.body["data"]["access_token"].is_string());

    let res = app.post("/auth/refresh", None, json!({ "refresh": access })).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn email_case_is_ignored() -> Result<()> {
    let app = TestApp::new();

    let res = app.register("visitor", visitor_body("Ada@X.com", "pw123")).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["data"]["email"], "ada@x.com");

    let res = app.register("visitor", visitor_body("ada@x.com", "pw123")).await?;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["code"], "DUPLICATE_ACCOUNT");

    app.login("visitor", "ADA@x.com", "pw123").await?;
    Ok(())
}
