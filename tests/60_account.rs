mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{employee_body, TestApp};
use museum_api::database::AccountStore;

#[tokio::test]
async fn profile_update_rehashes_password() -> Result<()> {
    let app = TestApp::new();
    let token = app.visitor("a@x.com").await?;

    let res = app.get("/api/account", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["email"], "a@x.com");
    assert!(res.body["data"].get("password_hash").is_none(), "hash must never be serialized");

    let res = app.patch("/api/account", &token, json!({})).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .patch("/api/account", &token, json!({ "newUsername": "ada", "newPassword": "s3cret" }))
        .await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["data"]["username"], "ada");

    let stored = app.store.password_hash("a@x.com").await?.unwrap_or_default();
    assert_ne!(stored, "s3cret");
    assert!(app.login("visitor", "a@x.com", "s3cret").await.is_ok());
    assert!(app.login("visitor", "a@x.com", "pw123").await.is_err());
    Ok(())
}

#[tokio::test]
async fn deleted_accounts_cannot_log_in() -> Result<()> {
    let app = TestApp::new();
    let token = app.visitor("a@x.com").await?;

    let res = app.delete("/api/account", &token).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(app.store.account_count(), 0);
    assert_eq!(app.store.role_row_count(), 0);

    let res = app
        .post("/auth/login/visitor", None, json!({ "email": "a@x.com", "password": "pw123" }))
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn supervisors_manage_their_employees() -> Result<()> {
    let app = TestApp::new();
    let boss = app.supervisor("boss@x.com").await?;
    let other = app.supervisor("other@x.com").await?;
    app.register("employee", employee_body("e@x.com", "boss@x.com", "1 Main St")).await?;
    let employee = app.login("staff", "e@x.com", "pw123").await?;

    let res = app.get("/api/supervisor", Some(&boss)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["museum_name"], "Town Museum");
    assert_eq!(res.body["data"]["museum_address"], "1 Main St");

    let res = app.get("/api/employee", Some(&employee)).await?;
    assert_eq!(res.body["data"]["supervisor_email"], "boss@x.com");
    assert_eq!(res.body["data"]["museum_name"], "Town Museum");

    let res = app.get("/api/supervisor/employees", Some(&boss)).await?;
    assert_eq!(res.body["data"][0]["email"], "e@x.com");
    let res = app.get("/api/supervisor/employees", Some(&other)).await?;
    assert_eq!(res.body["data"].as_array().map(Vec::len), Some(0));
    let res = app.get("/api/supervisor/employees", Some(&employee)).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    // Supervisor with staff cannot delete their own account
    let res = app.delete("/api/account", &boss).await?;
    assert_eq!(res.status, StatusCode::CONFLICT);

    // Another supervisor cannot touch this employee
    let res = app
        .patch("/api/supervisor/employees/e@x.com", &other, json!({ "newUsername": "hijack" }))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app
        .patch("/api/supervisor/employees/e@x.com", &boss, json!({ "newPassword": "rotated" }))
        .await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert!(app.login("staff", "e@x.com", "rotated").await.is_ok());

    let res = app.delete("/api/supervisor/employees/e@x.com", &boss).await?;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.delete("/api/account", &boss).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}
