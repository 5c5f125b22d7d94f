#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use museum_api::auth::TokenIssuer;
use museum_api::config::AppConfig;
use museum_api::database::MemoryStore;
use museum_api::{app, AppState};

/// Router over a fresh in-memory store, driven in-process
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let security = AppConfig::development().security;
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenIssuer::from_config(&security).expect("development secret is set");
        let state = AppState::with_store(store.clone(), tokens, security.min_password_length);

        Self {
            store,
            router: app(state),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body from {}", uri))?
        };
        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str) -> Result<TestResponse> {
        self.request(Method::PUT, uri, Some(token), None).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<TestResponse> {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn register(&self, role: &str, body: Value) -> Result<TestResponse> {
        self.post(&format!("/auth/register/{}", role), None, body).await
    }

    /// Log in and return the access token, failing the test on a non-200
    pub async fn login(&self, portal: &str, email: &str, password: &str) -> Result<String> {
        let res = self
            .post(
                &format!("/auth/login/{}", portal),
                None,
                json!({ "email": email, "password": password }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {} {}", res.status, res.body);
        res.body["data"]["access_token"]
            .as_str()
            .map(str::to_string)
            .context("missing access_token")
    }

    /// Registered supervisor of "1 Main St" plus its access token
    pub async fn supervisor(&self, email: &str) -> Result<String> {
        let res = self.register("supervisor", supervisor_body(email, "1 Main St", "Town Museum")).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "register failed: {}", res.body);
        self.login("staff", email, "pw123").await
    }

    pub async fn visitor(&self, email: &str) -> Result<String> {
        let res = self.register("visitor", visitor_body(email, "pw123")).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "register failed: {}", res.body);
        self.login("visitor", email, "pw123").await
    }
}

pub fn visitor_body(email: &str, password: &str) -> Value {
    json!({
        "email": email,
        "username": email.split('@').next().unwrap_or(email),
        "password": password,
        "firstName": "Ada",
        "middleName": "",
        "lastName": "Lovelace",
        "yearOfBirth": 1990
    })
}

pub fn supervisor_body(email: &str, museum_address: &str, museum_name: &str) -> Value {
    let mut body = visitor_body(email, "pw123");
    body["museumAddress"] = json!(museum_address);
    body["museumName"] = json!(museum_name);
    body
}

pub fn employee_body(email: &str, supervisor_email: &str, museum_address: &str) -> Value {
    let mut body = visitor_body(email, "pw123");
    body["supervisorEmail"] = json!(supervisor_email);
    body["museumAddress"] = json!(museum_address);
    body
}
