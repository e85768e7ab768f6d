use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::{TestApp, ADMIN_EMAIL, PASSWORD};

// ============================================================================
// Action Helpers
// ============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Calendar date relative to today, for fixtures around the next match
pub fn days_from_today(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// A match sheet entry for a player who turned up
pub fn present(name: &str, goals: u32, penalties: u32, corners: u32) -> Value {
    json!({
        "name": name,
        "present": true,
        "goals": goals,
        "penalties": penalties,
        "corners": corners
    })
}

pub fn absent(name: &str) -> Value {
    json!({ "name": name, "present": false })
}

impl TestApp {
    /// Send a request through the full router
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Sign up and return the access token
    pub async fn sign_up(&self, email: &str, full_name: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/auth/signup",
                None,
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "full_name": full_name
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }

    /// Sign up the configured admin and return its token
    pub async fn admin_token(&self) -> String {
        self.sign_up(ADMIN_EMAIL, "Club Admin").await
    }

    /// Create a home fixture and return its id
    pub async fn create_match(
        &self,
        token: &str,
        date: NaiveDate,
        away_team: &str,
        result: Option<&str>,
        match_type: Option<&str>,
        players: Vec<Value>,
    ) -> String {
        let response = self
            .request(
                Method::POST,
                "/matches",
                Some(token),
                Some(json!({
                    "date": date,
                    "time": "20:30:00",
                    "away_team": away_team,
                    "result": result,
                    "match_type": match_type,
                    "players": players
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["match"]["id"].as_str().unwrap().to_string()
    }
}
