use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{self, jwt_auth, require_admin};
use crate::matches;
use crate::shared::AppState;
use crate::stats;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full HTTP API. Public reads, authenticated profile access and
/// admin-only writes share paths; each group carries its own auth layers.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(auth::handlers::sign_up))
        .route("/auth/login", post(auth::handlers::sign_in))
        .route("/roster", get(matches::handlers::roster))
        .route("/matches", get(matches::handlers::list_matches))
        .route("/matches/next", get(stats::handlers::next_match))
        .route("/matches/:id", get(matches::handlers::get_match))
        .route("/results", get(stats::handlers::results))
        .route("/stats/players", get(stats::handlers::player_stats))
        .route("/stats/overview", get(stats::handlers::overview))
        .route("/stats/leaderboards", get(stats::handlers::leaderboards));

    let authenticated = Router::new()
        .route("/auth/me", get(auth::handlers::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth));

    let admin = Router::new()
        .route("/users", get(auth::handlers::list_profiles))
        .route("/users/:id/role", put(auth::handlers::set_role))
        .route("/matches", post(matches::handlers::create_match))
        .route(
            "/matches/:id",
            put(matches::handlers::update_match).delete(matches::handlers::delete_match),
        )
        .route(
            "/matches/:id/performances",
            put(matches::handlers::replace_performances),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt; // for `oneshot`

    async fn status(method: &str, uri: &str) -> StatusCode {
        let app = build_router(AppStateBuilder::new().build());
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(status("GET", "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_reads_need_no_token() {
        assert_eq!(status("GET", "/matches").await, StatusCode::OK);
        assert_eq!(status("GET", "/matches/next").await, StatusCode::OK);
        assert_eq!(status("GET", "/stats/overview").await, StatusCode::OK);
        assert_eq!(status("GET", "/matches/unknown").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_writes_need_a_token() {
        assert_eq!(status("POST", "/matches").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("DELETE", "/matches/abc").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("GET", "/users").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("GET", "/auth/me").await, StatusCode::UNAUTHORIZED);
    }
}
