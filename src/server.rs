//! Axum router and server setup.
//! Used by: main.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::require_bearer;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route(
            "/categories",
            get(handlers::category::list).post(handlers::category::create),
        )
        .route(
            "/categories/:id",
            get(handlers::category::get)
                .put(handlers::category::update)
                .delete(handlers::category::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_bearer));

    let api = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .nest("/admin", admin);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}

pub async fn run(state: AppState, addr: &str) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::repository::user::{ADMIN_EMAIL, ADMIN_PASSWORD};
    use crate::state::build_test_state;
    use crate::token::sign::issue_token_at;

    const TEST_SECRET: &str = "test-secret";

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).expect("request builds")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    async fn login(router: &Router) -> String {
        let response = router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            ))
            .await
            .expect("login responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["access_token"]
            .as_str()
            .expect("token present")
            .to_owned()
    }

    fn router() -> Router {
        build_router(build_test_state().expect("test state builds"))
    }

    #[tokio::test]
    async fn health_returns_200() {
        let response = router()
            .oneshot(get_request("/health", None))
            .await
            .expect("health responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_returns_token_and_expiry() {
        let router = router();
        let response = router
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            ))
            .await
            .expect("login responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["meta"]["status"], true);
        assert_eq!(body["meta"]["message"], "Login success");
        assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(body["expired_at"].as_i64().is_some_and(|exp| exp > Utc::now().timestamp()));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let router = router();
        let mut messages = Vec::new();
        let attempts = [
            (ADMIN_EMAIL, "wrong-password"),
            ("ghost@mail.com", ADMIN_PASSWORD),
        ];
        for (email, password) in attempts {
            let response = router
                .clone()
                .oneshot(json_request(
                    Method::POST,
                    "/api/auth/login",
                    None,
                    json!({"email": email, "password": password}),
                ))
                .await
                .expect("login responds");
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            messages.push(body_json(response).await["meta"]["message"].clone());
        }
        assert_eq!(messages[0], "email or password is incorrect");
        assert_eq!(messages[0], messages[1]);
    }

    #[tokio::test]
    async fn invalid_login_body_returns_400() {
        let response = router()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                json!({"email": "not-an-email", "password": "short"}),
            ))
            .await
            .expect("login responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["meta"]["status"], false);
    }

    #[tokio::test]
    async fn missing_authorization_returns_401() {
        let response = router()
            .oneshot(get_request("/api/admin/categories", None))
            .await
            .expect("list responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["meta"]["message"], "Authorization header is missing");
    }

    #[tokio::test]
    async fn token_failures_share_one_response() {
        let router = router();
        let foreign = issue_token_at(1, "other-secret", "news-portal", Utc::now())
            .expect("token issues");
        let expired = issue_token_at(1, TEST_SECRET, "news-portal", Utc::now() - Duration::days(2))
            .expect("token issues");
        for token in ["garbage", foreign.token.as_str(), expired.token.as_str()] {
            let response = router
                .clone()
                .oneshot(get_request("/api/admin/categories", Some(token)))
                .await
                .expect("list responds");
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let body = body_json(response).await;
            assert_eq!(body["meta"]["message"], "Invalid token");
        }
    }

    #[tokio::test]
    async fn zero_identity_is_unauthorized() {
        let token =
            issue_token_at(0, TEST_SECRET, "news-portal", Utc::now()).expect("token issues");
        let response = router()
            .oneshot(get_request("/api/admin/categories", Some(token.token.as_str())))
            .await
            .expect("list responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["meta"]["message"], "Unauthorized access");
    }

    #[tokio::test]
    async fn empty_category_list_is_first_page() {
        let router = router();
        let token = login(&router).await;
        let response = router
            .oneshot(get_request("/api/admin/categories", Some(token.as_str())))
            .await
            .expect("list responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], json!([]));
        assert_eq!(
            body["pagination"],
            json!({"page": 1, "per_page": 10, "page_count": 1, "total_count": 0})
        );
    }

    #[tokio::test]
    async fn category_lifecycle() {
        let router = router();
        let token = login(&router).await;

        let response = router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/admin/categories",
                Some(token.as_str()),
                json!({"title": "World News"}),
            ))
            .await
            .expect("create responds");
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["data"]["slug"], "world-news");
        assert_eq!(created["data"]["created_by_name"], "Admin");
        let id = created["data"]["id"].as_i64().expect("id present");

        let response = router
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/admin/categories/{id}"),
                Some(token.as_str()),
                json!({"title": "Local News"}),
            ))
            .await
            .expect("update responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["slug"], "local-news");

        let response = router
            .clone()
            .oneshot(get_request(&format!("/api/admin/categories/{id}"), Some(token.as_str())))
            .await
            .expect("get responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["title"], "Local News");

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/api/admin/categories/{id}"))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("delete responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(get_request(&format!("/api/admin/categories/{id}"), Some(token.as_str())))
            .await
            .expect("get responds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_paginates_and_rejects_bad_pages() {
        let state = build_test_state().expect("test state builds");
        let admin = state
            .db
            .find_user_by_email(ADMIN_EMAIL)
            .expect("lookup works")
            .expect("admin seeded");
        for n in 0..25 {
            state
                .db
                .create_category(&format!("Category {n}"), admin.id)
                .expect("category created");
        }
        let token = state.tokens.issue(admin.id).expect("token issues").token;
        let router = build_router(state);

        let response = router
            .clone()
            .oneshot(get_request("/api/admin/categories?page=3&limit=10", Some(token.as_str())))
            .await
            .expect("list responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
        assert_eq!(body["data"][0]["title"], "Category 4");
        assert_eq!(
            body["pagination"],
            json!({"page": 3, "per_page": 10, "page_count": 3, "total_count": 25})
        );

        for uri in [
            "/api/admin/categories?page=4&limit=10",
            "/api/admin/categories?page=0",
            "/api/admin/categories?page=abc",
        ] {
            let response = router
                .clone()
                .oneshot(get_request(uri, Some(token.as_str())))
                .await
                .expect("list responds");
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn blank_title_returns_400() {
        let router = router();
        let token = login(&router).await;
        let response = router
            .oneshot(json_request(
                Method::POST,
                "/api/admin/categories",
                Some(token.as_str()),
                json!({"title": "  "}),
            ))
            .await
            .expect("create responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
