use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, expenses};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(expenses::router())
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_answers() {
        let app = build_app(test_state().await);
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unauthenticated_requests_redirect_to_login() {
        let app = build_app(test_state().await);

        for request in [
            Request::get("/expenses").body(Body::empty()).unwrap(),
            Request::get("/expenses/summary").body(Body::empty()).unwrap(),
            json_request(
                "POST",
                "/expenses",
                json!({"category": "food", "amount": "10", "date": "2024-01-01"}),
            ),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "/login"
            );
        }
    }

    #[tokio::test]
    async fn register_login_add_and_summarize_over_http() {
        let state = test_state().await;
        let app = build_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/register",
                json!({"username": "alice", "email": "alice@example.com", "password": "long-enough"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                json!({"username": "alice", "password": "long-enough"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login sets a session cookie")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        for (amount, date) in [("10.0", "2024-01-01"), ("5.0", "2024-01-01")] {
            let mut request = json_request(
                "POST",
                "/expenses",
                json!({"category": "food", "amount": amount, "date": date}),
            );
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let mut request = Request::get("/expenses/summary").body(Body::empty()).unwrap();
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary = body_json(response).await;
        assert_eq!(summary["by_category"]["labels"][0], "food");
        assert_eq!(summary["by_category"]["values"][0], 15.0);
        assert_eq!(summary["by_date"]["labels"][0], "2024-01-01");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts_over_http() {
        let app = build_app(test_state().await);
        let body = json!({"username": "alice", "email": "alice@example.com", "password": "long-enough"});

        let first = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", body.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", body))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let error = body_json(second).await;
        assert_eq!(error["error"], "duplicate_credential");
    }

    #[tokio::test]
    async fn logout_clears_the_session_cookie() {
        let app = build_app(test_state().await);
        let response = app
            .oneshot(
                Request::post("/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("logout sets a removal cookie")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("spendlog_session="));
    }
}
