//! HTTP link server
//!
//! `GET /link?identifier=<query>` answers with the JSON link on success,
//! `404 Link not found` when the query has no single match and `400` with the
//! parse error when the query is malformed.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::router::LinkResolver;

#[derive(Debug, Deserialize)]
pub struct LinkQuery {
    pub identifier: String,
}

/// Routes of the link server, sharing one resolver
pub fn router(resolver: Arc<LinkResolver>) -> Router {
    Router::new()
        .route("/link", get(get_link))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(resolver)
}

/// Bind `bind` and serve until Ctrl+C
pub async fn serve_http(resolver: Arc<LinkResolver>, bind: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Link server listening on http://{bind}");
    info!("Link endpoint: http://{bind}/link?identifier=<query>");

    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Link server shut down gracefully");
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn get_link(
    State(resolver): State<Arc<LinkResolver>>,
    Query(LinkQuery { identifier }): Query<LinkQuery>,
) -> Response {
    let query = identifier.clone();
    let outcome =
        match tokio::task::spawn_blocking(move || resolver.resolve_identifier(&query)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Exception while getting link for '{identifier}': {e}");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Exception while getting link")
                    .into_response();
            }
        };

    match outcome {
        Ok(link) => Json(link).into_response(),
        Err(e) if e.is_not_found() => {
            info!("Link not found for '{identifier}': {e}");
            (StatusCode::NOT_FOUND, "Link not found").into_response()
        }
        Err(e) => {
            info!("Rejected query '{identifier}': {e}");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{LinkBuilder, LinkRepresentation};
    use crate::resolution::fixtures::{class_metadata, facade_metadata, index_of};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        let index = index_of(vec![
            (
                "bot/util/UtilsKt",
                facade_metadata("core", json!({"functions": [{"name": "sayHello"}]})),
            ),
            (
                "bot/api/Foo",
                class_metadata(
                    "class",
                    json!({"functions": [{"name": "bar"}], "properties": [{"name": "bar"}]}),
                ),
            ),
        ]);
        router(Arc::new(LinkResolver::new(
            Arc::new(index),
            LinkBuilder::default(),
        )))
    }

    async fn send(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_link_found() {
        let (status, body) = send("/link?identifier=sayHello").await;
        assert_eq!(status, StatusCode::OK);
        let link: LinkRepresentation = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            link,
            LinkRepresentation::new("sayHello", "https://docs.example/core/bot/util/say-hello.html")
        );
    }

    #[tokio::test]
    async fn test_query_with_filter() {
        let (status, body) = send("/link?identifier=Foo%23bar%20type%3Dproperty").await;
        assert_eq!(status, StatusCode::OK);
        let link: LinkRepresentation = serde_json::from_slice(&body).unwrap();
        assert_eq!(link.label, "Foo.bar");
    }

    #[tokio::test]
    async fn test_ambiguous_and_missing_are_not_found() {
        for uri in ["/link?identifier=Foo%23bar", "/link?identifier=Missing"] {
            let (status, body) = send(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, b"Link not found");
        }
    }

    #[tokio::test]
    async fn test_malformed_query_is_bad_request() {
        let (status, _) = send("/link?identifier=Foo%23bar%20type%3Dmethod").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }
}
