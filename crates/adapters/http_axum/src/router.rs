//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use irhub_app::ports::{RemoteTransport, StateStore};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the JSON API under `/api` and answers `/health` for liveness
/// probes. Includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level.
pub fn build<T, S>(state: AppState<T, S>) -> Router
where
    T: RemoteTransport + 'static,
    S: StateStore + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::testing::test_state;

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (_transport, state) = test_state().await;
        let app = build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let (_transport, state) = test_state().await;
        let app = build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/areas")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
