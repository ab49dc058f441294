//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod remotes;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;
pub mod sse;

use axum::Router;
use axum::routing::{get, post, put};

use irhub_app::ports::{RemoteTransport, StateStore};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<T, S>() -> Router<AppState<T, S>>
where
    T: RemoteTransport + 'static,
    S: StateStore + 'static,
{
    Router::new()
        .route("/remotes", get(remotes::list::<T, S>))
        .route("/remotes/{id}", get(remotes::get::<T, S>))
        .route("/remotes/{id}/services", post(remotes::call_service::<T, S>))
        .route("/sensors/{id}", put(sensors::update::<T, S>))
        .route("/events/stream", get(sse::stream::<T, S>))
}
