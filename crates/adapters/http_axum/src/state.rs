//! Shared application state for axum handlers.

use std::sync::Arc;

use irhub_app::ports::{RemoteTransport, StateStore};
use irhub_app::services::RemoteService;

/// Application state shared across all axum handlers.
///
/// Generic over the transport and state store to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`.
pub struct AppState<T, S> {
    pub remote_service: Arc<RemoteService<T, S>>,
}

impl<T, S> Clone for AppState<T, S> {
    fn clone(&self) -> Self {
        Self {
            remote_service: Arc::clone(&self.remote_service),
        }
    }
}

impl<T, S> AppState<T, S>
where
    T: RemoteTransport + 'static,
    S: StateStore + 'static,
{
    pub fn new(remote_service: RemoteService<T, S>) -> Self {
        Self::from_arc(Arc::new(remote_service))
    }

    /// Use this when the service is also needed outside the router, for
    /// example to shut it down after the server stops.
    pub fn from_arc(remote_service: Arc<RemoteService<T, S>>) -> Self {
        Self { remote_service }
    }
}
