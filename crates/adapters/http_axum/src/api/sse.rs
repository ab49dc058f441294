//! Server-Sent Events (SSE) stream of state changes and command outcomes.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use irhub_app::ports::{RemoteTransport, StateStore};
use irhub_domain::event::Event as DomainEvent;

use crate::state::AppState;

fn to_sse(event: &DomainEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Event::default().data(json)),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize event to JSON for SSE stream");
            None
        }
    }
}

/// `GET /api/events/stream`
///
/// Subscribes to the event bus and sends every event as a JSON `data:`
/// frame until the client disconnects. Slow subscribers skip the events
/// they missed.
pub async fn stream<T, S>(
    State(state): State<AppState<T, S>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    T: RemoteTransport + 'static,
    S: StateStore + 'static,
{
    let event_rx = state.remote_service.events().subscribe();
    let event_stream = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => to_sse(&event).map(Ok),
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
