//! # irhub-adapter-virtual
//!
//! Stand-ins for the external collaborators of irhub, used for dry runs and
//! tests.
//!
//! | Type | Port | Behaviour |
//! |------|------|-----------|
//! | [`RecordingTransport`] | `RemoteTransport` | Logs and records every command; optional latency and failure injection |
//! | [`StaticDiscovery`] | `RemoteDiscovery` | Returns a fixed list of remotes, typically from configuration |
//! | [`InMemoryStateStore`] | `StateStore` | Keeps restore snapshots in a map |
//!
//! ## Dependency rule
//!
//! Depends on `irhub-app` (port traits) and `irhub-domain` only.

mod discovery;
mod store;
mod transport;

pub use discovery::StaticDiscovery;
pub use store::InMemoryStateStore;
pub use transport::{FailurePlan, RecordingTransport};
