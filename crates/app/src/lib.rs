//! # irhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RemoteTransport`: emit one IR command through a bridge
//!   - `RemoteDiscovery`: list the remotes a bridge knows
//!   - `StateStore`: load and save restore snapshots
//! - Turn abstract actions into transport calls (`CommandDispatcher`)
//! - Run the **entity kinds** (light, media player, switch, buttons) with
//!   single-flight actions and open-loop belief updates
//! - Reconcile power belief from pushed sensor values (`SensorHub`,
//!   `PowerBinding`)
//! - Provide **in-process infrastructure** (event bus, cancellation) that
//!   doesn't need IO
//!
//! ## Dependency rule
//! Depends on `irhub-domain` only (plus `tokio` for sync primitives and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod belief;
pub mod cancel;
pub mod dispatcher;
pub mod entities;
pub mod event_bus;
pub mod ports;
pub mod reconciliation;
pub mod sensor_hub;
pub mod services;
