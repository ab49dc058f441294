//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod remote_service;

pub use remote_service::{PrimaryEntity, Remote, RemoteService, RemoteSummary};
