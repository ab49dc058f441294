//! # irhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON API through which the host lists remotes, calls services
//!   and pushes power sensor values (`/api/remotes`, `/api/sensors`)
//! - Stream state changes and command outcomes over SSE
//!   (`/api/events/stream`)
//! - Map application errors into HTTP status codes
//!
//! ## Dependency rule
//! Depends on `irhub-app` (for port traits and services) and `irhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
