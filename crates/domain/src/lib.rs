//! # irhub-domain
//!
//! Pure domain model for irhub, an infrared remote-control hub.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - **Device types** and their classes / media families
//! - **Command catalog**: device type → tier → command entry
//! - **Capability resolver**: which controls a device type supports
//! - **Belief state** and the open-loop **simulator** rules, including power
//!   reconciliation from external sensors
//! - **Service calls** and **events** exchanged with the host
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod capability;
pub mod catalog;
pub mod device;
pub mod device_type;
pub mod event;
pub mod options;
pub mod sensor;
pub mod service;
pub mod simulator;
pub mod state;
