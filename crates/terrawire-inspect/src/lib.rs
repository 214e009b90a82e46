//! terrawire inspector library entry.
//!
//! Cuts captured traffic into frames, decodes each one with `terrawire-core`,
//! optionally verifies round-trip stability and aggregates per-id counters.
//! Consumed by the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod capture;
pub mod config;
pub mod inspect;
pub mod stats;
