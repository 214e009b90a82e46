//! terrawire core: the binary packet/module codec of the game wire protocol.
//!
//! This crate turns one length-delimited frame into a typed [`protocol::Packet`]
//! and back, bit-for-bit. It carries no transport or runtime dependencies: it
//! reads from and writes to caller-owned buffers and never performs I/O.
//!
//! Layers, leaf first:
//! - [`wire`]: bounds-checked scalar, varint and string encoders.
//! - [`types`]: composite values shared by many bodies (`NetworkText`, flag
//!   bytes, optional-field records).
//! - [`protocol`]: per-message body codecs, the packet and module envelopes,
//!   and the id registries.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed input is
//! reported as [`WireError`] so a relay never crashes on hostile traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

#[macro_use]
mod macros;

pub mod error;
pub mod protocol;
pub mod types;
pub mod wire;

/// Shared result type.
pub use error::{ErrorCode, Result, WireError};
pub use protocol::{
    encode_packet, read_packet, write_with_header, Context, DecodedPacket, Module, Packet,
};
