//! Packet body codecs, grouped by what they touch.
//!
//! Simple fixed layouts are declared with `fixed_body!`; bodies with
//! presence flags, fixed-count lists or direction-dependent fields implement
//! [`Body`](super::Body) by hand.

mod chest;
mod combat;
mod connection;
mod items;
mod module_packet;
mod npc;
mod player;
mod world;

pub use chest::*;
pub use combat::*;
pub use connection::*;
pub use items::*;
pub use module_packet::ModulePacket;
pub use npc::*;
pub use player::*;
pub use world::*;

use crate::error::{Result, WireError};
use crate::wire::{Field, Reader, Writer};

/// Read exactly `count` values.
pub(crate) fn read_fixed<T: Field>(r: &mut Reader<'_>, count: usize) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(T::read(r)?);
    }
    Ok(out)
}

/// Write exactly `count` values, padding a short list with defaults.
pub(crate) fn write_fixed<T: Field + Default>(
    items: &[T],
    count: usize,
    w: &mut Writer,
) -> Result<()> {
    if items.len() > count {
        return Err(WireError::TooManyElements {
            max: count,
            actual: items.len(),
        });
    }
    for item in items {
        item.write(w)?;
    }
    let pad = T::default();
    for _ in items.len()..count {
        pad.write(w)?;
    }
    Ok(())
}
