//! World-facing modules: liquids, pings, ambience, pylons and particles.

use serde::Serialize;

use crate::error::{Result, WireError};
use crate::protocol::{Body, Context, ModuleBody};
use crate::types::{ParticleSettings, Vector2};
use crate::wire::{Field, Reader, Writer};

/// One changed liquid tile. Coordinates are packed into an `i32` as
/// `x << 16 | y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LiquidChange {
    pub packed_position: i32,
    pub amount: u8,
    pub kind: u8,
}

impl LiquidChange {
    pub fn new(x: u16, y: u16, amount: u8, kind: u8) -> Self {
        Self {
            packed_position: (i32::from(x) << 16) | i32::from(y),
            amount,
            kind,
        }
    }

    pub fn x(&self) -> u16 {
        ((self.packed_position >> 16) & 0xffff) as u16
    }

    pub fn y(&self) -> u16 {
        (self.packed_position & 0xffff) as u16
    }
}

impl Field for LiquidChange {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            packed_position: r.get_i32()?,
            amount: r.get_u8()?,
            kind: r.get_u8()?,
        })
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        w.put_i32(self.packed_position);
        w.put_u8(self.amount);
        w.put_u8(self.kind);
        Ok(())
    }
}

/// Batched liquid updates, `[u16 count]` then `count` changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiquidModule {
    pub changes: Vec<LiquidChange>,
}

impl ModuleBody for LiquidModule {
    const ID: u16 = 0;
}

impl Body for LiquidModule {
    fn decode(r: &mut Reader<'_>, _ctx: Context) -> Result<Self> {
        let count = usize::from(r.get_u16()?);
        // each change is six bytes; a count the body cannot hold is truncated
        // before anything is allocated
        let needed = count * 6;
        if needed > r.remaining() {
            return Err(WireError::Truncated {
                needed,
                remaining: r.remaining(),
            });
        }
        let mut changes = Vec::with_capacity(count);
        for _ in 0..count {
            changes.push(LiquidChange::read(r)?);
        }
        Ok(Self { changes })
    }

    fn encode(&self, w: &mut Writer, _ctx: Context) -> Result<()> {
        let count = u16::try_from(self.changes.len()).map_err(|_| WireError::TooManyElements {
            max: usize::from(u16::MAX),
            actual: self.changes.len(),
        })?;
        w.put_u16(count);
        for change in &self.changes {
            change.write(w)?;
        }
        Ok(())
    }
}

fixed_body! {
    /// Map ping at a world position.
    PingModule = module 2 {
        position: Vector2,
    }
}

fixed_body! {
    /// Seeded ambient sky entity for a player.
    AmbienceModule = module 3 {
        player: u8,
        seed: i32,
        sky_entity: u8,
    }
}

wire_enum! {
    pub enum PylonOperation {
        PylonWasAdded = 0,
        PylonWasRemoved = 1,
        PlayerRequestsTeleport = 2,
    }
}

fixed_body! {
    TeleportPylonModule = module 7 {
        operation: PylonOperation,
        x: i16,
        y: i16,
        pylon: u8,
    }
}

fixed_body! {
    ParticlesModule = module 8 {
        kind: u8,
        settings: ParticleSettings,
    }
}
