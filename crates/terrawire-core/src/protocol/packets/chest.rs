//! Chests, dressers and their contents.

use serde::Serialize;

use crate::error::Result;
use crate::protocol::{Body, Context, Direction, PacketBody};
use crate::wire::{Reader, Writer};

fixed_body! {
    /// Client opens the chest at a tile.
    ChestGetContents = packet 31 {
        x: i16,
        y: i16,
    }
}

fixed_body! {
    ChestItem = packet 32 {
        chest: i16,
        slot: u8,
        stack: i16,
        prefix: u8,
        item: i16,
    }
}

fixed_body! {
    /// Chest a player currently has open, with its name.
    ChestInfo = packet 33 {
        chest: i16,
        x: i16,
        y: i16,
        name: String,
    }
}

wire_enum! {
    pub enum ChestModification {
        PlaceChest = 0,
        DestroyChest = 1,
        PlaceDresser = 2,
        DestroyDresser = 3,
        PlaceContainers2 = 4,
        DestroyContainers2 = 5,
    }
}

fixed_body! {
    ChestModify = packet 34 {
        modification: ChestModification,
        x: i16,
        y: i16,
        style: i16,
        chest: i16,
    }
}

fixed_body! {
    ChestUnlock = packet 52 {
        player: u8,
        action: u8,
        x: i16,
        y: i16,
    }
}

/// Chest name sync. The request from a client omits the name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChestName {
    pub chest: i16,
    pub x: i16,
    pub y: i16,
    pub name: Option<String>,
}

impl PacketBody for ChestName {
    const ID: u8 = 69;
}

impl Body for ChestName {
    fn decode(r: &mut Reader<'_>, ctx: Context) -> Result<Self> {
        let chest = r.get_i16()?;
        let x = r.get_i16()?;
        let y = r.get_i16()?;
        let name = match ctx.inbound() {
            Direction::ServerToClient => Some(r.get_string()?),
            Direction::ClientToServer => None,
        };
        Ok(Self { chest, x, y, name })
    }

    fn encode(&self, w: &mut Writer, ctx: Context) -> Result<()> {
        w.put_i16(self.chest);
        w.put_i16(self.x);
        w.put_i16(self.y);
        if ctx.outbound() == Direction::ServerToClient {
            w.put_string(self.name.as_deref().unwrap_or_default());
        }
        Ok(())
    }
}
