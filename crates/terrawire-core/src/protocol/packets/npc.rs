//! NPC combat, buffs, housing and kill bookkeeping.

use serde::Serialize;

use crate::error::Result;
use crate::protocol::{Body, Context, Direction, PacketBody};
use crate::wire::{Field, Reader, Writer};

fixed_body! {
    StrikeNpcWithHeldItem = packet 24 {
        npc: i16,
        player: u8,
    }
}

fixed_body! {
    NpcStrike = packet 28 {
        npc: i16,
        damage: i16,
        knockback: f32,
        direction: i8,
        crit: bool,
    }
}

fixed_body! {
    NpcAddBuff = packet 53 {
        npc: i16,
        buff: u16,
        time: i16,
    }
}

/// One buff slot of an NPC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NpcBuff {
    pub buff: u16,
    pub time: i16,
}

impl Field for NpcBuff {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            buff: r.get_u16()?,
            time: r.get_i16()?,
        })
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        w.put_u16(self.buff);
        w.put_i16(self.time);
        Ok(())
    }
}

/// Buff slots carried by [`NpcBuffUpdate`].
pub const NPC_BUFF_SLOTS: usize = 20;

fixed_body! {
    NpcBuffUpdate = packet 54 {
        npc: i16,
        buffs: [NpcBuff; NPC_BUFF_SLOTS],
    }
}

/// Town NPC name. Clients send only the NPC index as a request; the server
/// answers with the name and the NPC's appearance variation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NpcName {
    pub npc: i16,
    pub name: Option<String>,
    pub variation: Option<i32>,
}

impl PacketBody for NpcName {
    const ID: u8 = 56;
}

impl Body for NpcName {
    fn decode(r: &mut Reader<'_>, ctx: Context) -> Result<Self> {
        let npc = r.get_i16()?;
        match ctx.inbound() {
            Direction::ClientToServer => Ok(Self {
                npc,
                ..Self::default()
            }),
            Direction::ServerToClient => Ok(Self {
                npc,
                name: Some(r.get_string()?),
                variation: Some(r.get_i32()?),
            }),
        }
    }

    fn encode(&self, w: &mut Writer, ctx: Context) -> Result<()> {
        w.put_i16(self.npc);
        if ctx.outbound() == Direction::ServerToClient {
            w.put_string(self.name.as_deref().unwrap_or_default());
            w.put_i32(self.variation.unwrap_or_default());
        }
        Ok(())
    }
}

fixed_body! {
    /// Assign or clear a town NPC's house.
    NpcHome = packet 60 {
        npc: i16,
        x: i16,
        y: i16,
        homeless: u8,
    }
}

fixed_body! {
    /// Summon a boss or start an invasion; negative kinds are events.
    SpawnBoss = packet 61 {
        player: i16,
        kind: i16,
    }
}

fixed_body! {
    CatchNpc = packet 70 {
        npc: i16,
        player: u8,
    }
}

fixed_body! {
    ReleaseNpc = packet 71 {
        x: i32,
        y: i32,
        kind: i16,
        style: u8,
    }
}

fixed_body! {
    NpcKillCount = packet 83 {
        kind: i16,
        count: i32,
    }
}

fixed_body! {
    NotifyPlayerNpcKilled = packet 97 {
        npc: i16,
    }
}

fixed_body! {
    NotifyPlayerOfEvent = packet 98 {
        event: i16,
    }
}

fixed_body! {
    RequestNpcBuffRemoval = packet 137 {
        npc: i16,
        buff: u16,
    }
}
