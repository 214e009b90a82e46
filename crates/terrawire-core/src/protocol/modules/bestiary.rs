use bytes::Bytes;
use serde::Serialize;

use crate::error::{Result, WireError};
use crate::protocol::{Body, Context, ModuleBody};
use crate::wire::{Reader, Writer};

const KILL: u8 = 0;
const SIGHT: u8 = 1;
const CHAT: u8 = 2;

/// Bestiary progress for one NPC type, keyed by an unlock kind byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "unlock")]
pub enum BestiaryModule {
    Kill { npc: i16, kill_count: u16 },
    Sight { npc: i16 },
    Chat { npc: i16 },
    /// Unlock kind without a modeled layout; the rest of the body is kept raw.
    /// Kinds 0 to 2 are refused on encode.
    Other { kind: u8, data: Bytes },
}

impl Default for BestiaryModule {
    fn default() -> Self {
        BestiaryModule::Kill {
            npc: 0,
            kill_count: 0,
        }
    }
}

impl BestiaryModule {
    pub fn kind(&self) -> u8 {
        match self {
            BestiaryModule::Kill { .. } => KILL,
            BestiaryModule::Sight { .. } => SIGHT,
            BestiaryModule::Chat { .. } => CHAT,
            BestiaryModule::Other { kind, .. } => *kind,
        }
    }
}

impl ModuleBody for BestiaryModule {
    const ID: u16 = 4;
}

impl Body for BestiaryModule {
    fn decode(r: &mut Reader<'_>, _ctx: Context) -> Result<Self> {
        let kind = r.get_u8()?;
        Ok(match kind {
            KILL => BestiaryModule::Kill {
                npc: r.get_i16()?,
                kill_count: r.get_u16()?,
            },
            SIGHT => BestiaryModule::Sight { npc: r.get_i16()? },
            CHAT => BestiaryModule::Chat { npc: r.get_i16()? },
            kind => BestiaryModule::Other {
                kind,
                data: Bytes::copy_from_slice(r.rest()),
            },
        })
    }

    fn encode(&self, w: &mut Writer, _ctx: Context) -> Result<()> {
        if let BestiaryModule::Other { kind: KILL..=CHAT, .. } = self {
            return Err(WireError::ModeledKind(self.kind()));
        }
        w.put_u8(self.kind());
        match self {
            BestiaryModule::Kill { npc, kill_count } => {
                w.put_i16(*npc);
                w.put_u16(*kill_count);
            }
            BestiaryModule::Sight { npc } | BestiaryModule::Chat { npc } => w.put_i16(*npc),
            BestiaryModule::Other { data, .. } => w.put_slice(data),
        }
        Ok(())
    }
}
