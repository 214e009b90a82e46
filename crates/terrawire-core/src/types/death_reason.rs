//! Optional-field record describing what hurt or killed a player.
//!
//! Layout: `[u8 flags]` then each present fact in bit order:
//!
//! | bit | fact | type |
//! | --- | --- | --- |
//! | 0 | killer player | `i16` |
//! | 1 | killer npc | `i16` |
//! | 2 | projectile index | `i16` |
//! | 3 | other cause | `u8` |
//! | 4 | projectile type | `i16` |
//! | 5 | item type | `i16` |
//! | 6 | item prefix | `u8` |
//! | 7 | custom reason | string |

use serde::Serialize;

use super::BitsByte;
use crate::error::Result;
use crate::wire::{read_if, write_opt, Field, Reader, Writer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeathReason {
    pub killer_player: Option<i16>,
    pub killer_npc: Option<i16>,
    pub projectile_index: Option<i16>,
    pub other_cause: Option<u8>,
    pub projectile_type: Option<i16>,
    pub item_type: Option<i16>,
    pub item_prefix: Option<u8>,
    pub custom_reason: Option<String>,
}

impl DeathReason {
    /// A reason carrying only a custom message.
    pub fn custom(reason: impl Into<String>) -> Self {
        Self {
            custom_reason: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn by_player(player: i16) -> Self {
        Self {
            killer_player: Some(player),
            ..Self::default()
        }
    }

    /// Presence flags derived from which facts are populated.
    pub fn flags(&self) -> BitsByte {
        BitsByte::from_flags([
            self.killer_player.is_some(),
            self.killer_npc.is_some(),
            self.projectile_index.is_some(),
            self.other_cause.is_some(),
            self.projectile_type.is_some(),
            self.item_type.is_some(),
            self.item_prefix.is_some(),
            self.custom_reason.is_some(),
        ])
    }
}

impl Field for DeathReason {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let flags = BitsByte::read(r)?;
        Ok(Self {
            killer_player: read_if(flags.get(0), r)?,
            killer_npc: read_if(flags.get(1), r)?,
            projectile_index: read_if(flags.get(2), r)?,
            other_cause: read_if(flags.get(3), r)?,
            projectile_type: read_if(flags.get(4), r)?,
            item_type: read_if(flags.get(5), r)?,
            item_prefix: read_if(flags.get(6), r)?,
            custom_reason: read_if(flags.get(7), r)?,
        })
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        // Flags come from the populated facts, never from a stored byte.
        self.flags().write(w)?;
        write_opt(&self.killer_player, w)?;
        write_opt(&self.killer_npc, w)?;
        write_opt(&self.projectile_index, w)?;
        write_opt(&self.other_cause, w)?;
        write_opt(&self.projectile_type, w)?;
        write_opt(&self.item_type, w)?;
        write_opt(&self.item_prefix, w)?;
        write_opt(&self.custom_reason, w)
    }
}
