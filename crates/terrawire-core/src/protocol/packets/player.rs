//! Player state: position, health, buffs, team and related effects.

use serde::Serialize;

use super::{read_fixed, write_fixed};
use crate::error::Result;
use crate::protocol::{Body, Context, PacketBody};
use crate::types::{BitsByte, Vector2};
use crate::wire::{read_if, write_opt, Field, Reader, Writer};

fixed_body! {
    /// One inventory, armor or bank slot of a player.
    PlayerInventorySlot = packet 5 {
        player: u8,
        slot: i16,
        stack: i16,
        prefix: u8,
        item: i16,
    }
}

fixed_body! {
    SpawnPlayer = packet 12 {
        player: u8,
        x: i16,
        y: i16,
        respawn_timer: i32,
        deaths_pve: i16,
        deaths_pvp: i16,
        context: u8,
    }
}

/// Bit of [`PlayerUpdate::pulley`] set when a velocity follows.
pub const PULLEY_HAS_VELOCITY: u8 = 2;
/// Bit of [`PlayerUpdate::misc`] set when return positions follow.
pub const MISC_HAS_RETURN_POSITIONS: u8 = 6;

/// Where a potion of return sends the player back to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReturnPositions {
    pub original_use: Vector2,
    pub home: Vector2,
}

/// Per-tick player controls and position.
///
/// The presence bits for `velocity` and `return_positions` are recomputed on
/// write; the other flag bits are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerUpdate {
    pub player: u8,
    pub control: BitsByte,
    pub pulley: BitsByte,
    pub misc: BitsByte,
    pub sleeping: BitsByte,
    pub selected_item: u8,
    pub position: Vector2,
    pub velocity: Option<Vector2>,
    pub return_positions: Option<ReturnPositions>,
}

impl PacketBody for PlayerUpdate {
    const ID: u8 = 13;
}

impl Body for PlayerUpdate {
    fn decode(r: &mut Reader<'_>, _ctx: Context) -> Result<Self> {
        let player = r.get_u8()?;
        let control = BitsByte::read(r)?;
        let pulley = BitsByte::read(r)?;
        let misc = BitsByte::read(r)?;
        let sleeping = BitsByte::read(r)?;
        let selected_item = r.get_u8()?;
        let position = Vector2::read(r)?;
        let velocity = read_if(pulley.get(PULLEY_HAS_VELOCITY), r)?;
        let return_positions = if misc.get(MISC_HAS_RETURN_POSITIONS) {
            Some(ReturnPositions {
                original_use: Vector2::read(r)?,
                home: Vector2::read(r)?,
            })
        } else {
            None
        };
        Ok(Self {
            player,
            control,
            pulley,
            misc,
            sleeping,
            selected_item,
            position,
            velocity,
            return_positions,
        })
    }

    fn encode(&self, w: &mut Writer, _ctx: Context) -> Result<()> {
        w.put_u8(self.player);
        self.control.write(w)?;
        self.pulley
            .with(PULLEY_HAS_VELOCITY, self.velocity.is_some())
            .write(w)?;
        self.misc
            .with(MISC_HAS_RETURN_POSITIONS, self.return_positions.is_some())
            .write(w)?;
        self.sleeping.write(w)?;
        w.put_u8(self.selected_item);
        self.position.write(w)?;
        write_opt(&self.velocity, w)?;
        if let Some(ret) = &self.return_positions {
            ret.original_use.write(w)?;
            ret.home.write(w)?;
        }
        Ok(())
    }
}

fixed_body! {
    PlayerActive = packet 14 {
        player: u8,
        active: bool,
    }
}

fixed_body! {
    PlayerHealth = packet 16 {
        player: u8,
        life: i16,
        life_max: i16,
    }
}

fixed_body! {
    TogglePvp = packet 30 {
        player: u8,
        pvp: bool,
    }
}

fixed_body! {
    /// Floating heal number over a player.
    PlayerHeal = packet 35 {
        player: u8,
        amount: i16,
    }
}

fixed_body! {
    /// Biome flags of the area a player stands in.
    PlayerZone = packet 36 {
        player: u8,
        zones: [BitsByte; 5],
    }
}

fixed_body! {
    NpcTalk = packet 40 {
        player: u8,
        npc: i16,
    }
}

fixed_body! {
    PlayerAnimation = packet 41 {
        player: u8,
        item_rotation: f32,
        item_animation: i16,
    }
}

fixed_body! {
    PlayerMana = packet 42 {
        player: u8,
        mana: i16,
        mana_max: i16,
    }
}

fixed_body! {
    ManaEffect = packet 43 {
        player: u8,
        amount: i16,
    }
}

fixed_body! {
    PlayerTeam = packet 45 {
        player: u8,
        team: u8,
    }
}

/// Buff slots carried by [`PlayerBuffs`].
pub const PLAYER_BUFF_SLOTS: usize = 44;

/// Active buff types of a player, one `u16` per slot.
///
/// Always [`PLAYER_BUFF_SLOTS`] entries on the wire; a shorter list is padded
/// with empty slots on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerBuffs {
    pub player: u8,
    pub buffs: Vec<u16>,
}

impl PacketBody for PlayerBuffs {
    const ID: u8 = 50;
}

impl Body for PlayerBuffs {
    fn decode(r: &mut Reader<'_>, _ctx: Context) -> Result<Self> {
        Ok(Self {
            player: r.get_u8()?,
            buffs: read_fixed(r, PLAYER_BUFF_SLOTS)?,
        })
    }

    fn encode(&self, w: &mut Writer, _ctx: Context) -> Result<()> {
        w.put_u8(self.player);
        write_fixed(&self.buffs, PLAYER_BUFF_SLOTS, w)
    }
}

fixed_body! {
    NpcSpecial = packet 51 {
        player: u8,
        kind: u8,
    }
}

fixed_body! {
    PlayerAddBuff = packet 55 {
        player: u8,
        buff: u16,
        time: i32,
    }
}

fixed_body! {
    PlayMusicItem = packet 58 {
        player: u8,
        pitch: f32,
    }
}

fixed_body! {
    PlayerDodge = packet 62 {
        player: u8,
        kind: u8,
    }
}

fixed_body! {
    PlayerHealOther = packet 66 {
        player: u8,
        amount: i16,
    }
}

fixed_body! {
    AnglerQuest = packet 74 {
        quest: u8,
        completed: bool,
    }
}

fixed_body! {
    AnglerQuestComplete = packet 75 {}
}

fixed_body! {
    AnglerQuestCount = packet 76 {
        player: u8,
        angler_quests: i32,
        golf_score: i32,
    }
}

fixed_body! {
    SyncPlayerChestIndex = packet 80 {
        player: u8,
        chest: i16,
    }
}

fixed_body! {
    PlayerStealth = packet 84 {
        player: u8,
        stealth: f32,
    }
}

fixed_body! {
    MinionRestTarget = packet 99 {
        player: u8,
        point: Vector2,
    }
}

fixed_body! {
    MinionAttackTarget = packet 115 {
        player: u8,
        target: i16,
    }
}

fixed_body! {
    Emoji = packet 120 {
        player: u8,
        emoji: u8,
    }
}

fixed_body! {
    DeadPlayer = packet 135 {
        player: u8,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn encode<T: Body>(body: &T) -> Vec<u8> {
        let mut w = Writer::new();
        body.encode(&mut w, Context::Client).unwrap();
        w.as_slice().to_vec()
    }

    #[test]
    fn player_update_without_optional_vectors() {
        let p = PlayerUpdate {
            player: 3,
            position: Vector2::new(1.0, 2.0),
            ..PlayerUpdate::default()
        };
        let bytes = encode(&p);
        assert_eq!(bytes.len(), 6 + 8);

        let back = PlayerUpdate::decode(&mut Reader::new(&bytes), Context::Server).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn player_update_presence_bits_follow_options() {
        let p = PlayerUpdate {
            // stale presence bit with no velocity attached
            pulley: BitsByte::new(0b0000_0101),
            return_positions: Some(ReturnPositions {
                original_use: Vector2::new(5.0, 6.0),
                home: Vector2::new(7.0, 8.0),
            }),
            ..PlayerUpdate::default()
        };
        let bytes = encode(&p);
        assert_eq!(bytes[2], 0b0000_0001, "pulley bit 2 cleared");
        assert_eq!(bytes[3], 1 << MISC_HAS_RETURN_POSITIONS);
        assert_eq!(bytes.len(), 6 + 8 + 16);

        let back = PlayerUpdate::decode(&mut Reader::new(&bytes), Context::Server).unwrap();
        assert!(back.velocity.is_none());
        assert_eq!(back.return_positions, p.return_positions);
    }

    #[test]
    fn player_update_velocity_follows_position() {
        let mut bytes = vec![1, 0, 1 << PULLEY_HAS_VELOCITY, 0, 0, 0];
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&2.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-3.0f32).to_le_bytes());
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        let p = PlayerUpdate::decode(&mut Reader::new(&bytes), Context::Server).unwrap();
        assert_eq!(p.position, Vector2::new(1.5, 2.5));
        assert_eq!(p.velocity, Some(Vector2::new(-3.0, 0.0)));
        assert_eq!(encode(&p), bytes);
    }

    #[test]
    fn player_buffs_are_padded_to_slot_count() {
        let p = PlayerBuffs {
            player: 1,
            buffs: vec![11, 12],
        };
        let bytes = encode(&p);
        assert_eq!(bytes.len(), 1 + PLAYER_BUFF_SLOTS * 2);
        assert_eq!(&bytes[1..5], &[11, 0, 12, 0]);

        let back = PlayerBuffs::decode(&mut Reader::new(&bytes), Context::Server).unwrap();
        assert_eq!(back.buffs.len(), PLAYER_BUFF_SLOTS);
        assert_eq!(&back.buffs[..3], &[11, 12, 0]);
    }

    #[test]
    fn player_buffs_overflow_is_rejected() {
        let p = PlayerBuffs {
            player: 0,
            buffs: vec![1; PLAYER_BUFF_SLOTS + 1],
        };
        let mut w = Writer::new();
        assert!(p.encode(&mut w, Context::Client).is_err());
    }

    #[test]
    fn player_zone_is_five_flag_bytes() {
        let bytes = [2, 1, 2, 4, 8, 16];
        let z = PlayerZone::decode(&mut Reader::new(&bytes), Context::Server).unwrap();
        assert!(z.zones[2].get(2));
        assert_eq!(encode(&z), bytes);
    }
}
