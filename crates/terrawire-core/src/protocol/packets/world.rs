//! Tiles, liquids, time, events and other world-level state.

use serde::Serialize;

use crate::error::Result;
use crate::protocol::{Body, Context, PacketBody};
use crate::types::{BitsByte, Vector2};
use crate::wire::{read_if, write_opt, Field, Reader, Writer};

fixed_body! {
    /// Ask the client to reframe a rectangle of tile sections.
    SectionTileFrame = packet 11 {
        start_x: i16,
        start_y: i16,
        end_x: i16,
        end_y: i16,
    }
}

wire_enum! {
    pub enum TileAction {
        KillTile = 0,
        PlaceTile = 1,
        KillWall = 2,
        PlaceWall = 3,
        KillTileNoItem = 4,
        PlaceWire = 5,
        KillWire = 6,
        PoundTile = 7,
        PlaceActuator = 8,
        KillActuator = 9,
        PlaceWire2 = 10,
        KillWire2 = 11,
        PlaceWire3 = 12,
        KillWire3 = 13,
        SlopeTile = 14,
        FrameTrack = 15,
        PlaceWire4 = 16,
        KillWire4 = 17,
        PokeLogicGate = 18,
        Actuate = 19,
        TryKillTile = 20,
        ReplaceTile = 21,
        ReplaceWall = 22,
        SlopePoundTile = 23,
    }
}

fixed_body! {
    /// A single tile edit. `value` and `style` mean different things per
    /// action (tile type, fail flag, slope).
    TileModify = packet 17 {
        action: TileAction,
        x: i16,
        y: i16,
        value: i16,
        style: u8,
    }
}

fixed_body! {
    WorldTime = packet 18 {
        day_time: bool,
        time: i32,
        sun_mod_y: i16,
        moon_mod_y: i16,
    }
}

wire_enum! {
    pub enum DoorAction {
        OpenDoor = 0,
        CloseDoor = 1,
        OpenTrapdoor = 2,
        CloseTrapdoor = 3,
        OpenTallGate = 4,
        CloseTallGate = 5,
    }
}

fixed_body! {
    DoorUse = packet 19 {
        action: DoorAction,
        x: i16,
        y: i16,
        direction: u8,
    }
}

fixed_body! {
    SignRead = packet 46 {
        x: i16,
        y: i16,
    }
}

fixed_body! {
    /// Sign text, sent by whoever edited or requested it.
    SignNew = packet 47 {
        sign: i16,
        x: i16,
        y: i16,
        text: String,
        player: u8,
        flags: BitsByte,
    }
}

fixed_body! {
    LiquidSet = packet 48 {
        x: i16,
        y: i16,
        amount: u8,
        kind: u8,
    }
}

fixed_body! {
    /// Corruption/crimson/hallow tile counts, as percentages.
    WorldBiomeUpdate = packet 57 {
        good: u8,
        evil: u8,
        blood: u8,
    }
}

fixed_body! {
    HitSwitch = packet 59 {
        x: i16,
        y: i16,
    }
}

/// Bit of [`Teleport::flags`] set when `extra_info` follows.
pub const TELEPORT_HAS_EXTRA_INFO: u8 = 3;

/// Teleport a player or NPC.
///
/// Flag bit 0 selects an NPC target, bit 1 a player-to-player teleport, bit 2
/// takes the position from the target; bit 3 is recomputed from
/// `extra_info` on write.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Teleport {
    pub flags: BitsByte,
    pub target: i16,
    pub position: Vector2,
    pub style: u8,
    pub extra_info: Option<i32>,
}

impl Teleport {
    pub fn targets_npc(&self) -> bool {
        self.flags.get(0)
    }
}

impl PacketBody for Teleport {
    const ID: u8 = 65;
}

impl Body for Teleport {
    fn decode(r: &mut Reader<'_>, _ctx: Context) -> Result<Self> {
        let flags = BitsByte::read(r)?;
        Ok(Self {
            flags,
            target: r.get_i16()?,
            position: Vector2::read(r)?,
            style: r.get_u8()?,
            extra_info: read_if(flags.get(TELEPORT_HAS_EXTRA_INFO), r)?,
        })
    }

    fn encode(&self, w: &mut Writer, _ctx: Context) -> Result<()> {
        self.flags
            .with(TELEPORT_HAS_EXTRA_INFO, self.extra_info.is_some())
            .write(w)?;
        w.put_i16(self.target);
        self.position.write(w)?;
        w.put_u8(self.style);
        write_opt(&self.extra_info, w)
    }
}

fixed_body! {
    TeleportationPotion = packet 73 {
        kind: u8,
    }
}

fixed_body! {
    TemporaryAnimation = packet 77 {
        kind: i16,
        tile: u16,
        x: i16,
        y: i16,
    }
}

fixed_body! {
    InvasionProgress = packet 78 {
        progress: i32,
        progress_max: i32,
        icon: i8,
        wave: i8,
    }
}

fixed_body! {
    /// Place a multi-tile object.
    PlaceObject = packet 79 {
        x: i16,
        y: i16,
        kind: i16,
        style: i16,
        alternate: u8,
        random: i8,
        direction: bool,
    }
}

fixed_body! {
    TeleportPlayerThroughPortal = packet 96 {
        player: u8,
        portal: i16,
        position: Vector2,
        velocity: Vector2,
    }
}

fixed_body! {
    GemLockToggle = packet 105 {
        x: i16,
        y: i16,
        on: bool,
    }
}

fixed_body! {
    ToggleParty = packet 111 {}
}

fixed_body! {
    CrystalInvasionStart = packet 113 {
        x: i16,
        y: i16,
    }
}

fixed_body! {
    CrystalInvasionWipe = packet 114 {}
}

fixed_body! {
    CrystalInvasionWaitTime = packet 116 {
        time: i32,
    }
}

fixed_body! {
    SyncTilePicking = packet 125 {
        player: u8,
        x: i16,
        y: i16,
        damage: u8,
    }
}

fixed_body! {
    RemoveRevengeMarker = packet 127 {
        id: i32,
    }
}

/// Presence bits of [`PlayLegacySound::flags`].
pub const SOUND_HAS_STYLE: u8 = 0;
pub const SOUND_HAS_VOLUME: u8 = 1;
pub const SOUND_HAS_PITCH: u8 = 2;

/// A legacy sound effect at a world position. Style, volume and pitch are
/// each present only when their flag bit is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayLegacySound {
    pub position: Vector2,
    pub sound: u16,
    pub flags: BitsByte,
    pub style: Option<i32>,
    pub volume: Option<f32>,
    pub pitch: Option<f32>,
}

impl PacketBody for PlayLegacySound {
    const ID: u8 = 132;
}

impl Body for PlayLegacySound {
    fn decode(r: &mut Reader<'_>, _ctx: Context) -> Result<Self> {
        let position = Vector2::read(r)?;
        let sound = r.get_u16()?;
        let flags = BitsByte::read(r)?;
        Ok(Self {
            position,
            sound,
            flags,
            style: read_if(flags.get(SOUND_HAS_STYLE), r)?,
            volume: read_if(flags.get(SOUND_HAS_VOLUME), r)?,
            pitch: read_if(flags.get(SOUND_HAS_PITCH), r)?,
        })
    }

    fn encode(&self, w: &mut Writer, _ctx: Context) -> Result<()> {
        self.position.write(w)?;
        w.put_u16(self.sound);
        self.flags
            .with(SOUND_HAS_STYLE, self.style.is_some())
            .with(SOUND_HAS_VOLUME, self.volume.is_some())
            .with(SOUND_HAS_PITCH, self.pitch.is_some())
            .write(w)?;
        write_opt(&self.style, w)?;
        write_opt(&self.volume, w)?;
        write_opt(&self.pitch, w)
    }
}

fixed_body! {
    /// NPC types that populate the cavern layer.
    CavernMonsterTypes = packet 136 {
        types: [u16; 6],
    }
}
