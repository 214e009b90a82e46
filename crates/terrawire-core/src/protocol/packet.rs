//! The `Packet` sum type and its static type table.

use bytes::Bytes;
use serde::Serialize;

use super::packets::*;
use super::registry::{Catalog, Entry};
use super::{Body, Context, PacketBody, UnknownPacket};
use crate::error::Result;
use crate::wire::{Reader, Writer};

fn construct<T: PacketBody + Into<Packet>>() -> Packet {
    T::default().into()
}

fn decode<T: PacketBody + Into<Packet>>(r: &mut Reader<'_>, ctx: Context) -> Result<Packet> {
    T::decode(r, ctx).map(Into::into)
}

macro_rules! packet_set {
    ($( $id:literal => $variant:ident, )*) => {
        /// One decoded packet, one variant per modeled body type.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type", content = "body")]
        pub enum Packet {
            $( $variant($variant), )*
            Unknown(UnknownPacket),
        }

        impl Packet {
            /// Packet id as it appears in the envelope.
            pub fn id(&self) -> u8 {
                match self {
                    $( Packet::$variant(_) => <$variant as PacketBody>::ID, )*
                    Packet::Unknown(p) => p.id,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $( Packet::$variant(_) => stringify!($variant), )*
                    Packet::Unknown(_) => "Unknown",
                }
            }

            pub(crate) fn encode_body(&self, w: &mut Writer, ctx: Context) -> Result<()> {
                match self {
                    $( Packet::$variant(p) => p.encode(w, ctx), )*
                    Packet::Unknown(p) => {
                        p.encode(w);
                        Ok(())
                    }
                }
            }
        }

        $(
            impl From<$variant> for Packet {
                fn from(p: $variant) -> Self {
                    Packet::$variant(p)
                }
            }
        )*

        static PACKET_TYPES: &[Entry<Packet>] = &[
            $(
                Entry {
                    id: $id,
                    name: stringify!($variant),
                    construct: construct::<$variant>,
                    decode: decode::<$variant>,
                },
            )*
        ];
    };
}

packet_set! {
    1 => ConnectRequest,
    2 => Disconnect,
    3 => ContinueConnecting,
    5 => PlayerInventorySlot,
    6 => RequestWorldInfo,
    8 => RequestEssentialTiles,
    9 => StatusText,
    11 => SectionTileFrame,
    12 => SpawnPlayer,
    13 => PlayerUpdate,
    14 => PlayerActive,
    16 => PlayerHealth,
    17 => TileModify,
    18 => WorldTime,
    19 => DoorUse,
    21 => ItemDrop,
    22 => ItemOwner,
    24 => StrikeNpcWithHeldItem,
    28 => NpcStrike,
    29 => ProjectileDestroy,
    30 => TogglePvp,
    31 => ChestGetContents,
    32 => ChestItem,
    33 => ChestInfo,
    34 => ChestModify,
    35 => PlayerHeal,
    36 => PlayerZone,
    37 => PasswordRequest,
    38 => PasswordSend,
    39 => ItemOwnerRemove,
    40 => NpcTalk,
    41 => PlayerAnimation,
    42 => PlayerMana,
    43 => ManaEffect,
    45 => PlayerTeam,
    46 => SignRead,
    47 => SignNew,
    48 => LiquidSet,
    49 => PlayerSpawnSelf,
    50 => PlayerBuffs,
    51 => NpcSpecial,
    52 => ChestUnlock,
    53 => NpcAddBuff,
    54 => NpcBuffUpdate,
    55 => PlayerAddBuff,
    56 => NpcName,
    57 => WorldBiomeUpdate,
    58 => PlayMusicItem,
    59 => HitSwitch,
    60 => NpcHome,
    61 => SpawnBoss,
    62 => PlayerDodge,
    65 => Teleport,
    66 => PlayerHealOther,
    68 => ClientUuid,
    69 => ChestName,
    70 => CatchNpc,
    71 => ReleaseNpc,
    72 => TravellingMerchantInventory,
    73 => TeleportationPotion,
    74 => AnglerQuest,
    75 => AnglerQuestComplete,
    76 => AnglerQuestCount,
    77 => TemporaryAnimation,
    78 => InvasionProgress,
    79 => PlaceObject,
    80 => SyncPlayerChestIndex,
    81 => CombatTextInt,
    82 => ModulePacket,
    83 => NpcKillCount,
    84 => PlayerStealth,
    96 => TeleportPlayerThroughPortal,
    97 => NotifyPlayerNpcKilled,
    98 => NotifyPlayerOfEvent,
    99 => MinionRestTarget,
    105 => GemLockToggle,
    107 => SmartTextMessage,
    110 => MassWireOperationPay,
    111 => ToggleParty,
    113 => CrystalInvasionStart,
    114 => CrystalInvasionWipe,
    115 => MinionAttackTarget,
    116 => CrystalInvasionWaitTime,
    117 => PlayerHurt,
    118 => PlayerDeath,
    119 => CombatTextString,
    120 => Emoji,
    125 => SyncTilePicking,
    127 => RemoveRevengeMarker,
    129 => FinishedConnecting,
    132 => PlayLegacySound,
    135 => DeadPlayer,
    136 => CavernMonsterTypes,
    137 => RequestNpcBuffRemoval,
    138 => ClientSyncedInventory,
    139 => SetCountsAsHost,
}

impl Catalog for Packet {
    type Id = u8;

    fn entries() -> &'static [Entry<Self>] {
        PACKET_TYPES
    }

    fn unknown(id: u8, data: Bytes) -> Self {
        Packet::Unknown(UnknownPacket { id, data })
    }
}

impl From<UnknownPacket> for Packet {
    fn from(p: UnknownPacket) -> Self {
        Packet::Unknown(p)
    }
}

impl Packet {
    /// The module carried by packet 82, if this is one.
    pub fn as_module(&self) -> Option<&super::Module> {
        match self {
            Packet::ModulePacket(p) => Some(&p.module),
            _ => None,
        }
    }
}
