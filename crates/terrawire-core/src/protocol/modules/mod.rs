//! Module sub-protocol carried by packet 82.
//!
//! A module body has no length of its own: it runs to the end of the packet
//! body, so codecs that take "the rest" (`CreativePowerModule`, unknown
//! bestiary kinds, [`UnknownModule`]) are safe.

mod bestiary;
mod chat;
mod creative;
mod world;

pub use bestiary::BestiaryModule;
pub use chat::ChatModule;
pub use creative::{
    CreativePowerModule, CreativePowerPermissionsModule, CreativeUnlocksReportModule,
};
pub use world::{
    AmbienceModule, LiquidChange, LiquidModule, ParticlesModule, PingModule, PylonOperation,
    TeleportPylonModule,
};

use bytes::Bytes;
use serde::Serialize;

use super::registry::{Catalog, Entry};
use super::{Body, Context, ModuleBody, UnknownModule};
use crate::error::Result;
use crate::wire::{Reader, Writer};

fn construct<T: ModuleBody + Into<Module>>() -> Module {
    T::default().into()
}

fn decode<T: ModuleBody + Into<Module>>(r: &mut Reader<'_>, ctx: Context) -> Result<Module> {
    T::decode(r, ctx).map(Into::into)
}

macro_rules! module_set {
    ($( $id:literal => $variant:ident($ty:ident), )*) => {
        /// One decoded module.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type", content = "body")]
        pub enum Module {
            $( $variant($ty), )*
            Unknown(UnknownModule),
        }

        impl Module {
            /// Module id as written after the packet 82 header.
            pub fn id(&self) -> u16 {
                match self {
                    $( Module::$variant(_) => <$ty as ModuleBody>::ID, )*
                    Module::Unknown(m) => m.id,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $( Module::$variant(_) => stringify!($ty), )*
                    Module::Unknown(_) => "Unknown",
                }
            }

            pub(crate) fn encode_body(&self, w: &mut Writer, ctx: Context) -> Result<()> {
                match self {
                    $( Module::$variant(m) => m.encode(w, ctx), )*
                    Module::Unknown(m) => {
                        m.encode(w);
                        Ok(())
                    }
                }
            }
        }

        $(
            impl From<$ty> for Module {
                fn from(m: $ty) -> Self {
                    Module::$variant(m)
                }
            }
        )*

        static MODULE_TYPES: &[Entry<Module>] = &[
            $(
                Entry {
                    id: $id,
                    name: stringify!($ty),
                    construct: construct::<$ty>,
                    decode: decode::<$ty>,
                },
            )*
        ];
    };
}

module_set! {
    0 => Liquid(LiquidModule),
    1 => Chat(ChatModule),
    2 => Ping(PingModule),
    3 => Ambience(AmbienceModule),
    4 => Bestiary(BestiaryModule),
    5 => CreativePower(CreativePowerModule),
    6 => CreativeUnlocksReport(CreativeUnlocksReportModule),
    7 => TeleportPylon(TeleportPylonModule),
    8 => Particles(ParticlesModule),
    9 => CreativePowerPermissions(CreativePowerPermissionsModule),
}

impl Catalog for Module {
    type Id = u16;

    fn entries() -> &'static [Entry<Self>] {
        MODULE_TYPES
    }

    fn unknown(id: u16, data: Bytes) -> Self {
        Module::Unknown(UnknownModule { id, data })
    }
}

impl From<UnknownModule> for Module {
    fn from(m: UnknownModule) -> Self {
        Module::Unknown(m)
    }
}
