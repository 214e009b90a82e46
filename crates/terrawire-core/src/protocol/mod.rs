//! Message bodies, envelopes and id registries.
//!
//! A frame is `[u16 length][u8 packet id][body]`. Packet id 82 carries the
//! module sub-protocol: `[u16 module id][module body]`, where the module body
//! runs to the end of the packet.
//!
//! Each concrete message type implements [`Body`]. Most layouts are the same
//! in both directions; a few differ by [`Direction`], and their codecs branch
//! on it explicitly in both `decode` and `encode`.

pub mod envelope;
pub mod modules;
pub mod packets;
pub mod registry;

mod packet;
mod unknown;

use serde::Serialize;

use crate::error::Result;
use crate::wire::{Reader, Writer};

pub use envelope::{
    encode_packet, peek_frame_len, read_packet, reencode_frame, write_with_header, DecodedPacket,
    HEADER_SIZE, MAX_FRAME_LEN,
};
pub use modules::Module;
pub use packet::Packet;
pub use registry::{Catalog, Constructor, Entry, ModuleRegistry, PacketRegistry, Registry};
pub use unknown::{UnknownModule, UnknownPacket};

/// Endpoint performing a read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    Server,
    Client,
}

impl Context {
    pub fn opposite(self) -> Self {
        match self {
            Context::Server => Context::Client,
            Context::Client => Context::Server,
        }
    }

    /// Direction of bytes this endpoint decodes: they come from the peer.
    pub fn inbound(self) -> Direction {
        match self {
            Context::Server => Direction::ClientToServer,
            Context::Client => Direction::ServerToClient,
        }
    }

    /// Direction of bytes this endpoint encodes.
    pub fn outbound(self) -> Direction {
        self.opposite().inbound()
    }
}

/// Which way a message travels; selects the layout of direction-dependent
/// bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    ClientToServer,
    ServerToClient,
}

/// Body codec of one concrete message type.
pub trait Body: Sized {
    fn decode(r: &mut Reader<'_>, ctx: Context) -> Result<Self>;
    fn encode(&self, w: &mut Writer, ctx: Context) -> Result<()>;
}

/// A body carried directly by the packet envelope.
pub trait PacketBody: Body + Default {
    const ID: u8;
}

/// A body carried inside [`packets::ModulePacket`].
pub trait ModuleBody: Body + Default {
    const ID: u16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_direction_is_opposite_of_decoding() {
        for ctx in [Context::Server, Context::Client] {
            assert_ne!(ctx.inbound(), ctx.outbound());
            assert_eq!(ctx.outbound(), ctx.opposite().inbound());
        }
        assert_eq!(Context::Server.inbound(), Direction::ClientToServer);
        assert_eq!(Context::Client.inbound(), Direction::ServerToClient);
    }
}
