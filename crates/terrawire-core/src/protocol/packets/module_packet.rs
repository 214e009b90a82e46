//! Packet 82: carrier for the module sub-protocol.

use serde::Serialize;

use crate::error::Result;
use crate::protocol::modules::{Module, PingModule};
use crate::protocol::{Body, Context, ModuleRegistry, PacketBody};
use crate::wire::{Reader, Writer};

/// `[u16 module id][module body]`; the module body runs to the end of the
/// packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModulePacket {
    pub module: Module,
}

impl ModulePacket {
    pub fn new(module: impl Into<Module>) -> Self {
        Self {
            module: module.into(),
        }
    }
}

impl Default for ModulePacket {
    fn default() -> Self {
        Self::new(PingModule::default())
    }
}

impl PacketBody for ModulePacket {
    const ID: u8 = 82;
}

impl Body for ModulePacket {
    fn decode(r: &mut Reader<'_>, ctx: Context) -> Result<Self> {
        let id = r.get_u16()?;
        let module = ModuleRegistry::global().resolve(id).decode(r, ctx)?;
        Ok(Self { module })
    }

    fn encode(&self, w: &mut Writer, ctx: Context) -> Result<()> {
        w.put_u16(self.module.id());
        self.module.encode_body(w, ctx)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::protocol::UnknownModule;

    #[test]
    fn unregistered_module_keeps_raw_bytes() {
        let bytes = [0xff, 0xff, 1, 2, 3];
        let p = ModulePacket::decode(&mut Reader::new(&bytes), Context::Server).unwrap();
        assert_eq!(
            p.module,
            Module::Unknown(UnknownModule::new(0xffff, vec![1u8, 2, 3]))
        );

        let mut w = Writer::new();
        p.encode(&mut w, Context::Client).unwrap();
        assert_eq!(w.as_slice(), &bytes);
    }

    #[test]
    fn module_id_is_little_endian() {
        let mut w = Writer::new();
        ModulePacket::default()
            .encode(&mut w, Context::Server)
            .unwrap();
        assert_eq!(&w.as_slice()[..2], &[2, 0]);
        assert_eq!(w.len(), 2 + 8);
    }
}
