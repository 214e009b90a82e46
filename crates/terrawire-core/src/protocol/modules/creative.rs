//! Journey-mode powers and research.

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;
use crate::protocol::{Body, Context, ModuleBody};
use crate::wire::{Reader, Writer};

/// A creative power toggle. The payload layout depends on the power, so it is
/// kept raw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreativePowerModule {
    pub power: u16,
    pub data: Bytes,
}

impl ModuleBody for CreativePowerModule {
    const ID: u16 = 5;
}

impl Body for CreativePowerModule {
    fn decode(r: &mut Reader<'_>, _ctx: Context) -> Result<Self> {
        Ok(Self {
            power: r.get_u16()?,
            data: Bytes::copy_from_slice(r.rest()),
        })
    }

    fn encode(&self, w: &mut Writer, _ctx: Context) -> Result<()> {
        w.put_u16(self.power);
        w.put_slice(&self.data);
        Ok(())
    }
}

fixed_body! {
    /// Item research progress reported by a client.
    CreativeUnlocksReportModule = module 6 {
        reserved: u8,
        item: u16,
        count: u16,
    }
}

fixed_body! {
    CreativePowerPermissionsModule = module 9 {
        reserved: u8,
        power: u16,
        level: u8,
    }
}
