//! Raw fallbacks for ids that have no modeled type.
//!
//! The registries can never cover every id the peer may send, so these keep
//! the payload byte-for-byte for opaque relay.

use bytes::Bytes;
use serde::Serialize;

use crate::wire::Writer;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnknownPacket {
    pub id: u8,
    pub data: Bytes,
}

impl UnknownPacket {
    pub fn new(id: u8, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    pub(crate) fn encode(&self, w: &mut Writer) {
        w.put_slice(&self.data);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnknownModule {
    pub id: u16,
    pub data: Bytes,
}

impl UnknownModule {
    pub fn new(id: u16, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    pub(crate) fn encode(&self, w: &mut Writer) {
        w.put_slice(&self.data);
    }
}
