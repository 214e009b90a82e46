//! Dropped items and shop inventories.

use serde::Serialize;

use super::{read_fixed, write_fixed};
use crate::error::Result;
use crate::protocol::{Body, Context, PacketBody};
use crate::types::Vector2;
use crate::wire::{Reader, Writer};

fixed_body! {
    /// Spawn, move or remove a world item. A zero `item` type removes it.
    ItemDrop = packet 21 {
        index: i16,
        position: Vector2,
        velocity: Vector2,
        stack: i16,
        prefix: u8,
        no_delay: u8,
        item: i16,
    }
}

fixed_body! {
    ItemOwner = packet 22 {
        index: i16,
        owner: u8,
    }
}

fixed_body! {
    ItemOwnerRemove = packet 39 {
        index: i16,
    }
}

/// Shop slots carried by [`TravellingMerchantInventory`].
pub const MERCHANT_SLOTS: usize = 40;

/// Item types stocked by the travelling merchant, padded with empty slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TravellingMerchantInventory {
    pub items: Vec<i16>,
}

impl PacketBody for TravellingMerchantInventory {
    const ID: u8 = 72;
}

impl Body for TravellingMerchantInventory {
    fn decode(r: &mut Reader<'_>, _ctx: Context) -> Result<Self> {
        Ok(Self {
            items: read_fixed(r, MERCHANT_SLOTS)?,
        })
    }

    fn encode(&self, w: &mut Writer, _ctx: Context) -> Result<()> {
        write_fixed(&self.items, MERCHANT_SLOTS, w)
    }
}

fixed_body! {
    /// Charge a player for a mass wire operation.
    MassWireOperationPay = packet 110 {
        item: i16,
        amount: i16,
        player: u8,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn item_drop_layout() {
        let mut bytes = vec![0x10, 0x00];
        for f in [100.0f32, 200.0, 0.5, -0.5] {
            bytes.extend_from_slice(&f.to_le_bytes());
        }
        bytes.extend_from_slice(&[3, 0, 81, 1, 0xb3, 0x00]);

        let d = ItemDrop::decode(&mut Reader::new(&bytes), Context::Client).unwrap();
        assert_eq!(d.index, 16);
        assert_eq!(d.velocity, Vector2::new(0.5, -0.5));
        assert_eq!((d.stack, d.prefix, d.no_delay, d.item), (3, 81, 1, 179));

        let mut w = Writer::new();
        d.encode(&mut w, Context::Server).unwrap();
        assert_eq!(w.as_slice(), &bytes[..]);
    }

    #[test]
    fn merchant_inventory_is_fixed_size() {
        let inv = TravellingMerchantInventory {
            items: vec![1, 2, 3],
        };
        let mut w = Writer::new();
        inv.encode(&mut w, Context::Server).unwrap();
        assert_eq!(w.len(), MERCHANT_SLOTS * 2);

        let back =
            TravellingMerchantInventory::decode(&mut Reader::new(w.as_slice()), Context::Client)
                .unwrap();
        assert_eq!(back.items.len(), MERCHANT_SLOTS);
        assert_eq!(&back.items[..4], &[1, 2, 3, 0]);
    }

    #[test]
    fn merchant_inventory_short_body_is_truncated() {
        let bytes = [0u8; MERCHANT_SLOTS * 2 - 1];
        assert!(TravellingMerchantInventory::decode(&mut Reader::new(&bytes), Context::Client)
            .is_err());
    }
}
