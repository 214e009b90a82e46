use serde::Serialize;

use crate::error::Result;
use crate::wire::{Field, Reader, Writer};

/// Eight independent flags packed into one byte, bit 0 first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BitsByte(pub u8);

impl BitsByte {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Pack flags in bit order (`flags[0]` is bit 0).
    pub fn from_flags(flags: [bool; 8]) -> Self {
        let mut bits = Self(0);
        for (i, on) in flags.into_iter().enumerate() {
            bits.set(i as u8, on);
        }
        bits
    }

    /// The index is taken modulo 8.
    pub fn get(self, index: u8) -> bool {
        self.0 & (1 << (index & 7)) != 0
    }

    /// The index is taken modulo 8.
    pub fn set(&mut self, index: u8, on: bool) {
        let mask = 1 << (index & 7);
        if on {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    pub fn with(mut self, index: u8, on: bool) -> Self {
        self.set(index, on);
        self
    }

    pub fn raw(self) -> u8 {
        self.0
    }
}

impl From<u8> for BitsByte {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl Field for BitsByte {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self(r.get_u8()?))
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        w.put_u8(self.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_are_independent() {
        let mut b = BitsByte::default();
        b.set(3, true);
        b.set(7, true);
        assert_eq!(b.raw(), 0b1000_1000);
        assert!(b.get(3) && b.get(7));
        assert!(!b.get(0) && !b.get(4));

        b.set(3, false);
        assert_eq!(b.raw(), 0b1000_0000);
    }

    #[test]
    fn from_flags_is_bit_ordered() {
        let b = BitsByte::from_flags([true, false, true, false, false, false, false, true]);
        assert_eq!(b.raw(), 0b1000_0101);
    }
}
