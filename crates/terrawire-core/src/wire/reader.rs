//! Bounds-checked sequential reader over a borrowed, already-bounded slice.

use bytes::Buf;

use super::varint::read_var_u32;
use crate::error::{Result, WireError};

/// Cursor over one message body.
///
/// Every accessor checks `remaining()` first and reports
/// [`WireError::Truncated`] instead of letting `Buf` panic.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.buf.remaining() < needed {
            return Err(WireError::Truncated {
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn get_i8(&mut self) -> Result<i8> {
        self.ensure(1)?;
        Ok(self.buf.get_i8())
    }

    /// Any non-zero byte reads as `true`.
    pub fn get_bool(&mut self) -> Result<bool> {
        Ok(self.get_u8()? != 0)
    }

    pub fn get_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn get_i16(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(self.buf.get_i16_le())
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn get_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32_le())
    }

    pub fn get_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        Ok(self.buf.get_u64_le())
    }

    pub fn get_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        Ok(self.buf.get_f32_le())
    }

    /// Borrow the next `len` bytes.
    pub fn get_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    /// Borrow everything that is left.
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = self.buf;
        self.buf = &[];
        rest
    }

    /// A 7-bit varint, at most five bytes.
    pub fn get_var_u32(&mut self) -> Result<u32> {
        read_var_u32(self)
    }

    /// A varint-prefixed UTF-8 string.
    pub fn get_string(&mut self) -> Result<String> {
        // Lengths travel as a signed 32-bit value.
        let len = self.get_var_u32()? as i32;
        if len < 0 {
            return Err(WireError::NegativeLength(len));
        }
        let raw = self.get_slice(len as usize)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| WireError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn reads_little_endian_scalars() {
        let bytes = [0x01, 0x34, 0x12, 0xfe, 0xff, 0x78, 0x56, 0x34, 0x12];
        let mut r = Reader::new(&bytes);
        assert_eq!(r.get_u8().unwrap(), 1);
        assert_eq!(r.get_u16().unwrap(), 0x1234);
        assert_eq!(r.get_i16().unwrap(), -2);
        assert_eq!(r.get_u32().unwrap(), 0x1234_5678);
        assert!(r.is_empty());
    }

    #[test]
    fn short_read_reports_what_was_missing() {
        let bytes = [0x01];
        let mut r = Reader::new(&bytes);
        match r.get_i32() {
            Err(WireError::Truncated { needed, remaining }) => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        // A failed read consumes nothing.
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn reads_prefixed_string() {
        let bytes = [3, b'S', b'a', b'y', 0xaa];
        let mut r = Reader::new(&bytes);
        assert_eq!(r.get_string().unwrap(), "Say");
        assert_eq!(r.rest(), &[0xaa]);
    }

    #[test]
    fn string_longer_than_body_is_truncated() {
        let bytes = [10, b'a', b'b'];
        let mut r = Reader::new(&bytes);
        assert!(matches!(r.get_string(), Err(WireError::Truncated { .. })));
    }

    #[test]
    fn negative_length_is_rejected() {
        // 0x8000_0000 as a five byte varint
        let bytes = [0x80, 0x80, 0x80, 0x80, 0x08];
        let mut r = Reader::new(&bytes);
        assert!(matches!(
            r.get_string(),
            Err(WireError::NegativeLength(i32::MIN))
        ));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes = [2, 0xc3, 0x28];
        let mut r = Reader::new(&bytes);
        assert!(matches!(r.get_string(), Err(WireError::InvalidUtf8)));
    }
}
