//! Growable body writer backed by `BytesMut`.

use bytes::{BufMut, Bytes, BytesMut};

use super::varint::put_var_u32;

/// Body writer. Scalars are little-endian; writes never fail, size limits are
/// enforced by the envelope once the body is complete.
#[derive(Debug, Default)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn put_i8(&mut self, v: i8) {
        self.buf.put_i8(v);
    }

    pub fn put_bool(&mut self, v: bool) {
        self.buf.put_u8(u8::from(v));
    }

    pub fn put_u16(&mut self, v: u16) {
        self.buf.put_u16_le(v);
    }

    pub fn put_i16(&mut self, v: i16) {
        self.buf.put_i16_le(v);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.buf.put_u32_le(v);
    }

    pub fn put_i32(&mut self, v: i32) {
        self.buf.put_i32_le(v);
    }

    pub fn put_u64(&mut self, v: u64) {
        self.buf.put_u64_le(v);
    }

    pub fn put_f32(&mut self, v: f32) {
        self.buf.put_f32_le(v);
    }

    pub fn put_slice(&mut self, v: &[u8]) {
        self.buf.put_slice(v);
    }

    pub fn put_var_u32(&mut self, v: u32) {
        put_var_u32(&mut self.buf, v);
    }

    /// Varint length followed by the UTF-8 bytes.
    pub fn put_string(&mut self, s: &str) {
        // Anything near u32::MAX cannot fit a frame anyway; the envelope
        // rejects it as too large.
        self.put_var_u32(s.len() as u32);
        self.buf.put_slice(s.as_bytes());
    }

    /// Overwrite two bytes already written at `at`. Used to backpatch the
    /// envelope length once the body size is known.
    pub(crate) fn patch_u16(&mut self, at: usize, v: u16) -> bool {
        match self.buf.get_mut(at..at + 2) {
            Some(slot) => {
                slot.copy_from_slice(&v.to_le_bytes());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_little_endian_and_strings() {
        let mut w = Writer::new();
        w.put_i16(1024);
        w.put_string("Test");
        w.put_bool(true);
        assert_eq!(w.as_slice(), &[0x00, 0x04, 4, b'T', b'e', b's', b't', 1]);
    }

    #[test]
    fn patch_replaces_reserved_bytes() {
        let mut w = Writer::new();
        w.put_u16(0);
        w.put_u8(82);
        assert!(w.patch_u16(0, 5));
        assert_eq!(w.as_slice(), &[5, 0, 82]);
        assert!(!w.patch_u16(2, 1));
    }
}
