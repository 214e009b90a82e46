//! 7-bit variable-length integers (continuation bit = MSB of each byte).

use bytes::BufMut;

use super::Reader;
use crate::error::{Result, WireError};

/// A 32-bit value never needs more than five 7-bit groups.
pub const MAX_VARINT_LEN: usize = 5;

pub(crate) fn read_var_u32(r: &mut Reader<'_>) -> Result<u32> {
    let mut value = 0u32;
    for i in 0..MAX_VARINT_LEN {
        let b = r.get_u8()?;
        // Bits shifted past 32 on the fifth byte are dropped.
        value |= u32::from(b & 0x7f) << (7 * i);
        if b & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(WireError::VarIntTooLong)
}

pub(crate) fn put_var_u32<B: BufMut>(buf: &mut B, mut value: u32) {
    while value >= 0x80 {
        buf.put_u8((value as u8) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Number of bytes `value` occupies as a varint.
pub fn var_u32_len(value: u32) -> usize {
    match value {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        0x4000..=0x1f_ffff => 3,
        0x20_0000..=0x0fff_ffff => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use bytes::BytesMut;

    fn encode(v: u32) -> Vec<u8> {
        let mut b = BytesMut::new();
        put_var_u32(&mut b, v);
        b.to_vec()
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0), [0x00]);
        assert_eq!(encode(13), [0x0d]);
        assert_eq!(encode(127), [0x7f]);
        assert_eq!(encode(128), [0x80, 0x01]);
        assert_eq!(encode(300), [0xac, 0x02]);
        assert_eq!(encode(u32::MAX), [0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn length_matches_encoding() {
        for v in [0, 127, 128, 16_383, 16_384, 2_097_151, 2_097_152, u32::MAX] {
            assert_eq!(var_u32_len(v), encode(v).len(), "value={v}");
        }
    }

    #[test]
    fn decodes_multi_byte() {
        let bytes = [0xac, 0x02, 0x99];
        let mut r = Reader::new(&bytes);
        assert_eq!(read_var_u32(&mut r).unwrap(), 300);
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn rejects_sixth_continuation_byte() {
        let bytes = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        let mut r = Reader::new(&bytes);
        assert!(matches!(read_var_u32(&mut r), Err(WireError::VarIntTooLong)));
    }

    #[test]
    fn truncated_chain_is_an_error() {
        let bytes = [0x80, 0x80];
        let mut r = Reader::new(&bytes);
        assert!(matches!(
            read_var_u32(&mut r),
            Err(WireError::Truncated { .. })
        ));
    }
}
