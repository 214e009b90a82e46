//! Packet envelope: `[u16 LE total length][u8 packet id][body]`.
//!
//! The length counts the whole frame, header included. Decoding is bounded by
//! it: a body codec sees `buf[3..length]` and nothing past it.

use bytes::Bytes;
use serde::Serialize;

use super::{Context, Packet, PacketRegistry};
use crate::error::{Result, WireError};
use crate::wire::{Reader, Writer};

/// Length prefix plus packet id.
pub const HEADER_SIZE: usize = 3;
/// Largest frame the 16-bit length prefix can describe.
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

/// Result of [`read_packet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedPacket {
    pub id: u8,
    /// Declared frame length; bytes of `buf` past it were not read.
    pub length: usize,
    pub packet: Packet,
}

/// Declared frame length at the start of `buf`, without validating or
/// decoding anything else.
pub fn peek_frame_len(buf: &[u8]) -> Option<usize> {
    match buf {
        [lo, hi, ..] => Some(usize::from(u16::from_le_bytes([*lo, *hi]))),
        _ => None,
    }
}

/// Decode one frame from the front of `buf`.
pub fn read_packet(buf: &[u8], ctx: Context) -> Result<DecodedPacket> {
    let declared = peek_frame_len(buf).ok_or(WireError::Truncated {
        needed: 2,
        remaining: buf.len(),
    })?;
    if declared < HEADER_SIZE || declared > buf.len() {
        return Err(WireError::InvalidLength {
            declared,
            available: buf.len(),
        });
    }

    let id = buf[2];
    let mut r = Reader::new(&buf[HEADER_SIZE..declared]);
    let packet = PacketRegistry::global().resolve(id).decode(&mut r, ctx)?;
    if !r.is_empty() {
        tracing::debug!(
            id,
            packet = packet.name(),
            trailing = r.remaining(),
            "body bytes left unread"
        );
    }

    Ok(DecodedPacket {
        id,
        length: declared,
        packet,
    })
}

/// Encode `packet` into a fresh buffer.
pub fn encode_packet(packet: &Packet, ctx: Context) -> Result<Bytes> {
    Ok(frame(packet, ctx)?.freeze())
}

/// Encode `packet` into the front of `buf`, returning the frame length.
/// `buf` is never grown: a frame that does not fit is an error and `buf` is
/// left untouched.
pub fn write_with_header(packet: &Packet, buf: &mut [u8], ctx: Context) -> Result<usize> {
    let w = frame(packet, ctx)?;
    let len = w.len();
    let capacity = buf.len();
    let dst = buf.get_mut(..len).ok_or(WireError::BufferTooSmall {
        needed: len,
        capacity,
    })?;
    dst.copy_from_slice(w.as_slice());
    Ok(len)
}

/// Decode a frame in `ctx` and encode it again as its original sender would,
/// i.e. in `ctx.opposite()`.
pub fn reencode_frame(buf: &[u8], ctx: Context) -> Result<Bytes> {
    let decoded = read_packet(buf, ctx)?;
    encode_packet(&decoded.packet, ctx.opposite())
}

fn frame(packet: &Packet, ctx: Context) -> Result<Writer> {
    let mut w = Writer::with_capacity(64);
    // length is backpatched once the body size is known
    w.put_u16(0);
    w.put_u8(packet.id());
    packet.encode_body(&mut w, ctx)?;

    let len = w.len();
    let prefix = u16::try_from(len).map_err(|_| WireError::PacketTooLarge(len))?;
    if !w.patch_u16(0, prefix) {
        return Err(WireError::Truncated {
            needed: 2,
            remaining: len,
        });
    }
    Ok(w)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;
    use crate::error::ErrorCode;
    use crate::protocol::modules::ChatModule;
    use crate::protocol::packets::{ChestModification, ChestModify, ConnectRequest, ModulePacket};
    use crate::protocol::{Module, UnknownPacket};

    const CHAT_FRAME: [u8; 23] = [
        23, 0, 82, 1, 0, 3, 83, 97, 121, 13, 47, 99, 111, 109, 109, 97, 110, 100, 32, 116, 101,
        115, 116,
    ];

    #[test]
    fn server_decodes_client_chat() {
        let d = read_packet(&CHAT_FRAME, Context::Server).unwrap();
        assert_eq!((d.id, d.length), (82, 23));
        match d.packet.as_module() {
            Some(Module::Chat(chat)) => {
                assert_eq!(chat.command, "Say");
                assert_eq!(chat.message, "/command test");
            }
            other => panic!("expected chat module, got {other:?}"),
        }
    }

    #[test]
    fn client_reencodes_chat_byte_for_byte() {
        let again = reencode_frame(&CHAT_FRAME, Context::Server).unwrap();
        assert_eq!(&again[..], &CHAT_FRAME);
    }

    #[test]
    fn empty_unknown_module() {
        let d = read_packet(&[5, 0, 82, 255, 255], Context::Server).unwrap();
        match d.packet.as_module() {
            Some(Module::Unknown(m)) => {
                assert_eq!(m.id, 65535);
                assert!(m.data.is_empty());
            }
            other => panic!("expected unknown module, got {other:?}"),
        }
    }

    #[test]
    fn chest_modify_round_trips() {
        let p = Packet::from(ChestModify {
            modification: ChestModification::DestroyChest,
            x: 1024,
            y: 2048,
            style: 3,
            chest: 50,
        });
        let bytes = encode_packet(&p, Context::Server).unwrap();
        assert_eq!(&bytes[..], &[12, 0, 34, 1, 0, 4, 0, 8, 3, 0, 50, 0]);

        let d = read_packet(&bytes, Context::Client).unwrap();
        assert_eq!(d.packet, p);
    }

    #[test]
    fn length_prefix_counts_whole_frame() {
        let p = Packet::from(ConnectRequest {
            version: "Terraria279".into(),
        });
        let bytes = encode_packet(&p, Context::Client).unwrap();
        assert_eq!(peek_frame_len(&bytes), Some(bytes.len()));
        assert_eq!(bytes[2], 1);
    }

    #[test]
    fn declared_length_bounds_the_body() {
        // second frame glued on; only the first is read
        let mut buf = vec![5, 0, 82, 255, 255];
        buf.extend_from_slice(&[3, 0, 49]);
        let d = read_packet(&buf, Context::Server).unwrap();
        assert_eq!(d.length, 5);
    }

    #[test]
    fn trailing_body_bytes_are_tolerated() {
        let d = read_packet(&[6, 0, 3, 1, 0, 9], Context::Client).unwrap();
        assert_eq!(d.packet.name(), "ContinueConnecting");
    }

    #[test]
    fn bad_lengths_are_rejected() {
        for buf in [&[2u8, 0, 1][..], &[9, 0, 1, 0][..]] {
            let err = read_packet(buf, Context::Server).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidLength);
        }
        let err = read_packet(&[1], Context::Server).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Truncated);
    }

    #[test]
    fn short_body_is_truncated() {
        // ChestModify needs nine body bytes
        let err = read_packet(&[6, 0, 34, 1, 0, 4], Context::Server).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Truncated);
    }

    #[test]
    fn oversized_frame_is_rejected() {
        let p = Packet::from(UnknownPacket::new(200, vec![0u8; MAX_FRAME_LEN]));
        let err = encode_packet(&p, Context::Server).unwrap_err();
        assert!(matches!(err, WireError::PacketTooLarge(n) if n == MAX_FRAME_LEN + HEADER_SIZE));
    }

    #[test]
    fn caller_buffer_must_fit_frame() {
        let p = Packet::from(ModulePacket::new(ChatModule::say("hi")));
        let mut small = [0u8; 4];
        let err = write_with_header(&p, &mut small, Context::Client).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BufferTooSmall);
        assert_eq!(small, [0; 4]);

        let mut buf = [0u8; 64];
        let n = write_with_header(&p, &mut buf, Context::Client).unwrap();
        assert_eq!(&buf[..n], &encode_packet(&p, Context::Client).unwrap()[..]);
    }

    #[test]
    fn largest_frame_is_accepted() {
        let body = MAX_FRAME_LEN - HEADER_SIZE;
        let p = Packet::from(UnknownPacket::new(200, vec![7u8; body]));
        let bytes = encode_packet(&p, Context::Server).unwrap();
        assert_eq!(bytes.len(), MAX_FRAME_LEN);
        assert_eq!(&bytes[..3], &[255, 255, 200]);

        let d = read_packet(&bytes, Context::Client).unwrap();
        assert_eq!(d.length, MAX_FRAME_LEN);
        assert_eq!(d.packet, p);
    }

    #[test]
    fn buffer_of_exact_frame_size_is_enough() {
        let p = Packet::from(ModulePacket::new(ChatModule::say("hi")));
        let expected = encode_packet(&p, Context::Client).unwrap();

        let mut exact = vec![0u8; expected.len()];
        let n = write_with_header(&p, &mut exact, Context::Client).unwrap();
        assert_eq!(n, expected.len());
        assert_eq!(&exact[..], &expected[..]);

        let mut short = vec![0u8; expected.len() - 1];
        let err = write_with_header(&p, &mut short, Context::Client).unwrap_err();
        assert!(matches!(
            err,
            WireError::BufferTooSmall { needed, capacity } if needed == n && capacity == n - 1
        ));
    }
}
