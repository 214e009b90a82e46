//! Cutting capture files into frames.
//!
//! Binary captures are back-to-back envelopes: the first bad length prefix
//! ends the capture, since nothing after it can be resynchronized. Hex
//! captures hold one frame per line, so a bad line is reported and skipped.

use bytes::Bytes;
use terrawire_core::error::WireError;
use terrawire_core::protocol::{peek_frame_len, HEADER_SIZE};

use crate::config::CaptureFormat;

/// One frame cut out of a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub index: usize,
    /// Byte offset for binary captures, 1-based line number for hex ones.
    pub position: usize,
    pub bytes: Bytes,
}

#[derive(Debug)]
pub struct CaptureError {
    pub position: usize,
    pub error: WireError,
}

#[derive(Debug, Default)]
pub struct Capture {
    pub frames: Vec<CapturedFrame>,
    pub errors: Vec<CaptureError>,
}

pub fn split(data: Bytes, format: CaptureFormat, max_frame_bytes: usize) -> Capture {
    match format {
        CaptureFormat::Binary => split_binary(data, max_frame_bytes),
        CaptureFormat::Hex => split_hex(&String::from_utf8_lossy(&data), max_frame_bytes),
    }
}

pub fn split_binary(data: Bytes, max_frame_bytes: usize) -> Capture {
    let mut out = Capture::default();
    let mut offset = 0;

    while offset < data.len() {
        let rest = &data[offset..];
        let error = match peek_frame_len(rest) {
            None => WireError::Truncated {
                needed: 2,
                remaining: rest.len(),
            },
            Some(len) if len > max_frame_bytes => WireError::PacketTooLarge(len),
            Some(len) if len < HEADER_SIZE || len > rest.len() => WireError::InvalidLength {
                declared: len,
                available: rest.len(),
            },
            Some(len) => {
                out.frames.push(CapturedFrame {
                    index: out.frames.len(),
                    position: offset,
                    bytes: data.slice(offset..offset + len),
                });
                offset += len;
                continue;
            }
        };
        tracing::warn!(offset, error = %error, "capture ends with an unusable frame");
        out.errors.push(CaptureError {
            position: offset,
            error,
        });
        break;
    }
    out
}

pub fn split_hex(text: &str, max_frame_bytes: usize) -> Capture {
    let mut out = Capture::default();

    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let digits: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let position = n + 1;
        let result = hex::decode(&digits)
            .map_err(|e| WireError::Capture(format!("line {position}: {e}")))
            .and_then(|raw| {
                if raw.len() > max_frame_bytes {
                    Err(WireError::PacketTooLarge(raw.len()))
                } else {
                    Ok(raw)
                }
            });
        match result {
            Ok(raw) => out.frames.push(CapturedFrame {
                index: out.frames.len(),
                position,
                bytes: Bytes::from(raw),
            }),
            Err(error) => {
                tracing::warn!(line = position, error = %error, "skipping capture line");
                out.errors.push(CaptureError { position, error });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_frames_are_cut_by_length() {
        let data = Bytes::from_static(&[5, 0, 82, 255, 255, 3, 0, 49, 4, 0, 14]);
        let cap = split_binary(data, 65535);
        assert_eq!(cap.frames.len(), 2);
        assert_eq!(cap.frames[1].position, 5);
        assert_eq!(&cap.frames[1].bytes[..], &[3, 0, 49]);
        // the third frame declares four bytes but only three remain
        assert_eq!(cap.errors.len(), 1);
        assert_eq!(cap.errors[0].position, 8);
    }

    #[test]
    fn binary_frame_over_limit_stops_the_capture() {
        let data = Bytes::from_static(&[10, 0, 1, 0, 0, 0, 0, 0, 0, 0]);
        let cap = split_binary(data, 8);
        assert!(cap.frames.is_empty());
        assert!(matches!(cap.errors[0].error, WireError::PacketTooLarge(10)));
    }

    #[test]
    fn hex_lines_skip_comments_and_bad_lines() {
        let text = "# login\n0300 06\n\nzz\n050052ffff\n";
        let cap = split_hex(text, 65535);
        assert_eq!(cap.frames.len(), 2);
        assert_eq!(&cap.frames[0].bytes[..], &[3, 0, 6]);
        assert_eq!(cap.frames[1].position, 5);
        assert_eq!(cap.errors.len(), 1);
        assert_eq!(cap.errors[0].position, 4);
    }
}
