//! Per-frame decoding, round-trip verification and report rendering.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use serde::Serialize;
use terrawire_core::error::{Result, WireError};
use terrawire_core::protocol::reencode_frame;
use terrawire_core::{read_packet, Packet};

use crate::capture::{self, CapturedFrame};
use crate::config::{InspectSection, OutputFormat};
use crate::stats::DecodeStats;

/// What the inspector learned about one frame.
#[derive(Debug, Serialize)]
pub struct FrameReport {
    pub index: usize,
    pub position: usize,
    pub id: u8,
    pub name: &'static str,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleSummary>,
    /// `None` when verification is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roundtrip_stable: Option<bool>,
    pub packet: Packet,
}

#[derive(Debug, Serialize)]
pub struct ModuleSummary {
    pub id: u16,
    pub name: &'static str,
}

/// Outcome of one capture file.
#[derive(Debug, Default)]
pub struct FileReport {
    pub source: String,
    pub lines: Vec<String>,
    pub decoded: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct Inspector {
    cfg: InspectSection,
    stats: Arc<DecodeStats>,
}

impl Inspector {
    pub fn new(cfg: InspectSection, stats: Arc<DecodeStats>) -> Self {
        Self { cfg, stats }
    }

    pub fn stats(&self) -> &Arc<DecodeStats> {
        &self.stats
    }

    /// Decode one frame and, when enabled, check that a second
    /// receive/resend cycle reproduces the first.
    pub fn inspect_frame(&self, frame: &CapturedFrame) -> Result<FrameReport> {
        let ctx = self.cfg.context;
        self.stats.frames.inc(&[]);

        let started = Instant::now();
        let decoded = read_packet(&frame.bytes, ctx)?;
        self.stats.decode_duration.observe(started.elapsed());
        self.stats.record_packet(&decoded.packet);

        let roundtrip_stable = if self.cfg.verify_roundtrip {
            let first = reencode_frame(&frame.bytes, ctx)?;
            let second = reencode_frame(&first, ctx)?;
            let stable = first == second;
            if !stable {
                self.stats.record_mismatch(&decoded.packet);
                tracing::warn!(
                    index = frame.index,
                    packet = decoded.packet.name(),
                    first = %hex::encode(&first),
                    second = %hex::encode(&second),
                    "round trip is not stable"
                );
            }
            Some(stable)
        } else {
            None
        };

        Ok(FrameReport {
            index: frame.index,
            position: frame.position,
            id: decoded.id,
            name: decoded.packet.name(),
            length: decoded.length,
            module: decoded.packet.as_module().map(|m| ModuleSummary {
                id: m.id(),
                name: m.name(),
            }),
            roundtrip_stable,
            packet: decoded.packet,
        })
    }

    pub fn render(&self, report: &FrameReport) -> Result<String> {
        match self.cfg.output {
            OutputFormat::Json => serde_json::to_string(report)
                .map_err(|e| WireError::Io(format!("json encode failed: {e}"))),
            OutputFormat::Text => {
                let mut line = format!(
                    "#{} @{} id={} {} len={}",
                    report.index, report.position, report.id, report.name, report.length
                );
                if let Some(m) = &report.module {
                    line.push_str(&format!(" module={} {}", m.id, m.name));
                }
                if report.roundtrip_stable == Some(false) {
                    line.push_str(" UNSTABLE");
                }
                Ok(line)
            }
        }
    }

    /// Inspect every frame of one capture. Failures are logged and counted;
    /// they never abort the file.
    pub fn inspect_capture(&self, source: &str, data: Bytes) -> FileReport {
        let span = tracing::info_span!("capture", %source);
        let _guard = span.enter();

        let cap = capture::split(data, self.cfg.format, self.cfg.max_frame_bytes);
        let mut report = FileReport {
            source: source.to_string(),
            ..FileReport::default()
        };

        for err in &cap.errors {
            self.stats.record_error("capture", &err.error);
            report.failed += 1;
        }

        for frame in &cap.frames {
            let rendered = self
                .inspect_frame(frame)
                .and_then(|r| self.render(&r));
            match rendered {
                Ok(line) => {
                    report.decoded += 1;
                    report.lines.push(line);
                }
                Err(e) => {
                    tracing::warn!(
                        index = frame.index,
                        position = frame.position,
                        code = e.code().as_str(),
                        error = %e,
                        "frame decode failed"
                    );
                    self.stats.record_error("frame", &e);
                    report.failed += 1;
                    report.lines.push(format!(
                        "#{} @{} error={} {}",
                        frame.index,
                        frame.position,
                        e.code().as_str(),
                        e
                    ));
                }
            }
        }

        tracing::info!(
            frames = cap.frames.len(),
            decoded = report.decoded,
            failed = report.failed,
            "capture inspected"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::CaptureFormat;

    fn inspector(output: OutputFormat) -> Inspector {
        let cfg = InspectSection {
            format: CaptureFormat::Hex,
            output,
            ..InspectSection::default()
        };
        Inspector::new(cfg, Arc::new(DecodeStats::default()))
    }

    #[test]
    fn text_line_names_packet_and_module() {
        let insp = inspector(OutputFormat::Text);
        let report = insp.inspect_capture("t", Bytes::from_static(b"050052ffff\n"));
        assert_eq!(report.decoded, 1);
        assert_eq!(
            report.lines[0],
            "#0 @1 id=82 ModulePacket len=5 module=65535 Unknown"
        );
    }

    #[test]
    fn json_line_carries_decoded_body() {
        let insp = inspector(OutputFormat::Json);
        let report = insp.inspect_capture("t", Bytes::from_static(b"0c0022010004000803003200\n"));
        let v: serde_json::Value = serde_json::from_str(&report.lines[0]).unwrap();
        assert_eq!(v["name"], "ChestModify");
        assert_eq!(v["roundtrip_stable"], true);
        assert_eq!(v["packet"]["body"]["modification"], "DestroyChest");
        assert!(v.get("module").is_none());
    }

    #[test]
    fn bad_frames_are_counted_not_fatal() {
        let insp = inspector(OutputFormat::Text);
        let report = insp.inspect_capture(
            "t",
            Bytes::from_static(b"060022010004\n030006\nnot hex\n"),
        );
        assert_eq!((report.decoded, report.failed), (1, 2));
        assert_eq!(
            insp.stats()
                .decode_errors
                .get(&[("stage", "frame"), ("code", "TRUNCATED")]),
            1
        );
        assert_eq!(
            insp.stats()
                .decode_errors
                .get(&[("stage", "capture"), ("code", "CAPTURE")]),
            1
        );
    }
}
