#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use bytes::Bytes;
use terrawire_core::protocol::modules::ChatModule;
use terrawire_core::protocol::packets::{ChestInfo, ModulePacket};
use terrawire_core::{encode_packet, Context, Packet};
use terrawire_inspect::config::{self, InspectSection};
use terrawire_inspect::inspect::Inspector;
use terrawire_inspect::stats::DecodeStats;

fn capture(frames: &[(Packet, Context)]) -> Bytes {
    let mut out = Vec::new();
    for (p, origin) in frames {
        out.extend_from_slice(&encode_packet(p, *origin).unwrap());
    }
    Bytes::from(out)
}

fn inspector(yaml: &str) -> Inspector {
    let cfg = config::load_from_str(yaml).unwrap();
    Inspector::new(cfg.inspect, Arc::new(DecodeStats::default()))
}

#[test]
fn server_side_binary_capture() {
    let data = capture(&[
        (ModulePacket::new(ChatModule::say("hello")).into(), Context::Client),
        (
            ChestInfo {
                chest: 1,
                x: 2,
                y: 3,
                name: "Box".into(),
            }
            .into(),
            Context::Client,
        ),
    ]);

    let insp = inspector("version: 1\n");
    let report = insp.inspect_capture("session.bin", data);

    assert_eq!((report.decoded, report.failed), (2, 0));
    assert!(report.lines[0].contains("module=1 ChatModule"));
    assert!(report.lines[1].contains("ChestInfo"));

    let stats = insp.stats();
    assert_eq!(stats.frames.total(), 2);
    assert_eq!(stats.modules.get(&[("id", "1"), ("name", "ChatModule")]), 1);
    assert_eq!(stats.roundtrip_mismatches.total(), 0);
    assert_eq!(stats.decode_duration.count(), 2);
}

#[test]
fn truncated_tail_is_reported_after_good_frames() {
    let mut raw = capture(&[(
        ModulePacket::new(ChatModule::say("hi")).into(),
        Context::Client,
    )])
    .to_vec();
    raw.extend_from_slice(&[40, 0, 82, 1]);

    let insp = inspector("version: 1\n");
    let report = insp.inspect_capture("cut.bin", Bytes::from(raw));
    assert_eq!((report.decoded, report.failed), (1, 1));
    assert_eq!(
        insp.stats()
            .decode_errors
            .get(&[("stage", "capture"), ("code", "INVALID_LENGTH")]),
        1
    );
}

#[test]
fn client_side_json_capture() {
    let chat = ModulePacket::new(ChatModule::broadcast(
        3,
        "welcome".into(),
        terrawire_core::types::Color::WHITE,
    ));
    let hex_line = hex::encode(encode_packet(&chat.into(), Context::Server).unwrap());

    let insp = inspector(
        "version: 1\ninspect:\n  context: client\n  format: hex\n  output: json\n",
    );
    let report = insp.inspect_capture("s2c.hex", Bytes::from(format!("# s2c\n{hex_line}\n")));
    assert_eq!(report.decoded, 1);

    let v: serde_json::Value = serde_json::from_str(&report.lines[0]).unwrap();
    assert_eq!(v["module"]["name"], "ChatModule");
    assert_eq!(v["packet"]["body"]["module"]["body"]["author"], 3);
    assert_eq!(v["roundtrip_stable"], true);
}

#[test]
fn verification_can_be_disabled() {
    let cfg = InspectSection {
        verify_roundtrip: false,
        ..InspectSection::default()
    };
    let insp = Inspector::new(cfg, Arc::new(DecodeStats::default()));
    let report = insp.inspect_capture("x", Bytes::from_static(&[3, 0, 6]));
    assert_eq!(report.lines[0], "#0 @0 id=6 RequestWorldInfo len=3");
}
