//! Decode counters for the inspector.
//!
//! Labelled counters and a decode-time histogram backed by `DashMap`, shared
//! by every file task. Labels are flattened into sorted key vectors and
//! rendered in Prometheus text format with rows in sorted order, so output is
//! stable across runs.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use terrawire_core::error::WireError;
use terrawire_core::{Module, Packet};

type LabelKey = Vec<(String, String)>;

fn key_of(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(key_of(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set; zero if never touched.
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&key_of(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum over every label set.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    fn render(&self, name: &str, out: &mut String) {
        let mut rows: Vec<(LabelKey, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();

        let _ = writeln!(out, "# TYPE {} counter", name);
        for (key, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(&key), val);
        }
    }
}

// 1us, 5us, 10us, 50us, 100us, 500us, 1ms
const BUCKETS_MICROS: [u64; 7] = [1, 5, 10, 50, 100, 500, 1_000];

#[derive(Default)]
pub struct Histogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 7],
}

impl Histogram {
    /// Record one duration into the cumulative buckets.
    pub fn observe(&self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(micros, Ordering::Relaxed);
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
            let count = self.buckets[i].load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{le=\"{}\"}} {}", name, le, count);
        }
        let count = self.count();
        let _ = writeln!(out, "{}_bucket{{le=\"+Inf\"}} {}", name, count);
        let _ = writeln!(out, "{}_sum {}", name, self.sum.load(Ordering::Relaxed));
        let _ = writeln!(out, "{}_count {}", name, count);
    }
}

#[derive(Default)]
pub struct DecodeStats {
    pub frames: CounterVec,
    pub packets: CounterVec,
    pub modules: CounterVec,
    pub unknown_ids: CounterVec,
    pub decode_errors: CounterVec,
    pub roundtrip_mismatches: CounterVec,
    pub decode_duration: Histogram, // microseconds
}

impl DecodeStats {
    /// Count one successfully decoded packet and its module, if any.
    pub fn record_packet(&self, packet: &Packet) {
        let id = packet.id().to_string();
        self.packets.inc(&[("id", &id), ("name", packet.name())]);
        if let Packet::Unknown(_) = packet {
            self.unknown_ids.inc(&[("kind", "packet"), ("id", &id)]);
        }

        if let Some(module) = packet.as_module() {
            let mid = module.id().to_string();
            self.modules.inc(&[("id", &mid), ("name", module.name())]);
            if let Module::Unknown(_) = module {
                self.unknown_ids.inc(&[("kind", "module"), ("id", &mid)]);
            }
        }
    }

    pub fn record_error(&self, stage: &str, error: &WireError) {
        self.decode_errors
            .inc(&[("stage", stage), ("code", error.code().as_str())]);
    }

    pub fn record_mismatch(&self, packet: &Packet) {
        self.roundtrip_mismatches.inc(&[("name", packet.name())]);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.frames.render("terrawire_frames_total", &mut out);
        self.packets.render("terrawire_packets_total", &mut out);
        self.modules.render("terrawire_modules_total", &mut out);
        self.unknown_ids.render("terrawire_unknown_ids_total", &mut out);
        self.decode_errors.render("terrawire_decode_errors_total", &mut out);
        self.roundtrip_mismatches
            .render("terrawire_roundtrip_mismatches_total", &mut out);
        self.decode_duration
            .render("terrawire_decode_duration_micros", &mut out);
        out
    }
}
