use serde::Deserialize;
use terrawire_core::error::{Result, WireError};
use terrawire_core::protocol::{HEADER_SIZE, MAX_FRAME_LEN};
use terrawire_core::Context;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectConfig {
    pub version: u32,

    #[serde(default)]
    pub inspect: InspectSection,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            version: 1,
            inspect: InspectSection::default(),
        }
    }
}

impl InspectConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WireError::UnsupportedVersion(self.version));
        }

        self.inspect.validate()?;

        Ok(())
    }
}

/// How frames are laid out in a capture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    /// Envelopes back to back, cut by their length prefix.
    Binary,
    /// One hex-encoded frame per line.
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectSection {
    /// Endpoint that received the captured traffic.
    #[serde(default = "default_context")]
    pub context: Context,

    #[serde(default = "default_format")]
    pub format: CaptureFormat,

    #[serde(default = "default_output")]
    pub output: OutputFormat,

    #[serde(default = "default_verify_roundtrip")]
    pub verify_roundtrip: bool,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for InspectSection {
    fn default() -> Self {
        Self {
            context: default_context(),
            format: default_format(),
            output: default_output(),
            verify_roundtrip: default_verify_roundtrip(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl InspectSection {
    pub fn validate(&self) -> Result<()> {
        if !(HEADER_SIZE..=MAX_FRAME_LEN).contains(&self.max_frame_bytes) {
            return Err(WireError::Config(format!(
                "inspect.max_frame_bytes must be between {HEADER_SIZE} and {MAX_FRAME_LEN}"
            )));
        }
        Ok(())
    }
}

fn default_context() -> Context {
    Context::Server
}
fn default_format() -> CaptureFormat {
    CaptureFormat::Binary
}
fn default_output() -> OutputFormat {
    OutputFormat::Text
}
fn default_verify_roundtrip() -> bool {
    true
}
fn default_max_frame_bytes() -> usize {
    MAX_FRAME_LEN
}
