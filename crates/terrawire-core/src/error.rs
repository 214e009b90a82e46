//! Shared error type across terrawire crates.

use thiserror::Error;

/// Stable error codes (used by test vectors and log fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A read ran past the end of the slice.
    Truncated,
    /// Envelope length prefix is out of range.
    InvalidLength,
    /// Encoded frame does not fit the 16-bit length prefix.
    PacketTooLarge,
    /// Caller-supplied buffer is too small.
    BufferTooSmall,
    /// Malformed variable-length integer or string.
    MalformedString,
    /// Value rejected before it reached the wire.
    InvalidValue,
    /// Bad configuration.
    Config,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Capture input that cannot be cut into frames.
    Capture,
    /// I/O failure outside the codec.
    Io,
}

impl ErrorCode {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Truncated => "TRUNCATED",
            ErrorCode::InvalidLength => "INVALID_LENGTH",
            ErrorCode::PacketTooLarge => "PACKET_TOO_LARGE",
            ErrorCode::BufferTooSmall => "BUFFER_TOO_SMALL",
            ErrorCode::MalformedString => "MALFORMED_STRING",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Capture => "CAPTURE",
            ErrorCode::Io => "IO",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type used by the codec and the inspector.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
    #[error("invalid frame length {declared} (available {available})")]
    InvalidLength { declared: usize, available: usize },
    #[error("packet too large: {0} bytes")]
    PacketTooLarge(usize),
    #[error("buffer too small: need {needed} bytes, capacity {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
    #[error("varint longer than 5 bytes")]
    VarIntTooLong,
    #[error("negative string length {0}")]
    NegativeLength(i32),
    #[error("string is not valid utf-8")]
    InvalidUtf8,
    #[error("literal text cannot carry substitutions")]
    LiteralWithSubstitutions,
    #[error("text nested deeper than {0} levels")]
    TextTooDeep(usize),
    #[error("too many substitutions: {0}")]
    TooManySubstitutions(usize),
    #[error("kind {0} has a modeled layout and cannot be sent raw")]
    ModeledKind(u8),
    #[error("too many elements: {actual} (max {max})")]
    TooManyElements { max: usize, actual: usize },
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
    #[error("capture: {0}")]
    Capture(String),
    #[error("io: {0}")]
    Io(String),
}

impl WireError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            WireError::Truncated { .. } => ErrorCode::Truncated,
            WireError::InvalidLength { .. } => ErrorCode::InvalidLength,
            WireError::PacketTooLarge(_) => ErrorCode::PacketTooLarge,
            WireError::BufferTooSmall { .. } => ErrorCode::BufferTooSmall,
            WireError::VarIntTooLong | WireError::NegativeLength(_) | WireError::InvalidUtf8 => {
                ErrorCode::MalformedString
            }
            WireError::LiteralWithSubstitutions
            | WireError::TextTooDeep(_)
            | WireError::TooManySubstitutions(_)
            | WireError::ModeledKind(_)
            | WireError::TooManyElements { .. } => ErrorCode::InvalidValue,
            WireError::Config(_) => ErrorCode::Config,
            WireError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            WireError::Capture(_) => ErrorCode::Capture,
            WireError::Io(_) => ErrorCode::Io,
        }
    }
}
