//! Recursive formatted text value.
//!
//! Layout: `[u8 mode][string text]` and, unless the mode is `Literal`,
//! `[u8 count]` followed by `count` nested values.

use serde::Serialize;

use crate::error::{Result, WireError};
use crate::wire::{Field, Reader, Writer};

/// Nesting limit applied while decoding, so hostile input cannot exhaust the
/// stack.
pub const MAX_TEXT_DEPTH: usize = 32;

wire_enum! {
    /// How the receiving client renders a [`NetworkText`].
    pub enum TextMode {
        /// Shown verbatim.
        Literal = 0,
        /// Format string with `{0}`-style holes.
        Formatted = 1,
        /// Localization key resolved by the client.
        LocalizationKey = 2,
    }
}

/// Formatted text as sent to clients.
///
/// Fields are private so that a `Literal` value can never carry
/// substitutions. Values are built bottom-up, so the tree has no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkText {
    mode: TextMode,
    text: String,
    substitutions: Vec<NetworkText>,
}

impl Default for NetworkText {
    fn default() -> Self {
        Self::literal("")
    }
}

impl NetworkText {
    /// Build a value in any mode. `Literal` with substitutions is rejected.
    pub fn new(
        mode: TextMode,
        text: impl Into<String>,
        substitutions: Vec<NetworkText>,
    ) -> Result<Self> {
        let mode = mode.canonical();
        if mode == TextMode::Literal && !substitutions.is_empty() {
            return Err(WireError::LiteralWithSubstitutions);
        }
        Ok(Self {
            mode,
            text: text.into(),
            substitutions,
        })
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            mode: TextMode::Literal,
            text: text.into(),
            substitutions: Vec::new(),
        }
    }

    pub fn formatted(format: impl Into<String>, substitutions: Vec<NetworkText>) -> Self {
        Self {
            mode: TextMode::Formatted,
            text: format.into(),
            substitutions,
        }
    }

    pub fn localized(key: impl Into<String>, substitutions: Vec<NetworkText>) -> Self {
        Self {
            mode: TextMode::LocalizationKey,
            text: key.into(),
            substitutions,
        }
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn substitutions(&self) -> &[NetworkText] {
        &self.substitutions
    }

    /// Nesting depth; a value without substitutions has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .substitutions
            .iter()
            .map(NetworkText::depth)
            .max()
            .unwrap_or(0)
    }

    fn read_nested(r: &mut Reader<'_>, depth: usize) -> Result<Self> {
        if depth > MAX_TEXT_DEPTH {
            return Err(WireError::TextTooDeep(MAX_TEXT_DEPTH));
        }
        let mode = TextMode::from(r.get_u8()?);
        let text = r.get_string()?;
        let mut substitutions = Vec::new();
        if mode != TextMode::Literal {
            let count = r.get_u8()?;
            substitutions.reserve(usize::from(count));
            for _ in 0..count {
                substitutions.push(Self::read_nested(r, depth + 1)?);
            }
        }
        Ok(Self {
            mode,
            text,
            substitutions,
        })
    }
}

impl Field for NetworkText {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Self::read_nested(r, 1)
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        w.put_u8(u8::from(self.mode));
        w.put_string(&self.text);
        if self.mode != TextMode::Literal {
            let count = u8::try_from(self.substitutions.len())
                .map_err(|_| WireError::TooManySubstitutions(self.substitutions.len()))?;
            w.put_u8(count);
            for sub in &self.substitutions {
                sub.write(w)?;
            }
        }
        Ok(())
    }
}

impl From<&str> for NetworkText {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}
