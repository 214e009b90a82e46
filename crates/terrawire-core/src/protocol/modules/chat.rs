//! Chat messages and slash commands.

use serde::Serialize;

use crate::error::Result;
use crate::protocol::{Body, Context, Direction, ModuleBody};
use crate::types::{Color, NetworkText};
use crate::wire::{Field, Reader, Writer};

/// Chat in either direction.
///
/// Clients send a command id and the raw message (`"Say"`, `"/roll"`). The
/// server broadcasts the author slot, rendered text and a color. Only the
/// fields of the active direction reach the wire; the others keep their
/// defaults after decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatModule {
    pub command: String,
    pub message: String,
    pub author: u8,
    pub text: NetworkText,
    pub color: Color,
}

impl ChatModule {
    /// A client-to-server chat line.
    pub fn say(message: impl Into<String>) -> Self {
        Self {
            command: "Say".into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// A server-to-client broadcast.
    pub fn broadcast(author: u8, text: NetworkText, color: Color) -> Self {
        Self {
            author,
            text,
            color,
            ..Self::default()
        }
    }
}

impl ModuleBody for ChatModule {
    const ID: u16 = 1;
}

impl Body for ChatModule {
    fn decode(r: &mut Reader<'_>, ctx: Context) -> Result<Self> {
        match ctx.inbound() {
            Direction::ClientToServer => Ok(Self {
                command: r.get_string()?,
                message: r.get_string()?,
                ..Self::default()
            }),
            Direction::ServerToClient => Ok(Self {
                author: r.get_u8()?,
                text: NetworkText::read(r)?,
                color: Color::read(r)?,
                ..Self::default()
            }),
        }
    }

    fn encode(&self, w: &mut Writer, ctx: Context) -> Result<()> {
        match ctx.outbound() {
            Direction::ClientToServer => {
                w.put_string(&self.command);
                w.put_string(&self.message);
                Ok(())
            }
            Direction::ServerToClient => {
                w.put_u8(self.author);
                self.text.write(w)?;
                self.color.write(w)
            }
        }
    }
}
