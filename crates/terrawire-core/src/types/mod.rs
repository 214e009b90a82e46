//! Composite values shared by many message bodies.

mod bits;
mod death_reason;
mod geometry;
mod particles;
mod text;

pub use bits::BitsByte;
pub use death_reason::DeathReason;
pub use geometry::{Color, Vector2};
pub use particles::ParticleSettings;
pub use text::{NetworkText, TextMode, MAX_TEXT_DEPTH};
