use serde::Serialize;

use super::Vector2;
use crate::error::Result;
use crate::wire::{Field, Reader, Writer};

/// Placement of a client-side particle burst.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ParticleSettings {
    pub position: Vector2,
    pub movement: Vector2,
    pub unique_info: i32,
    pub invoked_by: u8,
}

impl Field for ParticleSettings {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            position: Vector2::read(r)?,
            movement: Vector2::read(r)?,
            unique_info: r.get_i32()?,
            invoked_by: r.get_u8()?,
        })
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        self.position.write(w)?;
        self.movement.write(w)?;
        w.put_i32(self.unique_info);
        w.put_u8(self.invoked_by);
        Ok(())
    }
}
