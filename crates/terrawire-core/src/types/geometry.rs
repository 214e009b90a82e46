use serde::Serialize;

use crate::error::Result;
use crate::wire::{Field, Reader, Writer};

/// Two `f32` world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Field for Vector2 {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            x: r.get_f32()?,
            y: r.get_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        w.put_f32(self.x);
        w.put_f32(self.y);
        Ok(())
    }
}

/// RGB color, three bytes on the wire (no alpha).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Field for Color {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            r: r.get_u8()?,
            g: r.get_u8()?,
            b: r.get_u8()?,
        })
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        w.put_u8(self.r);
        w.put_u8(self.g);
        w.put_u8(self.b);
        Ok(())
    }
}
