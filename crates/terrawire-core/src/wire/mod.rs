//! Primitive encoders shared by every body codec.
//!
//! Rules:
//! - Never index a buffer directly: every read goes through [`Reader`], which
//!   checks `remaining()` before touching `bytes::Buf`.
//! - Multi-byte scalars are little-endian.
//! - Strings are `[7-bit varint length][utf8 bytes]`.

mod reader;
mod varint;
mod writer;

pub use reader::Reader;
pub use varint::{var_u32_len, MAX_VARINT_LEN};
pub use writer::Writer;

use crate::error::Result;

/// A value with one fixed wire layout, independent of [`crate::Context`].
///
/// Implemented for the scalars and for the composite values in
/// [`crate::types`]; body codecs are built by chaining these.
pub trait Field: Sized {
    fn read(r: &mut Reader<'_>) -> Result<Self>;
    fn write(&self, w: &mut Writer) -> Result<()>;
}

macro_rules! scalar_field {
    ($($ty:ty => $get:ident, $put:ident;)*) => {
        $(
            impl Field for $ty {
                fn read(r: &mut Reader<'_>) -> Result<Self> {
                    r.$get()
                }

                fn write(&self, w: &mut Writer) -> Result<()> {
                    w.$put(*self);
                    Ok(())
                }
            }
        )*
    };
}

scalar_field! {
    u8 => get_u8, put_u8;
    i8 => get_i8, put_i8;
    u16 => get_u16, put_u16;
    i16 => get_i16, put_i16;
    u32 => get_u32, put_u32;
    i32 => get_i32, put_i32;
    u64 => get_u64, put_u64;
    f32 => get_f32, put_f32;
    bool => get_bool, put_bool;
}

impl Field for String {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        r.get_string()
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        w.put_string(self);
        Ok(())
    }
}

/// Fixed-count arrays are written back to back with no count prefix.
impl<T: Field + Copy + Default, const N: usize> Field for [T; N] {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let mut out = [T::default(); N];
        for slot in out.iter_mut() {
            *slot = T::read(r)?;
        }
        Ok(out)
    }

    fn write(&self, w: &mut Writer) -> Result<()> {
        for item in self {
            item.write(w)?;
        }
        Ok(())
    }
}

/// Decode `Some` when `present`, otherwise consume nothing.
pub(crate) fn read_if<T: Field>(present: bool, r: &mut Reader<'_>) -> Result<Option<T>> {
    if present {
        T::read(r).map(Some)
    } else {
        Ok(None)
    }
}

pub(crate) fn write_opt<T: Field>(value: &Option<T>, w: &mut Writer) -> Result<()> {
    match value {
        Some(v) => v.write(w),
        None => Ok(()),
    }
}
