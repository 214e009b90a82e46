//! Declarative helpers for the many small, fixed-layout message types.

/// A one-byte discriminant whose unknown values survive a round trip.
///
/// The codec does not validate domain membership: a byte outside the listed
/// set decodes to `Other(byte)` and is written back unchanged. Equality and
/// hashing go through the wire byte, so `Other(v)` for a listed `v` equals
/// the named variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, serde::Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// Byte outside the known set, kept as-is.
            Other(u8),
        }

        impl From<u8> for $name {
            fn from(v: u8) -> Self {
                match v {
                    $( $value => $name::$variant, )*
                    other => $name::Other(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(v: $name) -> u8 {
                match v {
                    $( $name::$variant => $value, )*
                    $name::Other(other) => other,
                }
            }
        }

        impl $name {
            /// Named variant for a listed byte, `Other` only for unlisted ones.
            pub fn canonical(self) -> Self {
                $name::from(u8::from(self))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                u8::from(*self) == u8::from(*other)
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                u8::from(*self).hash(state);
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::from(0)
            }
        }

        impl $crate::wire::Field for $name {
            fn read(r: &mut $crate::wire::Reader<'_>) -> $crate::error::Result<Self> {
                Ok($name::from(r.get_u8()?))
            }

            fn write(&self, w: &mut $crate::wire::Writer) -> $crate::error::Result<()> {
                w.put_u8(u8::from(*self));
                Ok(())
            }
        }
    };
}

/// A message body that is a plain sequence of [`crate::wire::Field`]s with
/// the same layout in both directions.
macro_rules! fixed_body {
    (@impl $name:ident { $( $field:ident ),* }) => {
        impl $crate::protocol::Body for $name {
            #[allow(unused_variables)]
            fn decode(
                r: &mut $crate::wire::Reader<'_>,
                _ctx: $crate::protocol::Context,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    $( $field: $crate::wire::Field::read(r)?, )*
                })
            }

            #[allow(unused_variables)]
            fn encode(
                &self,
                w: &mut $crate::wire::Writer,
                _ctx: $crate::protocol::Context,
            ) -> $crate::error::Result<()> {
                $( $crate::wire::Field::write(&self.$field, w)?; )*
                Ok(())
            }
        }
    };
    (@id packet $name:ident $id:literal) => {
        impl $crate::protocol::PacketBody for $name {
            const ID: u8 = $id;
        }
    };
    (@id module $name:ident $id:literal) => {
        impl $crate::protocol::ModuleBody for $name {
            const ID: u16 = $id;
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident = $kind:ident $id:literal {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        fixed_body!(@id $kind $name $id);
        fixed_body!(@impl $name { $( $field ),* });
    };
}
