//! Top-level facade crate for terrawire.
//!
//! Re-exports the codec and the inspector library so users can depend on a single crate.

pub mod core {
    pub use terrawire_core::*;
}

pub mod inspect {
    pub use terrawire_inspect::*;
}
