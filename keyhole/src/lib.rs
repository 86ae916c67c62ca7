#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![doc = include_str!("../README.md")]

pub use keyhole_core::*;

mod macros;

/// Macro support. Everything the declaration macros expand to resolves
/// through here, so invoking crates depend on `keyhole` alone.
#[doc(hidden)]
pub mod __private {
    pub use ctor::declarative::ctor;
}
