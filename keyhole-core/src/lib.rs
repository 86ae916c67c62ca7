#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![doc = include_str!("../README.md")]

// Binding slots and their one-shot binders
mod slot;
pub use slot::*;

// Pointer-to-member analog for fields (the layout path)
mod field;
pub use field::*;

// Raw-pointer handles to private statics (the linker path)
mod statics;
pub use statics::*;

// Startup-time layout assertions
pub mod layout;
pub use layout::{LayoutError, Mirrors};
