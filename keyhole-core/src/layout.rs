//! Startup-time layout assertions for the field (mirror) path.
//!
//! Rust cannot check at compile time that a mirror struct still agrees with
//! the type it claims to replicate, so the check moves to binding time and
//! fails fast: a mismatch panics inside the binder, aborting initialization
//! rather than deferring the failure to first use.

use core::fmt;
use core::mem::{align_of, size_of};

/// Marker trait: `Self` replicates the memory layout of `O`.
///
/// Implemented by the `mirror_struct!` declaration macro; the binder then
/// re-checks size and alignment agreement through [`verify_mirror`] every
/// time a process starts, which is what catches the target type drifting
/// after an upgrade.
///
/// # Safety
///
/// Every field of the implementing type must live at the same offset as the
/// corresponding member of `O`, and the two types must agree on size and
/// alignment. In practice this means the mirror repeats the target's `repr`
/// and its fields in declaration order.
pub unsafe trait Mirrors<O> {}

/// A layout assertion failed at binding time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The mirror's size differs from the owner's.
    SizeMismatch {
        /// size of the owner type
        owner: usize,
        /// size of the mirror type
        mirror: usize,
    },

    /// The mirror's alignment differs from the owner's.
    AlignMismatch {
        /// alignment of the owner type
        owner: usize,
        /// alignment of the mirror type
        mirror: usize,
    },

    /// The field would extend past the end of the owner.
    FieldOutOfBounds {
        /// offset the accessor was declared with
        offset: usize,
        /// size of the field type
        field_size: usize,
        /// size of the owner type
        owner_size: usize,
    },

    /// The field offset is not aligned for the field type.
    FieldMisaligned {
        /// offset the accessor was declared with
        offset: usize,
        /// required alignment of the field type
        align: usize,
    },
}

impl core::error::Error for LayoutError {}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::SizeMismatch { owner, mirror } => {
                write!(f, "mirror is {mirror} bytes but owner is {owner}")
            }
            LayoutError::AlignMismatch { owner, mirror } => {
                write!(f, "mirror aligns to {mirror} but owner aligns to {owner}")
            }
            LayoutError::FieldOutOfBounds {
                offset,
                field_size,
                owner_size,
            } => {
                write!(
                    f,
                    "field of {field_size} bytes at offset {offset} ends past the owner's {owner_size} bytes"
                )
            }
            LayoutError::FieldMisaligned { offset, align } => {
                write!(f, "offset {offset} is not aligned to {align}")
            }
        }
    }
}

/// Checks that mirror `M` still agrees with owner `O` on size and alignment.
pub fn verify_mirror<O, M: Mirrors<O>>() -> Result<(), LayoutError> {
    if size_of::<M>() != size_of::<O>() {
        return Err(LayoutError::SizeMismatch {
            owner: size_of::<O>(),
            mirror: size_of::<M>(),
        });
    }
    if align_of::<M>() != align_of::<O>() {
        return Err(LayoutError::AlignMismatch {
            owner: align_of::<O>(),
            mirror: align_of::<M>(),
        });
    }
    Ok(())
}

/// Checks that a field of type `F` at `offset` fits inside `O`.
pub fn verify_field<O, F>(offset: usize) -> Result<(), LayoutError> {
    let owner_size = size_of::<O>();
    let field_size = size_of::<F>();
    if offset
        .checked_add(field_size)
        .is_none_or(|end| end > owner_size)
    {
        return Err(LayoutError::FieldOutOfBounds {
            offset,
            field_size,
            owner_size,
        });
    }
    if offset % align_of::<F>() != 0 {
        return Err(LayoutError::FieldMisaligned {
            offset,
            align: align_of::<F>(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    #[allow(dead_code)]
    struct Owner {
        a: u64,
        b: u32,
    }

    #[repr(C)]
    #[allow(dead_code)]
    struct GoodMirror {
        a: u64,
        b: u32,
    }

    #[repr(C)]
    #[allow(dead_code)]
    struct ShortMirror {
        a: u64,
    }

    unsafe impl Mirrors<Owner> for GoodMirror {}
    // Deliberately wrong; verify_mirror must reject it before any handle forms.
    unsafe impl Mirrors<Owner> for ShortMirror {}

    #[test]
    fn matching_mirror_passes() {
        assert!(verify_mirror::<Owner, GoodMirror>().is_ok());
    }

    #[test]
    fn size_mismatch_is_reported() {
        let err = verify_mirror::<Owner, ShortMirror>().unwrap_err();
        assert!(matches!(err, LayoutError::SizeMismatch { .. }));
    }

    #[test]
    fn field_span_must_stay_in_bounds() {
        assert!(verify_field::<Owner, u32>(core::mem::offset_of!(Owner, b)).is_ok());
        let err = verify_field::<Owner, u64>(size_of::<Owner>()).unwrap_err();
        assert!(matches!(err, LayoutError::FieldOutOfBounds { .. }));
    }

    #[test]
    fn field_offset_must_be_aligned() {
        let err = verify_field::<Owner, u64>(1).unwrap_err();
        assert!(matches!(err, LayoutError::FieldMisaligned { .. }));
    }

    #[test]
    fn errors_display_their_numbers() {
        let err = LayoutError::SizeMismatch {
            owner: 16,
            mirror: 8,
        };
        assert_eq!(err.to_string(), "mirror is 8 bytes but owner is 16");
    }
}
