//! Typed field handles: the pointer-to-member analog for the layout path.

use core::marker::PhantomData;

use crate::Slot;

/// A verified byte offset into `O` where a field of type `F` lives.
///
/// This is the pointer-to-member-variable of the layout path: applying the
/// handle to an instance of `O` yields a reference to that instance's field,
/// with no indirection beyond the one addition the compiler would emit for a
/// direct field access. Handles are formed once, at binding time, after the
/// assertions in [`crate::layout`] have checked the mirror against the owner.
pub struct FieldHandle<O, F> {
    offset: usize,
    // fn-pointer marker: handles are Send + Sync regardless of O and F
    _marker: PhantomData<fn(*const O) -> *const F>,
}

impl<O, F> Clone for FieldHandle<O, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O, F> Copy for FieldHandle<O, F> {}

impl<O, F> FieldHandle<O, F> {
    /// Forms a handle from a raw byte offset.
    ///
    /// # Safety
    ///
    /// `offset` must be the offset of a field of type `F` within `O`: for
    /// any valid reference to an `O`, adding `offset` bytes must yield a
    /// properly aligned, initialized `F` belonging to that instance.
    pub const unsafe fn from_offset(offset: usize) -> Self {
        Self {
            offset,
            _marker: PhantomData,
        }
    }

    /// The byte offset this handle applies.
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Applies the handle to a shared instance.
    #[inline]
    pub fn borrow<'mem>(self, owner: &'mem O) -> &'mem F {
        unsafe { &*(owner as *const O).byte_add(self.offset).cast::<F>() }
    }

    /// Applies the handle to a mutable instance.
    #[inline]
    pub fn borrow_mut<'mem>(self, owner: &'mem mut O) -> &'mem mut F {
        unsafe { &mut *(owner as *mut O).byte_add(self.offset).cast::<F>() }
    }

    /// Applies the handle to a raw instance pointer.
    ///
    /// # Safety
    ///
    /// `owner` must point to a live `O`.
    #[inline]
    pub unsafe fn as_ptr(self, owner: *const O) -> *const F {
        unsafe { owner.byte_add(self.offset).cast::<F>() }
    }

    /// Mutable variant of [`FieldHandle::as_ptr`].
    ///
    /// # Safety
    ///
    /// `owner` must point to a live `O`.
    #[inline]
    pub unsafe fn as_mut_ptr(self, owner: *mut O) -> *mut F {
        unsafe { owner.byte_add(self.offset).cast::<F>() }
    }
}

impl<O, F> Slot<FieldHandle<O, F>> {
    /// Reads the field of `owner` this slot is bound to.
    #[inline]
    pub fn of<'mem>(&self, owner: &'mem O) -> &'mem F {
        self.get().borrow(owner)
    }

    /// Mutable variant of [`Slot::of`].
    #[inline]
    pub fn of_mut<'mem>(&self, owner: &'mem mut O) -> &'mem mut F {
        self.get().borrow_mut(owner)
    }
}
