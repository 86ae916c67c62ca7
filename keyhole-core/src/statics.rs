//! Handles to process-wide storage reached through the linker path.

use crate::Slot;

/// A raw pointer to the storage of a private static.
///
/// The handle is only an address; the accessor layer adds no synchronization
/// on top of whatever discipline the owning code gave the target storage, so
/// every dereference is unsafe.
pub struct StaticHandle<T> {
    ptr: *mut T,
}

impl<T> Clone for StaticHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StaticHandle<T> {}

// Sharing the address is harmless: all dereferences are unsafe and carry the
// synchronization obligation.
unsafe impl<T> Send for StaticHandle<T> {}
unsafe impl<T> Sync for StaticHandle<T> {}

impl<T> StaticHandle<T> {
    /// Forms a handle from a pointer to static storage.
    ///
    /// # Safety
    ///
    /// `ptr` must point to storage of type `T` that stays valid for the
    /// whole life of the process.
    pub const unsafe fn from_ptr(ptr: *mut T) -> Self {
        Self { ptr }
    }

    /// The storage address.
    pub const fn as_ptr(self) -> *mut T {
        self.ptr
    }

    /// Reads the current value.
    ///
    /// # Safety
    ///
    /// No thread may be writing the target storage concurrently.
    pub unsafe fn read(self) -> T
    where
        T: Copy,
    {
        unsafe { self.ptr.read() }
    }

    /// Overwrites the value. The previous value is not dropped.
    ///
    /// # Safety
    ///
    /// No other thread may be accessing the target storage concurrently, and
    /// the target must actually be writable (a `static`, not promoted
    /// read-only data).
    pub unsafe fn write(self, value: T) {
        unsafe { self.ptr.write(value) }
    }
}

impl<T> Slot<StaticHandle<T>> {
    /// The bound storage address.
    pub fn as_ptr(&self) -> *mut T {
        self.get().as_ptr()
    }

    /// Reads the bound static. See [`StaticHandle::read`].
    ///
    /// # Safety
    ///
    /// Same as [`StaticHandle::read`].
    pub unsafe fn read(&self) -> T
    where
        T: Copy,
    {
        unsafe { self.get().read() }
    }

    /// Writes the bound static. See [`StaticHandle::write`].
    ///
    /// # Safety
    ///
    /// Same as [`StaticHandle::write`].
    pub unsafe fn write(&self, value: T) {
        unsafe { self.get().write(value) }
    }
}
