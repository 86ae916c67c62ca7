//! Binding slots and their one-shot binders.
//!
//! A slot is the process-wide storage location an accessor reads its handle
//! from; the binder is the initializer that publishes the handle into it.
//! Together they form a publish-once, read-many pair: the handle is written
//! exactly once, strictly before any reader can observe it, and the slot is
//! immutable for the rest of the process.

use core::fmt;
use std::sync::OnceLock;

/// A process-wide, named storage location holding exactly one handle.
///
/// The handle type `H` exactly describes the target member's signature: a
/// [`FieldHandle`](crate::FieldHandle) for fields, a plain `fn` pointer for
/// methods and static functions (receiver mutability included), or a
/// [`StaticHandle`](crate::StaticHandle) for static storage. Declaring a slot
/// whose type disagrees with its target is rejected when the initializer is
/// type-checked, not at runtime.
///
/// Slots are declared as `static` items by the declaration macros in the
/// `keyhole` crate. Each macro also emits the slot's [`Binder`], so in the
/// common case the handle is already published when `main` starts. Should a
/// pre-main constructor not run on some target, [`Slot::get`] binds on first
/// read instead; either way no reader can observe an unbound or partially
/// written handle.
pub struct Slot<H: Copy> {
    name: &'static str,
    init: fn() -> H,
    cell: OnceLock<H>,
}

impl<H: Copy> Slot<H> {
    /// Declares a slot with the given name and handle initializer.
    ///
    /// The initializer runs at most once, at binding time. If it panics —
    /// a failed layout assertion, for instance — the process dies during
    /// initialization instead of limping along with an unbound accessor.
    pub const fn new(name: &'static str, init: fn() -> H) -> Self {
        Self {
            name,
            init,
            cell: OnceLock::new(),
        }
    }

    /// The name this slot was declared under.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the published handle, binding the slot first if its binder has
    /// not already run.
    #[inline]
    pub fn get(&self) -> H {
        *self.cell.get_or_init(|| {
            let handle = (self.init)();
            log::trace!("bound slot `{}`", self.name);
            handle
        })
    }

    /// Whether the handle has been published yet.
    pub fn is_bound(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Forces the one-time binding now. Idempotent.
    pub fn bind(&self) {
        let _ = self.get();
    }
}

impl<H: Copy> fmt::Debug for Slot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("name", &self.name)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// The one-shot initializer that writes a handle into its slot.
///
/// One binder exists per slot. The declaration macros construct it from a
/// pre-main constructor so that every declared slot is bound before ordinary
/// program logic runs; after construction a binder is inert and has no
/// further behavior.
pub struct Binder {
    _priv: (),
}

impl Binder {
    /// Binds `slot` and returns the (inert) binder.
    pub fn bind<H: Copy>(slot: &Slot<H>) -> Self {
        slot.bind();
        Binder { _priv: () }
    }
}
