//! The declaration generators.
//!
//! Each `define_*` macro maps a human-chosen slot name and a description of
//! one target member to a concrete slot + binder pair: the exactly-typed
//! `static` holding the handle, and a pre-main constructor that publishes the
//! handle before ordinary program logic runs. Two binding paths exist:
//!
//! - the **layout path** ([`define_field_accessor!`]), which computes a byte
//!   offset from a [`mirror_struct!`] declaration and re-verifies the layout
//!   at binding time, and
//! - the **linker path** ([`define_method_accessor!`],
//!   [`define_static_accessor!`], [`define_static_fn_accessor!`]), which
//!   names the target's symbol directly; privacy is enforced during name
//!   resolution, not in the symbol table, so the link either resolves the
//!   member or fails the build.
//!
//! The layout path's obligations are checked by startup assertions. The
//! linker path's signature obligation cannot be checked by anything — the
//! linker matches names, not types — so those declarations carry the
//! `unsafe` keyword: the declarer vouches for the signature, and in return
//! every invocation through the slot is safe.

/// Declares a layout mirror of a foreign type.
///
/// The mirror repeats the target's `repr` and its fields in declaration
/// order; [`define_field_accessor!`] then computes field offsets from the
/// mirror instead of the (unnameable) originals. Expands to the struct
/// itself plus a [`Mirrors`](crate::Mirrors) implementation; size and
/// alignment agreement with the target is re-checked every time a process
/// binds an accessor that uses the mirror.
///
/// # Safety
///
/// The `unsafe` keyword in the declaration commits you to the mirror
/// repeating the target's layout. The binding-time assertions catch size and
/// alignment disagreement, but a mirror that lies in a way they cannot catch
/// (same size and alignment, different field order) makes the derived
/// accessors read the wrong bytes. Mirror only types whose layout is
/// defined — `#[repr(C)]` and friends — or that you otherwise control.
///
/// # Example
///
/// ```
/// mod vault {
///     #[repr(C)]
///     pub struct Vault {
///         combination: u64,
///     }
///
///     impl Vault {
///         pub fn new(combination: u64) -> Self {
///             Vault { combination }
///         }
///
///         pub fn check(&self, guess: u64) -> bool {
///             self.combination == guess
///         }
///     }
/// }
///
/// keyhole::mirror_struct! {
///     /// Layout twin of the vault.
///     #[repr(C)]
///     unsafe struct VaultMirror mirrors vault::Vault {
///         combination: u64,
///     }
/// }
///
/// keyhole::define_field_accessor!(
///     static COMBINATION for vault::Vault, via VaultMirror, field combination: u64
/// );
///
/// let mut v = vault::Vault::new(42);
/// assert_eq!(*COMBINATION.of(&v), 42);
/// *COMBINATION.of_mut(&mut v) = 43;
/// assert!(v.check(43));
/// ```
#[macro_export]
macro_rules! mirror_struct {
    (
        $(#[$meta:meta])*
        $vis:vis unsafe struct $mirror:ident mirrors $owner:ty {
            $($fvis:vis $fname:ident : $fty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(dead_code)]
        $vis struct $mirror {
            $($fvis $fname : $fty,)*
        }

        // The claim this impl records is re-asserted at binding time by
        // `verify_mirror`.
        unsafe impl $crate::Mirrors<$owner> for $mirror {}
    };
}

/// Declares an accessor slot for a private field.
///
/// `define_field_accessor!(static NAME for Owner, via Mirror, field name: Type)`
/// expands to a `static NAME: Slot<FieldHandle<Owner, Type>>` plus its
/// binder. The field's offset is taken from the mirror with
/// `core::mem::offset_of!`; the binder re-checks the mirror's size and
/// alignment against the owner and the field's span and alignment inside it,
/// and panics during initialization on any disagreement. A mismatch between
/// the declared field type and the mirror's is rejected at compile time.
///
/// Read the field with [`Slot::of`](crate::Slot::of) and
/// [`Slot::of_mut`](crate::Slot::of_mut), or grab the raw
/// [`FieldHandle`](crate::FieldHandle) with `NAME.get()`.
///
/// # Safety
///
/// Invocation is safe: the layout obligation was taken on by the
/// [`mirror_struct!`] declaration, and the binder re-checks it at startup.
///
/// # Example
///
/// See [`mirror_struct!`].
#[macro_export]
macro_rules! define_field_accessor {
    (
        $(#[$meta:meta])*
        $vis:vis static $name:ident for $owner:ty, via $mirror:ty, field $field:ident : $fty:ty $(,)?
    ) => {
        // Field type must agree between the mirror and the declaration.
        const _: () = {
            #[allow(dead_code)]
            fn field_type_check(m: &$mirror) -> &$fty {
                &m.$field
            }
        };

        $(#[$meta])*
        $vis static $name: $crate::Slot<$crate::FieldHandle<$owner, $fty>> =
            $crate::Slot::new(::core::stringify!($name), || {
                if let ::core::result::Result::Err(err) =
                    $crate::layout::verify_mirror::<$owner, $mirror>()
                {
                    ::core::panic!(
                        "cannot bind accessor `{}`: {}",
                        ::core::stringify!($name),
                        err
                    );
                }
                let offset = ::core::mem::offset_of!($mirror, $field);
                if let ::core::result::Result::Err(err) =
                    $crate::layout::verify_field::<$owner, $fty>(offset)
                {
                    ::core::panic!(
                        "cannot bind accessor `{}`: {}",
                        ::core::stringify!($name),
                        err
                    );
                }
                unsafe { $crate::FieldHandle::from_offset(offset) }
            });

        $crate::__bind_at_startup!($name);
    };
}

/// Declares an accessor slot for a private instance method.
///
/// Two shapes, mirroring the receiver:
///
/// - `define_method_accessor!(unsafe static NAME: fn "symbol"(&mut Owner, Args...) -> Ret)`
///   for mutating methods, producing a `Slot<fn(&mut Owner, Args...) -> Ret>`;
/// - `define_method_accessor!(unsafe static NAME: fn "symbol"(&Owner, Args...) -> Ret)`
///   for read-only methods, producing a `Slot<fn(&Owner, Args...) -> Ret>`.
///
/// The read-only shape preserves the qualifier: its handle cannot mutate the
/// instance, and the mutable shape cannot be applied through a shared
/// reference — both enforced by the borrow checker at the call site. Invoke
/// the handle exactly like a function pointer: `NAME.get()(instance, args)`.
///
/// The target is named by its linker symbol, so an accessor to a member that
/// does not exist fails the build with an unresolved-reference error. Plain
/// Rust items are mangled under an unstable, hash-bearing scheme, so the
/// symbol is in practice a stable name the target exports — via
/// `#[unsafe(export_name = "...")]`, `#[unsafe(no_mangle)]`, or an extern
/// ABI. A method of a fully unmodified type has no spellable symbol; that is
/// a limit of binding by symbol, not of any particular declaration. For
/// same-named targets (Rust has no overloading, but same-purpose methods of
/// different receivers or traits come close), declare one independently
/// named slot per target; the choice of slot *is* the overload selection.
///
/// # Safety
///
/// The declaration requires the `unsafe` keyword; writing it asserts that
/// the declared signature — receiver mutability, argument types, return
/// type — exactly matches the target function behind the symbol. The linker
/// checks existence, not types, and nothing else can. Given a truthful
/// declaration, every invocation through the slot is safe.
///
/// # Example
///
/// ```
/// pub struct Counter {
///     value: u32,
/// }
///
/// impl Counter {
///     #[unsafe(export_name = "doc_counter_increment")]
///     fn increment(&mut self) {
///         self.value += 1;
///     }
///
///     #[unsafe(export_name = "doc_counter_value")]
///     fn value(&self) -> u32 {
///         self.value
///     }
/// }
///
/// keyhole::define_method_accessor!(
///     unsafe static COUNTER_INCREMENT: fn "doc_counter_increment"(&mut Counter)
/// );
/// keyhole::define_method_accessor!(
///     unsafe static COUNTER_VALUE: fn "doc_counter_value"(&Counter) -> u32
/// );
///
/// let mut c = Counter { value: 41 };
/// COUNTER_INCREMENT.get()(&mut c);
/// assert_eq!(COUNTER_VALUE.get()(&c), 42);
/// ```
#[macro_export]
macro_rules! define_method_accessor {
    (
        $(#[$meta:meta])*
        $vis:vis unsafe static $name:ident : fn $sym:literal ( &mut $owner:ty $(, $aty:ty)* ) $(-> $ret:ty)? $(;)?
    ) => {
        $(#[$meta])*
        $vis static $name: $crate::Slot<fn(&mut $owner $(, $aty)*) $(-> $ret)?> =
            $crate::Slot::new(::core::stringify!($name), || {
                unsafe extern "Rust" {
                    #[link_name = $sym]
                    safe fn __keyhole_target(_: &mut $owner $(, _: $aty)*) $(-> $ret)?;
                }
                __keyhole_target as fn(&mut $owner $(, $aty)*) $(-> $ret)?
            });

        $crate::__bind_at_startup!($name);
    };
    (
        $(#[$meta:meta])*
        $vis:vis unsafe static $name:ident : fn $sym:literal ( & $owner:ty $(, $aty:ty)* ) $(-> $ret:ty)? $(;)?
    ) => {
        $(#[$meta])*
        $vis static $name: $crate::Slot<fn(&$owner $(, $aty)*) $(-> $ret)?> =
            $crate::Slot::new(::core::stringify!($name), || {
                unsafe extern "Rust" {
                    #[link_name = $sym]
                    safe fn __keyhole_target(_: &$owner $(, _: $aty)*) $(-> $ret)?;
                }
                __keyhole_target as fn(&$owner $(, $aty)*) $(-> $ret)?
            });

        $crate::__bind_at_startup!($name);
    };
}

/// Declares an accessor slot for a private static variable.
///
/// `define_static_accessor!(unsafe static NAME: static "symbol": Type)`
/// expands to a `static NAME: Slot<StaticHandle<Type>>` plus its binder. The
/// handle is a raw pointer to the target's storage; read and write it with
/// the unsafe [`Slot::read`](crate::Slot::read) /
/// [`Slot::write`](crate::Slot::write) helpers or through
/// [`Slot::as_ptr`](crate::Slot::as_ptr).
///
/// The target is named by its linker symbol; as with
/// [`define_method_accessor!`], a plain Rust static's mangled name is not
/// spellable, so in practice the target exports a stable name with
/// `#[unsafe(export_name = "...")]` or `#[unsafe(no_mangle)]`.
///
/// # Safety
///
/// The declaration requires the `unsafe` keyword; writing it asserts that
/// the symbol denotes static storage of exactly `Type`. Writes additionally
/// require that the target is writable and not accessed concurrently, which
/// is why [`Slot::read`](crate::Slot::read) and
/// [`Slot::write`](crate::Slot::write) stay unsafe at every call.
///
/// # Example
///
/// ```
/// #[unsafe(export_name = "doc_hidden_flag")]
/// static mut HIDDEN_FLAG: bool = false;
///
/// keyhole::define_static_accessor!(
///     unsafe static FLAG: static "doc_hidden_flag": bool
/// );
///
/// unsafe {
///     assert!(!FLAG.read());
///     FLAG.write(true);
///     assert!(FLAG.read());
/// }
/// ```
#[macro_export]
macro_rules! define_static_accessor {
    (
        $(#[$meta:meta])*
        $vis:vis unsafe static $name:ident : static $sym:literal : $ty:ty $(;)?
    ) => {
        $(#[$meta])*
        $vis static $name: $crate::Slot<$crate::StaticHandle<$ty>> =
            $crate::Slot::new(::core::stringify!($name), || {
                unsafe extern "Rust" {
                    #[link_name = $sym]
                    static mut __KEYHOLE_STORAGE: $ty;
                }
                // The symbol resolved at link time, so it denotes storage
                // that lives as long as the process.
                unsafe { $crate::StaticHandle::from_ptr(&raw mut __KEYHOLE_STORAGE) }
            });

        $crate::__bind_at_startup!($name);
    };
}

/// Declares an accessor slot for a private static or free function.
///
/// `define_static_fn_accessor!(unsafe static NAME: fn "symbol"(Args...) -> Ret)`
/// expands to a `static NAME: Slot<fn(Args...) -> Ret>` plus its binder.
/// Invoke the handle directly: `NAME.get()(args)`.
///
/// The target is named by its linker symbol; as with
/// [`define_method_accessor!`], the symbol is in practice a stable name the
/// target exports, not the unstable mangled name of an unannotated item.
///
/// # Safety
///
/// The declaration requires the `unsafe` keyword; writing it asserts that
/// the declared signature exactly matches the function behind the symbol.
///
/// # Example
///
/// ```
/// struct Registry;
///
/// impl Registry {
///     #[unsafe(export_name = "doc_registry_bless")]
///     fn bless(seed: u32) -> u32 {
///         seed + 1
///     }
/// }
///
/// keyhole::define_static_fn_accessor!(
///     unsafe static REGISTRY_BLESS: fn "doc_registry_bless"(u32) -> u32
/// );
///
/// assert_eq!(REGISTRY_BLESS.get()(41), 42);
/// ```
#[macro_export]
macro_rules! define_static_fn_accessor {
    (
        $(#[$meta:meta])*
        $vis:vis unsafe static $name:ident : fn $sym:literal ( $($aty:ty),* $(,)? ) $(-> $ret:ty)? $(;)?
    ) => {
        $(#[$meta])*
        $vis static $name: $crate::Slot<fn($($aty),*) $(-> $ret)?> =
            $crate::Slot::new(::core::stringify!($name), || {
                unsafe extern "Rust" {
                    #[link_name = $sym]
                    safe fn __keyhole_target($(_: $aty),*) $(-> $ret)?;
                }
                __keyhole_target as fn($($aty),*) $(-> $ret)?
            });

        $crate::__bind_at_startup!($name);
    };
}

/// Wires a slot's binder to program initialization. Internal.
#[doc(hidden)]
#[macro_export]
macro_rules! __bind_at_startup {
    ($slot:ident) => {
        const _: () = {
            $crate::__private::ctor! {
                #[ctor]
                fn bind_slot() {
                    let _ = $crate::Binder::bind(&$slot);
                }
            }
        };
    };
}
