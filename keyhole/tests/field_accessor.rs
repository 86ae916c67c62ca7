//! Field accessors over the layout (mirror) path.

use keyhole::{define_field_accessor, mirror_struct};

mod fixture {
    /// A type that guards its state. Only the `*_for_test` methods grant
    /// full access, standing in for code inside the type's own module.
    #[repr(C)]
    pub struct Vault {
        key: u64,
        attempts: u32,
        open: bool,
    }

    impl Vault {
        pub fn new(key: u64) -> Self {
            Vault {
                key,
                attempts: 0,
                open: false,
            }
        }

        pub fn key_for_test(&self) -> u64 {
            self.key
        }

        pub fn attempts_for_test(&self) -> u32 {
            self.attempts
        }

        pub fn set_attempts_for_test(&mut self, n: u32) {
            self.attempts = n;
        }

        pub fn open_for_test(&self) -> bool {
            self.open
        }
    }
}

use fixture::Vault;

mirror_struct! {
    /// Layout twin of [`fixture::Vault`].
    #[repr(C)]
    unsafe struct VaultMirror mirrors Vault {
        key: u64,
        attempts: u32,
        open: bool,
    }
}

define_field_accessor!(
    static VAULT_KEY for Vault, via VaultMirror, field key: u64
);
define_field_accessor!(
    static VAULT_ATTEMPTS for Vault, via VaultMirror, field attempts: u32
);
define_field_accessor!(
    static VAULT_OPEN for Vault, via VaultMirror, field open: bool
);

#[test]
fn accessor_reads_agree_with_full_access_reads() {
    keyhole_testhelpers::setup();

    let v = Vault::new(0xdead_beef);
    assert_eq!(*VAULT_KEY.of(&v), v.key_for_test());
    assert_eq!(*VAULT_ATTEMPTS.of(&v), v.attempts_for_test());
}

#[test]
fn writes_through_the_accessor_are_seen_by_full_access_reads() {
    keyhole_testhelpers::setup();

    // Read 42 through the accessor, write 43, confirm with a direct read.
    let mut v = Vault::new(42);
    assert_eq!(*VAULT_KEY.of(&v), 42);
    *VAULT_KEY.of_mut(&mut v) = 43;
    assert_eq!(v.key_for_test(), 43);
}

#[test]
fn full_access_writes_are_seen_through_the_accessor() {
    keyhole_testhelpers::setup();

    let mut v = Vault::new(1);
    v.set_attempts_for_test(17);
    assert_eq!(*VAULT_ATTEMPTS.of(&v), 17);
}

#[test]
fn trailing_field_is_reachable_too() {
    keyhole_testhelpers::setup();

    let mut v = Vault::new(2);
    assert!(!v.open_for_test());
    *VAULT_OPEN.of_mut(&mut v) = true;
    assert!(v.open_for_test());
}

#[test]
fn two_accessors_into_one_owner_stay_independent() {
    keyhole_testhelpers::setup();

    let mut v = Vault::new(5);
    *VAULT_ATTEMPTS.of_mut(&mut v) = 99;
    assert_eq!(*VAULT_KEY.of(&v), 5);
    assert_eq!(v.attempts_for_test(), 99);
}

#[test]
fn raw_pointer_access_matches_reference_access() {
    keyhole_testhelpers::setup();

    let v = Vault::new(21);
    let handle = VAULT_KEY.get();
    let raw = unsafe { handle.as_ptr(&raw const v) };
    assert_eq!(unsafe { *raw }, *VAULT_KEY.of(&v));
}

#[test]
fn declared_slots_were_bound_before_the_tests_ran() {
    keyhole_testhelpers::setup();

    // The binders run from pre-main constructors; by the time the test
    // harness starts, both slots are already published.
    assert!(VAULT_KEY.is_bound());
    assert!(VAULT_ATTEMPTS.is_bound());
    assert_eq!(VAULT_KEY.name(), "VAULT_KEY");
}
