//! Static-variable and static-function accessors over the linker path.

use core::ptr;

use keyhole::{define_static_accessor, define_static_fn_accessor};

mod fixture {
    use core::ptr;

    pub struct Vault {
        _key: u64,
    }

    impl Vault {
        pub fn new(key: u64) -> Self {
            Vault { _key: key }
        }

        /// Full-access read of the private registry, standing in for
        /// internal logic.
        pub fn last_registered_for_test() -> *const Vault {
            unsafe { LAST_REGISTERED }
        }

        #[unsafe(export_name = "kh_test_vault_register")]
        fn register(vault: *const Vault) -> bool {
            unsafe {
                LAST_REGISTERED = vault;
            }
            true
        }
    }

    #[unsafe(export_name = "kh_test_vault_last_registered")]
    static mut LAST_REGISTERED: *const Vault = ptr::null();

    #[unsafe(export_name = "kh_test_vault_generation")]
    static mut GENERATION: u32 = 1;

    /// Internal bump of the private counter.
    pub fn advance_generation_for_test() {
        unsafe {
            GENERATION += 1;
        }
    }
}

use fixture::Vault;

define_static_accessor!(
    unsafe static LAST_REGISTERED: static "kh_test_vault_last_registered": *const Vault
);
define_static_accessor!(
    unsafe static GENERATION: static "kh_test_vault_generation": u32
);
define_static_fn_accessor!(
    unsafe static REGISTER: fn "kh_test_vault_register"(*const Vault) -> bool
);

#[test]
fn register_scenario_round_trips_through_both_accessors() {
    keyhole_testhelpers::setup();

    let v = Vault::new(3);
    let v_ptr: *const Vault = &raw const v;

    // The function returns true and records the pointer it was passed;
    // the static accessor then reports that same pointer.
    assert!(REGISTER.get()(v_ptr));
    assert_eq!(unsafe { LAST_REGISTERED.read() }, v_ptr);
    assert_eq!(Vault::last_registered_for_test(), v_ptr);

    // Reset so other tests see a quiet registry.
    unsafe { LAST_REGISTERED.write(ptr::null()) };
    assert!(Vault::last_registered_for_test().is_null());
}

#[test]
fn static_accessor_and_internal_reads_always_agree() {
    keyhole_testhelpers::setup();

    let before = unsafe { GENERATION.read() };
    fixture::advance_generation_for_test();
    assert_eq!(unsafe { GENERATION.read() }, before + 1);

    unsafe { GENERATION.write(before + 10) };
    fixture::advance_generation_for_test();
    assert_eq!(unsafe { GENERATION.read() }, before + 11);
}

#[test]
fn static_slots_expose_their_storage_address() {
    keyhole_testhelpers::setup();

    assert!(!LAST_REGISTERED.as_ptr().is_null());
    assert!(!GENERATION.as_ptr().is_null());
    assert!(LAST_REGISTERED.is_bound());
    assert!(REGISTER.is_bound());
}
