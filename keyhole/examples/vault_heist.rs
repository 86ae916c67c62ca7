//! All four accessor shapes against one guarded type.
//!
//! Run with `cargo run --example vault_heist`.

mod target {
    use core::ptr;

    /// The type under siege: everything interesting is private.
    #[repr(C)]
    pub struct TestLock {
        value: i32,
    }

    #[unsafe(export_name = "demo_lock_instance")]
    static mut INSTANCE: *const TestLock = ptr::null();

    impl TestLock {
        pub fn new() -> Self {
            TestLock { value: 42 }
        }

        #[unsafe(export_name = "demo_lock_increment")]
        fn increment(&mut self) {
            self.value += 1;
        }

        #[unsafe(export_name = "demo_lock_register")]
        fn register(lock: *const TestLock) -> bool {
            unsafe {
                INSTANCE = lock;
            }
            true
        }

        pub fn report(&self) {
            let instance = unsafe { INSTANCE };
            println!("instance {instance:?} value {}", self.value);
        }
    }
}

use target::TestLock;

keyhole::mirror_struct! {
    #[repr(C)]
    unsafe struct TestLockMirror mirrors TestLock {
        value: i32,
    }
}

keyhole::define_field_accessor!(
    static LOCK_VALUE for TestLock, via TestLockMirror, field value: i32
);
keyhole::define_method_accessor!(
    unsafe static LOCK_INCREMENT: fn "demo_lock_increment"(&mut TestLock)
);
keyhole::define_static_accessor!(
    unsafe static LOCK_INSTANCE: static "demo_lock_instance": *const TestLock
);
keyhole::define_static_fn_accessor!(
    unsafe static LOCK_REGISTER: fn "demo_lock_register"(*const TestLock) -> bool
);

fn main() {
    let mut lock = TestLock::new();

    // Read the private field, then overwrite it.
    assert_eq!(*LOCK_VALUE.of(&lock), 42);
    *LOCK_VALUE.of_mut(&mut lock) = 43;

    // Invoke the private method.
    LOCK_INCREMENT.get()(&mut lock);
    assert_eq!(*LOCK_VALUE.of(&lock), 44);

    // Call the private static function...
    assert!(LOCK_REGISTER.get()(&raw const lock));

    // ...and observe its effect through the static-variable accessor.
    assert_eq!(unsafe { LOCK_INSTANCE.read() }, &raw const lock);

    lock.report();
}
