use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

use osslkit::error::OsslKitError;
use osslkit::handle::Handle;

// Each test instruments its own destructor: tests run in parallel, so a
// shared counter would observe frees from neighboring tests.

static FREED_SHARED: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn counting_free_shared(ptr: *mut u8) {
    FREED_SHARED.fetch_add(1, Ordering::SeqCst);
    drop(unsafe { Box::from_raw(ptr) });
}

/// Copying a handle N times and dropping all N+1 references must run the
/// destructor exactly once.
#[test]
fn destructor_runs_exactly_once() {
    let raw = Box::into_raw(Box::new(42u8));
    let handle = unsafe { Handle::owned(raw, counting_free_shared) }.unwrap();

    let copies: Vec<Handle<u8>> = (0..8).map(|_| handle.clone()).collect();
    assert_eq!(FREED_SHARED.load(Ordering::SeqCst), 0);

    drop(handle);
    assert_eq!(
        FREED_SHARED.load(Ordering::SeqCst),
        0,
        "destructor ran while copies were alive"
    );

    drop(copies);
    assert_eq!(FREED_SHARED.load(Ordering::SeqCst), 1);
}

static FREED_NULL: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn counting_free_null(ptr: *mut u8) {
    FREED_NULL.fetch_add(1, Ordering::SeqCst);
    drop(unsafe { Box::from_raw(ptr) });
}

/// A null pointer can never become a handle, and no destructor is attached.
#[test]
fn owned_null_pointer_is_an_allocation_error() {
    let err = unsafe { Handle::<u8>::owned(ptr::null_mut(), counting_free_null) }.unwrap_err();
    assert!(matches!(err, OsslKitError::Allocation(_)), "got {err:?}");
    assert_eq!(FREED_NULL.load(Ordering::SeqCst), 0);
}

/// A borrowed handle aliases storage owned elsewhere and never frees it.
#[test]
fn borrowed_handle_never_frees() {
    let mut value = 7u8;
    let view = unsafe { Handle::borrowed(&mut value as *mut u8) }.unwrap();
    let copy = view.clone();

    drop(view);
    drop(copy);

    // Still alive and untouched: no destructor ran.
    assert_eq!(value, 7);
}

#[test]
fn borrowed_null_pointer_is_rejected() {
    let err = unsafe { Handle::<u8>::borrowed(ptr::null_mut()) }.unwrap_err();
    assert!(matches!(err, OsslKitError::Allocation(_)), "got {err:?}");
}

unsafe extern "C" fn plain_free(ptr: *mut u8) {
    drop(unsafe { Box::from_raw(ptr) });
}

/// Handles compare by pointer identity: copies are equal, distinct
/// allocations are not, whatever their contents.
#[test]
fn equality_is_pointer_identity() {
    let a = unsafe { Handle::owned(Box::into_raw(Box::new(1u8)), plain_free) }.unwrap();
    let b = unsafe { Handle::owned(Box::into_raw(Box::new(1u8)), plain_free) }.unwrap();

    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_eq!(a.clone().as_ptr(), a.as_ptr());
}
