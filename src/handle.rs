//! Shared ownership over opaque native pointers.
//!
//! Every wrapped entity in this crate stores its native pointer inside a
//! [`Handle`]. Copies of a handle are cheap and reference-counted; the native
//! destructor runs exactly once, when the last copy goes out of scope. A
//! handle never exists in a valid-but-null state: constructing one from a
//! null pointer fails immediately.

use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use crate::error::{OsslKitError, Result, drain_error_queue};

/// The native destructor signature shared by the library's free functions.
pub type NativeDrop<T> = unsafe extern "C" fn(*mut T);

struct Inner<T> {
    ptr: NonNull<T>,
    drop_fn: Option<NativeDrop<T>>,
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        if let Some(drop_fn) = self.drop_fn {
            unsafe { drop_fn(self.ptr.as_ptr()) };
        }
    }
}

/// A reference-counted wrapper around an opaque native pointer.
///
/// Two handles compare equal iff they reference the same pointer value,
/// regardless of reference-count bookkeeping. The reference count itself is
/// atomic; the pointed-to native structure is not synchronized by this layer.
pub struct Handle<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Handle<T> {
    /// Takes ownership of `ptr`, freeing it with `drop_fn` on last release.
    ///
    /// Fails with [`OsslKitError::Allocation`] if `ptr` is null, carrying
    /// whatever the native library left in its diagnostic queue.
    ///
    /// # Safety
    ///
    /// `ptr` must either be null or point to a live native structure that no
    /// other owner will free: adopting the same pointer into two owning
    /// handles double-frees.
    pub unsafe fn owned(ptr: *mut T, drop_fn: NativeDrop<T>) -> Result<Self> {
        match NonNull::new(ptr) {
            Some(ptr) => Ok(Handle {
                inner: Arc::new(Inner {
                    ptr,
                    drop_fn: Some(drop_fn),
                }),
            }),
            None => Err(OsslKitError::Allocation(drain_error_queue())),
        }
    }

    /// Wraps `ptr` without taking ownership: no destructor runs on release.
    ///
    /// # Safety
    ///
    /// The storage behind `ptr` is owned elsewhere and must outlive every
    /// copy of the returned handle.
    pub unsafe fn borrowed(ptr: *mut T) -> Result<Self> {
        match NonNull::new(ptr) {
            Some(ptr) => Ok(Handle {
                inner: Arc::new(Inner { ptr, drop_fn: None }),
            }),
            None => Err(OsslKitError::Allocation(drain_error_queue())),
        }
    }

    /// Returns the underlying native pointer without transferring ownership.
    ///
    /// Calling the native destructor on the returned pointer results in a
    /// double free and undefined behavior.
    pub fn as_ptr(&self) -> *mut T {
        self.inner.ptr.as_ptr()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Handle {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for Handle<T> {
    /// Identity comparison: same underlying pointer, not same pointee contents.
    fn eq(&self, other: &Self) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("ptr", &self.inner.ptr)
            .field("owning", &self.inner.drop_fn.is_some())
            .finish()
    }
}
