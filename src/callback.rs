//! Passphrase callback plumbing shared by the PEM decode paths.
//!
//! The native parser invokes the passphrase callback synchronously, from
//! inside the decode call, and blocks until it returns. A panic raised by the
//! user closure must not unwind across the C frame; it is caught here and
//! resumed once the native call has returned.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::slice;

use libc::{c_char, c_int, c_void};

pub(crate) struct PassphraseState<F> {
    callback: Option<F>,
    pub(crate) panic: Option<Box<dyn Any + Send>>,
}

impl<F> PassphraseState<F>
where
    F: FnOnce(&mut [u8]) -> usize,
{
    pub(crate) fn new(callback: F) -> Self {
        PassphraseState {
            callback: Some(callback),
            panic: None,
        }
    }

    pub(crate) fn as_user_data(&mut self) -> *mut c_void {
        self as *mut Self as *mut c_void
    }

    /// Re-raises a panic captured inside the trampoline, if any.
    pub(crate) fn rethrow(self) {
        if let Some(payload) = self.panic {
            panic::resume_unwind(payload);
        }
    }
}

/// Trampoline matching the native `pem_password_cb` convention.
///
/// Writes the user-supplied passphrase into the native buffer and returns its
/// length; `0` or a negative value makes the surrounding decode fail.
pub(crate) unsafe extern "C" fn invoke_passphrase<F>(
    buf: *mut c_char,
    size: c_int,
    _rwflag: c_int,
    user_data: *mut c_void,
) -> c_int
where
    F: FnOnce(&mut [u8]) -> usize,
{
    let state = unsafe { &mut *(user_data as *mut PassphraseState<F>) };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let callback = state.callback.take()?;
        let buffer = unsafe { slice::from_raw_parts_mut(buf as *mut u8, size as usize) };
        Some(callback(buffer))
    }));

    match outcome {
        Ok(Some(len)) if len <= size as usize => len as c_int,
        Ok(_) => 0,
        Err(payload) => {
            state.panic = Some(payload);
            -1
        }
    }
}

/// Installed by the no-callback decode paths instead of a null callback.
///
/// The native default would prompt on the controlling terminal; refusing
/// outright turns "encrypted data, no passphrase supplied" into a reported
/// decode failure.
pub(crate) unsafe extern "C" fn refuse_passphrase(
    _buf: *mut c_char,
    _size: c_int,
    _rwflag: c_int,
    _user_data: *mut c_void,
) -> c_int {
    0
}
