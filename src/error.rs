//! Error taxonomy and translation of the native sentinel-return convention.

use std::ffi::CStr;

use libc::{c_char, c_int};
use thiserror::Error;

/// Represents errors that can occur in the OsslKit library.
///
/// Every variant carries a display-ready message; the numeric error codes of
/// the native library are never part of the public contract.
#[derive(Debug, Error, Clone)]
pub enum OsslKitError {
    /// A required native allocation returned a null sentinel.
    #[error("Native allocation failed: {0}")]
    Allocation(String),

    /// A caller supplied a null pointer where ownership transfer was requested.
    ///
    /// This signals programmer error, not resource exhaustion.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A native cryptographic operation (parse, generate, write, blind) failed.
    ///
    /// The message is drained from the native per-thread diagnostic queue and
    /// may stack multiple causes.
    #[error("Cryptographic operation failed: {0}")]
    Crypto(String),
}

pub type Result<T> = std::result::Result<T, OsslKitError>;

/// Drains the native library's thread-local error queue into a single string.
///
/// Draining consumes the queue: a later drain will not re-observe the same
/// entries. Must run immediately after the failing call, before any other
/// native call happens on this thread.
pub(crate) fn drain_error_queue() -> String {
    let mut causes = Vec::new();

    loop {
        let code = unsafe { openssl_sys::ERR_get_error() };
        if code == 0 {
            break;
        }

        let mut buf = [0 as c_char; 256];
        unsafe { crate::ffi::ERR_error_string_n(code, buf.as_mut_ptr(), buf.len()) };
        let message = unsafe { CStr::from_ptr(buf.as_ptr()) }
            .to_string_lossy()
            .into_owned();
        causes.push(message);
    }

    if causes.is_empty() {
        "no detail reported by the native library".to_string()
    } else {
        causes.join("; ")
    }
}

/// Checks an integer-returning native call: `<= 0` is the failure sentinel.
pub(crate) fn cvt(ret: c_int) -> Result<c_int> {
    if ret <= 0 {
        Err(OsslKitError::Crypto(drain_error_queue()))
    } else {
        Ok(ret)
    }
}

/// Checks a pointer-returning native call: null is the failure sentinel.
pub(crate) fn cvt_p<T>(ptr: *mut T) -> Result<*mut T> {
    if ptr.is_null() {
        Err(OsslKitError::Crypto(drain_error_queue()))
    } else {
        Ok(ptr)
    }
}
