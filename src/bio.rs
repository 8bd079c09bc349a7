//! Byte-stream adapter over the native BIO abstraction.

use std::marker::PhantomData;
use std::path::Path;
use std::ptr;
use std::slice;

use libc::c_char;
use std::ffi::CString;

use crate::error::{OsslKitError, Result, cvt_p};
use crate::ffi;
use crate::handle::Handle;

/// A byte stream handed to the native encode/decode routines.
///
/// Backing modes: a read-only view over a caller-supplied byte slice, a
/// growable in-memory sink, a file in the host environment, or an existing
/// native stream object supplied by the caller. Copies share the same
/// underlying stream; the native resource is released when the last owning
/// copy goes out of scope.
///
/// The lifetime parameter ties a slice-backed stream to the bytes it reads
/// from; the other backings are `'static`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteStream<'a> {
    handle: Handle<openssl_sys::BIO>,
    _source: PhantomData<&'a [u8]>,
}

impl<'a> ByteStream<'a> {
    /// Creates a read-only stream over `data` without copying it.
    pub fn from_slice(data: &'a [u8]) -> Result<ByteStream<'a>> {
        if data.len() > libc::c_int::MAX as usize {
            return Err(OsslKitError::InvalidArgument(
                "byte slice too large for a memory stream".to_string(),
            ));
        }

        openssl_sys::init();
        let ptr = unsafe {
            openssl_sys::BIO_new_mem_buf(data.as_ptr() as *const _, data.len() as libc::c_int)
        };

        Ok(ByteStream {
            handle: unsafe { Handle::owned(ptr, openssl_sys::BIO_free_all) }?,
            _source: PhantomData,
        })
    }
}

impl ByteStream<'static> {
    /// Creates a growable in-memory sink.
    pub fn memory() -> Result<ByteStream<'static>> {
        openssl_sys::init();
        let ptr = unsafe { openssl_sys::BIO_new(openssl_sys::BIO_s_mem()) };

        Ok(ByteStream {
            handle: unsafe { Handle::owned(ptr, openssl_sys::BIO_free_all) }?,
            _source: PhantomData,
        })
    }

    /// Opens `path` for reading.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<ByteStream<'static>> {
        Self::open_file(path.as_ref(), "rb")
    }

    /// Creates or truncates `path` for writing.
    pub fn write_file<P: AsRef<Path>>(path: P) -> Result<ByteStream<'static>> {
        Self::open_file(path.as_ref(), "wb")
    }

    fn open_file(path: &Path, mode: &str) -> Result<ByteStream<'static>> {
        let path = path
            .to_str()
            .and_then(|p| CString::new(p).ok())
            .ok_or_else(|| {
                OsslKitError::InvalidArgument("file path is not a valid C string".to_string())
            })?;
        let mode = CString::new(mode).map_err(|_| {
            OsslKitError::InvalidArgument("file mode is not a valid C string".to_string())
        })?;

        openssl_sys::init();
        let ptr = cvt_p(unsafe { ffi::BIO_new_file(path.as_ptr(), mode.as_ptr()) })?;

        Ok(ByteStream {
            handle: unsafe { Handle::owned(ptr, openssl_sys::BIO_free_all) }?,
            _source: PhantomData,
        })
    }

    /// Wraps an existing native stream object supplied by the caller.
    ///
    /// The returned stream is a non-owning view: the caller keeps the
    /// destruction policy and must keep `ptr` alive for as long as any copy
    /// of the view exists.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live native BIO.
    pub unsafe fn from_borrowed_ptr(ptr: *mut openssl_sys::BIO) -> Result<ByteStream<'static>> {
        Ok(ByteStream {
            handle: unsafe { Handle::borrowed(ptr) }?,
            _source: PhantomData,
        })
    }
}

impl ByteStream<'_> {
    /// Returns the native stream pointer for use in encode/decode calls.
    ///
    /// The stream keeps ownership: freeing the returned pointer is undefined
    /// behavior.
    pub fn as_ptr(&self) -> *mut openssl_sys::BIO {
        self.handle.as_ptr()
    }

    /// Snapshots the bytes accumulated in a memory-backed stream.
    ///
    /// Returns an empty vector for backings that expose no memory buffer
    /// (files, caller-supplied streams).
    pub fn contents(&self) -> Vec<u8> {
        let mut data: *mut c_char = ptr::null_mut();
        let len = unsafe { openssl_sys::BIO_get_mem_data(self.as_ptr(), &mut data) };

        if data.is_null() || len <= 0 {
            return Vec::new();
        }

        unsafe { slice::from_raw_parts(data as *const u8, len as usize) }.to_vec()
    }
}
