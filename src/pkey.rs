//! Generic asymmetric key envelope (the native `EVP_PKEY` structure).

use crate::error::{Result, cvt, cvt_p};
use crate::handle::Handle;
use crate::rsa::RsaKey;

/// An asymmetric key envelope, as returned by
/// [`Certificate::public_key`](crate::x509::Certificate::public_key).
///
/// Copies share the same underlying native structure; `==` compares the
/// wrapped pointer, not the key contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PKey {
    pub(crate) handle: Handle<openssl_sys::EVP_PKEY>,
}

impl PKey {
    /// Allocates a new empty key envelope.
    pub fn new() -> Result<PKey> {
        openssl_sys::init();
        let ptr = unsafe { openssl_sys::EVP_PKEY_new() };
        Ok(PKey {
            handle: unsafe { Handle::owned(ptr, openssl_sys::EVP_PKEY_free) }?,
        })
    }

    /// Creates an envelope referencing `key`.
    ///
    /// The native library increments the key's own reference count, so the
    /// envelope and `key` may be dropped in any order.
    pub fn from_rsa(key: &RsaKey) -> Result<PKey> {
        let pkey = PKey::new()?;
        cvt(unsafe { openssl_sys::EVP_PKEY_set1_RSA(pkey.as_ptr(), key.as_ptr()) })?;
        Ok(pkey)
    }

    /// Extracts the RSA key held by this envelope.
    ///
    /// The returned key is an independently owned reference obtained through
    /// the native library's reference-counting call; it is safe to outlive
    /// this envelope. Fails if the envelope holds no RSA key.
    pub fn rsa(&self) -> Result<RsaKey> {
        let ptr = cvt_p(unsafe { openssl_sys::EVP_PKEY_get1_RSA(self.as_ptr()) })?;
        Ok(RsaKey {
            handle: unsafe { Handle::owned(ptr, openssl_sys::RSA_free) }?,
        })
    }

    /// Returns the raw native pointer without transferring ownership.
    ///
    /// The instance keeps ownership: freeing the returned pointer results in
    /// undefined behavior.
    pub fn as_ptr(&self) -> *mut openssl_sys::EVP_PKEY {
        self.handle.as_ptr()
    }
}
