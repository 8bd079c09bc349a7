//! X.509 certificate entity.

pub mod name;

use std::ptr;

use crate::bio::ByteStream;
use crate::callback::{PassphraseState, invoke_passphrase, refuse_passphrase};
use crate::error::{OsslKitError, Result, cvt, cvt_p};
use crate::ffi;
use crate::handle::Handle;
use crate::pkey::PKey;

use name::NameRef;

/// An X.509 certificate.
///
/// A `Certificate` has the same semantics as the native pointer it wraps:
/// copies of an instance share the same underlying structure, and `==`
/// compares that pointer. Two certificates parsed independently from
/// identical bytes therefore compare unequal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    handle: Handle<openssl_sys::X509>,
}

impl Certificate {
    /// Allocates a new empty certificate structure.
    pub fn new() -> Result<Certificate> {
        openssl_sys::init();
        let ptr = unsafe { openssl_sys::X509_new() };
        Ok(Certificate {
            handle: unsafe { Handle::owned(ptr, openssl_sys::X509_free) }?,
        })
    }

    /// Takes ownership of an already-allocated native certificate pointer.
    ///
    /// Fails with [`OsslKitError::InvalidArgument`] if `ptr` is null; nothing
    /// is allocated in that case.
    ///
    /// # Safety
    ///
    /// `ptr` must either be null or point to a live native certificate that
    /// no other owner will free.
    pub unsafe fn from_raw(ptr: *mut openssl_sys::X509) -> Result<Certificate> {
        if ptr.is_null() {
            return Err(OsslKitError::InvalidArgument(
                "null certificate pointer".to_string(),
            ));
        }
        Ok(Certificate {
            handle: unsafe { Handle::owned(ptr, openssl_sys::X509_free) }?,
        })
    }

    /// Reads a plain PEM-encoded certificate from `stream`.
    ///
    /// The native matcher rejects the trusted encoding here; use
    /// [`Certificate::from_trusted_pem`] for those blocks. To discard trust
    /// metadata, read trusted and write plain. Encrypted input fails: no
    /// passphrase is supplied and the native terminal prompt is never
    /// engaged.
    pub fn from_pem(stream: &ByteStream<'_>) -> Result<Certificate> {
        let ptr = cvt_p(unsafe {
            openssl_sys::PEM_read_bio_X509(
                stream.as_ptr(),
                ptr::null_mut(),
                Some(refuse_passphrase),
                ptr::null_mut(),
            )
        })?;
        Ok(Certificate {
            handle: unsafe { Handle::owned(ptr, openssl_sys::X509_free) }?,
        })
    }

    /// Like [`Certificate::from_pem`], decrypting protected input with a
    /// passphrase.
    ///
    /// `passphrase` is invoked synchronously from inside the native decode
    /// whenever one is needed: it writes the passphrase into the provided
    /// buffer and returns the number of bytes written. Returning 0 makes the
    /// parse fail.
    pub fn from_pem_with_passphrase<F>(stream: &ByteStream<'_>, passphrase: F) -> Result<Certificate>
    where
        F: FnOnce(&mut [u8]) -> usize,
    {
        let mut state = PassphraseState::new(passphrase);
        let ptr = unsafe {
            openssl_sys::PEM_read_bio_X509(
                stream.as_ptr(),
                ptr::null_mut(),
                Some(invoke_passphrase::<F>),
                state.as_user_data(),
            )
        };
        state.rethrow();

        Ok(Certificate {
            handle: unsafe { Handle::owned(cvt_p(ptr)?, openssl_sys::X509_free) }?,
        })
    }

    /// Reads a trusted PEM-encoded certificate from `stream`, including its
    /// auxiliary trust metadata. Plain blocks are accepted too.
    pub fn from_trusted_pem(stream: &ByteStream<'_>) -> Result<Certificate> {
        let ptr = cvt_p(unsafe {
            ffi::PEM_read_bio_X509_AUX(
                stream.as_ptr(),
                ptr::null_mut(),
                Some(refuse_passphrase),
                ptr::null_mut(),
            )
        })?;
        Ok(Certificate {
            handle: unsafe { Handle::owned(ptr, openssl_sys::X509_free) }?,
        })
    }

    /// Like [`Certificate::from_trusted_pem`], decrypting protected input
    /// with a passphrase.
    pub fn from_trusted_pem_with_passphrase<F>(
        stream: &ByteStream<'_>,
        passphrase: F,
    ) -> Result<Certificate>
    where
        F: FnOnce(&mut [u8]) -> usize,
    {
        let mut state = PassphraseState::new(passphrase);
        let ptr = unsafe {
            ffi::PEM_read_bio_X509_AUX(
                stream.as_ptr(),
                ptr::null_mut(),
                Some(invoke_passphrase::<F>),
                state.as_user_data(),
            )
        };
        state.rethrow();

        Ok(Certificate {
            handle: unsafe { Handle::owned(cvt_p(ptr)?, openssl_sys::X509_free) }?,
        })
    }

    /// Reads a DER-encoded certificate from `stream`.
    pub fn from_der(stream: &ByteStream<'_>) -> Result<Certificate> {
        let ptr = cvt_p(unsafe { ffi::d2i_X509_bio(stream.as_ptr(), ptr::null_mut()) })?;
        Ok(Certificate {
            handle: unsafe { Handle::owned(ptr, openssl_sys::X509_free) }?,
        })
    }

    /// Writes the certificate to `stream` in PEM form, without trust metadata.
    pub fn to_pem(&self, stream: &ByteStream<'_>) -> Result<()> {
        cvt(unsafe { openssl_sys::PEM_write_bio_X509(stream.as_ptr(), self.as_ptr()) })?;
        Ok(())
    }

    /// Writes the certificate and its trust metadata to `stream` in PEM form.
    pub fn to_trusted_pem(&self, stream: &ByteStream<'_>) -> Result<()> {
        cvt(unsafe { ffi::PEM_write_bio_X509_AUX(stream.as_ptr(), self.as_ptr()) })?;
        Ok(())
    }

    /// Writes the certificate to `stream` in DER form.
    pub fn to_der(&self, stream: &ByteStream<'_>) -> Result<()> {
        cvt(unsafe { ffi::i2d_X509_bio(stream.as_ptr(), self.as_ptr()) })?;
        Ok(())
    }

    /// Extracts the embedded public key.
    ///
    /// The returned key is an independently owned reference obtained through
    /// the native library's reference-counting call; it is safe to outlive
    /// this certificate.
    pub fn public_key(&self) -> Result<PKey> {
        let ptr = cvt_p(unsafe { openssl_sys::X509_get_pubkey(self.as_ptr()) })?;
        Ok(PKey {
            handle: unsafe { Handle::owned(ptr, openssl_sys::EVP_PKEY_free) }?,
        })
    }

    /// The subject name, as a view into certificate-owned memory.
    pub fn subject(&self) -> NameRef<'_> {
        // Never null on a live certificate handle.
        unsafe { NameRef::from_ptr(openssl_sys::X509_get_subject_name(self.as_ptr())) }
    }

    /// The issuer name, as a view into certificate-owned memory.
    pub fn issuer(&self) -> NameRef<'_> {
        unsafe { NameRef::from_ptr(openssl_sys::X509_get_issuer_name(self.as_ptr())) }
    }

    /// Returns the raw native pointer without transferring ownership.
    ///
    /// The instance keeps ownership: freeing the returned pointer results in
    /// undefined behavior.
    pub fn as_ptr(&self) -> *mut openssl_sys::X509 {
        self.handle.as_ptr()
    }
}
