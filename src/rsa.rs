//! RSA key entity.

use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use libc::{c_int, c_void};

use crate::bio::ByteStream;
use crate::callback::{PassphraseState, invoke_passphrase, refuse_passphrase};
use crate::error::{OsslKitError, Result, cvt, cvt_p};
use crate::ffi;
use crate::handle::Handle;

/// An RSA key, with or without a private compound.
///
/// `RsaKey` is a low-level structure that offers no means to know whether the
/// represented key is public or private: it is up to the caller to ensure
/// that private-key operations only run on instances carrying private
/// material.
///
/// An `RsaKey` has the same semantics as the native pointer it wraps: copies
/// of an instance share the same underlying structure, and `==` compares that
/// pointer, not the key contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKey {
    pub(crate) handle: Handle<openssl_sys::RSA>,
}

impl RsaKey {
    /// Allocates a new empty RSA structure.
    pub fn new() -> Result<RsaKey> {
        openssl_sys::init();
        let ptr = unsafe { openssl_sys::RSA_new() };
        Ok(RsaKey {
            handle: unsafe { Handle::owned(ptr, openssl_sys::RSA_free) }?,
        })
    }

    /// Generates a new RSA key, blocking the calling thread for the duration.
    ///
    /// `modulus_bits` below 1024 are considered insecure; the wrapper does not
    /// enforce a minimum. `exponent` must be odd, typically 3, 17 or 65537.
    pub fn generate(modulus_bits: u32, exponent: u64) -> Result<RsaKey> {
        Self::generate_inner(modulus_bits, exponent, ptr::null_mut())
    }

    /// Like [`RsaKey::generate`], reporting progress through `progress`.
    ///
    /// The native routine invokes `progress` synchronously with its raw
    /// `(kind, count)` codes while generation runs; there is no separate
    /// thread, and generation still blocks the caller until it completes.
    pub fn generate_with_progress<F>(
        modulus_bits: u32,
        exponent: u64,
        progress: F,
    ) -> Result<RsaKey>
    where
        F: FnMut(i32, i32),
    {
        let mut state = ProgressState {
            callback: progress,
            panic: None,
        };

        openssl_sys::init();
        let gencb = unsafe { ffi::BN_GENCB_new() };
        if gencb.is_null() {
            return Err(OsslKitError::Allocation(
                crate::error::drain_error_queue(),
            ));
        }
        unsafe {
            ffi::BN_GENCB_set(
                gencb,
                Some(progress_trampoline::<F>),
                &mut state as *mut ProgressState<F> as *mut c_void,
            );
        }

        let generated = Self::generate_inner(modulus_bits, exponent, gencb);
        unsafe { ffi::BN_GENCB_free(gencb) };

        if let Some(payload) = state.panic {
            panic::resume_unwind(payload);
        }
        generated
    }

    fn generate_inner(
        modulus_bits: u32,
        exponent: u64,
        gencb: *mut openssl_sys::BN_GENCB,
    ) -> Result<RsaKey> {
        let key = RsaKey::new()?;

        let exponent_bn = unsafe { Handle::owned(openssl_sys::BN_new(), openssl_sys::BN_free) }?;
        cvt(unsafe {
            openssl_sys::BN_set_word(exponent_bn.as_ptr(), exponent as openssl_sys::BN_ULONG)
        })?;

        cvt(unsafe {
            openssl_sys::RSA_generate_key_ex(
                key.as_ptr(),
                modulus_bits as c_int,
                exponent_bn.as_ptr(),
                gencb,
            )
        })?;

        Ok(key)
    }

    /// Reads a PEM-encoded private key from `stream`.
    ///
    /// If the encoded data is encrypted, the parse fails: no passphrase is
    /// supplied and the native terminal prompt is never engaged. Use
    /// [`RsaKey::private_key_from_pem_with_passphrase`] instead.
    pub fn private_key_from_pem(stream: &ByteStream<'_>) -> Result<RsaKey> {
        let ptr = cvt_p(unsafe {
            openssl_sys::PEM_read_bio_RSAPrivateKey(
                stream.as_ptr(),
                ptr::null_mut(),
                Some(refuse_passphrase),
                ptr::null_mut(),
            )
        })?;
        Ok(RsaKey {
            handle: unsafe { Handle::owned(ptr, openssl_sys::RSA_free) }?,
        })
    }

    /// Reads a PEM-encoded private key, decrypting it with a passphrase.
    ///
    /// `passphrase` is invoked synchronously from inside the native decode
    /// whenever one is needed: it writes the passphrase into the provided
    /// buffer and returns the number of bytes written. Returning 0 makes the
    /// parse fail.
    pub fn private_key_from_pem_with_passphrase<F>(
        stream: &ByteStream<'_>,
        passphrase: F,
    ) -> Result<RsaKey>
    where
        F: FnOnce(&mut [u8]) -> usize,
    {
        let mut state = PassphraseState::new(passphrase);
        let ptr = unsafe {
            openssl_sys::PEM_read_bio_RSAPrivateKey(
                stream.as_ptr(),
                ptr::null_mut(),
                Some(invoke_passphrase::<F>),
                state.as_user_data(),
            )
        };
        state.rethrow();

        Ok(RsaKey {
            handle: unsafe { Handle::owned(cvt_p(ptr)?, openssl_sys::RSA_free) }?,
        })
    }

    /// Writes the private key to `stream` in unencrypted PEM form.
    pub fn private_key_to_pem(&self, stream: &ByteStream<'_>) -> Result<()> {
        cvt(unsafe {
            openssl_sys::PEM_write_bio_RSAPrivateKey(
                stream.as_ptr(),
                self.as_ptr(),
                ptr::null(),
                ptr::null_mut(),
                0,
                None,
                ptr::null_mut(),
            )
        })?;
        Ok(())
    }

    /// Writes the private key to `stream` in PEM form, encrypted with
    /// AES-256-CBC under `passphrase`.
    pub fn private_key_to_pem_encrypted(
        &self,
        stream: &ByteStream<'_>,
        passphrase: &[u8],
    ) -> Result<()> {
        cvt(unsafe {
            openssl_sys::PEM_write_bio_RSAPrivateKey(
                stream.as_ptr(),
                self.as_ptr(),
                openssl_sys::EVP_aes_256_cbc(),
                passphrase.as_ptr() as *mut _,
                passphrase.len() as c_int,
                None,
                ptr::null_mut(),
            )
        })?;
        Ok(())
    }

    /// Reads a PEM-encoded public key from `stream`.
    pub fn public_key_from_pem(stream: &ByteStream<'_>) -> Result<RsaKey> {
        let ptr = cvt_p(unsafe {
            openssl_sys::PEM_read_bio_RSA_PUBKEY(
                stream.as_ptr(),
                ptr::null_mut(),
                Some(refuse_passphrase),
                ptr::null_mut(),
            )
        })?;
        Ok(RsaKey {
            handle: unsafe { Handle::owned(ptr, openssl_sys::RSA_free) }?,
        })
    }

    /// Writes the public part of the key to `stream` in PEM form.
    pub fn public_key_to_pem(&self, stream: &ByteStream<'_>) -> Result<()> {
        cvt(unsafe { openssl_sys::PEM_write_bio_RSA_PUBKEY(stream.as_ptr(), self.as_ptr()) })?;
        Ok(())
    }

    /// Enables blinding to prevent timing attacks on private-key operations.
    ///
    /// The process-wide random generator must be seeded before this call; the
    /// wrapper neither seeds it nor checks that it has been seeded.
    pub fn enable_blinding(&self) -> Result<()> {
        cvt(unsafe { ffi::RSA_blinding_on(self.as_ptr(), ptr::null_mut()) })?;
        Ok(())
    }

    /// Disables blinding after a previous [`RsaKey::enable_blinding`].
    pub fn disable_blinding(&self) {
        unsafe { ffi::RSA_blinding_off(self.as_ptr()) };
    }

    /// The exact size of the modulus, in bits.
    ///
    /// Returns 0 for a key that carries no modulus yet (a freshly allocated
    /// empty structure).
    pub fn modulus_bits(&self) -> u32 {
        let modulus = unsafe { ffi::RSA_get0_n(self.as_ptr()) };
        if modulus.is_null() {
            return 0;
        }
        unsafe { openssl_sys::BN_num_bits(modulus) as u32 }
    }

    /// Returns the raw native pointer without transferring ownership.
    ///
    /// The instance keeps ownership: freeing the returned pointer results in
    /// undefined behavior.
    pub fn as_ptr(&self) -> *mut openssl_sys::RSA {
        self.handle.as_ptr()
    }
}

struct ProgressState<F> {
    callback: F,
    panic: Option<Box<dyn std::any::Any + Send>>,
}

unsafe extern "C" fn progress_trampoline<F>(
    kind: c_int,
    count: c_int,
    gencb: *mut openssl_sys::BN_GENCB,
) -> c_int
where
    F: FnMut(i32, i32),
{
    let state = unsafe { &mut *(ffi::BN_GENCB_get_arg(gencb) as *mut ProgressState<F>) };

    match panic::catch_unwind(AssertUnwindSafe(|| (state.callback)(kind, count))) {
        Ok(()) => 1,
        Err(payload) => {
            state.panic = Some(payload);
            0
        }
    }
}
