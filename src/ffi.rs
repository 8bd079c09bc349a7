//! Supplemental libcrypto declarations missing from `openssl-sys`.
//!
//! Signatures checked against the OpenSSL 3.0 headers. Linkage comes from the
//! `openssl-sys` build script, so these resolve against the same libcrypto.

use libc::{c_char, c_int, c_ulong, c_void, size_t};
use openssl_sys::{BIGNUM, BIO, BN_CTX, BN_GENCB, RSA, X509, X509_NAME, pem_password_cb};

unsafe extern "C" {
    pub fn ERR_error_string_n(e: c_ulong, buf: *mut c_char, len: size_t);

    pub fn BIO_new_file(filename: *const c_char, mode: *const c_char) -> *mut BIO;

    pub fn PEM_read_bio_X509_AUX(
        bio: *mut BIO,
        out: *mut *mut X509,
        callback: pem_password_cb,
        user_data: *mut c_void,
    ) -> *mut X509;
    pub fn PEM_write_bio_X509_AUX(bio: *mut BIO, x509: *const X509) -> c_int;

    pub fn d2i_X509_bio(bio: *mut BIO, out: *mut *mut X509) -> *mut X509;
    pub fn i2d_X509_bio(bio: *mut BIO, x509: *const X509) -> c_int;

    pub fn RSA_blinding_on(rsa: *mut RSA, ctx: *mut BN_CTX) -> c_int;
    pub fn RSA_blinding_off(rsa: *mut RSA);
    pub fn RSA_get0_n(rsa: *const RSA) -> *const BIGNUM;

    pub fn BN_GENCB_new() -> *mut BN_GENCB;
    pub fn BN_GENCB_free(cb: *mut BN_GENCB);
    pub fn BN_GENCB_set(
        cb: *mut BN_GENCB,
        callback: Option<unsafe extern "C" fn(c_int, c_int, *mut BN_GENCB) -> c_int>,
        cb_arg: *mut c_void,
    );
    pub fn BN_GENCB_get_arg(cb: *mut BN_GENCB) -> *mut c_void;

    pub fn X509_NAME_cmp(a: *const X509_NAME, b: *const X509_NAME) -> c_int;
    pub fn X509_NAME_oneline(a: *const X509_NAME, buf: *mut c_char, size: c_int)
    -> *mut c_char;
}
