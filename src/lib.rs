//! # OsslKit - A Safe Handle Layer Over OpenSSL's libcrypto
//!
//! OsslKit wraps the raw, manually managed handles of the native library
//! (keys, certificates, name structures, byte streams) in value types with
//! shared ownership, deterministic destruction, and `Result`-based error
//! reporting, while keeping zero-copy interop with the native API: every
//! entity exposes its raw pointer, and raw pointers can be adopted back.
//!
//! The native library performs all algorithmic work. OsslKit's job is
//! plumbing:
//!
//! - **Shared handles**: every entity is a cheap, reference-counted copy of a
//!   native pointer; the native destructor runs exactly once, when the last
//!   copy is dropped.
//! - **Identity semantics**: `==` on entities compares the underlying
//!   pointer, never the pointee contents — same handle, same identity.
//! - **Error translation**: the native sentinel-return convention and its
//!   thread-local diagnostic queue become typed
//!   [`OsslKitError`](error::OsslKitError) values carrying display-ready
//!   messages.
//! - **Borrow-checked views**: name structures extracted from a certificate
//!   alias certificate-owned memory; they are lifetime-tied views, so the
//!   compiler rejects use after the certificate is gone.
//!
//! ## Quick Start
//!
//! ### Parsing a certificate
//!
//! ```rust,no_run
//! use osslkit::bio::ByteStream;
//! use osslkit::x509::Certificate;
//!
//! # fn main() -> Result<(), osslkit::error::OsslKitError> {
//! let pem = std::fs::read("server.pem").unwrap();
//! let stream = ByteStream::from_slice(&pem)?;
//! let certificate = Certificate::from_pem(&stream)?;
//!
//! println!("subject: {}", certificate.subject().to_text()?);
//! println!("issuer:  {}", certificate.issuer().to_text()?);
//!
//! let public_key = certificate.public_key()?;
//! let out = ByteStream::memory()?;
//! public_key.rsa()?.public_key_to_pem(&out)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Generating an RSA key
//!
//! ```rust,no_run
//! use osslkit::rsa::RsaKey;
//!
//! # fn main() -> Result<(), osslkit::error::OsslKitError> {
//! // Blocks the calling thread until generation completes.
//! let key = RsaKey::generate(2048, 65537)?;
//! assert_eq!(key.modulus_bits(), 2048);
//!
//! // Copies share the same native structure.
//! let alias = key.clone();
//! assert_eq!(key, alias);
//! # Ok(())
//! # }
//! ```
//!
//! ## Caller Obligations
//!
//! Some contracts of the native library cannot be checked at runtime and are
//! carried as documentation:
//!
//! - private-key operations must only run on keys that hold private material;
//! - the process random generator must be seeded before enabling blinding;
//! - a raw pointer obtained from `as_ptr()` must never be freed by the
//!   caller;
//! - concurrent mutation of one shared entity from several threads needs
//!   external synchronization — the layer only makes its own reference counts
//!   atomic.
//!
//! ## Module Organization
//!
//! - [`handle`]: the generic shared-ownership wrapper all entities build on
//! - [`error`]: error taxonomy and native diagnostic-queue translation
//! - [`bio`]: byte-stream adapter feeding the native encode/decode routines
//! - [`rsa`]: RSA key entity (generation, blinding, PEM import/export)
//! - [`pkey`]: generic key envelope returned by certificate accessors
//! - [`x509`]: certificate entity and distinguished name structures

pub mod bio;
pub mod error;
pub mod handle;
pub mod pkey;
pub mod rsa;
pub mod x509;

mod callback;
mod ffi;
