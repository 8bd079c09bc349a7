use osslkit::bio::ByteStream;
use osslkit::error::OsslKitError;
use osslkit::rsa::RsaKey;

/// A 1024/65537 generation succeeds, matches the requested modulus size, and
/// accepts blinding once the process random generator has been engaged (the
/// generation itself seeds it on any modern native library).
#[test]
fn generate_1024_with_f4_exponent() {
    let key = RsaKey::generate(1024, 65537).unwrap();

    assert!(!key.as_ptr().is_null());
    assert_eq!(key.modulus_bits(), 1024);

    key.enable_blinding().unwrap();
    key.disable_blinding();
}

#[test]
fn generate_small_modulus_is_not_rejected() {
    // Below 1024 bits is a documented caller hazard, not a checked invariant.
    let key = RsaKey::generate(512, 65537).unwrap();
    assert_eq!(key.modulus_bits(), 512);
}

/// The progress callback is invoked synchronously, on the calling thread,
/// while generation blocks.
#[test]
fn generate_reports_progress() {
    let caller = std::thread::current().id();
    let mut events = 0u32;

    let key = RsaKey::generate_with_progress(1024, 65537, |_kind, _count| {
        assert_eq!(std::thread::current().id(), caller);
        events += 1;
    })
    .unwrap();

    assert_eq!(key.modulus_bits(), 1024);
    assert!(events > 0, "native routine reported no progress");
}

#[test]
fn empty_key_allocates() {
    let key = RsaKey::new().unwrap();
    assert!(!key.as_ptr().is_null());
}

/// An empty structure carries no modulus yet; asking for its size reports 0
/// instead of faulting on the missing component.
#[test]
fn empty_key_reports_zero_modulus_bits() {
    let key = RsaKey::new().unwrap();
    assert_eq!(key.modulus_bits(), 0);
}

/// The reported size is the exact bit length of the modulus, not a value
/// rounded up to the next byte multiple.
#[test]
fn modulus_bits_is_exact_for_odd_sizes() {
    let key = RsaKey::generate(1020, 65537).unwrap();
    assert_eq!(key.modulus_bits(), 1020);
}

#[test]
fn equality_is_pointer_identity() {
    let a = RsaKey::generate(1024, 65537).unwrap();
    let b = RsaKey::generate(1024, 65537).unwrap();

    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

/// The key envelope references the same native structure it was built from:
/// extraction hands back an up-referenced alias, not a deep clone.
#[test]
fn key_envelope_shares_the_underlying_structure() {
    use osslkit::pkey::PKey;

    let key = RsaKey::generate(1024, 65537).unwrap();
    let envelope = PKey::from_rsa(&key).unwrap();

    let extracted = envelope.rsa().unwrap();
    assert_eq!(extracted, key);

    // Independently owned: usable after the envelope is gone.
    drop(envelope);
    assert_eq!(extracted.modulus_bits(), 1024);
}

#[test]
fn private_key_pem_round_trip() {
    let key = RsaKey::generate(1024, 65537).unwrap();

    let sink = ByteStream::memory().unwrap();
    key.private_key_to_pem(&sink).unwrap();
    let pem = sink.contents();
    assert!(!pem.is_empty());

    let source = ByteStream::from_slice(&pem).unwrap();
    let reloaded = RsaKey::private_key_from_pem(&source).unwrap();

    assert_eq!(reloaded.modulus_bits(), 1024);
    // Independently parsed, therefore a distinct identity.
    assert_ne!(reloaded, key);
}

#[test]
fn public_key_pem_round_trip() {
    let key = RsaKey::generate(1024, 65537).unwrap();

    let sink = ByteStream::memory().unwrap();
    key.public_key_to_pem(&sink).unwrap();
    let pem = sink.contents();

    let source = ByteStream::from_slice(&pem).unwrap();
    let public = RsaKey::public_key_from_pem(&source).unwrap();
    assert_eq!(public.modulus_bits(), 1024);
}

/// Encrypted PEM material requires a passphrase callback; refusing or
/// omitting one fails the parse instead of prompting a terminal.
#[test]
fn encrypted_private_key_requires_passphrase() {
    let key = RsaKey::generate(1024, 65537).unwrap();

    let sink = ByteStream::memory().unwrap();
    key.private_key_to_pem_encrypted(&sink, b"letmein").unwrap();
    let pem = sink.contents();

    // No callback: the parse must fail, not block.
    let source = ByteStream::from_slice(&pem).unwrap();
    let err = RsaKey::private_key_from_pem(&source).unwrap_err();
    assert!(matches!(err, OsslKitError::Crypto(_)), "got {err:?}");

    // Wrong passphrase: decryption fails.
    let source = ByteStream::from_slice(&pem).unwrap();
    let err = RsaKey::private_key_from_pem_with_passphrase(&source, |buf| {
        buf[..5].copy_from_slice(b"wrong");
        5
    })
    .unwrap_err();
    assert!(matches!(err, OsslKitError::Crypto(_)), "got {err:?}");

    // Correct passphrase: the key comes back.
    let source = ByteStream::from_slice(&pem).unwrap();
    let reloaded = RsaKey::private_key_from_pem_with_passphrase(&source, |buf| {
        buf[..7].copy_from_slice(b"letmein");
        7
    })
    .unwrap();
    assert_eq!(reloaded.modulus_bits(), 1024);
}

#[test]
fn zero_length_passphrase_fails_the_parse() {
    let key = RsaKey::generate(1024, 65537).unwrap();

    let sink = ByteStream::memory().unwrap();
    key.private_key_to_pem_encrypted(&sink, b"letmein").unwrap();
    let pem = sink.contents();

    let source = ByteStream::from_slice(&pem).unwrap();
    let err = RsaKey::private_key_from_pem_with_passphrase(&source, |_buf| 0).unwrap_err();
    assert!(matches!(err, OsslKitError::Crypto(_)), "got {err:?}");
}
