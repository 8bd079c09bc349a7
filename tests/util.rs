use std::process::Command;

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::rsa::Rsa;
use openssl::x509::{X509, X509NameBuilder};

/// Builds a self-signed RSA certificate with the independent `openssl` crate,
/// so the wrapper under test never produces its own fixtures.
pub fn self_signed_cert_pem(common_name: &str) -> Vec<u8> {
    let rsa = Rsa::generate(2048).unwrap();
    let pkey = PKey::from_rsa(rsa).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", common_name).unwrap();
    name.append_entry_by_text("O", "OsslKit Test").unwrap();
    let name = name.build();

    let serial = BigNum::from_u32(1).unwrap().to_asn1_integer().unwrap();
    let not_before = Asn1Time::days_from_now(0).unwrap();
    let not_after = Asn1Time::days_from_now(365).unwrap();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&pkey).unwrap();
    builder.set_not_before(&not_before).unwrap();
    builder.set_not_after(&not_after).unwrap();
    builder.sign(&pkey, MessageDigest::sha256()).unwrap();

    builder.build().to_pem().unwrap()
}

/// Attaches trust metadata to a plain PEM certificate with the OpenSSL CLI.
pub fn add_trust_metadata(plain_path: &str, trusted_path: &str) {
    let output = Command::new("openssl")
        .args([
            "x509",
            "-in",
            plain_path,
            "-addtrust",
            "serverAuth",
            "-out",
            trusted_path,
        ])
        .output()
        .expect("Failed to execute OpenSSL command");

    assert!(
        output.status.success(),
        "openssl -addtrust failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
