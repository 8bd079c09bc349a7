use osslkit::bio::ByteStream;
use osslkit::x509::Certificate;

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("usage: inspect <certificate.pem>");

    let stream = ByteStream::read_file(&path).expect("Failed to open certificate file");
    let certificate = Certificate::from_pem(&stream).expect("Failed to parse certificate");

    println!("subject: {}", certificate.subject().to_text().unwrap());
    println!("issuer:  {}", certificate.issuer().to_text().unwrap());

    match certificate.public_key().and_then(|key| key.rsa()) {
        Ok(rsa) => println!("public key: RSA, {} bit modulus", rsa.modulus_bits()),
        Err(_) => println!("public key: not RSA"),
    }
}
