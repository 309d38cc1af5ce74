//! Key fixtures shared by unit tests.

use once_cell::sync::Lazy;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;

pub const PRIVATE_KEY_PEM: &str = include_str!("../testdata/rsa_private_pkcs8.pem");
pub const PUBLIC_KEY_PEM: &str = include_str!("../testdata/rsa_public.pem");
pub const ENCRYPTED_PRIVATE_KEY_PEM: &str = include_str!("../testdata/rsa_private_encrypted.pem");
pub const ENCRYPTED_PASSPHRASE: &str = "correct-horse";
pub const EC_PRIVATE_KEY_PEM: &str = include_str!("../testdata/ec_private.pem");
pub const EC_PUBLIC_KEY_PEM: &str = include_str!("../testdata/ec_public.pem");

static PRIVATE_KEY: Lazy<RsaPrivateKey> =
    Lazy::new(|| RsaPrivateKey::from_pkcs8_pem(PRIVATE_KEY_PEM).expect("fixture must be valid"));

// 1024 bits keeps key generation fast in debug builds, it is still large
// enough for PKCS#1 v1.5 with SHA-512.
static FRESH_KEY: Lazy<RsaPrivateKey> = Lazy::new(|| {
    RsaPrivateKey::new(&mut rand::thread_rng(), 1024).expect("key generation must succeed")
});
static UNRELATED_KEY: Lazy<RsaPrivateKey> = Lazy::new(|| {
    RsaPrivateKey::new(&mut rand::thread_rng(), 1024).expect("key generation must succeed")
});

/// The private key stored in `testdata/rsa_private_pkcs8.pem`.
pub fn private_key() -> &'static RsaPrivateKey {
    &PRIVATE_KEY
}

/// A key pair generated once per test binary.
pub fn fresh_key() -> &'static RsaPrivateKey {
    &FRESH_KEY
}

/// Another generated key pair, unrelated to [`fresh_key`].
pub fn unrelated_key() -> &'static RsaPrivateKey {
    &UNRELATED_KEY
}
