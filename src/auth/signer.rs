//! RSA-PSS request signing.
//!
//! Signed requests carry a `Signature` header holding the base64-encoded
//! RSA-PSS signature of the exact request body. The digest is SHA-256 and
//! the salt length is the maximum the key allows:
//!
//! ```text
//! salt_len = key_size_bytes - 2 - 32
//! ```
//!
//! which is 222 bytes for a 2048-bit key, not the 32-byte salt most
//! libraries default to.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::OsRng;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::pss::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use sha2::Sha256;

use crate::{Error, Result};

/// Output length of SHA-256, in bytes.
pub const SHA256_LEN: usize = 32;

/// Maximum PSS salt length for a SHA-256 digest and a key of `key_size_bytes`.
///
/// Returns `None` when the key is too small to fit any salt.
///
/// ```
/// assert_eq!(billpay_rs::auth::pss_salt_len(256), Some(222));
/// assert_eq!(billpay_rs::auth::pss_salt_len(512), Some(478));
/// assert_eq!(billpay_rs::auth::pss_salt_len(30), None);
/// ```
pub fn pss_salt_len(key_size_bytes: usize) -> Option<usize> {
    key_size_bytes.checked_sub(2 + SHA256_LEN)
}

/// Signs request bodies with an RSA private key.
///
/// The PSS signing and verifying keys are built once, when the signer is
/// created, and shared by every call.
pub struct Signer {
    signing_key: SigningKey<Sha256>,
    verifying_key: VerifyingKey<Sha256>,
    key_size: usize,
    salt_len: usize,
}

impl Signer {
    /// Load a signer from PEM text.
    ///
    /// Both PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1 (`BEGIN RSA PRIVATE KEY`)
    /// encodings are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signing`] if the PEM cannot be parsed as an RSA key.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let pem = pem.trim();
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| Error::Signing(format!("Malformed private key: {}", e)))?;

        Self::new(key)
    }

    /// Wrap an already-parsed RSA private key.
    pub fn new(key: RsaPrivateKey) -> Result<Self> {
        let key_size = key.size();
        let salt_len = pss_salt_len(key_size).ok_or_else(|| {
            Error::Signing(format!(
                "RSA key of {} bytes is too small for PSS with SHA-256",
                key_size
            ))
        })?;

        let verifying_key =
            VerifyingKey::<Sha256>::new_with_salt_len(key.to_public_key(), salt_len);
        let signing_key = SigningKey::<Sha256>::new_with_salt_len(key, salt_len);

        Ok(Self {
            signing_key,
            verifying_key,
            key_size,
            salt_len,
        })
    }

    /// Size of the key modulus, in bytes.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// PSS salt length used for every signature made by this signer.
    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    /// Sign `payload` and return the base64-encoded signature.
    ///
    /// The payload is hashed with SHA-256 as part of signing; pass the exact
    /// bytes that will be transmitted.
    pub fn sign(&self, payload: &[u8]) -> Result<String> {
        let signature = self
            .signing_key
            .try_sign_with_rng(&mut OsRng, payload)
            .map_err(|e| Error::Signing(format!("Failed to sign payload: {}", e)))?;

        Ok(BASE64.encode(signature.to_bytes()))
    }

    /// Verify a base64 signature over `payload` with this key's public half.
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not match.
    pub fn verify(&self, payload: &[u8], signature: &str) -> Result<bool> {
        let bytes = BASE64
            .decode(signature.trim())
            .map_err(|e| Error::Signing(format!("Signature is not valid base64: {}", e)))?;
        let signature = match Signature::try_from(bytes.as_slice()) {
            Ok(signature) => signature,
            Err(_) => return Ok(false),
        };

        Ok(self.verifying_key.verify(payload, &signature).is_ok())
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("key", &"[REDACTED]")
            .field("key_size", &self.key_size)
            .field("salt_len", &self.salt_len)
            .finish()
    }
}
