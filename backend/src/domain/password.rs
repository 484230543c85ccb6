//! Password digests.
//!
//! Stored credentials are the base64-encoded SHA-256 digest of the UTF-8
//! password bytes. The scheme is unsalted and fast; it is kept so digests
//! written by earlier deployments keep verifying.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Base64 SHA-256 digest of a password.
///
/// # Examples
/// ```
/// use reliefdesk::domain::PasswordDigest;
///
/// let digest = PasswordDigest::of("hunter2");
/// assert!(digest.matches("hunter2"));
/// assert!(!digest.matches("hunter3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a plaintext password.
    pub fn of(plaintext: &str) -> Self {
        let hash = Sha256::digest(plaintext.as_bytes());
        Self(STANDARD.encode(hash))
    }

    /// Wrap a digest read back from storage.
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Whether `plaintext` digests to the stored value.
    pub fn matches(&self, plaintext: &str) -> bool {
        Self::of(plaintext).0.as_bytes() == self.0.as_bytes()
    }

    /// Encoded digest for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
