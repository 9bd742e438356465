//! Passwordless sign-in: emailed passcodes exchanged for bearer tokens.

pub mod mailer;
pub mod otp;
pub mod tokens;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 over the given parts, in order.
pub(crate) fn sha256_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
