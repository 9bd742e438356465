//! One-time passcodes for passwordless sign-in.
//!
//! A code is six random digits. Only its SHA-256 hash is stored; the
//! plaintext exists in the outgoing email and nowhere else.

use rand::Rng;

use super::sha256_hex;
use crate::config::env_or;

/// Number of digits in a passcode.
pub const CODE_LENGTH: usize = 6;

const DEFAULT_TTL_MINS: i64 = 10;
const DEFAULT_MAX_ATTEMPTS: i32 = 5;

/// Passcode lifetime and brute-force limit.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Minutes a code stays valid (default: 10).
    pub ttl_mins: i64,
    /// Wrong guesses allowed before the code is burned (default: 5).
    pub max_attempts: i32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_mins: DEFAULT_TTL_MINS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OtpConfig {
    /// Reads `OTP_TTL_MINS` and `OTP_MAX_ATTEMPTS`.
    pub fn from_env() -> Self {
        Self {
            ttl_mins: env_or("OTP_TTL_MINS", DEFAULT_TTL_MINS),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
        }
    }
}

/// Generate a fresh numeric passcode.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// SHA-256 hex digest of a passcode, salted with the recipient address.
pub fn hash_code(email: &str, code: &str) -> String {
    sha256_hex(&[email.as_bytes(), b":", code.trim().as_bytes()])
}
