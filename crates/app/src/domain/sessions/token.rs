//! Session token generation, parsing, and hashing.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "sf";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

/// Token format revision, carried in the token's second segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    /// Version segment as written in the token.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

/// Random token secret, zeroed on drop.
#[derive(Clone)]
pub struct SessionTokenSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionTokenSecret {
    /// Wrap raw secret bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    /// Raw secret bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionTokenSecret(**redacted**)")
    }
}

impl Drop for SessionTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// A cookie value split into its parts.
#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub version: SessionTokenVersion,
    pub secret: SessionTokenSecret,
}

impl ParsedSessionToken {
    /// Storage key for this token: SHA-256 over its canonical form, hex encoded.
    #[must_use]
    pub fn hash(&self) -> String {
        hash_session_token(&format_session_token(self.version, &self.secret))
    }
}

/// Why a cookie value is not a session token.
#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

/// Fill a secret from the OS random source.
#[must_use]
pub fn generate_session_token_secret() -> SessionTokenSecret {
    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionTokenSecret::from_bytes(secret)
}

/// Format: `{prefix}_{version}_{secret_hex}`
#[must_use]
pub fn format_session_token(version: SessionTokenVersion, secret: &SessionTokenSecret) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}",
        version.segment(),
        encode_hex(secret.as_bytes())
    )
}

/// Parse a cookie value into its version and secret.
///
/// # Errors
///
/// Returns an error when the prefix, version, or secret encoding is wrong.
pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let mut parts = token.splitn(3, '_');

    let prefix = parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let secret_hex = parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;
    let secret = decode_hex(secret_hex).ok_or(SessionTokenError::InvalidSecretEncoding)?;

    Ok(ParsedSessionToken {
        version,
        secret: SessionTokenSecret::from_bytes(secret),
    })
}

/// SHA-256 of `token`, lowercase hex. Only this is stored.
#[must_use]
pub fn hash_session_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());

    let mut encoded = String::with_capacity(digest.len() * 2);

    for byte in digest {
        push_hex_byte(&mut encoded, byte);
    }

    encoded
}

/// A fresh current-version token and the hash to store for it.
pub(crate) fn issue_session_token() -> (String, String) {
    let token = format_session_token(SessionTokenVersion::V1, &generate_session_token_secret());
    let token_hash = hash_session_token(&token);

    (token, token_hash)
}

fn encode_hex(secret: &[u8; SESSION_TOKEN_SECRET_BYTES]) -> String {
    let mut encoded = String::with_capacity(SESSION_TOKEN_SECRET_HEX_CHARS);

    for byte in secret {
        push_hex_byte(&mut encoded, *byte);
    }

    encoded
}

fn push_hex_byte(out: &mut String, byte: u8) {
    out.push(hex_digit(byte >> 4));
    out.push(hex_digit(byte & 0x0f));
}

fn hex_digit(nibble: u8) -> char {
    match nibble {
        0..=9 => char::from(b'0' + nibble),
        _ => char::from(b'a' + (nibble & 0x0f) - 10),
    }
}

fn decode_hex(secret_hex: &str) -> Option<[u8; SESSION_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != SESSION_TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
