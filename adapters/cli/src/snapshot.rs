//! Single-line transfer strings for persisted matches.
//!
//! A snapshot looks like `gravity:v1:<payload>` where the payload is the
//! match state serialised to JSON and encoded with unpadded base64.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use gravity_wells_core::GameState;
use thiserror::Error;

const SNAPSHOT_DOMAIN: &str = "gravity";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "gravity:v1";
const FIELD_DELIMITER: char = ':';

/// Errors that can occur while encoding or decoding snapshot strings.
#[derive(Debug, Error)]
pub(crate) enum SnapshotError {
    /// The provided string was empty or contained only whitespace.
    #[error("snapshot string was empty")]
    EmptyPayload,
    /// The encoded snapshot did not contain a version segment.
    #[error("snapshot string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include the payload segment.
    #[error("snapshot string is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("snapshot prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("snapshot version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode snapshot payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The payload could not be converted to or from JSON.
    #[error("could not convert snapshot payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Encodes the match state into a single-line string.
pub(crate) fn encode(state: &GameState) -> Result<String, SnapshotError> {
    let json = serde_json::to_vec(state)?;
    Ok(format!("{SNAPSHOT_HEADER}:{}", STANDARD_NO_PAD.encode(json)))
}

/// Decodes a match state from its string representation.
pub(crate) fn decode(value: &str) -> Result<GameState, SnapshotError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SnapshotError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().unwrap_or_default();
    let version = parts.next().ok_or(SnapshotError::MissingVersion)?;
    let payload = parts.next().ok_or(SnapshotError::MissingPayload)?;

    if domain != SNAPSHOT_DOMAIN {
        return Err(SnapshotError::InvalidPrefix(domain.to_owned()));
    }
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}
