//! Unverified JWT payload decoding.
//!
//! The client only needs the claims a token carries; authenticity is the
//! issuing server's concern (it signs and verifies, we ride TLS). So this
//! is pure parsing: split the token into its three segments, base64url-
//! decode the payload, deserialize the JSON object.

use crate::types::Claims;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

/// Why a token could not be decoded. Decoding never panics; every
/// malformed input maps to one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("token does not have three dot-separated segments")]
    Structure,

    #[error("payload segment is not valid base64url: {0}")]
    Encoding(String),

    #[error("payload is not a valid JSON claim set: {0}")]
    Json(String),
}

/// Decodes the payload segment of `token` into [`Claims`].
///
/// The signature segment is carried but never checked. Fails when the
/// token is not three dot-separated segments, when the payload is not
/// base64url (padded or unpadded both accepted), or when the decoded
/// bytes are not a JSON object.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(DecodeError::Structure),
    };

    // JWTs are unpadded base64url, but tolerate padded output from
    // non-conforming issuers.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| URL_SAFE.decode(payload))
        .map_err(|e| DecodeError::Encoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json(e.to_string()))
}
