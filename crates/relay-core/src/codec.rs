//! Stored value format.
//!
//! A cached response is written as a small JSON envelope:
//!
//! ```text
//! {"v":1,"body":"<upstream text>"}
//! ```
//!
//! The version tag lets a later build change the layout without misreading
//! entries that are still alive in a shared store; an entry with an unknown
//! version decodes to [`CodecError::UnsupportedVersion`] and the caller treats
//! it like any other unreadable entry.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::response::ProxyResponse;

/// Format version written by [`encode`].
pub const FORMAT_VERSION: u8 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    v: u8,
    body: &'a str,
}

#[derive(Deserialize)]
struct Envelope {
    v: u8,
    body: String,
}

/// Serializes a response into the bytes stored under its cache key.
///
/// # Examples
///
/// ```
/// use relay_core::{ProxyResponse, decode, encode};
///
/// let bytes = encode(&ProxyResponse::new("hello")).unwrap();
/// assert_eq!(decode(&bytes).unwrap().body(), "hello");
/// ```
pub fn encode(response: &ProxyResponse) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(&EnvelopeRef {
        v: FORMAT_VERSION,
        body: response.body(),
    })
    .map_err(CodecError::Encode)
}

/// Reads a response back from stored bytes.
pub fn decode(bytes: &[u8]) -> Result<ProxyResponse, CodecError> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(CodecError::Decode)?;

    if envelope.v != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: envelope.v,
            expected: FORMAT_VERSION,
        });
    }

    Ok(ProxyResponse::new(envelope.body))
}
