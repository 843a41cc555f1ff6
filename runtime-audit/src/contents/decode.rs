//! Decoding of the contents API envelope.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

/// The subset of a contents API response needed to recover file text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentEnvelope {
    /// Encoded file body.
    #[serde(default)]
    pub content: Option<String>,

    /// Encoding of `content`; only `base64` is understood.
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Recovers file text from an envelope.
///
/// GitHub wraps base64 bodies at 60 columns, so whitespace is removed before
/// decoding. Invalid UTF-8 sequences are replaced rather than rejected.
/// Returns `None` for missing content, a non-base64 encoding or undecodable
/// data.
#[must_use]
pub fn decode_content(envelope: &ContentEnvelope) -> Option<String> {
    if envelope.encoding.as_deref() != Some("base64") {
        return None;
    }

    let compact: String = envelope
        .content
        .as_deref()?
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD.decode(compact).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
