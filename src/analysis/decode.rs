// Decode module - base64 payload decoding and byte/sample conversion
//
// The pipeline never decodes MP3 frames. Raw bytes are used directly as a
// proxy signal: byte statistics on the full payload, and a normalized
// pseudo-sample sequence (after skipping any ID3v2 tag) for spectral work.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::DecodeError;

/// ID3v2 tag magic ("ID3")
const ID3_MAGIC: [u8; 3] = [0x49, 0x44, 0x33];

/// Fixed ID3v2 header length preceding the tag body
const ID3_HEADER_LEN: usize = 10;

/// Decode a base64 audio payload into raw bytes
///
/// ASCII whitespace (line wrapping from encoders) is ignored; anything
/// else outside the standard alphabet is rejected.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(compact.as_bytes())?)
}

/// Number of leading bytes occupied by an ID3v2 tag, 0 if none
///
/// The tag size is a 28-bit syncsafe integer (7 bits per byte, big-endian)
/// at offset 6. The result is clamped to the input length.
pub fn id3_skip_len(bytes: &[u8]) -> usize {
    if bytes.len() < ID3_HEADER_LEN || bytes[..3] != ID3_MAGIC {
        return 0;
    }

    let size = bytes[6..10]
        .iter()
        .fold(0usize, |acc, &b| (acc << 7) | (b & 0x7F) as usize);

    (ID3_HEADER_LEN + size).min(bytes.len())
}

/// Reinterpret bytes as centered samples in [-1, 1), skipping any ID3v2 tag
pub fn to_samples(bytes: &[u8]) -> Vec<f64> {
    bytes[id3_skip_len(bytes)..]
        .iter()
        .map(|&b| (b as f64 - 128.0) / 128.0)
        .collect()
}
