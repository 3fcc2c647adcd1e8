//! Kroki GET URL construction.
//!
//! Kroki accepts diagrams as a path segment: the diagram source is
//! deflate-compressed, base64-encoded with a URL-safe alphabet, and appended
//! to `<server>/<diagram-type>/<format>/`. This crate implements that encoding
//! (and its inverse, for diagnostics) as pure functions with no I/O.
//!
//! See <https://docs.kroki.io/kroki/setup/encode-diagram/> for the wire format.

use std::io::{Read, Write};

use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

/// URL-safe base64 engine that accepts payloads with or without `=` padding.
///
/// Encoding always emits padding; decoding must tolerate both since clients
/// are inconsistent about stripping it.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Error decoding a diagram payload back into source text.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Payload is not valid URL-safe base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Decompression failed (truncated or non-zlib data).
    #[error("invalid deflate stream: {0}")]
    Inflate(#[from] std::io::Error),
    /// Decompressed bytes are not UTF-8.
    #[error("decoded source is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Build the full Kroki request URL for a diagram.
///
/// The source is compressed with zlib at maximum level, base64-encoded with
/// the URL-safe alphabet (`+` → `-`, `/` → `_`, padding kept), and joined as
/// `<base_url>/<diagram_type>/<format>/<payload>`.
///
/// Deterministic: identical inputs always produce the same URL.
///
/// # Example
///
/// ```
/// let url = kroki_url::encode_diagram_url(
///     "https://kroki.io",
///     "plantuml",
///     "@startuml\nA->B\n@enduml",
///     "svg",
/// );
/// assert!(url.starts_with("https://kroki.io/plantuml/svg/"));
/// ```
#[must_use]
pub fn encode_diagram_url(base_url: &str, diagram_type: &str, source: &str, format: &str) -> String {
    let payload = URL_SAFE.encode(zlib_deflate(source.as_bytes()));
    [base_url, diagram_type, format, &payload].join("/")
}

/// Decode a URL payload segment back into the original diagram source.
///
/// Inverse of the payload step of [`encode_diagram_url`]: base64url decode
/// (padding optional), inflate, validate UTF-8.
pub fn decode_diagram_payload(payload: &str) -> Result<String, DecodeError> {
    let compressed = PAYLOAD_ENGINE.decode(payload)?;
    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut source = Vec::new();
    decoder.read_to_end(&mut source)?;
    Ok(String::from_utf8(source)?)
}

/// Compress bytes as a zlib stream at maximum compression.
fn zlib_deflate(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(bytes.len()), Compression::best());
    encoder
        .write_all(bytes)
        .and_then(|()| encoder.finish())
        .expect("writing to an in-memory buffer cannot fail")
}
