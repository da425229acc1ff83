//! Image payloads exchanged with the model endpoint.
//!
//! Images travel as self-describing data URIs (`data:<mime>;base64,<data>`),
//! the same encoding the journal persists. Parsing is strict: a payload
//! without a MIME type or base64 marker is rejected before any model call.

use std::fmt;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::AppError;

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A binary image tagged with its MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    /// Create a payload from raw bytes and a MIME type.
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AppError> {
        let mime = mime.into();
        if !mime.starts_with("image/") {
            return Err(AppError::invalid_request(
                "image",
                format!("'{}' is not an image MIME type", mime),
            ));
        }
        if bytes.is_empty() {
            return Err(AppError::invalid_request("image", "image payload is empty"));
        }
        Ok(Self { mime, bytes })
    }

    /// Parse a `data:<mime>;base64,<data>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, AppError> {
        let rest = uri.strip_prefix(DATA_SCHEME).ok_or_else(|| {
            AppError::invalid_request("image", "data URI must start with 'data:'")
        })?;
        let marker = rest.find(BASE64_MARKER).ok_or_else(|| {
            AppError::invalid_request("image", "data URI must be base64-encoded (';base64,')")
        })?;
        let mime = &rest[..marker];
        let payload = &rest[marker + BASE64_MARKER.len()..];
        let bytes = BASE64.decode(payload).map_err(|e| {
            AppError::invalid_request("image", format!("undecodable base64 payload: {}", e))
        })?;
        Self::new(mime, bytes)
    }

    /// Load an image file, deriving the MIME type from the extension.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let mime = mime_for_extension(&ext).ok_or_else(|| {
            AppError::invalid_request(
                "image",
                format!("unsupported image file extension '{}'", ext),
            )
        })?;
        let bytes = std::fs::read(path)?;
        Self::new(mime, bytes)
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Re-encode as a data URI.
    pub fn to_data_uri(&self) -> String {
        format!("{}{}{}{}", DATA_SCHEME, self.mime, BASE64_MARKER, BASE64.encode(&self.bytes))
    }

    /// Base64 payload without the URI framing, as the wire format expects.
    pub fn base64_data(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// File extension matching the MIME type, for writing artifacts to disk.
    pub fn file_extension(&self) -> &str {
        match self.mime.as_str() {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            _ => "bin",
        }
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime", &self.mime)
            .field("bytes", &format!("{} bytes", self.bytes.len()))
            .finish()
    }
}

impl Serialize for ImagePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

impl<'de> Deserialize<'de> for ImagePayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        ImagePayload::from_data_uri(&uri).map_err(D::Error::custom)
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Outcome of one slot in an image generation batch.
///
/// A batch of N prompts always resolves to exactly N outcomes; a failed
/// generation degrades its own slot without touching siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Generated(ImagePayload),
    Failed(String),
}

impl ImageOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, ImageOutcome::Generated(_))
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        match self {
            ImageOutcome::Generated(image) => Some(image),
            ImageOutcome::Failed(_) => None,
        }
    }
}
