//! Base64 helpers for moving image bytes through text-only capabilities.

use crate::error::{GalleryResult, PhotoGalleryError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Prefix of a JPEG data URI
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Reads the whole blob and returns its base64 text
///
/// Read errors are returned as-is; nothing is produced for a partial read.
pub async fn encode_to_base64<R>(mut blob: R) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    blob.read_to_end(&mut bytes).await?;
    Ok(STANDARD.encode(bytes))
}

pub fn decode_base64(data: &str) -> GalleryResult<Vec<u8>> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| PhotoGalleryError::Encoding(format!("Invalid base64 payload: {}", e)))
}

/// Builds a data URI the webview can render directly
pub fn jpeg_data_uri(base64_data: &str) -> String {
    format!("{}{}", JPEG_DATA_URI_PREFIX, base64_data)
}
