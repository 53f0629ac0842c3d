//! Mesh conversion hook.
//!
//! The conversion algorithm itself lives outside AssetHub. The core only
//! defines the point file payloads pass through.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// A payload submitted for conversion.
#[derive(Debug, Clone)]
pub struct ConversionInput {
    /// Original file name, used to pick scratch file extensions.
    pub file_name: String,
    /// Raw source bytes.
    pub payload: Bytes,
}

/// The converted artifact.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// Suggested output file name.
    pub file_name: String,
    /// MIME type of the output.
    pub mime_type: String,
    /// Converted bytes.
    pub payload: Bytes,
}

/// Given a file payload, produce a transformed output.
#[async_trait]
pub trait MeshConverter: Send + Sync + std::fmt::Debug + 'static {
    /// Source format extension accepted by this converter (lowercase, no dot).
    fn source_extension(&self) -> &str;

    /// Convert one payload.
    async fn convert(&self, input: ConversionInput) -> AppResult<ConversionOutput>;
}
