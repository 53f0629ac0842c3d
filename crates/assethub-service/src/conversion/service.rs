//! Validates conversion requests and hands payloads to the mesh converter.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use tracing::{info, warn};

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::traits::converter::{ConversionInput, ConversionOutput, MeshConverter};

use crate::context::RequestContext;

/// Front door for the external mesh converter.
#[derive(Debug, Clone)]
pub struct ConversionService {
    converter: Arc<dyn MeshConverter>,
    max_input_bytes: u64,
}

impl ConversionService {
    /// Creates a new conversion service.
    pub fn new(converter: Arc<dyn MeshConverter>, max_input_bytes: u64) -> Self {
        Self {
            converter,
            max_input_bytes,
        }
    }

    /// Converts one payload named `file_name`.
    ///
    /// The name must carry the converter's source extension and no control
    /// characters. The payload must be non-empty and within the configured
    /// size limit.
    pub async fn convert(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        payload: Bytes,
    ) -> AppResult<ConversionOutput> {
        if file_name.chars().any(char::is_control) {
            return Err(AppError::validation(
                "File name must not contain control characters",
            ));
        }
        let expected = self.converter.source_extension();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        if extension.as_deref() != Some(expected) {
            return Err(AppError::validation(format!(
                "Only .{expected} files can be converted"
            )));
        }
        if payload.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if payload.len() as u64 > self.max_input_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the {} byte conversion limit",
                self.max_input_bytes
            )));
        }

        let started = Instant::now();
        let input_bytes = payload.len();
        let result = self
            .converter
            .convert(ConversionInput {
                file_name: file_name.to_string(),
                payload,
            })
            .await;

        match &result {
            Ok(output) => info!(
                request_id = %ctx.request_id,
                file_name,
                input_bytes,
                output_bytes = output.payload.len(),
                duration_ms = started.elapsed().as_millis() as u64,
                "Mesh converted"
            ),
            Err(e) => warn!(
                request_id = %ctx.request_id,
                file_name,
                error = %e,
                "Mesh conversion failed"
            ),
        }

        result
    }
}
