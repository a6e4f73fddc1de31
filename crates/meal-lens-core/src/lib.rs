#![warn(missing_docs)]
//! # meal-lens-core
//!
//! ## Purpose
//! Defines the pure file payload model used across the `meal-lens` workspace.
//!
//! ## Responsibilities
//! - Represent the currently selected image file (bytes, name, MIME type).
//! - Gate MIME types on the `image/` prefix for callers that enforce it.
//! - Build the one-shot `data:` URL preview source for an accepted file.
//!
//! ## Data flow
//! Intake code constructs [`ImageFile`] values from drop/picker events.
//! Accepted files flow into preview rendering ([`preview_data_url`]) and
//! multipart submission in the upload layer.
//!
//! ## Ownership and lifetimes
//! Files own their backing buffers (`Vec<u8>`) so selection, preview, and
//! submission never borrow from transient event payloads.
//!
//! ## Error model
//! Constructor validation failures (blank file name, empty payload) return
//! [`CoreError`] variants with caller-actionable categorization.
//!
//! ## Example
//! ```rust
//! use meal_lens_core::{ImageFile, is_image_mime, preview_data_url};
//!
//! let file = ImageFile::new("lunch.png", "image/png", vec![0x89, 0x50]).unwrap();
//! assert!(is_image_mime(&file.mime_type));
//! assert!(preview_data_url(&file).starts_with("data:image/png;base64,"));
//! ```

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Required MIME prefix for files accepted from drag-and-drop.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// One user-provided file staged for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// File name as reported by the providing surface.
    pub file_name: String,
    /// Declared MIME type (not verified against content).
    pub mime_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Constructs a validated file payload.
    ///
    /// MIME acceptance is intentionally not checked here; the drag-and-drop
    /// gate lives in the intake layer and the picker path has no gate at all.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyFileName`] when the name is blank.
    /// Returns [`CoreError::EmptyPayload`] when the byte buffer is empty.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(CoreError::EmptyFileName);
        }

        if bytes.is_empty() {
            return Err(CoreError::EmptyPayload);
        }

        Ok(Self {
            file_name,
            mime_type: mime_type.into(),
            bytes,
        })
    }

    /// Returns payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the payload holds no bytes.
    ///
    /// Constructed values never are; this exists for the conventional
    /// `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Returns `true` when a declared MIME type begins with `image/`.
///
/// Browsers report lowercase MIME types, so the prefix match is
/// case-sensitive on purpose.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with(IMAGE_MIME_PREFIX)
}

/// Builds the preview source for one accepted file.
///
/// # Semantics
/// The result is a `data:{mime};base64,{payload}` URL, produced once per
/// selection and handed to the rendering surface as a plain string.
pub fn preview_data_url(file: &ImageFile) -> String {
    let encoded = STANDARD.encode(&file.bytes);
    format!("data:{};base64,{encoded}", file.mime_type)
}

/// Error type for file payload validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// File name is blank.
    #[error("file name is empty")]
    EmptyFileName,
    /// File carries no bytes.
    #[error("file payload is empty")]
    EmptyPayload,
}

#[cfg(test)]
mod tests {
    //! Unit tests for payload validation and preview encoding.

    use super::*;

    #[test]
    fn rejects_blank_file_name_and_empty_payload() {
        assert!(matches!(
            ImageFile::new("  ", "image/png", vec![1]),
            Err(CoreError::EmptyFileName)
        ));
        assert!(matches!(
            ImageFile::new("lunch.png", "image/png", vec![]),
            Err(CoreError::EmptyPayload)
        ));
    }

    #[test]
    fn mime_gate_matches_image_prefix_only() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/svg+xml"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime("IMAGE/PNG"));
    }

    #[test]
    fn preview_url_carries_mime_and_base64_payload() {
        let file = ImageFile::new("a.gif", "image/gif", vec![b'h', b'i']).unwrap();
        assert_eq!(preview_data_url(&file), "data:image/gif;base64,aGk=");
    }
}
