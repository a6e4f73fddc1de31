#![warn(missing_docs)]
//! # meal-lens-intake
//!
//! ## Purpose
//! Provides file acceptance gates and the current-selection state.
//!
//! ## Responsibilities
//! - Distinguish the two file sources (drag-and-drop, manual picker).
//! - Enforce the `image/` MIME gate on dropped files only.
//! - Hold the single current selection with explicit accessors.
//!
//! ## Data flow
//! Surface events produce candidate [`meal_lens_core::ImageFile`] values ->
//! [`accept_file`] applies the per-source gate -> accepted files replace the
//! previous [`Selection`] entry and unlock submission.
//!
//! ## Ownership and lifetimes
//! The selection owns its file; a new acceptance overwrites the old value and
//! nothing is persisted beyond the widget's lifetime.
//!
//! ## Error model
//! Gate rejections return [`IntakeError`] so callers can surface the
//! user-facing message without mutating the selection.

use meal_lens_core::{ImageFile, is_image_mime};
use thiserror::Error;

/// Origin of a candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    /// File dropped onto the drop target. MIME-gated.
    DragDrop,
    /// File chosen through the manual picker.
    ///
    /// The picker path performs no type check; only drops are gated. This
    /// asymmetry is observable behavior and is pinned by integration tests.
    Picker,
}

/// Applies the per-source acceptance gate to one candidate file.
///
/// # Errors
/// Returns [`IntakeError::NotAnImage`] for a dropped file whose declared MIME
/// type does not begin with `image/`. Picker files pass through unchecked.
pub fn accept_file(file: ImageFile, source: FileSource) -> Result<ImageFile, IntakeError> {
    match source {
        FileSource::DragDrop if !is_image_mime(&file.mime_type) => Err(IntakeError::NotAnImage {
            mime_type: file.mime_type,
        }),
        FileSource::DragDrop | FileSource::Picker => Ok(file),
    }
}

/// Single-writer holder of the currently selected file.
///
/// Submission is only possible while a selection is present; that guard is
/// enforced by the controller through [`Selection::current`].
#[derive(Debug, Clone, Default)]
pub struct Selection {
    file: Option<ImageFile>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current selection with an accepted file.
    pub fn select(&mut self, file: ImageFile) {
        self.file = Some(file);
    }

    /// Returns the current selection, if any.
    pub fn current(&self) -> Option<&ImageFile> {
        self.file.as_ref()
    }

    /// Returns `true` when a file is selected.
    pub fn is_selected(&self) -> bool {
        self.file.is_some()
    }
}

/// Intake gate errors.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Dropped file failed the `image/` MIME gate.
    #[error("dropped file is not an image: {mime_type}")]
    NotAnImage {
        /// Declared MIME type of the rejected file.
        mime_type: String,
    },
}
