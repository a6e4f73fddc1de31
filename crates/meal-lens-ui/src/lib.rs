#![warn(missing_docs)]
//! # meal-lens-ui
//!
//! ## Purpose
//! Defines the widget-facing runtime state model for `meal-lens`.
//!
//! ## Responsibilities
//! - Represent the drop target, file label, submit control, loading
//!   indicator, results panel, and error panel as one owned state value.
//! - Model the submission lifecycle and the submit-gating invariant.
//! - Expose the rendering seam ([`WidgetSurface`]) as an injected capability
//!   so controller logic stays testable without a real rendering surface.
//!
//! ## Data flow
//! Controller events mutate [`WidgetState`]; after each event the state is
//! projected into a [`WidgetSnapshot`] and handed to the bound
//! [`WidgetSurface`] for rendering.
//!
//! ## Ownership and lifetimes
//! `WidgetState` owns all strings and slot values to keep event handling free
//! of cross-layer borrowing.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors. Illegal
//! submission re-entry is prevented by the [`WidgetState::begin_submission`]
//! guard.

use std::sync::Mutex;

use meal_lens_analysis_contract::NutritionSlots;

/// Preview images are capped to the full width of the drop target.
pub const PREVIEW_MAX_WIDTH_PERCENT: u8 = 100;

/// Preview images are capped to this display height in pixels.
pub const PREVIEW_MAX_HEIGHT_PX: u32 = 200;

/// Submission lifecycle of the widget.
///
/// Loading is re-entrant only after settling back to [`SubmitLifecycle::Idle`];
/// the disabled submit control is the sole concurrency guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitLifecycle {
    /// No submission in flight; the control is interactive.
    #[default]
    Idle,
    /// A request is in flight; the control is disabled.
    Loading,
    /// The latest response rendered into the results panel.
    DisplayingResults,
    /// The latest submission surfaced an error message.
    DisplayingError,
}

/// Aggregate widget runtime state.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Whether the drop target shows the drag-over highlight.
    pub drag_highlight: bool,
    /// Name of the currently selected file, if any.
    pub file_name: Option<String>,
    /// Preview `data:` URL for the current selection, if any.
    pub preview_source: Option<String>,
    /// Whether the loading indicator is visible.
    pub loading_visible: bool,
    /// Whether the results panel is visible.
    pub results_visible: bool,
    /// Message in the error panel; `None` keeps the panel hidden.
    pub error_message: Option<String>,
    /// Current results panel slot values.
    pub slots: NutritionSlots,
    /// Submission lifecycle state.
    pub lifecycle: SubmitLifecycle,
}

impl WidgetState {
    /// Creates default widget state with no selection.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            drag_highlight: false,
            file_name: None,
            preview_source: None,
            loading_visible: false,
            results_visible: false,
            error_message: None,
            slots: NutritionSlots::default(),
            lifecycle: SubmitLifecycle::Idle,
        }
    }

    /// Sets the drag-over highlight flag. Purely cosmetic.
    pub fn set_drag_highlight(&mut self, highlighted: bool) {
        self.drag_highlight = highlighted;
    }

    /// Records an accepted selection: label, preview, cleared error.
    pub fn accept_file(&mut self, file_name: impl Into<String>, preview_source: impl Into<String>) {
        self.file_name = Some(file_name.into());
        self.preview_source = Some(preview_source.into());
        self.error_message = None;
    }

    /// Shows a message in the error panel without touching the lifecycle.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Hides the error panel.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Returns `true` when the submit control is interactive.
    ///
    /// Invariant: submission requires a selected file and no in-flight
    /// request.
    pub fn can_submit(&self) -> bool {
        self.file_name.is_some() && self.lifecycle == SubmitLifecycle::Idle
    }

    /// Enters the loading phase of one submission.
    ///
    /// Disables the submit control, shows the loading indicator, hides any
    /// previous results, and clears the error panel.
    ///
    /// # Returns
    /// `false` (leaving state untouched) when no file is selected or a
    /// submission is already in flight.
    pub fn begin_submission(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }

        self.lifecycle = SubmitLifecycle::Loading;
        self.loading_visible = true;
        self.results_visible = false;
        self.error_message = None;
        true
    }

    /// Renders a successful response into the results panel.
    pub fn complete_with_results(&mut self, slots: NutritionSlots) {
        self.slots = slots;
        self.results_visible = true;
        self.lifecycle = SubmitLifecycle::DisplayingResults;
    }

    /// Surfaces a failed submission as an error panel message.
    pub fn complete_with_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.lifecycle = SubmitLifecycle::DisplayingError;
    }

    /// Unconditional cleanup after a submission settles.
    ///
    /// Hides the loading indicator and re-enables the submit control
    /// regardless of the outcome.
    pub fn settle_submission(&mut self) {
        self.loading_visible = false;
        self.lifecycle = SubmitLifecycle::Idle;
    }
}

/// Flat render projection of [`WidgetState`].
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    /// App version string.
    pub version: String,
    /// Drag-over highlight flag for the drop target.
    pub drag_highlight: bool,
    /// Selected file label, if any.
    pub file_name: Option<String>,
    /// Preview `data:` URL, if any.
    pub preview_source: Option<String>,
    /// Whether the submit control is interactive.
    pub submit_enabled: bool,
    /// Whether the loading indicator is visible.
    pub loading_visible: bool,
    /// Whether the results panel is visible.
    pub results_visible: bool,
    /// Error panel message; `None` keeps the panel hidden.
    pub error_message: Option<String>,
    /// Calories slot text.
    pub calories: String,
    /// Protein slot text.
    pub protein_g: String,
    /// Carbohydrates slot text.
    pub carbs_g: String,
    /// Fat slot text.
    pub fat_g: String,
}

/// Projects widget state into a flat render snapshot.
pub fn project_snapshot(state: &WidgetState) -> WidgetSnapshot {
    WidgetSnapshot {
        version: state.version.clone(),
        drag_highlight: state.drag_highlight,
        file_name: state.file_name.clone(),
        preview_source: state.preview_source.clone(),
        submit_enabled: state.can_submit(),
        loading_visible: state.loading_visible,
        results_visible: state.results_visible,
        error_message: state.error_message.clone(),
        calories: state.slots.calories.clone(),
        protein_g: state.slots.protein_g.clone(),
        carbs_g: state.slots.carbs_g.clone(),
        fat_g: state.slots.fat_g.clone(),
    }
}

/// Rendering seam implemented by concrete widget surfaces.
///
/// The controller never creates or destroys surface elements; it only
/// presents snapshots to a pre-existing surface.
pub trait WidgetSurface: Send + Sync {
    /// Renders one snapshot of the widget state.
    fn present(&self, snapshot: &WidgetSnapshot);
}

/// Deterministic surface that records every presented snapshot.
///
/// Used by tests and the console shell in place of a real rendering surface.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    frames: Mutex<Vec<WidgetSnapshot>>,
}

impl RecordingSurface {
    /// Creates an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently presented snapshot.
    pub fn last(&self) -> Option<WidgetSnapshot> {
        self.frames
            .lock()
            .ok()
            .and_then(|frames| frames.last().cloned())
    }

    /// Returns every presented snapshot in order.
    pub fn history(&self) -> Vec<WidgetSnapshot> {
        self.frames
            .lock()
            .map(|frames| frames.clone())
            .unwrap_or_default()
    }
}

impl WidgetSurface for RecordingSurface {
    fn present(&self, snapshot: &WidgetSnapshot) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(snapshot.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for lifecycle gating and snapshot projection.

    use super::*;

    #[test]
    fn submit_gate_requires_selection_and_idle_lifecycle() {
        let mut state = WidgetState::new("v0.1.0");
        assert!(!state.can_submit());
        assert!(!state.begin_submission());

        state.accept_file("lunch.png", "data:image/png;base64,AA==");
        assert!(state.can_submit());

        assert!(state.begin_submission());
        assert!(!state.begin_submission());

        state.settle_submission();
        assert!(state.can_submit());
    }

    #[test]
    fn begin_submission_hides_results_and_clears_error() {
        let mut state = WidgetState::new("v0.1.0");
        state.accept_file("lunch.png", "data:image/png;base64,AA==");
        state.results_visible = true;
        state.show_error("stale message");

        assert!(state.begin_submission());
        assert!(state.loading_visible);
        assert!(!state.results_visible);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn settle_always_restores_interactive_idle_state() {
        let mut state = WidgetState::new("v0.1.0");
        state.accept_file("lunch.png", "data:image/png;base64,AA==");
        assert!(state.begin_submission());

        state.complete_with_error("bad image");
        state.settle_submission();

        assert!(!state.loading_visible);
        assert_eq!(state.lifecycle, SubmitLifecycle::Idle);
        assert!(project_snapshot(&state).submit_enabled);
    }

    #[test]
    fn recording_surface_keeps_presentation_order() {
        let surface = RecordingSurface::new();
        let mut state = WidgetState::new("v0.1.0");

        surface.present(&project_snapshot(&state));
        state.accept_file("lunch.png", "data:image/png;base64,AA==");
        surface.present(&project_snapshot(&state));

        let history = surface.history();
        assert_eq!(history.len(), 2);
        assert!(!history[0].submit_enabled);
        assert!(history[1].submit_enabled);
    }
}
