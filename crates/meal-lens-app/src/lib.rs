#![warn(missing_docs)]
//! # meal-lens-app
//!
//! ## Purpose
//! Orchestrates intake, submission, analysis parsing, and widget state for
//! `meal-lens`.
//!
//! ## Responsibilities
//! - Drive the capture-and-submit widget from surface events.
//! - Enforce the selection precondition before submission.
//! - Issue exactly one analysis request per submit action and convert every
//!   outcome into a user-visible message or rendered results.
//! - Guarantee the unconditional cleanup step after each submission.
//!
//! ## Data flow
//! Drop/picker event -> intake gate -> selection + preview -> submit ->
//! multipart upload -> response parsing -> slots or error message -> snapshot
//! presented to the bound surface.
//!
//! ## Ownership and lifetimes
//! The controller owns its selection, client, and state; surfaces and
//! transports are shared trait objects injected at construction.
//!
//! ## Error model
//! Every submission failure is converted at the controller boundary into a
//! display-only message ([`SubmissionFailure`]); nothing escalates past the
//! widget and the control always returns to an interactive idle state.

use std::sync::Arc;

use meal_lens_analysis_contract::{
    NutritionSlots, map_display_slots, parse_nutrition_response, rejection_message,
};
use meal_lens_core::{CoreError, ImageFile, preview_data_url};
use meal_lens_intake::{FileSource, IntakeError, Selection, accept_file};
use meal_lens_ui::{WidgetState, WidgetSurface, project_snapshot};
use meal_lens_upload::{
    AnalyzeClient, AnalyzeRequest, AnalyzeTransport, HttpResponse, SubmissionReport, UploadError,
};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("MEAL_LENS_VERSION");

/// Message shown when a dropped file fails the image gate.
pub const NON_IMAGE_DROP_MESSAGE: &str = "Please upload an image file";

/// Message shown when submit is pressed with no selection.
pub const NO_FILE_MESSAGE: &str = "Please select an image first";

/// Fallback message for a transport or decode failure with no usable text.
pub const TRANSPORT_FALLBACK: &str = "An error occurred while analyzing the image";

/// Environment variable overriding the analysis endpoint base URL.
pub const ENDPOINT_ENV_VAR: &str = "MEAL_LENS_ENDPOINT";

/// Default analysis endpoint base URL for local development.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Resolves the analysis endpoint base URL.
///
/// Semantics:
/// - `MEAL_LENS_ENDPOINT` set to a non-blank value => that value, trimmed.
/// - Unset or blank => [`DEFAULT_ENDPOINT`].
pub fn endpoint_from_env() -> String {
    match std::env::var(ENDPOINT_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => DEFAULT_ENDPOINT.to_string(),
    }
}

/// One submission failure, carrying its user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    /// Submit was pressed with no selected file; no request was issued.
    NoFileSelected,
    /// The service settled with a non-2xx status.
    Rejected {
        /// HTTP status returned by the service.
        status: u16,
        /// Message extracted from the rejection body (or its fallback).
        message: String,
    },
    /// Network-level or response-decode failure.
    Failed {
        /// Message surfaced to the error panel.
        message: String,
    },
}

impl SubmissionFailure {
    /// Returns the user-visible message for this failure.
    pub fn message(&self) -> &str {
        match self {
            Self::NoFileSelected => NO_FILE_MESSAGE,
            Self::Rejected { message, .. } | Self::Failed { message } => message,
        }
    }
}

/// Failure taxonomy of the widget; all classes surface as plain messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Invalid user input (no selection, non-image drop).
    UserInput,
    /// Remote service rejected the request.
    RemoteRejection,
    /// Transport or parse failure during submission.
    Transport,
}

/// Classifies a submission failure into the widget taxonomy.
pub fn classify_failure(failure: &SubmissionFailure) -> FailureClass {
    match failure {
        SubmissionFailure::NoFileSelected => FailureClass::UserInput,
        SubmissionFailure::Rejected { .. } => FailureClass::RemoteRejection,
        SubmissionFailure::Failed { .. } => FailureClass::Transport,
    }
}

/// Event-driven controller for the capture-and-submit widget.
///
/// Every event handler mutates the owned [`WidgetState`] and then presents
/// one snapshot to the bound surface. The controller runs on the surface's
/// event thread; the only suspension point is the outbound request inside
/// [`WidgetController::on_submit`].
pub struct WidgetController {
    selection: Selection,
    client: AnalyzeClient,
    state: WidgetState,
    surface: Arc<dyn WidgetSurface>,
    last_report: Option<SubmissionReport>,
}

impl WidgetController {
    /// Creates a controller bound to one surface and one transport.
    ///
    /// # Errors
    /// Returns [`AppError::Upload`] when the base URL violates endpoint
    /// policy.
    pub fn new(
        base_url: &str,
        transport: Arc<dyn AnalyzeTransport>,
        surface: Arc<dyn WidgetSurface>,
    ) -> Result<Self, AppError> {
        let client = AnalyzeClient::new(base_url, transport)?;
        let controller = Self {
            selection: Selection::new(),
            client,
            state: WidgetState::new(APP_VERSION),
            surface,
            last_report: None,
        };

        controller.present();
        Ok(controller)
    }

    /// Returns the current widget state.
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Returns the currently selected file, if any.
    pub fn selected_file(&self) -> Option<&ImageFile> {
        self.selection.current()
    }

    /// Returns the report of the most recent completed request.
    pub fn last_report(&self) -> Option<&SubmissionReport> {
        self.last_report.as_ref()
    }

    /// Applies the drag-over highlight. Purely cosmetic.
    pub fn on_drag_enter(&mut self) {
        self.state.set_drag_highlight(true);
        self.present();
    }

    /// Removes the drag-over highlight. Purely cosmetic.
    pub fn on_drag_leave(&mut self) {
        self.state.set_drag_highlight(false);
        self.present();
    }

    /// Handles a file dropped onto the drop target.
    ///
    /// Completing the drop always removes the highlight. Files failing the
    /// image gate surface [`NON_IMAGE_DROP_MESSAGE`] and leave the current
    /// selection unchanged.
    pub fn on_file_dropped(&mut self, file: ImageFile) {
        self.state.set_drag_highlight(false);

        match accept_file(file, FileSource::DragDrop) {
            Ok(accepted) => self.store_selection(accepted),
            Err(IntakeError::NotAnImage { .. }) => self.state.show_error(NON_IMAGE_DROP_MESSAGE),
        }

        self.present();
    }

    /// Handles a file chosen through the manual picker.
    ///
    /// The picker path performs no type check; only drops are gated.
    pub fn on_file_picked(&mut self, file: ImageFile) {
        if let Ok(accepted) = accept_file(file, FileSource::Picker) {
            self.store_selection(accepted);
        }

        self.present();
    }

    /// Handles an explicit submit action.
    ///
    /// With no selection, surfaces [`NO_FILE_MESSAGE`] and issues no request.
    /// Otherwise issues exactly one request and renders results or an error;
    /// the loading indicator is hidden and the control re-enabled on every
    /// path.
    pub fn on_submit(&mut self) {
        let Some(file) = self.selection.current().cloned() else {
            self.state.show_error(NO_FILE_MESSAGE);
            self.present();
            return;
        };

        // The disabled control is the sole concurrency guard.
        if !self.state.begin_submission() {
            return;
        }
        self.present();

        match self.run_submission(&file) {
            Ok(slots) => self.state.complete_with_results(slots),
            Err(failure) => {
                let message = failure.message().to_string();
                self.state.complete_with_error(message);
            }
        }

        self.state.settle_submission();
        self.present();
    }

    fn store_selection(&mut self, file: ImageFile) {
        let preview = preview_data_url(&file);
        self.state.accept_file(&file.file_name, preview);
        self.selection.select(file);
    }

    fn run_submission(&mut self, file: &ImageFile) -> Result<NutritionSlots, SubmissionFailure> {
        let report = self
            .client
            .submit_image(file)
            .map_err(|error| SubmissionFailure::Failed {
                message: fallback_if_blank(error.to_string()),
            })?;

        let response = report.response.clone();
        self.last_report = Some(report);

        if !response.is_success() {
            return Err(SubmissionFailure::Rejected {
                status: response.status,
                message: rejection_message(&response.body),
            });
        }

        let parsed =
            parse_nutrition_response(&response.body).map_err(|error| SubmissionFailure::Failed {
                message: fallback_if_blank(error.to_string()),
            })?;

        Ok(map_display_slots(&parsed))
    }

    fn present(&self) {
        self.surface.present(&project_snapshot(&self.state));
    }
}

fn fallback_if_blank(message: String) -> String {
    if message.trim().is_empty() {
        TRANSPORT_FALLBACK.to_string()
    } else {
        message
    }
}

/// HTTP transport backed by a blocking reqwest client.
///
/// No request timeout is configured; a submission waits indefinitely for
/// settlement, matching the widget's observable contract.
pub struct HttpAnalyzeTransport {
    client: reqwest::blocking::Client,
}

impl HttpAnalyzeTransport {
    /// Builds the transport with an untimed blocking client.
    ///
    /// # Errors
    /// Returns [`UploadError::Transport`] when the underlying client cannot
    /// be constructed.
    pub fn new() -> Result<Self, UploadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(|error| UploadError::Transport(error.to_string()))?;

        Ok(Self { client })
    }
}

impl AnalyzeTransport for HttpAnalyzeTransport {
    fn send(&self, request: &AnalyzeRequest) -> Result<HttpResponse, UploadError> {
        let response = self
            .client
            .post(request.url.as_str())
            .header(reqwest::header::CONTENT_TYPE, &request.content_type)
            .body(request.body.clone())
            .send()
            .map_err(|error| UploadError::Transport(error.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| UploadError::Transport(error.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// File payload validation error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    /// Upload subsystem error.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
}
