//! Shared fixtures for app integration tests.

use std::sync::{Arc, Mutex};

use meal_lens_app::WidgetController;
use meal_lens_core::ImageFile;
use meal_lens_ui::RecordingSurface;
use meal_lens_upload::{AnalyzeRequest, AnalyzeTransport, HttpResponse, UploadError};

/// Base URL used by every integration controller.
#[allow(dead_code)]
pub const TEST_BASE_URL: &str = "http://localhost:5000";

/// Creates a deterministic image file fixture.
#[allow(dead_code)]
pub fn fixture_image_file() -> ImageFile {
    ImageFile::new("lunch.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47])
        .expect("image fixture should be valid")
}

/// Creates a deterministic non-image file fixture.
#[allow(dead_code)]
pub fn fixture_document_file() -> ImageFile {
    ImageFile::new("report.pdf", "application/pdf", vec![0x25, 0x50, 0x44, 0x46])
        .expect("document fixture should be valid")
}

/// Transport returning one fixed response while recording every request.
pub struct StubTransport {
    status: u16,
    body: String,
    requests: Mutex<Vec<AnalyzeRequest>>,
}

impl StubTransport {
    /// Stub that settles every request with a 200 response.
    #[allow(dead_code)]
    pub fn success(body: &str) -> Arc<Self> {
        Self::with_status(200, body)
    }

    /// Stub that settles every request with the given status and body.
    #[allow(dead_code)]
    pub fn with_status(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Number of requests issued through this transport.
    #[allow(dead_code)]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .expect("request lock should work")
            .len()
    }

    /// Most recent request issued through this transport.
    #[allow(dead_code)]
    pub fn last_request(&self) -> Option<AnalyzeRequest> {
        self.requests
            .lock()
            .expect("request lock should work")
            .last()
            .cloned()
    }
}

impl AnalyzeTransport for StubTransport {
    fn send(&self, request: &AnalyzeRequest) -> Result<HttpResponse, UploadError> {
        self.requests
            .lock()
            .expect("request lock should work")
            .push(request.clone());

        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Builds a controller bound to a recording surface.
#[allow(dead_code)]
pub fn controller_with(
    transport: Arc<dyn AnalyzeTransport>,
) -> (WidgetController, Arc<RecordingSurface>) {
    let surface = Arc::new(RecordingSurface::new());
    let controller = WidgetController::new(TEST_BASE_URL, transport, surface.clone())
        .expect("controller should build");
    (controller, surface)
}
