#![warn(missing_docs)]
//! # meal-lens-app binary
//!
//! Console shell for meal-lens: runs one pick-and-submit cycle against the
//! configured analysis endpoint.

/// CLI entry point.
fn main() {
    let mut args = std::env::args().skip(1);

    match args.next() {
        Some(path) => {
            if let Err(error) = shell::run_once(&path) {
                eprintln!("meal-lens: {error}");
                std::process::exit(1);
            }
        }
        None => {
            println!("meal-lens-app {}", meal_lens_app::app_version());
            println!(
                "endpoint={} ({})",
                meal_lens_app::endpoint_from_env(),
                meal_lens_app::ENDPOINT_ENV_VAR
            );
            println!("usage: meal-lens-app <image-path>");
        }
    }
}

mod shell {
    //! Console projection of widget snapshots plus one-shot submission flow.

    use std::path::Path;
    use std::sync::Arc;

    use meal_lens_app::{HttpAnalyzeTransport, WidgetController, endpoint_from_env};
    use meal_lens_core::ImageFile;
    use meal_lens_ui::{WidgetSnapshot, WidgetSurface};

    /// Surface that prints each presented snapshot as one status line.
    struct ConsoleSurface;

    impl WidgetSurface for ConsoleSurface {
        fn present(&self, snapshot: &WidgetSnapshot) {
            let file = snapshot.file_name.as_deref().unwrap_or("<none>");
            println!(
                "file={file} submit={} loading={} results={}",
                flag(snapshot.submit_enabled),
                flag(snapshot.loading_visible),
                flag(snapshot.results_visible),
            );

            if snapshot.results_visible {
                println!(
                    "  calories={} protein_g={} carbs_g={} fat_g={}",
                    snapshot.calories, snapshot.protein_g, snapshot.carbs_g, snapshot.fat_g
                );
            }

            if let Some(message) = &snapshot.error_message {
                println!("  error: {message}");
            }
        }
    }

    fn flag(value: bool) -> &'static str {
        if value { "on" } else { "off" }
    }

    /// Loads one image file and runs a pick-and-submit cycle.
    pub fn run_once(path: &str) -> Result<(), String> {
        let bytes = std::fs::read(path)
            .map_err(|error| format!("unable to read '{path}': {error}"))?;

        let file_name = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path)
            .to_string();
        let mime_type = mime_from_extension(&file_name);

        let file = ImageFile::new(file_name, mime_type, bytes)
            .map_err(|error| format!("unable to stage '{path}': {error}"))?;

        let transport =
            HttpAnalyzeTransport::new().map_err(|error| format!("transport setup: {error}"))?;
        let mut controller = WidgetController::new(
            &endpoint_from_env(),
            Arc::new(transport),
            Arc::new(ConsoleSurface),
        )
        .map_err(|error| format!("controller setup: {error}"))?;

        controller.on_file_picked(file);
        controller.on_submit();

        if let Some(report) = controller.last_report() {
            println!(
                "request: status={} payload_len={} payload_sha256={}",
                report.response.status, report.payload_len, report.payload_sha256
            );
        }

        Ok(())
    }

    /// Guesses a MIME type from the file extension.
    ///
    /// The picker path performs no type check, so an unknown extension is
    /// staged as an opaque binary payload.
    fn mime_from_extension(file_name: &str) -> &'static str {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            Some("svg") => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}
