#![warn(missing_docs)]
//! # meal-lens-upload
//!
//! ## Purpose
//! Implements the outbound analysis submission: multipart encoding, endpoint
//! policy, and the transport abstraction.
//!
//! ## Responsibilities
//! - Encode one selected file as a `multipart/form-data` body under the
//!   `image` field name.
//! - Validate the configured base URL and derive the `/analyze` request URL.
//! - Execute submissions through an injectable transport abstraction.
//!
//! ## Data flow
//! Accepted [`meal_lens_core::ImageFile`] -> [`MultipartBody`] ->
//! [`AnalyzeClient::submit_image`] sends one [`AnalyzeRequest`] through
//! [`AnalyzeTransport`] -> [`HttpResponse`] is returned to the controller for
//! contract parsing.
//!
//! ## Ownership and lifetimes
//! Encoded bodies and responses own their buffers so the controller can drop
//! the selection without invalidating an in-flight report.
//!
//! ## Error model
//! Endpoint policy violations, encoding failures, and transport failures are
//! surfaced as [`UploadError`]. There is no retry, queuing, or timeout at
//! this layer; each call issues exactly one request and waits for settlement.

use std::sync::Arc;

use meal_lens_core::ImageFile;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

/// Multipart field name carrying the image part.
pub const IMAGE_FIELD_NAME: &str = "image";

/// Path appended to the configured base URL for analysis requests.
pub const ANALYZE_PATH: &str = "/analyze";

const BOUNDARY_SUFFIX_LEN: usize = 24;

/// Encoded `multipart/form-data` body with exactly one file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Encodes one file under [`IMAGE_FIELD_NAME`] with a random boundary.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidPart`] when the file name survives
    /// sanitization empty.
    pub fn for_image(file: &ImageFile) -> Result<Self, UploadError> {
        Self::with_boundary(file, random_boundary())
    }

    /// Encodes one file with a caller-supplied boundary.
    ///
    /// Deterministic boundaries keep encoded bodies byte-stable in tests.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidPart`] for an empty boundary, a boundary
    /// containing whitespace or control characters, or a file name that
    /// survives sanitization empty.
    pub fn with_boundary(
        file: &ImageFile,
        boundary: impl Into<String>,
    ) -> Result<Self, UploadError> {
        let boundary = boundary.into();
        if boundary.is_empty() {
            return Err(UploadError::InvalidPart(
                "multipart boundary is empty".to_string(),
            ));
        }

        if boundary
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(UploadError::InvalidPart(
                "multipart boundary contains whitespace or control characters".to_string(),
            ));
        }

        let file_name = sanitize_header_token(&file.file_name);
        if file_name.is_empty() {
            return Err(UploadError::InvalidPart(
                "file name is empty after header sanitization".to_string(),
            ));
        }

        let mut bytes = Vec::with_capacity(file.bytes.len() + 256);
        bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{IMAGE_FIELD_NAME}\"; \
                 filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.mime_type).as_bytes());
        bytes.extend_from_slice(&file.bytes);
        bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Ok(Self { boundary, bytes })
    }

    /// Returns the `Content-Type` header value for this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Returns the encoded body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the encoded body length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the encoded body is empty (never, once built).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the hex-encoded SHA-256 digest of the encoded body.
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// One outbound analysis request ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    /// Fully resolved request URL (`{base}/analyze`).
    pub url: Url,
    /// `Content-Type` header value including the multipart boundary.
    pub content_type: String,
    /// Encoded multipart body bytes.
    pub body: Vec<u8>,
}

/// Raw HTTP response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by the analyze client.
pub trait AnalyzeTransport: Send + Sync {
    /// Sends one request and waits for settlement.
    ///
    /// # Errors
    /// Returns [`UploadError::Transport`] for network-level failures where no
    /// HTTP response was produced. Non-2xx responses are not transport
    /// errors; they are returned as [`HttpResponse`] values.
    fn send(&self, request: &AnalyzeRequest) -> Result<HttpResponse, UploadError>;
}

/// Outcome of one completed submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    /// Raw response from the analysis service.
    pub response: HttpResponse,
    /// Hex SHA-256 digest of the encoded request body.
    pub payload_sha256: String,
    /// Encoded request body length in bytes.
    pub payload_len: usize,
}

/// Client that validates endpoint policy and submits files for analysis.
#[derive(Clone)]
pub struct AnalyzeClient {
    base_url: String,
    analyze_url: Url,
    transport: Arc<dyn AnalyzeTransport>,
}

impl AnalyzeClient {
    /// Creates a validated analyze client.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidEndpoint`] when the base URL does not
    /// parse, is not `http`/`https`, or has no host.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn AnalyzeTransport>,
    ) -> Result<Self, UploadError> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let analyze_url = analyze_url_for(&base_url)?;

        Ok(Self {
            base_url,
            analyze_url,
            transport,
        })
    }

    /// Returns the configured base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the resolved analysis request URL.
    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    /// Submits one file for analysis, issuing exactly one request.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidPart`] when encoding fails and
    /// [`UploadError::Transport`] when the transport settles with a failure.
    pub fn submit_image(&self, file: &ImageFile) -> Result<SubmissionReport, UploadError> {
        let body = MultipartBody::for_image(file)?;
        let payload_sha256 = body.sha256_hex();
        let payload_len = body.len();

        let request = AnalyzeRequest {
            url: self.analyze_url.clone(),
            content_type: body.content_type(),
            body: body.bytes.clone(),
        };

        let response = self.transport.send(&request)?;

        Ok(SubmissionReport {
            response,
            payload_sha256,
            payload_len,
        })
    }
}

/// Resolves the analysis URL for a validated base URL.
///
/// # Semantics
/// The path is appended to the base as written (after trailing-slash trim),
/// so a base of `https://host/api` resolves to `https://host/api/analyze`.
///
/// # Errors
/// Returns [`UploadError::InvalidEndpoint`] for an unparseable base, a
/// non-`http(s)` scheme, or a missing host.
pub fn analyze_url_for(base_url: &str) -> Result<Url, UploadError> {
    let base_url = base_url.trim_end_matches('/');
    let parsed = Url::parse(base_url)
        .map_err(|error| UploadError::InvalidEndpoint(format!("invalid base url: {error}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UploadError::InvalidEndpoint(
            "base url must use http or https".to_string(),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(UploadError::InvalidEndpoint(
            "base url must include a host".to_string(),
        ));
    }

    Url::parse(&format!("{base_url}{ANALYZE_PATH}"))
        .map_err(|error| UploadError::InvalidEndpoint(format!("invalid analyze url: {error}")))
}

fn random_boundary() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(BOUNDARY_SUFFIX_LEN)
        .map(char::from)
        .collect();

    format!("meal-lens-{suffix}")
}

fn sanitize_header_token(raw: &str) -> String {
    raw.chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Upload layer error type.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Base URL violates endpoint policy.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Multipart encoding failed.
    #[error("invalid multipart part: {0}")]
    InvalidPart(String),
    /// Network-level failure before any HTTP response settled.
    #[error("{0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for multipart encoding and endpoint policy.

    use super::*;

    fn fixture_file() -> ImageFile {
        ImageFile::new("lunch.png", "image/png", vec![1, 2, 3, 4]).expect("fixture should build")
    }

    #[test]
    fn encodes_single_image_part_with_headers() {
        let body = MultipartBody::with_boundary(&fixture_file(), "test-boundary")
            .expect("body should encode");

        let text = String::from_utf8_lossy(body.bytes());
        assert!(text.starts_with("--test-boundary\r\n"));
        assert!(text.contains("Content-Disposition: form-data; name=\"image\"; filename=\"lunch.png\""));
        assert!(text.contains("Content-Type: image/png\r\n\r\n"));
        assert!(text.ends_with("\r\n--test-boundary--\r\n"));
        assert_eq!(
            body.content_type(),
            "multipart/form-data; boundary=test-boundary"
        );
    }

    #[test]
    fn random_boundaries_differ_between_bodies() {
        let first = MultipartBody::for_image(&fixture_file()).expect("body should encode");
        let second = MultipartBody::for_image(&fixture_file()).expect("body should encode");
        assert_ne!(first.content_type(), second.content_type());
    }

    #[test]
    fn digest_is_stable_for_identical_bodies() {
        let first = MultipartBody::with_boundary(&fixture_file(), "b").expect("should encode");
        let second = MultipartBody::with_boundary(&fixture_file(), "b").expect("should encode");
        assert_eq!(first.sha256_hex(), second.sha256_hex());
    }

    #[test]
    fn sanitizes_quotes_and_control_characters_in_file_names() {
        let file = ImageFile::new("lu\"nch\r\n.png", "image/png", vec![1]).expect("should build");
        let body = MultipartBody::with_boundary(&file, "b").expect("should encode");
        let text = String::from_utf8_lossy(body.bytes());
        assert!(text.contains("filename=\"lu_nch__.png\""));
    }

    #[test]
    fn endpoint_policy_accepts_http_and_https_hosts_only() {
        analyze_url_for("http://localhost:5000").expect("http endpoint should pass");
        analyze_url_for("https://api.example.test").expect("https endpoint should pass");
        assert!(analyze_url_for("ftp://example.test").is_err());
        assert!(analyze_url_for("not a url").is_err());
    }

    #[test]
    fn analyze_url_appends_path_preserving_base_prefix() {
        let url = analyze_url_for("https://api.example.test/v2/").expect("should resolve");
        assert_eq!(url.as_str(), "https://api.example.test/v2/analyze");

        let url = analyze_url_for("http://localhost:5000").expect("should resolve");
        assert_eq!(url.as_str(), "http://localhost:5000/analyze");
    }
}
