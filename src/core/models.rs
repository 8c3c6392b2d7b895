// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::core::preview::FilePreview;

/// The payload the prediction service attaches to a response. Its shape is
/// owned by the remote model, not by this client, so it stays opaque JSON
/// until a renderer interprets it.
pub type ResultPayload = serde_json::Value;

// --- Outgoing Side ---

/// A file the user picked, dropped, or selected from the sample list.
///
/// Only the handle is kept here; the bytes are read inside the upload task
/// so a large image never sits in the UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: String,
}

impl SelectedFile {
    /// Builds a selection from a filesystem path, deriving the display name
    /// and MIME type from the file name.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime = guess_mime(&name).to_string();
        Self { path, name, mime }
    }

    /// True when the file name carries a known image extension.
    pub fn looks_like_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Maps a file extension to a MIME type for the multipart part.
pub fn guess_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// A single upload handed from the widget to the async task.
///
/// The sequence number ties the eventual `UploadOutcome` back to the widget:
/// only the most recently issued sequence is allowed to touch the UI.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub seq: u64,
    pub file: SelectedFile,
}

// --- Incoming Side ---

/// Echo of the submitted file as the server saw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The body of a successful `POST /predict`: the echoed file references plus
/// the opaque result payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub files: Vec<UploadedFile>,
    pub result: ResultPayload,
}

/// Everything a finished upload delivers to the UI: the parsed response and
/// a preview built from the exact bytes that were submitted.
#[derive(Debug, Clone)]
pub struct UploadSuccess {
    pub response: PredictResponse,
    pub preview: FilePreview,
}

/// Message sent from the upload task back to the event loop.
#[derive(Debug)]
pub struct UploadOutcome {
    pub seq: u64,
    pub file_name: String,
    pub received_at: DateTime<Utc>,
    pub result: Result<UploadSuccess, UploadError>,
}

// --- Error Taxonomy ---

/// Ways an upload can fail. All three are recoverable: the widget surfaces
/// the message and returns to an idle, usable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The request could not be sent at all, or timed out.
    Network(String),
    /// The server answered with a non-success status code.
    Server { status: u16, detail: String },
    /// The body came back but was not the JSON shape we expect.
    Malformed(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Network(detail) => write!(f, "network error: {}", detail),
            UploadError::Server { status, detail } => {
                write!(f, "server error (HTTP {}): {}", status, detail)
            }
            UploadError::Malformed(detail) => write!(f, "unreadable response: {}", detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guess_covers_common_image_extensions() {
        assert_eq!(guess_mime("cat.jpg"), "image/jpeg");
        assert_eq!(guess_mime("cat.JPEG"), "image/jpeg");
        assert_eq!(guess_mime("scan.tiff"), "image/tiff");
        assert_eq!(guess_mime("archive.tar.gz"), "application/octet-stream");
        assert_eq!(guess_mime("no_extension"), "application/octet-stream");
    }

    #[test]
    fn selected_file_derives_name_and_mime() {
        let file = SelectedFile::from_path(PathBuf::from("/tmp/images/cat.png"));
        assert_eq!(file.name, "cat.png");
        assert_eq!(file.mime, "image/png");
        assert!(file.looks_like_image());
    }

    #[test]
    fn predict_response_tolerates_missing_files_list() {
        let body = r#"{"result": {"label": "cat", "confidence": 0.98}}"#;
        let parsed: PredictResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.files.is_empty());
        assert_eq!(parsed.result["label"], "cat");
    }

    #[test]
    fn predict_response_requires_a_result_field() {
        let body = r#"{"files": [{"name": "cat.jpg"}]}"#;
        assert!(serde_json::from_str::<PredictResponse>(body).is_err());
    }
}
