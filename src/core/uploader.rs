// src/core/uploader.rs

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{error, info};

use crate::core::models::{
    PredictResponse, SelectedFile, UploadError, UploadOutcome, UploadRequest, UploadSuccess,
};
use crate::core::preview::build_preview;

/// The service exposes exactly one upload endpoint.
pub const PREDICT_PATH: &str = "/predict";

/// The multipart field name the prediction service reads the file from.
const FILE_FIELD: &str = "file";

/// Inference on large images can be slow, but it must not be unbounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Builds the shared HTTP client used for every upload.
pub fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("LumenUploader/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Runs one upload end to end: read the file, POST it, parse the response,
/// and build the preview from the same bytes that went over the wire.
///
/// This is the body of the spawned task; it never panics and always produces
/// an outcome for the event loop, success or not.
pub async fn perform_upload(
    client: &reqwest::Client,
    base_url: &str,
    request: UploadRequest,
) -> UploadOutcome {
    let file_name = request.file.name.clone();
    let result = upload_file(client, base_url, &request.file).await;
    if let Err(e) = &result {
        error!(seq = request.seq, file = %file_name, error = %e, "upload did not settle cleanly");
    }
    UploadOutcome {
        seq: request.seq,
        file_name,
        received_at: Utc::now(),
        result,
    }
}

async fn upload_file(
    client: &reqwest::Client,
    base_url: &str,
    file: &SelectedFile,
) -> Result<UploadSuccess, UploadError> {
    let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
        UploadError::Network(format!("could not read {}: {}", file.path.display(), e))
    })?;
    let response = post_bytes(client, base_url, file, bytes.clone()).await?;
    // The preview is deliberately built only after the round-trip, so it
    // never appears before the server has answered.
    let preview = build_preview(&file.name, &bytes);
    Ok(UploadSuccess { response, preview })
}

/// POSTs the bytes as a single-file multipart form and parses the JSON body.
pub(crate) async fn post_bytes(
    client: &reqwest::Client,
    base_url: &str,
    file: &SelectedFile,
    bytes: Vec<u8>,
) -> Result<PredictResponse, UploadError> {
    let part = Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str(&file.mime)
        .map_err(|e| UploadError::Network(format!("invalid MIME type {}: {}", file.mime, e)))?;
    let form = Form::new().part(FILE_FIELD, part);

    let url = format!("{}{}", base_url.trim_end_matches('/'), PREDICT_PATH);
    info!(url = %url, file = %file.name, mime = %file.mime, "dispatching upload");

    let response = client
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| UploadError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| UploadError::Network(format!("failed to read response body: {}", e)))?;

    if !status.is_success() {
        return Err(UploadError::Server {
            status: status.as_u16(),
            detail: extract_error_detail(&body),
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| UploadError::Malformed(format!("expected a JSON prediction body: {}", e)))
}

/// Pulls the service's own `error` field out of a failure body when there is
/// one; otherwise a trimmed slice of the body is better than nothing.
fn extract_error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no detail provided".to_string()
            } else {
                trimmed.chars().take(120).collect()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn cat_jpg() -> SelectedFile {
        SelectedFile::from_path(PathBuf::from("/samples/cat.jpg"))
    }

    /// Serves exactly one canned HTTP response, draining the request first so
    /// the client never sees a reset mid-upload.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if let Some(done) = request_complete(&request) {
                    if done {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        base_url
    }

    /// `Some(true)` once headers plus the announced content length have been
    /// read, `None` while the header block is still incomplete.
    fn request_complete(buffer: &[u8]) -> Option<bool> {
        let text = String::from_utf8_lossy(buffer);
        let header_end = text.find("\r\n\r\n")?;
        let content_length = text
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        Some(buffer.len() >= header_end + 4 + content_length)
    }

    #[tokio::test]
    async fn successful_response_is_parsed() {
        let base = serve_once(
            "200 OK",
            r#"{"files":[{"name":"cat.jpg","size":3}],"result":{"label":"cat","confidence":0.98}}"#,
        )
        .await;
        let client = build_client().unwrap();

        let response = post_bytes(&client, &base, &cat_jpg(), b"abc".to_vec())
            .await
            .unwrap();

        assert_eq!(response.files.len(), 1);
        assert_eq!(response.files[0].name, "cat.jpg");
        assert_eq!(response.result["label"], "cat");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_server_error_with_service_detail() {
        let base = serve_once("500 Internal Server Error", r#"{"error":"model crashed"}"#).await;
        let client = build_client().unwrap();

        let err = post_bytes(&client, &base, &cat_jpg(), b"abc".to_vec())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UploadError::Server {
                status: 500,
                detail: "model crashed".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn invalid_json_body_maps_to_malformed() {
        let base = serve_once("200 OK", "<html>surprise</html>").await;
        let client = build_client().unwrap();

        let err = post_bytes(&client, &base, &cat_jpg(), b"abc".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Malformed(_)));
    }

    #[tokio::test]
    async fn unreachable_server_maps_to_network_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = build_client().unwrap();

        let err = post_bytes(&client, &base, &cat_jpg(), b"abc".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Network(_)));
    }

    #[tokio::test]
    async fn perform_upload_reports_an_unreadable_file_as_an_outcome() {
        let client = build_client().unwrap();
        let request = UploadRequest {
            seq: 7,
            file: SelectedFile::from_path(PathBuf::from("/definitely/not/here.jpg")),
        };

        let outcome = perform_upload(&client, "http://127.0.0.1:1", request).await;

        assert_eq!(outcome.seq, 7);
        assert_eq!(outcome.file_name, "here.jpg");
        assert!(matches!(outcome.result, Err(UploadError::Network(_))));
    }

    #[tokio::test]
    async fn perform_upload_builds_the_preview_from_the_submitted_bytes() {
        use image::{ImageFormat, RgbImage};
        use std::io::Cursor;

        let img = RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        tokio::fs::write(&path, &png).await.unwrap();

        let base = serve_once("200 OK", r#"{"result":{"label":"cat"}}"#).await;
        let client = build_client().unwrap();
        let request = UploadRequest {
            seq: 1,
            file: SelectedFile::from_path(path),
        };

        let outcome = perform_upload(&client, &base, request).await;
        let success = outcome.result.unwrap();
        match success.preview {
            crate::core::preview::FilePreview::Image(preview) => {
                assert_eq!((preview.source_width, preview.source_height), (2, 2));
                assert_eq!(preview.pixel(0, 0), Some((10, 20, 30)));
            }
            other => panic!("expected an image preview, got {:?}", other),
        }
    }

    #[test]
    fn error_detail_falls_back_to_a_trimmed_body() {
        assert_eq!(extract_error_detail(""), "no detail provided");
        assert_eq!(extract_error_detail("  gateway exploded  "), "gateway exploded");
        assert_eq!(
            extract_error_detail(r#"{"error":"bad input shape"}"#),
            "bad input shape"
        );
    }
}
