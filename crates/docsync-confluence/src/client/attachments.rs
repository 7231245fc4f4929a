//! Attachment operations for Confluence API.

use std::path::Path;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use rand::RngExt;
use tracing::{debug, info};

use super::{ConfluenceClient, read_json};
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentsResponse};

impl ConfluenceClient {
    /// List attachments of a page named `filename`.
    pub fn get_attachments(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Vec<Attachment>, ConfluenceError> {
        let url = format!(
            "{}/content/{}/child/attachment?filename={}",
            self.api_url(),
            page_id,
            utf8_percent_encode(filename, NON_ALPHANUMERIC)
        );

        debug!("Getting attachments '{}' of page {}", filename, page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let attachments: AttachmentsResponse = read_json(response)?;
        Ok(attachments.results)
    }

    /// Upload a file as a new attachment, named after its file name.
    pub fn attach_file(&self, page_id: &str, path: &Path) -> Result<Attachment, ConfluenceError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ConfluenceError::UnexpectedResponse(format!(
                    "attachment path without file name: {}",
                    path.display()
                ))
            })?
            .to_owned();
        let data = std::fs::read(path)?;

        let url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);

        info!("Uploading attachment '{}' to page {}", filename, page_id);

        let boundary = format!(
            "----DocsyncFormBoundary{:016x}",
            rand::rng().random::<u64>()
        );
        let body = multipart_body(&boundary, &filename, content_type(path), &data);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "nocheck")
            .header("Accept", "application/json")
            .send(&body[..])?;

        let response: AttachmentsResponse = read_json(response)?;
        response.results.into_iter().next().ok_or_else(|| {
            ConfluenceError::UnexpectedResponse("empty attachment response".to_owned())
        })
    }
}

/// Build multipart form data with a single `file` part.
fn multipart_body(boundary: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    // End boundary
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// Media type of an attachment, from its extension.
fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("XYZ", "pic.png", "image/png", b"DATA");

        assert_eq!(
            String::from_utf8(body).unwrap(),
            "--XYZ\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"pic.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             DATA\r\n\
             --XYZ--\r\n"
        );
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type(Path::new("a/pic.PNG")), "image/png");
        assert_eq!(content_type(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(content_type(Path::new("diagram.svg")), "image/svg+xml");
        assert_eq!(
            content_type(Path::new("archive.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type(Path::new("README")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_attach_file_missing_file() {
        let client = ConfluenceClient::new("https://acme.atlassian.net", "bot", "token");
        let dir = tempfile::TempDir::new().unwrap();

        let err = client
            .attach_file("1", &dir.path().join("missing.png"))
            .unwrap_err();

        assert!(matches!(err, ConfluenceError::Io(_)));
    }
}
