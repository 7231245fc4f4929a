//! Confluence attachment types.

use serde::Deserialize;

/// Confluence attachment.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment title/filename.
    pub title: String,
}

/// Attachments API response.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsResponse {
    /// List of attachments.
    pub results: Vec<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_attachments_response() {
        let json = r#"{
            "results": [
                {"id": "att123", "type": "attachment", "title": "pic.png",
                 "extensions": {"mediaType": "image/png", "fileSize": 2048}}
            ],
            "size": 1
        }"#;

        let response: AttachmentsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, "att123");
        assert_eq!(response.results[0].title, "pic.png");
    }
}
