//! Wiki capabilities consumed by docsync.
//!
//! The link rewriter only needs [`WikiBackend`]: page lookups and attachment
//! handling. Publishing pages additionally needs [`PageStore`]. Both are
//! implemented by the Confluence client and by [`crate::MockWiki`] for tests.

use std::path::Path;

use crate::error::BackendError;

/// Page found by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// Page ID.
    pub id: String,
    /// Browsable path of the page, relative to `{base_url}/wiki`
    /// (e.g. `/spaces/SPACE/pages/123`).
    pub web_ui_path: String,
}

/// Attachment of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentSummary {
    /// Attachment ID.
    pub id: String,
    /// Attachment file name.
    pub title: String,
}

/// Read-mostly wiki capabilities used while rewriting links.
pub trait WikiBackend {
    /// Look up the ID of the page titled `title` in `space`.
    fn page_id(&self, space: &str, title: &str) -> Result<Option<String>, BackendError>;

    /// Look up the page titled `title` in `space`.
    fn page_by_title(&self, space: &str, title: &str) -> Result<Option<PageSummary>, BackendError>;

    /// List attachments of a page named `filename`.
    fn attachments(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Vec<AttachmentSummary>, BackendError>;

    /// Upload `path` as a new attachment of a page, named after its file name.
    fn attach_file(&self, page_id: &str, path: &Path) -> Result<(), BackendError>;
}

/// Page write capabilities used when publishing documents.
///
/// Bodies are in wiki markup representation.
pub trait PageStore: WikiBackend {
    /// Create a page under `parent_id` and return its ID.
    fn create_page(
        &self,
        space: &str,
        title: &str,
        body: &str,
        parent_id: &str,
    ) -> Result<String, BackendError>;

    /// Update the page titled `title` in `space`, or create it under
    /// `parent_id` if it does not exist. Returns the page ID.
    fn update_or_create(
        &self,
        space: &str,
        parent_id: &str,
        title: &str,
        body: &str,
    ) -> Result<String, BackendError>;
}
