//! Mock wiki implementation for testing.
//!
//! Provides [`MockWiki`] for unit testing without a Confluence server.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::backend::{AttachmentSummary, PageStore, PageSummary, WikiBackend};
use crate::error::BackendError;

/// Page stored by [`MockWiki`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPage {
    /// Page ID.
    pub id: String,
    /// Space key.
    pub space: String,
    /// Page title.
    pub title: String,
    /// Browsable path relative to `{base_url}/wiki`.
    pub web_ui_path: String,
    /// Parent page ID, if created through [`PageStore`].
    pub parent_id: Option<String>,
    /// Page body.
    pub body: String,
    /// Version number, starting at 1.
    pub version: u32,
}

/// Mock wiki for testing.
///
/// Keeps pages and attachments in memory and records every call. Uploaded files
/// become attachments, so later lookups see them. Use the builder methods to
/// configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use docsync_core::MockWiki;
///
/// let wiki = MockWiki::new()
///     .with_page("SPACE", "repo/guide.md", "123")
///     .with_attachment("123", "pic.png");
/// ```
#[derive(Debug, Default)]
pub struct MockWiki {
    pages: RwLock<Vec<MockPage>>,
    attachments: RwLock<HashMap<String, Vec<AttachmentSummary>>>,
    uploads: RwLock<Vec<(String, PathBuf)>>,
    calls: RwLock<Vec<String>>,
    failing: RwLock<Vec<&'static str>>,
}

impl MockWiki {
    /// Create a new empty mock wiki.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the default web path `/spaces/{space}/pages/{id}`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, space: &str, title: &str, id: &str) -> Self {
        let web_ui_path = format!("/spaces/{space}/pages/{id}");
        self.with_page_at(space, title, id, &web_ui_path)
    }

    /// Add a page with an explicit web path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page_at(self, space: &str, title: &str, id: &str, web_ui_path: &str) -> Self {
        self.pages.write().unwrap().push(MockPage {
            id: id.to_owned(),
            space: space.to_owned(),
            title: title.to_owned(),
            web_ui_path: web_ui_path.to_owned(),
            parent_id: None,
            body: String::new(),
            version: 1,
        });
        self
    }

    /// Add an attachment to a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_attachment(self, page_id: &str, filename: &str) -> Self {
        self.add_attachment(page_id, filename);
        self
    }

    /// Make every call to `operation` fail (e.g. `"attach_file"`).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing_on(self, operation: &'static str) -> Self {
        self.failing.write().unwrap().push(operation);
        self
    }

    /// Files uploaded so far, as `(page_id, path)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn uploads(&self) -> Vec<(String, PathBuf)> {
        self.uploads.read().unwrap().clone()
    }

    /// Calls made so far, formatted as `operation(arg, ...)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Page titled `title` in `space`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn page(&self, space: &str, title: &str) -> Option<MockPage> {
        self.pages
            .read()
            .unwrap()
            .iter()
            .find(|p| p.space == space && p.title == title)
            .cloned()
    }

    /// All pages, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn pages(&self) -> Vec<MockPage> {
        self.pages.read().unwrap().clone()
    }

    fn record(&self, operation: &'static str, args: &[&str]) -> Result<(), BackendError> {
        self.calls
            .write()
            .unwrap()
            .push(format!("{operation}({})", args.join(", ")));
        if self.failing.read().unwrap().contains(&operation) {
            return Err(BackendError::new(operation, "mock failure"));
        }
        Ok(())
    }

    fn insert_page(&self, space: &str, title: &str, body: &str, parent_id: &str) -> String {
        let mut pages = self.pages.write().unwrap();
        let id = (1000 + pages.len()).to_string();
        pages.push(MockPage {
            id: id.clone(),
            space: space.to_owned(),
            title: title.to_owned(),
            web_ui_path: format!("/spaces/{space}/pages/{id}"),
            parent_id: Some(parent_id.to_owned()),
            body: body.to_owned(),
            version: 1,
        });
        id
    }

    fn add_attachment(&self, page_id: &str, filename: &str) {
        let mut attachments = self.attachments.write().unwrap();
        let list = attachments.entry(page_id.to_owned()).or_default();
        let id = format!("att{}", list.len() + 1);
        list.push(AttachmentSummary {
            id,
            title: filename.to_owned(),
        });
    }
}

impl WikiBackend for MockWiki {
    fn page_id(&self, space: &str, title: &str) -> Result<Option<String>, BackendError> {
        self.record("page_id", &[space, title])?;
        Ok(self.page(space, title).map(|p| p.id))
    }

    fn page_by_title(&self, space: &str, title: &str) -> Result<Option<PageSummary>, BackendError> {
        self.record("page_by_title", &[space, title])?;
        Ok(self.page(space, title).map(|p| PageSummary {
            id: p.id,
            web_ui_path: p.web_ui_path,
        }))
    }

    fn attachments(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Vec<AttachmentSummary>, BackendError> {
        self.record("attachments", &[page_id, filename])?;
        Ok(self
            .attachments
            .read()
            .unwrap()
            .get(page_id)
            .map(|list| {
                list.iter()
                    .filter(|a| a.title == filename)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn attach_file(&self, page_id: &str, path: &Path) -> Result<(), BackendError> {
        let display = path.to_string_lossy();
        self.record("attach_file", &[page_id, &display])?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Confluence rejects a second attachment with the same file name
        let exists = self
            .attachments
            .read()
            .unwrap()
            .get(page_id)
            .is_some_and(|list| list.iter().any(|a| a.title == filename));
        if exists {
            return Err(BackendError::new(
                "attach_file",
                format!("attachment {filename} already exists on page {page_id}"),
            ));
        }
        self.add_attachment(page_id, &filename);
        self.uploads
            .write()
            .unwrap()
            .push((page_id.to_owned(), path.to_path_buf()));
        Ok(())
    }
}

impl PageStore for MockWiki {
    fn create_page(
        &self,
        space: &str,
        title: &str,
        body: &str,
        parent_id: &str,
    ) -> Result<String, BackendError> {
        self.record("create_page", &[space, title, parent_id])?;
        Ok(self.insert_page(space, title, body, parent_id))
    }

    fn update_or_create(
        &self,
        space: &str,
        parent_id: &str,
        title: &str,
        body: &str,
    ) -> Result<String, BackendError> {
        self.record("update_or_create", &[space, parent_id, title])?;
        if let Some(page) = self
            .pages
            .write()
            .unwrap()
            .iter_mut()
            .find(|p| p.space == space && p.title == title)
        {
            body.clone_into(&mut page.body);
            page.version += 1;
            return Ok(page.id.clone());
        }
        Ok(self.insert_page(space, title, body, parent_id))
    }
}
