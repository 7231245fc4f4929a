//! Wiki capabilities backed by the Confluence client.

use std::path::Path;

use docsync_core::{AttachmentSummary, BackendError, PageStore, PageSummary, WikiBackend};

use crate::client::ConfluenceClient;

impl WikiBackend for ConfluenceClient {
    fn page_id(&self, space: &str, title: &str) -> Result<Option<String>, BackendError> {
        let page = self
            .find_page(space, title)
            .map_err(|e| BackendError::new("page_id", e))?;
        Ok(page.map(|p| p.id))
    }

    fn page_by_title(&self, space: &str, title: &str) -> Result<Option<PageSummary>, BackendError> {
        let page = self
            .find_page(space, title)
            .map_err(|e| BackendError::new("page_by_title", e))?;
        Ok(page.map(|p| {
            let fallback = format!("/pages/viewpage.action?pageId={}", p.id);
            PageSummary {
                web_ui_path: p.web_ui_path().map_or(fallback, str::to_owned),
                id: p.id,
            }
        }))
    }

    fn attachments(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Vec<AttachmentSummary>, BackendError> {
        let attachments = self
            .get_attachments(page_id, filename)
            .map_err(|e| BackendError::new("attachments", e))?;
        Ok(attachments
            .into_iter()
            .map(|a| AttachmentSummary {
                id: a.id,
                title: a.title,
            })
            .collect())
    }

    fn attach_file(&self, page_id: &str, path: &Path) -> Result<(), BackendError> {
        ConfluenceClient::attach_file(self, page_id, path)
            .map(|_| ())
            .map_err(|e| BackendError::new("attach_file", e))
    }
}

impl PageStore for ConfluenceClient {
    fn create_page(
        &self,
        space: &str,
        title: &str,
        body: &str,
        parent_id: &str,
    ) -> Result<String, BackendError> {
        ConfluenceClient::create_page(self, space, title, body, parent_id)
            .map(|page| page.id)
            .map_err(|e| BackendError::new("create_page", e))
    }

    fn update_or_create(
        &self,
        space: &str,
        parent_id: &str,
        title: &str,
        body: &str,
    ) -> Result<String, BackendError> {
        ConfluenceClient::update_or_create(self, space, parent_id, title, body)
            .map(|page| page.id)
            .map_err(|e| BackendError::new("update_or_create", e))
    }
}
