//! Destination binding for relative links.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backend::WikiBackend;
use crate::error::BackendError;
use crate::link::{LinkKind, RelativeLink};
use crate::resolve::to_slash;
use crate::rewriter::LinkRewriter;

impl<B: WikiBackend + ?Sized> LinkRewriter<'_, B> {
    /// Assign the destination of `link`, uploading or deferring images.
    pub(crate) fn bind(
        &self,
        document_path: &Path,
        link: &mut RelativeLink,
        pending: &mut Vec<PathBuf>,
    ) -> Result<(), BackendError> {
        link.destination = match link.kind {
            LinkKind::Generic => self.bind_generic(link)?,
            LinkKind::Image => self.bind_image(document_path, link, pending)?,
        };
        Ok(())
    }

    /// Wiki page title of a repository file (`{repo_name}/{path}`).
    #[must_use]
    pub fn page_title(&self, path: &Path) -> String {
        format!("{}/{}", self.config().repo_name, to_slash(path))
    }

    /// Link to the file's wiki page if it has one, to the hosted source otherwise.
    fn bind_generic(&self, link: &RelativeLink) -> Result<String, BackendError> {
        let config = self.config();
        let title = self.page_title(&link.target_path);

        match self.backend().page_by_title(&config.wiki_space, &title)? {
            Some(page) => Ok(format!(
                "{}/wiki{}",
                config.wiki_base_url.trim_end_matches('/'),
                page.web_ui_path
            )),
            None => Ok(format!(
                "{}{}",
                config.external_root_url,
                to_slash(&link.target_path)
            )),
        }
    }

    /// Images are referenced by attachment name and attached to the document's page.
    fn bind_image(
        &self,
        document_path: &Path,
        link: &RelativeLink,
        pending: &mut Vec<PathBuf>,
    ) -> Result<String, BackendError> {
        let config = self.config();
        let attachment_name = link.attachment_name();
        let attachment_path = config.repo_root.join(&link.target_path);
        let title = self.page_title(document_path);

        if let Some(page_id) = self.backend().page_id(&config.wiki_space, &title)? {
            self.attach_to_page(&page_id, &attachment_path, &attachment_name)?;
        } else {
            debug!(
                "{} needs to be attached to page {title}, which hasn't been created yet",
                attachment_path.display()
            );
            // One attachment per file name, the first image wins
            let already_pending = pending
                .iter()
                .any(|p| p.file_name() == attachment_path.file_name());
            if !already_pending {
                pending.push(attachment_path);
            }
        }

        Ok(attachment_name)
    }

    /// Upload an attachment unless one with the same name already exists.
    ///
    /// Existing attachments are never refreshed: the backend doesn't say when
    /// they were last updated.
    fn attach_to_page(
        &self,
        page_id: &str,
        attachment_path: &Path,
        attachment_name: &str,
    ) -> Result<(), BackendError> {
        // TODO: distinguish same-named images from different folders, e.g. by
        // prefixing the attachment name with a hash of the folder.
        debug!("Looking for an attachment named {attachment_name}");
        let attachments = self.backend().attachments(page_id, attachment_name)?;

        if attachments.is_empty() {
            info!(
                "Attaching file {} to page {page_id}",
                attachment_path.display()
            );
            self.backend().attach_file(page_id, attachment_path)?;
        } else {
            debug!("{} attachment(s) found", attachments.len());
        }
        Ok(())
    }
}
