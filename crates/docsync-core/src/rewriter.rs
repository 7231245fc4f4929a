//! Per-document link rewriting.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backend::WikiBackend;
use crate::error::LinkError;
use crate::link::RelativeLink;
use crate::patterns::find_candidates;
use crate::resolve::resolve_target;
use crate::rewrite::replace_link;

/// Settings for resolving and binding links.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Wiki space key pages live in.
    pub wiki_space: String,
    /// Wiki base URL (e.g. `https://example.atlassian.net`).
    pub wiki_base_url: String,
    /// Repository display name, the first segment of every page title.
    pub repo_name: String,
    /// URL prefix of hosted source files, ending with `/`.
    pub external_root_url: String,
    /// Repository root on disk; document and target paths are relative to it.
    pub repo_root: PathBuf,
}

/// Outcome of rewriting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    /// Markup with relative links replaced.
    pub text: String,
    /// Images to attach once the document's page exists, joined onto `repo_root`.
    pub pending_attachments: Vec<PathBuf>,
}

/// Rewrites the relative links of converted documents.
///
/// Backend calls are made sequentially, one per link, in scan order.
pub struct LinkRewriter<'a, B: ?Sized> {
    backend: &'a B,
    config: LinkConfig,
}

impl<'a, B: WikiBackend + ?Sized> LinkRewriter<'a, B> {
    /// Create a rewriter over the given backend.
    #[must_use]
    pub fn new(backend: &'a B, config: LinkConfig) -> Self {
        Self { backend, config }
    }

    /// Rewriter settings.
    #[must_use]
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub(crate) fn backend(&self) -> &B {
        self.backend
    }

    /// Find links of `text` that point at files of the repository.
    ///
    /// `document_path` is relative to the repository root. Returned links are
    /// not bound yet.
    #[must_use]
    pub fn find_relative_links(&self, document_path: &Path, text: &str) -> Vec<RelativeLink> {
        find_candidates(text)
            .into_iter()
            .filter_map(|candidate| {
                let target_path =
                    resolve_target(&self.config.repo_root, document_path, &candidate.target)?;
                Some(RelativeLink {
                    kind: candidate.form.kind(),
                    form: candidate.form,
                    text: candidate.text,
                    original_link: candidate.target,
                    target_path,
                    destination: String::new(),
                })
            })
            .collect()
    }

    /// Rewrite the relative links of a converted document.
    ///
    /// `document_path` is relative to the repository root. Images are uploaded to
    /// the document's page right away when the page exists; otherwise they are
    /// returned in [`RewriteResult::pending_attachments`].
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Backend`] if a wiki call fails. The rest of the
    /// document is not processed.
    pub fn rewrite(&self, document_path: &Path, text: &str) -> Result<RewriteResult, LinkError> {
        let mut links = self.find_relative_links(document_path, text);

        if !links.is_empty() {
            debug!(
                "Found {} relative links in {}: {links:?}",
                links.len(),
                document_path.display()
            );
        }

        let mut text = text.to_owned();
        let mut pending_attachments = Vec::new();

        for link in &mut links {
            self.bind(document_path, link, &mut pending_attachments)?;
            text = replace_link(&text, link);
        }

        Ok(RewriteResult {
            text,
            pending_attachments,
        })
    }
}
