//! Publishing of repository documents as a wiki page tree.
//!
//! Every document `a/b/doc.md` becomes the page `{repo}/a/b/doc.md`, nested under
//! intermediate pages `{repo}/a` and `{repo}/a/b` below the configured root page.

use std::path::{Path, PathBuf};

use docsync_core::resolve::to_slash;
use docsync_core::{BackendError, LinkConfig, LinkError, LinkRewriter, PageStore};
use tracing::{debug, error, info, warn};

use crate::pandoc::{ConvertError, MarkupConverter};

/// Body of the pages created for folders.
const FOLDER_PAGE_BODY: &str = "{children:sort=title|excerpt=none|all=true}";

/// Error publishing one document.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SyncError {
    #[error("root page '{title}' not found in space {space}")]
    RootPageNotFound { space: String, title: String },

    #[error("root page lookup failed: {0}")]
    RootPageLookup(String),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Link(#[from] LinkError),

    #[error("{0}")]
    Backend(#[from] BackendError),
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub(crate) struct SyncReport {
    /// Documents whose page was written.
    pub(crate) synced: Vec<String>,
    /// Listed documents missing from the repository.
    pub(crate) skipped: Vec<String>,
    /// Documents that could not be published.
    pub(crate) failed: Vec<(String, SyncError)>,
}

impl SyncReport {
    pub(crate) fn has_errors(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Settings of a batch.
#[derive(Debug, Clone)]
pub(crate) struct SyncSettings {
    /// Link rewriting settings; also provide space, repository name and root.
    pub(crate) links: LinkConfig,
    /// Title of the existing page documents are published under.
    pub(crate) root_page_title: String,
}

/// Publishes documents to the wiki.
pub(crate) struct Synchronizer<'a, S: ?Sized, C: ?Sized> {
    store: &'a S,
    converter: &'a C,
    rewriter: LinkRewriter<'a, S>,
    root_page_title: String,
}

impl<'a, S, C> Synchronizer<'a, S, C>
where
    S: PageStore + ?Sized,
    C: MarkupConverter + ?Sized,
{
    pub(crate) fn new(store: &'a S, converter: &'a C, settings: SyncSettings) -> Self {
        Self {
            store,
            converter,
            rewriter: LinkRewriter::new(store, settings.links),
            root_page_title: settings.root_page_title,
        }
    }

    fn config(&self) -> &LinkConfig {
        self.rewriter.config()
    }

    /// Publish `files` (relative to the repository root).
    ///
    /// A failing document is recorded in the report and does not stop the batch.
    pub(crate) fn sync_files(&self, files: &[String]) -> SyncReport {
        let mut report = SyncReport::default();
        let space = &self.config().wiki_space;

        let root_page_id = match self.store.page_id(space, &self.root_page_title) {
            Ok(Some(id)) => id,
            Ok(None) => {
                error!(
                    "Root page '{}' not found in space {}",
                    self.root_page_title, space
                );
                for file in files {
                    report.failed.push((
                        file.clone(),
                        SyncError::RootPageNotFound {
                            space: space.clone(),
                            title: self.root_page_title.clone(),
                        },
                    ));
                }
                return report;
            }
            Err(e) => {
                error!("Root page lookup failed: {e}");
                let reason = e.to_string();
                for file in files {
                    report
                        .failed
                        .push((file.clone(), SyncError::RootPageLookup(reason.clone())));
                }
                return report;
            }
        };
        debug!("The base root ID is {}", root_page_id);

        for file in files {
            let absolute_path = self.config().repo_root.join(file);
            if !absolute_path.exists() {
                warn!(
                    "File {} not found. Deleting a wiki page is not supported, \
                     so you will have to delete it manually",
                    absolute_path.display()
                );
                report.skipped.push(file.clone());
                continue;
            }

            match self.sync_file(&root_page_id, Path::new(file), &absolute_path) {
                Ok(page_id) => {
                    info!("Synced {} to page {}", file, page_id);
                    report.synced.push(file.clone());
                }
                Err(e) => {
                    error!("Error syncing file {}: {e}", absolute_path.display());
                    report.failed.push((file.clone(), e));
                }
            }
        }

        report
    }

    fn sync_file(
        &self,
        root_page_id: &str,
        file: &Path,
        absolute_path: &Path,
    ) -> Result<String, SyncError> {
        let markup = self.converter.convert(absolute_path)?;
        let rewritten = self.rewriter.rewrite(file, &markup)?;
        let content = format!("{}{}", self.read_only_banner(file), rewritten.text);

        let parent_id = self.ensure_folder_pages(root_page_id, file)?;
        let title = self.rewriter.page_title(file);
        info!("Creating or updating page {title} under root {parent_id}");
        let space = &self.config().wiki_space;
        let page_id = self
            .store
            .update_or_create(space, &parent_id, &title, &content)?;

        self.attach_pending(&page_id, &rewritten.pending_attachments)?;
        Ok(page_id)
    }

    /// Find or create the pages of the folders containing `file`.
    ///
    /// Returns the ID of the page the document goes under.
    fn ensure_folder_pages(&self, root_page_id: &str, file: &Path) -> Result<String, SyncError> {
        let space = &self.config().wiki_space;
        let mut current_root_id = root_page_id.to_owned();
        let Some(folder) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(current_root_id);
        };

        let mut page_title = self.config().repo_name.clone();
        for component in folder.components() {
            page_title.push('/');
            page_title.push_str(&component.as_os_str().to_string_lossy());

            if let Some(id) = self.store.page_id(space, &page_title)? {
                debug!("Page {} exists with id {}", page_title, id);
                current_root_id = id;
            } else {
                info!(
                    "Creating intermediate page {} under root {}",
                    page_title, current_root_id
                );
                current_root_id = self.store.create_page(
                    space,
                    &page_title,
                    FOLDER_PAGE_BODY,
                    &current_root_id,
                )?;
            }
        }

        Ok(current_root_id)
    }

    fn attach_pending(&self, page_id: &str, paths: &[PathBuf]) -> Result<(), SyncError> {
        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !self.store.attachments(page_id, &name)?.is_empty() {
                debug!("Page {page_id} already has an attachment named {name}");
                continue;
            }
            info!("Attaching file {} to page {}", path.display(), page_id);
            self.store.attach_file(page_id, path)?;
        }
        Ok(())
    }

    fn read_only_banner(&self, file: &Path) -> String {
        let config = self.config();
        format!(
            "{{info:title=Imported content|icon=true}}\
             This content has been imported from the {repo} repository.\n\
             You can find (and modify) the original at {url}{file}.{{info}}\n\
             {{warning:title=Do not update this page directly|icon=true}}\
             Your modifications would be lost the next time the source file is updated.\
             {{warning}}\n",
            repo = config.repo_name,
            url = config.external_root_url,
            file = to_slash(file),
        )
    }
}
