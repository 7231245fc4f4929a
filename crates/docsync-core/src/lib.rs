//! Relative link rewriting for docsync.
//!
//! Documents converted to Confluence wiki markup still carry the relative links of
//! the source repository (`[text|../guide.md]`, `!images/pic.png!`). This crate
//! finds those links, checks that they point at real files of the repository and
//! rewrites them to destinations that work from inside the wiki:
//!
//! - links to files that already have a wiki page point at that page
//! - links to other files fall back to the hosted source file
//! - images become page attachments, referenced by file name
//!
//! # Architecture
//!
//! - [`patterns`]: the four lexical link/image shapes of wiki markup
//! - [`resolve`]: filesystem resolution of candidate targets
//! - [`LinkRewriter`]: per-document entry point binding and rewriting links
//! - [`WikiBackend`] / [`PageStore`]: capabilities consumed from the wiki
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use docsync_core::{LinkConfig, LinkRewriter};
//!
//! let rewriter = LinkRewriter::new(&client, config);
//! let result = rewriter.rewrite(Path::new("docs/guide.md"), &wiki_markup)?;
//! for path in &result.pending_attachments {
//!     // upload once the page exists
//! }
//! ```

mod backend;
mod bind;
mod error;
mod link;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod patterns;
pub mod resolve;
mod rewrite;
mod rewriter;

pub use backend::{AttachmentSummary, PageStore, PageSummary, WikiBackend};
pub use error::{BackendError, LinkError};
pub use link::{LinkForm, LinkKind, RelativeLink};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockPage, MockWiki};
pub use rewriter::{LinkConfig, LinkRewriter, RewriteResult};
