//! Confluence Cloud integration for docsync.
//!
//! [`ConfluenceClient`] is a blocking REST client authenticated with an
//! account and API token. It implements the [`docsync_core::WikiBackend`] and
//! [`docsync_core::PageStore`] capabilities used to rewrite links and publish
//! pages.
//!
//! ```ignore
//! use docsync_confluence::ConfluenceClient;
//!
//! let client = ConfluenceClient::new("https://acme.atlassian.net", "bot@acme.com", &token);
//! if let Some(page) = client.find_page("DOCS", "GenericRepo/README.md")? {
//!     println!("Page id: {}", page.id);
//! }
//! ```

// Capability trait implementations
mod backend;

// API client
mod client;
pub use client::ConfluenceClient;

// Types
pub mod types;

// Errors
pub mod error;
pub use error::ConfluenceError;
