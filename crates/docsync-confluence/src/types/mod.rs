//! Confluence API types.

mod attachment;
mod page;

pub use attachment::{Attachment, AttachmentsResponse};
pub use page::{Links, Page, PagesResponse, Version};
