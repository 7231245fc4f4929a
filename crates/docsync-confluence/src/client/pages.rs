//! Page operations for Confluence API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Value, json};
use tracing::{debug, info};

use super::{ConfluenceClient, read_json};
use crate::error::ConfluenceError;
use crate::types::{Page, PagesResponse};

/// Body representation used for every page written.
const REPRESENTATION: &str = "wiki";

impl ConfluenceClient {
    /// Find a page of `space` by exact title.
    pub fn find_page(&self, space: &str, title: &str) -> Result<Option<Page>, ConfluenceError> {
        let url = search_url(&self.api_url(), space, title);

        debug!("Looking up page '{}' in space {}", title, space);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let pages: PagesResponse = read_json(response)?;
        Ok(pages.results.into_iter().next())
    }

    /// Create a page under `parent_id`.
    pub fn create_page(
        &self,
        space: &str,
        title: &str,
        body: &str,
        parent_id: &str,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());
        let mut payload = page_payload(title, body, parent_id);
        payload["space"] = json!({"key": space});

        info!("Creating page '{}' in space {}", title, space);

        let payload_bytes = serde_json::to_vec(&payload)?;
        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = read_json(response)?;
        info!("Created page '{}' (id={})", title, page.id);
        Ok(page)
    }

    /// Update existing page (auto-increments version).
    pub fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        parent_id: &str,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);
        let mut payload = page_payload(title, body, parent_id);
        payload["version"] = json!({"number": version + 1});

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            version,
            version + 1
        );

        let payload_bytes = serde_json::to_vec(&payload)?;
        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        read_json(response)
    }

    /// Update the page titled `title`, or create it under `parent_id`.
    pub fn update_or_create(
        &self,
        space: &str,
        parent_id: &str,
        title: &str,
        body: &str,
    ) -> Result<Page, ConfluenceError> {
        match self.find_page(space, title)? {
            Some(existing) => self.update_page(
                &existing.id,
                title,
                body,
                parent_id,
                existing.version_number(),
            ),
            None => self.create_page(space, title, body, parent_id),
        }
    }
}

/// Build the content search URL for an exact title match.
fn search_url(api_url: &str, space: &str, title: &str) -> String {
    format!(
        "{api_url}/content?spaceKey={}&title={}&type=page&expand=version",
        utf8_percent_encode(space, NON_ALPHANUMERIC),
        utf8_percent_encode(title, NON_ALPHANUMERIC),
    )
}

/// Fields shared by page creation and update.
fn page_payload(title: &str, body: &str, parent_id: &str) -> Value {
    json!({
        "type": "page",
        "title": title,
        "ancestors": [{"id": parent_id}],
        "body": {
            "storage": {
                "value": body,
                "representation": REPRESENTATION
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_url_encodes_title() {
        let url = search_url(
            "https://acme.atlassian.net/wiki/rest/api",
            "DOCS",
            "GenericRepo/docs/my guide.md",
        );
        assert_eq!(
            url,
            "https://acme.atlassian.net/wiki/rest/api/content?spaceKey=DOCS\
             &title=GenericRepo%2Fdocs%2Fmy%20guide%2Emd&type=page&expand=version"
        );
    }

    #[test]
    fn test_page_payload_uses_wiki_representation() {
        let payload = page_payload("GenericRepo/a", "h1. Title", "42");

        assert_eq!(payload["type"], "page");
        assert_eq!(payload["title"], "GenericRepo/a");
        assert_eq!(payload["ancestors"][0]["id"], "42");
        assert_eq!(payload["body"]["storage"]["value"], "h1. Title");
        assert_eq!(payload["body"]["storage"]["representation"], "wiki");
    }
}
