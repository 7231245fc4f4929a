//! Confluence page types.

use serde::Deserialize;

/// Confluence page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Version information (present when expanded).
    #[serde(default)]
    pub version: Option<Version>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Page {
    /// Current version number, `1` if the version was not expanded.
    #[must_use]
    pub fn version_number(&self) -> u32 {
        self.version.as_ref().map_or(1, |v| v.number)
    }

    /// Browsable path relative to `{base_url}/wiki`.
    #[must_use]
    pub fn web_ui_path(&self) -> Option<&str> {
        self.links.as_ref()?.webui.as_deref()
    }
}

/// Page version.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
}

/// Content search API response.
#[derive(Debug, Clone, Deserialize)]
pub struct PagesResponse {
    /// Matching pages.
    pub results: Vec<Page>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "results": [{
                "id": "65601",
                "type": "page",
                "status": "current",
                "title": "GenericRepo/docs/guide.md",
                "version": {"number": 4, "minorEdit": false},
                "_links": {
                    "webui": "/spaces/DOCS/pages/65601/GenericRepo+docs+guide.md",
                    "self": "https://acme.atlassian.net/wiki/rest/api/content/65601"
                }
            }],
            "start": 0,
            "limit": 25,
            "size": 1
        }"#;

        let response: PagesResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.results.len(), 1);
        let page = &response.results[0];
        assert_eq!(page.id, "65601");
        assert_eq!(page.title, "GenericRepo/docs/guide.md");
        assert_eq!(page.version_number(), 4);
        assert_eq!(
            page.web_ui_path(),
            Some("/spaces/DOCS/pages/65601/GenericRepo+docs+guide.md")
        );
    }

    #[test]
    fn test_deserialize_page_without_expansions() {
        let page: Page = serde_json::from_str(r#"{"id": "1", "title": "Root"}"#).unwrap();
        assert_eq!(page.version_number(), 1);
        assert_eq!(page.web_ui_path(), None);
    }

    #[test]
    fn test_deserialize_empty_search_response() {
        let response: PagesResponse =
            serde_json::from_str(r#"{"results": [], "size": 0}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
