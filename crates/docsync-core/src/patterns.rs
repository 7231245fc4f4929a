//! Link and image patterns of Confluence wiki markup.
//!
//! All patterns are non-greedy so adjacent constructs on the same line are
//! matched separately. Matching is purely lexical: anything that looks like a
//! link is a candidate, and candidates that don't point at a file are dropped
//! later by [`crate::resolve::resolve_target`].

use std::sync::LazyLock;

use regex::Regex;

use crate::link::LinkForm;

/// `[link name|link]`
static NAMED_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\|(.+?)\]").unwrap());

/// `[link]`, used when the link name is the link itself.
static UNNAMED_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^|\n]+?)\]").unwrap());

/// `!filename.png!`
static SIMPLE_IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!([^|\n]+?)!").unwrap());

/// `!some_pic.png|alt=image!`
static IMAGE_WITH_PARAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!(.+?)\|(.+?)!").unwrap());

/// Prefix of targets that are never relative (`http://`, `https://`).
const EXTERNAL_PREFIX: &str = "http";

/// A lexical link match, before filesystem resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Shape of the match.
    pub form: LinkForm,
    /// Display text (link name, alt text or image parameters).
    pub text: String,
    /// Target as written.
    pub target: String,
}

impl LinkForm {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Named => &NAMED_LINK,
            Self::Unnamed => &UNNAMED_LINK,
            Self::SimpleImage => &SIMPLE_IMAGE,
            Self::ImageWithParams => &IMAGE_WITH_PARAMS,
        }
    }
}

/// Whether a target is an external URL that needs no resolution.
#[must_use]
pub fn is_external(target: &str) -> bool {
    target.starts_with(EXTERNAL_PREFIX)
}

/// Find all non-external link candidates in wiki markup.
///
/// Patterns are applied one after the other in [`LinkForm::ALL`] order, so a
/// piece of text matching several shapes yields one candidate per shape.
#[must_use]
pub fn find_candidates(text: &str) -> Vec<Candidate> {
    LinkForm::ALL
        .into_iter()
        .flat_map(|form| extract(form, text))
        .collect()
}

fn extract(form: LinkForm, text: &str) -> impl Iterator<Item = Candidate> + '_ {
    form.pattern().captures_iter(text).filter_map(move |caps| {
        let first = caps.get(1)?.as_str();
        let (display, target) = match form {
            LinkForm::Named => (first, caps.get(2)?.as_str()),
            LinkForm::Unnamed | LinkForm::SimpleImage => (first, first),
            LinkForm::ImageWithParams => (caps.get(2)?.as_str(), first),
        };

        if is_external(target) {
            return None;
        }

        Some(Candidate {
            form,
            text: display.to_owned(),
            target: target.to_owned(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidate(form: LinkForm, text: &str, target: &str) -> Candidate {
        Candidate {
            form,
            text: text.to_owned(),
            target: target.to_owned(),
        }
    }

    #[test]
    fn test_named_link() {
        assert_eq!(
            find_candidates("Check out this [other file|linked_file.py]"),
            vec![candidate(LinkForm::Named, "other file", "linked_file.py")]
        );
    }

    #[test]
    fn test_unnamed_link() {
        let expected = candidate(LinkForm::Unnamed, "linked_file.py", "linked_file.py");
        let candidates = find_candidates("Check out [linked_file.py]");
        assert_eq!(candidates, vec![expected]);
    }

    #[test]
    fn test_simple_image() {
        assert_eq!(
            find_candidates("Check out !foo/bar/cool_image.png!"),
            vec![candidate(
                LinkForm::SimpleImage,
                "foo/bar/cool_image.png",
                "foo/bar/cool_image.png"
            )]
        );
    }

    #[test]
    fn test_image_with_params_takes_text_from_params() {
        assert_eq!(
            find_candidates("Check out !cool_image.png|alt=Cool image!"),
            vec![candidate(
                LinkForm::ImageWithParams,
                "alt=Cool image",
                "cool_image.png"
            )]
        );
    }

    #[test]
    fn test_external_links_are_skipped() {
        assert!(find_candidates("Check out this [link|https://example.org]").is_empty());
        assert!(find_candidates("[http://example.org]").is_empty());
        assert!(find_candidates("!https://example.org/logo.png!").is_empty());
    }

    #[test]
    fn test_several_links_on_same_line_are_not_merged() {
        let candidates = find_candidates("See [file|a.py] and also [that one|b.go]");
        assert_eq!(
            candidates,
            vec![
                candidate(LinkForm::Named, "file", "a.py"),
                candidate(LinkForm::Named, "that one", "b.go"),
            ]
        );
    }

    #[test]
    fn test_candidates_follow_pattern_order() {
        let candidates = find_candidates("!pic.png! before [doc.md]");
        assert_eq!(
            candidates,
            vec![
                candidate(LinkForm::Unnamed, "doc.md", "doc.md"),
                candidate(LinkForm::SimpleImage, "pic.png", "pic.png"),
            ]
        );
    }

    #[test]
    fn test_links_do_not_span_lines() {
        assert!(find_candidates("[first\nsecond]").is_empty());
        assert!(find_candidates("!first\nsecond!").is_empty());
        assert!(find_candidates("[a\n|b]").is_empty());
    }

    #[test]
    fn test_text_without_links() {
        assert!(find_candidates("Plain text with no links at all.").is_empty());
    }

    #[test]
    fn test_macro_lookalikes_are_candidates() {
        // Filtered later by the filesystem check, not here.
        let candidates = find_candidates("Wow! That is great!");
        let expected = candidate(LinkForm::SimpleImage, " That is great", " That is great");
        assert_eq!(candidates, vec![expected]);
    }
}
