//! Literal substitution of bound links in wiki markup.

use tracing::warn;

use crate::link::{LinkForm, LinkKind, RelativeLink};

/// Replace every occurrence of `link` in `text` with its destination.
///
/// Only the target part of the token is replaced, so link names, image
/// parameters and punctuation stay untouched. Unnamed links become named links
/// keeping their original text. Replacement is by exact text, not position:
/// identical tokens elsewhere in the document are rewritten too.
pub(crate) fn replace_link(text: &str, link: &RelativeLink) -> String {
    let original = &link.original_link;
    let destination = &link.destination;

    match (link.kind, link.form) {
        (LinkKind::Generic, LinkForm::Named) => {
            text.replace(&format!("|{original}]"), &format!("|{destination}]"))
        }
        (LinkKind::Generic, LinkForm::Unnamed) => text.replace(
            &format!("[{original}]"),
            &format!("[{}|{destination}]", link.text),
        ),
        (LinkKind::Image, LinkForm::SimpleImage) => {
            text.replace(&format!("!{original}!"), &format!("!{destination}!"))
        }
        (LinkKind::Image, LinkForm::ImageWithParams) => {
            text.replace(&format!("!{original}|"), &format!("!{destination}|"))
        }
        (kind, form) => {
            warn!("Unexpected link kind {kind:?} for {form:?} link - returning text as is");
            text.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const DEST: &str = "https://gh/a.py";

    fn link(form: LinkForm, text: &str, original: &str, dest: &str) -> RelativeLink {
        RelativeLink {
            kind: form.kind(),
            form,
            text: text.to_owned(),
            original_link: original.to_owned(),
            target_path: PathBuf::from(original),
            destination: dest.to_owned(),
        }
    }

    #[test]
    fn test_named_link_keeps_text() {
        let l = link(LinkForm::Named, "other file", "a.py", DEST);
        assert_eq!(
            replace_link("See [other file|a.py].", &l),
            "See [other file|https://gh/a.py]."
        );
    }

    #[test]
    fn test_unnamed_link_becomes_named() {
        let l = link(LinkForm::Unnamed, "a.py", "a.py", DEST);
        let text = replace_link("See [a.py]", &l);
        assert_eq!(text, "See [a.py|https://gh/a.py]");
    }

    #[test]
    fn test_simple_image() {
        let l = link(LinkForm::SimpleImage, "i/pic.png", "i/pic.png", "pic.png");
        assert_eq!(replace_link("!i/pic.png!", &l), "!pic.png!");
    }

    #[test]
    fn test_image_with_params_keeps_params() {
        let l = link(LinkForm::ImageWithParams, "alt=Pic", "i/pic.png", "pic.png");
        let text = replace_link("!i/pic.png|alt=Pic!", &l);
        assert_eq!(text, "!pic.png|alt=Pic!");
    }

    #[test]
    fn test_all_identical_tokens_are_replaced() {
        let l = link(LinkForm::Named, "x", "a.py", "D");
        let text = replace_link("[x|a.py] then [y|a.py]", &l);
        assert_eq!(text, "[x|D] then [y|D]");
    }

    #[test]
    fn test_mismatched_kind_leaves_text_unchanged() {
        let mut l = link(LinkForm::Named, "x", "a.py", "D");
        l.kind = LinkKind::Image;
        assert_eq!(replace_link("[x|a.py]", &l), "[x|a.py]");

        let mut l = link(LinkForm::SimpleImage, "a.png", "a.png", "D");
        l.kind = LinkKind::Generic;
        assert_eq!(replace_link("!a.png!", &l), "!a.png!");
    }
}
