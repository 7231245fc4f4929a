//! Relative link data model.

use std::path::PathBuf;

/// What a relative link refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Textual link: `[text|target]` or `[target]`.
    Generic,
    /// Image turned into a page attachment: `!target!` or `!target|params!`.
    Image,
}

/// Lexical shape a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkForm {
    /// `[text|target]`
    Named,
    /// `[target]`
    Unnamed,
    /// `!target!`
    SimpleImage,
    /// `!target|params!`
    ImageWithParams,
}

impl LinkForm {
    /// All forms, in scan order.
    pub const ALL: [Self; 4] = [
        Self::Named,
        Self::Unnamed,
        Self::SimpleImage,
        Self::ImageWithParams,
    ];

    /// Kind of link this form denotes.
    #[must_use]
    pub fn kind(self) -> LinkKind {
        match self {
            Self::Named | Self::Unnamed => LinkKind::Generic,
            Self::SimpleImage | Self::ImageWithParams => LinkKind::Image,
        }
    }
}

/// A link or image whose target is a file of the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeLink {
    /// Link or image.
    pub kind: LinkKind,
    /// Shape the link was written in.
    pub form: LinkForm,
    /// Text shown to the reader (link name, alt text, image parameters).
    pub text: String,
    /// Target as written in the document, relative to the document.
    pub original_link: String,
    /// Target file, relative to the repository root.
    pub target_path: PathBuf,
    /// Replacement target; empty until bound.
    pub destination: String,
}

impl RelativeLink {
    /// File name the target is attached under.
    ///
    /// Only the base name is kept, so two images with the same file name in
    /// different folders share a single attachment.
    #[must_use]
    pub fn attachment_name(&self) -> String {
        self.target_path.file_name().map_or_else(
            || self.target_path.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(target: &str) -> RelativeLink {
        RelativeLink {
            kind: LinkKind::Image,
            form: LinkForm::SimpleImage,
            text: target.to_owned(),
            original_link: target.to_owned(),
            target_path: PathBuf::from(target),
            destination: String::new(),
        }
    }

    #[test]
    fn test_form_kind() {
        assert_eq!(LinkForm::Named.kind(), LinkKind::Generic);
        assert_eq!(LinkForm::Unnamed.kind(), LinkKind::Generic);
        assert_eq!(LinkForm::SimpleImage.kind(), LinkKind::Image);
        assert_eq!(LinkForm::ImageWithParams.kind(), LinkKind::Image);
    }

    #[test]
    fn test_attachment_name_drops_folders() {
        assert_eq!(image("foo/bar/pic.png").attachment_name(), "pic.png");
        assert_eq!(image("pic.png").attachment_name(), "pic.png");
    }
}
