//! Conversion of source documents to Confluence wiki markup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Error converting a document.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConvertError {
    /// The converter could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The converter exited with an error.
    #[error("conversion of {} failed ({status}): {stderr}", path.display())]
    Failed {
        path: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The converter produced invalid UTF-8.
    #[error("converter output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Converts a document file to wiki markup.
pub(crate) trait MarkupConverter {
    fn convert(&self, path: &Path) -> Result<String, ConvertError>;
}

/// Converter backed by the `pandoc` executable (`--to jira`).
pub(crate) struct PandocConverter {
    program: String,
    rst_filters: Vec<PathBuf>,
}

impl PandocConverter {
    /// Create a converter running `pandoc` from `PATH`.
    ///
    /// `rst_filters` are Lua filters applied to reStructuredText documents only.
    pub(crate) fn new(rst_filters: Vec<PathBuf>) -> Self {
        Self {
            program: "pandoc".to_owned(),
            rst_filters,
        }
    }

    fn args(&self, path: &Path) -> Vec<OsString> {
        let mut args = vec![
            path.as_os_str().to_owned(),
            OsString::from("--to"),
            OsString::from("jira"),
        ];
        if path.extension().is_some_and(|ext| ext == "rst") {
            for filter in &self.rst_filters {
                args.push(OsString::from("--lua-filter"));
                args.push(filter.as_os_str().to_owned());
            }
        }
        args
    }
}

impl MarkupConverter for PandocConverter {
    fn convert(&self, path: &Path) -> Result<String, ConvertError> {
        let args = self.args(path);
        debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                path: path.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn converter() -> PandocConverter {
        PandocConverter::new(vec![PathBuf::from("/filters/rst_note_warning.lua")])
    }

    #[test]
    fn test_args_for_markdown_skip_filters() {
        let args = converter().args(Path::new("/repo/README.md"));
        assert_eq!(args, ["/repo/README.md", "--to", "jira"]);
    }

    #[test]
    fn test_args_for_rst_apply_filters() {
        let args = converter().args(Path::new("/repo/docs/index.rst"));
        assert_eq!(
            args,
            [
                "/repo/docs/index.rst",
                "--to",
                "jira",
                "--lua-filter",
                "/filters/rst_note_warning.lua"
            ]
        );
    }

    #[test]
    fn test_convert_missing_program() {
        let converter = PandocConverter {
            program: "docsync-test-no-such-program".to_owned(),
            rst_filters: Vec::new(),
        };

        let err = converter.convert(Path::new("README.md")).unwrap_err();

        assert!(matches!(err, ConvertError::Spawn { .. }));
        assert!(err.to_string().contains("docsync-test-no-such-program"));
    }
}
