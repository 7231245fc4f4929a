//! Filesystem resolution of relative link targets.
//!
//! A candidate is only a relative link if the path it names exists in the
//! repository. This check is what separates real links from bracket or
//! exclamation-mark text that merely looks like one.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Lexically normalize a path.
///
/// Drops `.` components and folds `name/..` pairs. Leading `..` components that
/// cannot be folded are kept. An empty result is `.`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use docsync_core::resolve::normalize;
///
/// assert_eq!(normalize(Path::new("foo/bar/../../linked.py")), PathBuf::from("linked.py"));
/// assert_eq!(normalize(Path::new("./a/./b")), PathBuf::from("a/b"));
/// assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        PathBuf::from(".")
    } else {
        parts.iter().collect()
    }
}

/// Resolve a link target written in `document_path` to a repository file.
///
/// `document_path` is relative to `repo_root`. Returns the target path relative
/// to the repository root, or `None` when the target is not a relative link:
/// it is absolute, leaves the repository, or names nothing on disk.
#[must_use]
pub fn resolve_target(repo_root: &Path, document_path: &Path, target: &str) -> Option<PathBuf> {
    let document_dir = document_path.parent().unwrap_or(Path::new(""));
    let resolved = normalize(&document_dir.join(target));

    if escapes_root(&resolved) {
        debug!("Ignoring link target {target} outside the repository");
        return None;
    }

    if !repo_root.join(&resolved).exists() {
        return None;
    }

    Some(resolved)
}

/// Render a repository-relative path with `/` separators.
///
/// Used for wiki page titles and source URLs, which never use the platform
/// separator.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn escapes_root(path: &Path) -> bool {
    matches!(
        path.components().next(),
        Some(Component::ParentDir | Component::RootDir | Component::Prefix(_))
    )
}
