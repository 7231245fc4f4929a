//! Selection of the changed files to publish.

use tracing::info;

/// Whether `file_name` (relative to the repository root) should be published.
///
/// The extension must be one of `extensions`. Every entry of `ignored_folders`
/// excludes the files beneath it; a trailing `/` is implied and empty entries
/// are skipped.
pub(crate) fn should_sync_file(
    file_name: &str,
    extensions: &[String],
    ignored_folders: &[String],
) -> bool {
    let has_extension = extensions
        .iter()
        .any(|ext| file_name.ends_with(&format!(".{ext}")));
    if !has_extension {
        return false;
    }

    for folder in ignored_folders.iter().filter(|f| !f.is_empty()) {
        let folder = if folder.ends_with('/') {
            folder.clone()
        } else {
            format!("{folder}/")
        };

        if file_name.starts_with(&folder) {
            info!(
                "Skipping file {} because folder {} is ignored",
                file_name, folder
            );
            return false;
        }
    }

    true
}

/// Split a whitespace-separated list of changed files and keep the publishable ones.
pub(crate) fn files_to_sync(
    changed_files: &str,
    extensions: &[String],
    ignored_folders: &[String],
) -> Vec<String> {
    changed_files
        .split_whitespace()
        .filter(|file| should_sync_file(file, extensions, ignored_folders))
        .map(str::to_owned)
        .collect()
}
