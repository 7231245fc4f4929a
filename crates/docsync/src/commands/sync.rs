//! `docsync sync` command implementation.

use std::path::PathBuf;

use clap::Args;
use docsync_config::{CliSettings, Config};
use docsync_confluence::ConfluenceClient;
use docsync_core::LinkConfig;

use crate::error::CliError;
use crate::filter;
use crate::output::Output;
use crate::pandoc::PandocConverter;
use crate::sync::{SyncReport, SyncSettings, Synchronizer};

/// Arguments for the sync command.
#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Files to publish, relative to the repository root.
    files: Vec<String>,

    /// Whitespace-separated list of changed files to publish.
    #[arg(long, env = "INPUT_MODIFIED_FILES")]
    changed_files: Option<String>,

    /// Path to configuration file (default: auto-discover docsync.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository root directory (overrides config).
    #[arg(long)]
    repo_root: Option<PathBuf>,

    /// Confluence space key (overrides config).
    #[arg(long)]
    space: Option<String>,

    /// Title of the page documents are published under (overrides config).
    #[arg(long)]
    root_page_title: Option<String>,

    /// Whitespace-separated folders whose files are never published (overrides config).
    #[arg(long)]
    ignored_folders: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl SyncArgs {
    /// Execute the sync command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any file failed to sync.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            repo_root: self.repo_root.clone(),
            space: self.space.clone(),
            root_page_title: self.root_page_title.clone(),
            ignored_folders: self
                .ignored_folders
                .as_deref()
                .map(|list| list.split_whitespace().map(str::to_owned).collect()),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let conf_config = config.require_confluence()?;
        let repo_config = config.require_repository()?;

        let files = self.selected_files(&config);
        if files.is_empty() {
            output.warning("No documentation files to sync.");
            return Ok(());
        }
        output.list("Files to be synced:", &files);

        let client =
            ConfluenceClient::new(&conf_config.base_url, &conf_config.user, &conf_config.token);
        let converter = PandocConverter::new(config.sync.rst_filters.clone());
        let settings = SyncSettings {
            links: LinkConfig {
                wiki_space: conf_config.space.clone(),
                wiki_base_url: conf_config.base_url.clone(),
                repo_name: repo_config.repo_name().to_owned(),
                external_root_url: repo_config.external_root_url(),
                repo_root: config.repo_root.clone(),
            },
            root_page_title: conf_config.root_page_title.clone(),
        };

        let report = Synchronizer::new(&client, &converter, settings).sync_files(&files);
        print_report(&output, &report);

        if report.has_errors() {
            return Err(CliError::SyncFailed {
                failed: report.failed.len(),
                total: files.len(),
            });
        }
        Ok(())
    }

    /// Changed files and positional files that pass the configured filters.
    fn selected_files(&self, config: &Config) -> Vec<String> {
        let extensions = &config.sync.extensions;
        let ignored = &config.sync.ignored_folders;

        let mut files = filter::files_to_sync(
            self.changed_files.as_deref().unwrap_or_default(),
            extensions,
            ignored,
        );
        for file in &self.files {
            if filter::should_sync_file(file, extensions, ignored) && !files.contains(file) {
                files.push(file.clone());
            }
        }
        files
    }
}

fn print_report(output: &Output, report: &SyncReport) {
    if !report.synced.is_empty() {
        output.success(&format!("\nSynced {} file(s).", report.synced.len()));
    }

    if !report.skipped.is_empty() {
        output.warning(&format!(
            "\n{} file(s) not found, their pages were left untouched:",
            report.skipped.len()
        ));
        for file in &report.skipped {
            output.info(&format!("  - {file}"));
        }
    }

    if !report.failed.is_empty() {
        output.error(&format!("\n{} file(s) failed:", report.failed.len()));
        for (file, err) in &report.failed {
            output.info(&format!("  - {file}: {err}"));
        }
    }
}
