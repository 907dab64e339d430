// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run orchestration
//!
//! Discover once, then for every file and every target language: resolve
//! both paths, load both documents, merge, write the target back. The log
//! is flushed exactly once at the end, whether or not the run finished.
//!
//! By default the first error ends the run; files already written stay
//! written. With `continueOnError` a failing (file, language) pair is
//! recorded and the run moves on; discovery errors still end the run.

use crate::config::{ConfigOptions, SyncConfig};
use crate::discover::{discover, FileDescriptor};
use crate::document;
use crate::error::{Result, SyncError};
use crate::log::SyncLog;
use crate::merge::{self, MergeStats};
use crate::resolve::{Locale, Resolver};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;

/// A (file, language) pair that failed while the run continued
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    pub file: String,
    pub language: String,
    pub error: String,
}

/// Outcome of one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files_discovered: usize,
    pub pairs_synced: usize,
    pub files_created: usize,
    pub stats: MergeStats,
    pub failures: Vec<SyncFailure>,
    /// Message of the error that ended the run early
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.aborted.is_none() && self.failures.is_empty() && self.log_error.is_none()
    }
}

struct PairOutcome {
    created: bool,
    stats: MergeStats,
}

#[derive(Debug, Clone, Default)]
pub struct Synchronizer {
    config: SyncConfig,
    quiet: bool,
}

impl Synchronizer {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            quiet: false,
        }
    }

    /// Apply `options` on top of the current configuration.
    ///
    /// ```no_run
    /// use translation_sync::{ConfigOptions, RootSpec, Synchronizer};
    ///
    /// let report = Synchronizer::default()
    ///     .edit_config(ConfigOptions {
    ///         root: Some(RootSpec::Segments(vec!["locales".into()])),
    ///         languages: Some(vec!["en".into(), "tr".into(), "es".into()]),
    ///         ..Default::default()
    ///     })?
    ///     .run();
    /// assert!(report.is_success());
    /// # Ok::<(), translation_sync::SyncError>(())
    /// ```
    pub fn edit_config(self, options: ConfigOptions) -> Result<Self> {
        let config = SyncConfig::from_options(self.config.to_options().overlay(options))?;
        Ok(Self { config, ..self })
    }

    /// Suppress the per-entry console echo. Errors still go to stderr and
    /// the log file is still written.
    pub fn quiet(self, quiet: bool) -> Self {
        Self { quiet, ..self }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Discovery only, no files touched
    pub fn discover(&self) -> Result<Vec<FileDescriptor>> {
        discover(
            self.config.root(),
            self.config.main_language(),
            self.config.file_types(),
            self.config.max_files(),
        )
    }

    /// Run discovery and sync. Errors are reported and logged, never returned.
    pub fn run(&self) -> RunReport {
        let mut log = if self.quiet {
            SyncLog::quiet()
        } else {
            SyncLog::new()
        };
        let mut report = RunReport::default();

        if let Err(err) = self.sync_all(&mut log, &mut report) {
            let message = err.to_string();
            eprintln!("{}", message.red());
            log.record(self.config.main_language(), message.clone());
            report.aborted = Some(message);
        }

        match log.flush(self.config.root()) {
            Ok(path) => report.log_file = path,
            Err(err) => {
                eprintln!("{} {}", "Could not write log:".red(), err);
                report.log_error = Some(err.to_string());
            }
        }

        report
    }

    fn sync_all(&self, log: &mut SyncLog, report: &mut RunReport) -> Result<()> {
        let index = self.discover()?;
        report.files_discovered = index.len();

        let resolver = Resolver::new(&self.config);
        for descriptor in &index {
            let main_path = resolver.file_path(descriptor, Locale::Main)?;
            log.record(
                self.config.main_language(),
                format!("Synchronization started for: {}", main_path.display()),
            );

            for language in self.config.languages() {
                match self.sync_pair(&resolver, descriptor, language, log) {
                    Ok(outcome) => {
                        report.pairs_synced += 1;
                        if outcome.created {
                            report.files_created += 1;
                        }
                        report.stats.absorb(outcome.stats);
                    }
                    Err(err) if self.config.continue_on_error() => {
                        eprintln!("{}", err.to_string().red());
                        log.record(language, err.to_string());
                        report.failures.push(SyncFailure {
                            file: descriptor.to_string(),
                            language: language.clone(),
                            error: err.to_string(),
                        });
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Ok(())
    }

    fn sync_pair(
        &self,
        resolver: &Resolver<'_>,
        descriptor: &FileDescriptor,
        language: &str,
        log: &mut SyncLog,
    ) -> Result<PairOutcome> {
        let main_language = self.config.main_language();
        let target = Locale::Target(language);

        let source_path = match resolver.resolve(descriptor, Locale::Main, log)? {
            Some(path) => path,
            None => {
                return Err(SyncError::MissingFile {
                    path: resolver.file_path(descriptor, Locale::Main)?,
                })
            }
        };

        let existed = resolver.file_path(descriptor, target)?.exists();
        let target_path = match resolver.resolve(descriptor, target, log)? {
            Some(path) => path,
            None => {
                return Err(SyncError::MissingFile {
                    path: resolver.file_path(descriptor, target)?,
                })
            }
        };

        let source = document::load(&source_path, main_language, log)?;
        let mut target_doc = document::load(&target_path, language, log)?;

        let stats = merge::synchronize(&source, &mut target_doc, language, log);
        document::save(&target_path, &target_doc)?;

        Ok(PairOutcome {
            created: !existed,
            stats,
        })
    }
}

/// Print a run summary to the terminal. Errors were already reported on
/// stderr during the run, so a quiet summary prints nothing.
pub fn print_summary(report: &RunReport, quiet: bool) {
    if quiet {
        return;
    }

    println!("\n{}", "=== TRANSLATION SYNC SUMMARY ===".bold().cyan());
    println!(
        "Files indexed: {}  |  Pairs synced: {}  |  Files created: {}",
        report.files_discovered, report.pairs_synced, report.files_created
    );
    println!(
        "Keys written: {}  |  Objects created: {}  |  Conflicts repaired: {}",
        report.stats.keys_written, report.stats.keys_created, report.stats.keys_repaired
    );

    if !report.failures.is_empty() {
        println!();
        println!("  {:<40} {:<8} {}", "File", "Lang", "Error");
        println!("  {}", "-".repeat(78));
        for failure in &report.failures {
            println!(
                "  {:<40} {:<8} {}",
                failure.file,
                failure.language,
                failure.error.red()
            );
        }
    }

    if let Some(message) = &report.aborted {
        println!("{} {}", "Run aborted:".bold().red(), message);
    }
    if let Some(path) = &report.log_file {
        println!("Log: {}", path.display());
    }
    if report.is_success() {
        println!("{}", "Sync complete".green());
    }
    println!();
}
