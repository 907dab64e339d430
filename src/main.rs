// SPDX-License-Identifier: PMPL-1.0-or-later

//! translation-sync: propagate main-language JSON keys into every locale
//!
//! Reads the main-language tree under the locale root, creates missing
//! translation files and keys in each target language, and prepends a run
//! log to `TranslationSync.log`.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use translation_sync::sync::print_summary;
use translation_sync::{ConfigOptions, RootSpec, SyncConfig, Synchronizer};

#[derive(Parser)]
#[command(name = "translation-sync")]
#[command(version)]
#[command(about = "Propagate main-language translation keys into every other locale")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover files and sync every target language
    Sync {
        #[command(flatten)]
        config: ConfigArgs,

        /// Keep going when a file fails; report failures at the end
        #[arg(long)]
        continue_on_error: bool,

        /// Only print errors (to stderr); skip progress lines and the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the files the main-language tree would sync
    Discover {
        #[command(flatten)]
        config: ConfigArgs,

        /// Print the index as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// Config file (.yaml, .yml or .json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Locale root containing one directory per language
    #[arg(short, long, value_name = "PATH")]
    root: Option<PathBuf>,

    /// Main language code
    #[arg(short, long = "main", value_name = "LANG")]
    main_language: Option<String>,

    /// Languages to sync (the main language is ignored if listed)
    #[arg(short, long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// File extensions to index
    #[arg(short = 't', long, value_delimiter = ',')]
    file_types: Option<Vec<String>>,

    /// Abort when discovery finds more files than this
    #[arg(long, value_name = "N")]
    max_files: Option<usize>,
}

impl ConfigArgs {
    fn into_config(self, continue_on_error: bool) -> Result<SyncConfig> {
        let base = match &self.config {
            Some(path) => ConfigOptions::from_file(path)?,
            None => ConfigOptions::default(),
        };
        let overrides = ConfigOptions {
            main_language: self.main_language,
            root: self.root.as_deref().map(RootSpec::from),
            languages: self.languages,
            language_file_types: self.file_types,
            max_db_size: self.max_files,
            continue_on_error: continue_on_error.then_some(true),
        };
        Ok(SyncConfig::from_options(base.overlay(overrides))?)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            config,
            continue_on_error,
            quiet,
        } => {
            let config = config.into_config(continue_on_error)?;
            if !quiet {
                println!(
                    "Syncing {} -> {} under {}",
                    config.main_language().bold(),
                    config.languages().join(", "),
                    config.root().display()
                );
            }

            let report = Synchronizer::new(config).quiet(quiet).run();
            print_summary(&report, quiet);

            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Discover { config, json } => {
            let config = config.into_config(false)?;
            let index = Synchronizer::new(config).discover()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&index)?);
            } else {
                for descriptor in &index {
                    println!("{}", descriptor);
                }
                println!("\n{} file(s) indexed", index.len());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
