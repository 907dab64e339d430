// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration
//!
//! [`ConfigOptions`] is the partial, user-facing shape (config files, CLI
//! flags); every field is optional. [`SyncConfig::from_options`] fills the
//! defaults and validates, so a `SyncConfig` always has at least one target
//! language and never lists the main language as a target.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAIN_LANGUAGE: &str = "en";
pub const DEFAULT_ROOT: &[&str] = &["public", "locales"];
pub const DEFAULT_LANGUAGES: &[&str] = &["tr", "es"];
pub const DEFAULT_FILE_TYPES: &[&str] = &["json"];
pub const DEFAULT_MAX_FILES: usize = 100;

/// Locale root, either as path segments or as a single path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RootSpec {
    Segments(Vec<String>),
    Path(String),
}

impl RootSpec {
    fn to_path(&self) -> Result<PathBuf> {
        let path: PathBuf = match self {
            RootSpec::Segments(segments) => segments
                .iter()
                .filter(|segment| !segment.is_empty())
                .collect(),
            RootSpec::Path(path) => PathBuf::from(path),
        };
        if path.as_os_str().is_empty() {
            return Err(SyncError::configuration(
                "Please provide a non-empty path for the locales root",
            ));
        }
        Ok(path)
    }
}

impl From<&Path> for RootSpec {
    fn from(path: &Path) -> Self {
        RootSpec::Path(path.to_string_lossy().into_owned())
    }
}

/// Partial configuration; omitted fields fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<RootSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_file_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_db_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_on_error: Option<bool>,
}

impl ConfigOptions {
    /// Load options from a `.yaml`, `.yml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
                SyncError::configuration(format!("{}: {}", path.display(), e))
            }),
            "json" => serde_json::from_str(&content).map_err(|e| {
                SyncError::configuration(format!("{}: {}", path.display(), e))
            }),
            other => Err(SyncError::configuration(format!(
                "Unsupported config file type '{}' for {}",
                other,
                path.display()
            ))),
        }
    }

    /// Field-wise overlay: values set in `overrides` win.
    pub fn overlay(self, overrides: ConfigOptions) -> ConfigOptions {
        ConfigOptions {
            main_language: overrides.main_language.or(self.main_language),
            root: overrides.root.or(self.root),
            languages: overrides.languages.or(self.languages),
            language_file_types: overrides.language_file_types.or(self.language_file_types),
            max_db_size: overrides.max_db_size.or(self.max_db_size),
            continue_on_error: overrides.continue_on_error.or(self.continue_on_error),
        }
    }
}

/// Validated, immutable configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    main_language: String,
    root: PathBuf,
    languages: Vec<String>,
    file_types: Vec<String>,
    max_files: usize,
    continue_on_error: bool,
}

impl SyncConfig {
    pub fn from_options(options: ConfigOptions) -> Result<Self> {
        let main_language = options
            .main_language
            .map(|lang| lang.trim().to_string())
            .unwrap_or_else(|| DEFAULT_MAIN_LANGUAGE.to_string());
        validate_code(&main_language)?;

        let root = match &options.root {
            Some(spec) => spec.to_path()?,
            None => DEFAULT_ROOT.iter().collect(),
        };

        let requested = options
            .languages
            .unwrap_or_else(|| DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect());
        let mut languages: Vec<String> = Vec::with_capacity(requested.len());
        for lang in requested {
            let lang = lang.trim().to_string();
            validate_code(&lang)?;
            if lang != main_language && !languages.contains(&lang) {
                languages.push(lang);
            }
        }
        if languages.is_empty() {
            return Err(SyncError::configuration(
                "Please provide at least 1 other language excluding main language",
            ));
        }

        let mut file_types: Vec<String> = Vec::new();
        let requested_types = options
            .language_file_types
            .unwrap_or_else(|| DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect());
        for ext in requested_types {
            let ext = ext.trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !file_types.contains(&ext) {
                file_types.push(ext);
            }
        }
        if file_types.is_empty() {
            return Err(SyncError::configuration(
                "Please provide at least 1 language file extension",
            ));
        }

        let max_files = match options.max_db_size {
            Some(n) if n > 0 => n,
            _ => DEFAULT_MAX_FILES,
        };

        Ok(Self {
            main_language,
            root,
            languages,
            file_types,
            max_files,
            continue_on_error: options.continue_on_error.unwrap_or(false),
        })
    }

    /// The options that rebuild this configuration
    pub fn to_options(&self) -> ConfigOptions {
        ConfigOptions {
            main_language: Some(self.main_language.clone()),
            root: Some(RootSpec::from(self.root.as_path())),
            languages: Some(self.languages.clone()),
            language_file_types: Some(self.file_types.clone()),
            max_db_size: Some(self.max_files),
            continue_on_error: Some(self.continue_on_error),
        }
    }

    pub fn main_language(&self) -> &str {
        &self.main_language
    }

    /// Locale root, relative to the working directory unless absolute
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target languages in configured order, main language excluded
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Lowercase extensions without a leading dot
    pub fn file_types(&self) -> &[String] {
        &self.file_types
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn continue_on_error(&self) -> bool {
        self.continue_on_error
    }

    pub fn main_language_dir(&self) -> PathBuf {
        self.root.join(&self.main_language)
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join(crate::log::LOG_FILE_NAME)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            main_language: DEFAULT_MAIN_LANGUAGE.to_string(),
            root: DEFAULT_ROOT.iter().collect(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            file_types: DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
            max_files: DEFAULT_MAX_FILES,
            continue_on_error: false,
        }
    }
}

// Language codes become directory names under the root.
fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(SyncError::configuration("Language codes must not be empty"));
    }
    if code == "." || code == ".." || code.contains(['/', '\\']) {
        return Err(SyncError::configuration(format!(
            "Invalid language code '{}'",
            code
        )));
    }
    Ok(())
}
