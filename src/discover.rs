// SPDX-License-Identifier: PMPL-1.0-or-later

//! Discovery: index the main-language tree
//!
//! Walks `root/<main language>/` depth-first and collects every file whose
//! lowercased extension is allowed. Entries come out in the order the file
//! system lists them, which differs between platforms; nothing here sorts.
//! The walk stops with [`SyncError::LimitExceeded`] as soon as the index
//! grows past the cap, so a root pointed at a dependency cache fails fast.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// One logical translation file, shared by every language directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Directory segments between the language directory and the file
    pub relative_path: Vec<String>,
    pub filename: String,
}

impl FileDescriptor {
    pub fn new(relative_path: Vec<String>, filename: impl Into<String>) -> Self {
        Self {
            relative_path,
            filename: filename.into(),
        }
    }

    /// Directory of this file under a language directory
    pub fn dir_under(&self, language_dir: &Path) -> PathBuf {
        let mut dir = language_dir.to_path_buf();
        dir.extend(&self.relative_path);
        dir
    }
}

impl fmt::Display for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.relative_path {
            write!(f, "{}/", segment)?;
        }
        write!(f, "{}", self.filename)
    }
}

/// Build the file index for one run.
pub fn discover(
    root: &Path,
    main_language: &str,
    allowed_extensions: &[String],
    max_count: usize,
) -> Result<Vec<FileDescriptor>> {
    let main_dir = root.join(main_language);
    if !main_dir.is_dir() {
        return Err(SyncError::configuration(format!(
            "Main language folder not found at: {}",
            main_dir.display()
        )));
    }

    let mut index = Vec::new();

    for entry in WalkDir::new(&main_dir).min_depth(1).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if !has_allowed_extension(entry.path(), allowed_extensions) {
            continue;
        }

        index.push(describe(&main_dir, entry.path())?);

        if index.len() > max_count {
            return Err(SyncError::LimitExceeded { limit: max_count });
        }
    }

    Ok(index)
}

fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            allowed.iter().any(|a| *a == ext)
        })
        .unwrap_or(false)
}

fn describe(main_dir: &Path, path: &Path) -> Result<FileDescriptor> {
    let relative = path.strip_prefix(main_dir).map_err(|_| {
        SyncError::configuration(format!(
            "{} is outside {}",
            path.display(),
            main_dir.display()
        ))
    })?;

    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let filename = segments.pop().ok_or_else(|| {
        SyncError::configuration(format!("Empty relative path for {}", path.display()))
    })?;

    Ok(FileDescriptor::new(segments, filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        let allowed = vec!["json".to_string()];
        assert!(has_allowed_extension(Path::new("a/b.JSON"), &allowed));
        assert!(has_allowed_extension(Path::new("b.json"), &allowed));
        assert!(!has_allowed_extension(Path::new("b.yaml"), &allowed));
        assert!(!has_allowed_extension(Path::new("README"), &allowed));
    }

    #[test]
    fn describe_splits_directories_and_filename() {
        let desc = describe(
            Path::new("locales/en"),
            Path::new("locales/en/admin/users/list.json"),
        )
        .unwrap();
        assert_eq!(desc.relative_path, vec!["admin", "users"]);
        assert_eq!(desc.filename, "list.json");
        assert_eq!(desc.to_string(), "admin/users/list.json");
    }
}
