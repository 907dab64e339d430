// SPDX-License-Identifier: PMPL-1.0-or-later

//! Map a file descriptor onto a concrete path for one language
//!
//! Resolution is not read-only: the language directory chain is created
//! whenever it is missing, and a missing target-language file is created
//! as an empty document. A missing main-language file is reported as
//! absent and left to the caller.

use crate::config::SyncConfig;
use crate::discover::FileDescriptor;
use crate::document::EMPTY_DOCUMENT;
use crate::error::{Result, SyncError};
use crate::log::SyncLog;
use std::fs;
use std::path::{Path, PathBuf};

/// Which side of the sync a path is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale<'a> {
    Main,
    Target(&'a str),
}

pub struct Resolver<'a> {
    config: &'a SyncConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a SyncConfig) -> Self {
        Self { config }
    }

    /// Language code used for directories and log tags
    pub fn code<'l>(&self, locale: Locale<'l>) -> &'l str
    where
        'a: 'l,
    {
        match locale {
            Locale::Main => self.config.main_language(),
            Locale::Target(code) => code,
        }
    }

    /// Where the file lives for `locale`, without touching the disk.
    pub fn file_path(&self, descriptor: &FileDescriptor, locale: Locale<'_>) -> Result<PathBuf> {
        Ok(self.dir_path(descriptor, locale)?.join(&descriptor.filename))
    }

    fn dir_path(&self, descriptor: &FileDescriptor, locale: Locale<'_>) -> Result<PathBuf> {
        if let Locale::Target(code) = locale {
            if !self.config.languages().iter().any(|lang| lang == code) {
                return Err(SyncError::InvalidLanguage {
                    language: code.to_string(),
                });
            }
        }
        let language_dir = self.config.root().join(self.code(locale));
        Ok(descriptor.dir_under(&language_dir))
    }

    /// Resolve, creating directories and empty target documents as needed.
    ///
    /// Returns `None` only when the main-language file is absent.
    pub fn resolve(
        &self,
        descriptor: &FileDescriptor,
        locale: Locale<'_>,
        log: &mut SyncLog,
    ) -> Result<Option<PathBuf>> {
        let dir = self.dir_path(descriptor, locale)?;
        ensure_directory(&dir)?;

        let file = dir.join(&descriptor.filename);
        if !file.exists() {
            if let Locale::Target(code) = locale {
                fs::write(&file, EMPTY_DOCUMENT).map_err(|e| SyncError::io(&file, e))?;
                log.record(code, format!("Created missing file {}", file.display()));
            }
        }

        Ok(file.exists().then_some(file))
    }
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        if let Err(e) = fs::create_dir_all(dir) {
            // A file somewhere along the chain blocks creation.
            if let Some(blocker) = dir.ancestors().find(|p| p.exists() && !p.is_dir()) {
                return Err(SyncError::InvalidDirectory {
                    path: blocker.to_path_buf(),
                });
            }
            return Err(SyncError::io(dir, e));
        }
    }

    if !dir.is_dir() {
        return Err(SyncError::InvalidDirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}
