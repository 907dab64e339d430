// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation Sync — keep per-language JSON trees structurally complete.
//!
//! The main-language directory (`<root>/<main>/`) defines the canonical
//! keys. Every other configured language directory receives the files and
//! keys it is missing; values it already has are left alone.
//!
//! PIPELINE:
//! 1. **Discover**: index the main-language tree ([`discover`]).
//! 2. **Resolve**: map each file onto every language, creating missing
//!    directories and empty target files ([`resolve`]).
//! 3. **Merge**: copy absent or `null` keys from source to target
//!    ([`merge`]), then write the target back ([`document`]).
//! 4. **Log**: prepend the run's entries to `TranslationSync.log` ([`log`]).

pub mod config;
pub mod discover;
pub mod document;
pub mod error;
pub mod log;
pub mod merge;
pub mod resolve;
pub mod sync;

pub use config::{ConfigOptions, RootSpec, SyncConfig};
pub use discover::FileDescriptor;
pub use error::SyncError;
pub use sync::{RunReport, Synchronizer};
