// SPDX-License-Identifier: PMPL-1.0-or-later

//! One-way structural merge from the main-language document into a target
//!
//! The source is walked depth-first in key order. Nested objects are
//! descended into; everything else (strings, numbers, booleans, null,
//! arrays) is a leaf. A leaf is copied into the target at the same key-path
//! only when the target has no value there or holds `null`, so existing
//! translations are never touched and a second pass changes nothing.
//!
//! Intermediate segments that exist in the target as anything other than
//! an object are replaced by an empty object before descending.

use crate::document::Document;
use crate::log::SyncLog;
use serde::Serialize;
use serde_json::map::Entry;
use serde_json::{Map, Value};

/// What a merge changed in the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Leaf values copied from the source
    pub keys_written: usize,
    /// Missing intermediate objects created
    pub keys_created: usize,
    /// Non-object intermediates replaced by objects
    pub keys_repaired: usize,
}

impl MergeStats {
    pub fn is_unchanged(&self) -> bool {
        self.keys_written == 0 && self.keys_created == 0 && self.keys_repaired == 0
    }

    pub fn absorb(&mut self, other: MergeStats) {
        self.keys_written += other.keys_written;
        self.keys_created += other.keys_created;
        self.keys_repaired += other.keys_repaired;
    }
}

/// Copy every key of `source` that `target` lacks (or holds as `null`).
///
/// Every write is recorded in `log` under `language`.
pub fn synchronize(
    source: &Document,
    target: &mut Document,
    language: &str,
    log: &mut SyncLog,
) -> MergeStats {
    let mut merge = Merge {
        target,
        language,
        log,
        stats: MergeStats::default(),
    };
    let mut key_path = Vec::new();
    merge.traverse(source, &mut key_path);
    merge.stats
}

struct Merge<'t, 'l> {
    target: &'t mut Document,
    language: &'l str,
    log: &'l mut SyncLog,
    stats: MergeStats,
}

impl<'t, 'l> Merge<'t, 'l> {
    fn traverse<'s>(&mut self, node: &'s Document, key_path: &mut Vec<&'s str>) {
        for (key, value) in node {
            key_path.push(key.as_str());
            match value {
                Value::Object(child) => self.traverse(child, key_path),
                leaf => self.write_leaf(key_path, leaf),
            }
            key_path.pop();
        }
    }

    fn write_leaf(&mut self, key_path: &[&str], value: &Value) {
        let Some((last, parents)) = key_path.split_last() else {
            return;
        };

        let mut current: &mut Map<String, Value> = &mut *self.target;
        for &key in parents {
            let slot = match current.entry(key) {
                Entry::Vacant(vacant) => {
                    self.log
                        .record(self.language, format!("Creating missing key [{}]", key));
                    self.stats.keys_created += 1;
                    vacant.insert(Value::Object(Map::new()))
                }
                Entry::Occupied(occupied) => {
                    let slot = occupied.into_mut();
                    if !slot.is_object() {
                        self.log.record(
                            self.language,
                            format!("Writing over non-object property [{}]", key),
                        );
                        self.stats.keys_repaired += 1;
                        *slot = Value::Object(Map::new());
                    }
                    slot
                }
            };
            let Value::Object(map) = slot else {
                return;
            };
            current = map;
        }

        if matches!(current.get(*last), None | Some(Value::Null)) {
            current.insert((*last).to_string(), value.clone());
            self.log
                .record(self.language, format!("Writing over key [{}]", last));
            self.stats.keys_written += 1;
        }
    }
}
