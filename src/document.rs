// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reading and writing translation documents

use crate::error::{Result, SyncError};
use crate::log::SyncLog;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A translation document: a JSON object, key order preserved
pub type Document = Map<String, Value>;

/// Content of a freshly created target file
pub const EMPTY_DOCUMENT: &str = "{}";

/// Parse the document at `path`.
///
/// Parse failures are recorded in `log` under `language` before the error
/// is returned.
pub fn load(path: &Path, language: &str, log: &mut SyncLog) -> Result<Document> {
    if !path.exists() {
        return Err(SyncError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read(path).map_err(|e| SyncError::io(path, e))?;

    let parsed = serde_json::from_slice::<Value>(&raw)
        .map_err(|e| e.to_string())
        .and_then(|value| match value {
            Value::Object(map) => Ok(map),
            other => Err(format!("top-level value is {}, not an object", kind(&other))),
        });

    parsed.map_err(|reason| {
        log.record(
            language,
            format!("Invalid JSON data in file {}", path.display()),
        );
        SyncError::malformed(language, path, reason)
    })
}

/// Write `document` tab-indented, without a trailing newline.
pub fn save(path: &Path, document: &Document) -> Result<()> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    document
        .serialize(&mut serializer)
        .map_err(|e| SyncError::io(path, e.into()))?;
    fs::write(path, buf).map_err(|e| SyncError::io(path, e))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn save_uses_tabs_and_keeps_key_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let value = json!({"zeta": 1, "alpha": {"b": "x"}});
        let doc = value.as_object().unwrap().clone();

        save(&path, &doc).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n\t\"zeta\": 1,\n\t\"alpha\": {\n\t\t\"b\": \"x\"\n\t}\n}"
        );
    }

    #[test]
    fn load_rejects_non_object_root() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "[1, 2]").unwrap();
        let mut log = SyncLog::quiet();

        let err = load(&path, "tr", &mut log).unwrap_err();
        assert!(matches!(err, SyncError::MalformedDocument { .. }));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn load_reports_syntax_errors_with_language() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"a\": ").unwrap();
        let mut log = SyncLog::quiet();

        match load(&path, "es", &mut log) {
            Err(SyncError::MalformedDocument { language, .. }) => assert_eq!(language, "es"),
            other => panic!("expected malformed document, got {:?}", other),
        }
        assert!(log.entries().next().unwrap().message.contains("Invalid JSON"));
    }

    #[test]
    fn load_treats_invalid_utf8_as_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.json");
        fs::write(&path, b"{\"k\": \"\xff\xfe\"}").unwrap();
        let mut log = SyncLog::quiet();

        match load(&path, "tr", &mut log) {
            Err(SyncError::MalformedDocument { language, .. }) => assert_eq!(language, "tr"),
            other => panic!("expected malformed document, got {:?}", other),
        }
        let entry = log.entries().next().expect("parse failure should be logged");
        assert_eq!(entry.language, "tr");
        assert!(entry.message.contains("Invalid JSON data in file"));
    }

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.json"), "en", &mut SyncLog::quiet()).unwrap_err();
        assert!(matches!(err, SyncError::MissingFile { .. }));
    }
}
