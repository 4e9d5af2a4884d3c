//! JSON wire format for markers and marker sets
//!
//! Paths are aliased on the way out and resolved on the way in. Entries that
//! fail to decode are reported to the caller, which decides whether to skip
//! them; a bad marker never poisons the rest of its set.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::markers::error::ItemError;
use crate::markers::paths::PathAliaser;
use crate::markers::types::{Marker, MarkerKind, MarkerSet};

#[derive(Debug, Deserialize)]
struct MarkerRecord {
    #[serde(rename = "type")]
    kind: i64,
    path: String,
    line: i32,
    column: i32,
    message: String,
    show_error_list: bool,
}

#[derive(Debug, Deserialize)]
struct MarkerSetRecord {
    name: String,
    // Written as null when the set has no base path
    #[serde(default)]
    base_path: Option<String>,
    markers: Vec<Value>,
}

pub fn marker_to_json(marker: &Marker, aliases: &dyn PathAliaser) -> Value {
    json!({
        "type": marker.kind.wire_value(),
        "path": aliases.alias(&marker.path),
        "line": marker.line,
        "column": marker.column,
        "message": marker.message,
        "show_error_list": marker.show_error_list,
    })
}

pub fn marker_from_json(value: &Value, aliases: &dyn PathAliaser) -> Result<Marker, ItemError> {
    let record = MarkerRecord::deserialize(value)?;
    let kind = MarkerKind::from_wire(record.kind).ok_or(ItemError::UnknownKind(record.kind))?;

    Ok(Marker {
        kind,
        path: aliases.resolve(&record.path),
        line: record.line,
        column: record.column,
        message: record.message,
        show_error_list: record.show_error_list,
    })
}

/// Serializes a set; a present base path always ends with `/`
pub fn marker_set_to_json(set: &MarkerSet, aliases: &dyn PathAliaser) -> Value {
    let base_path = set.base_path.as_ref().map(|base| {
        let mut aliased = aliases.alias(base);
        if !aliased.ends_with('/') {
            aliased.push('/');
        }
        aliased
    });

    let markers: Vec<Value> = set
        .markers
        .iter()
        .map(|marker| marker_to_json(marker, aliases))
        .collect();

    json!({
        "name": set.name,
        "base_path": base_path,
        "markers": markers,
    })
}

/// Decodes a set, skipping (and logging) any marker that fails to decode
pub fn marker_set_from_json(
    value: &Value,
    aliases: &dyn PathAliaser,
) -> Result<MarkerSet, ItemError> {
    let record = MarkerSetRecord::deserialize(value)?;

    let markers = record
        .markers
        .iter()
        .filter_map(|marker| {
            marker_from_json(marker, aliases)
                .inspect_err(|e| warn!("Skipping marker in set '{}': {}", record.name, e))
                .ok()
        })
        .collect();

    let base_path = record
        .base_path
        .filter(|base| !base.is_empty())
        .map(|base| aliases.resolve(&base));

    Ok(MarkerSet {
        name: record.name,
        base_path,
        markers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::paths::{HomeAliaser, IdentityAliaser};
    use std::path::PathBuf;

    fn home() -> HomeAliaser {
        HomeAliaser::with_home(Some(PathBuf::from("/home/user")))
    }

    #[test]
    fn marker_to_json_uses_wire_field_names() {
        let marker = Marker::new(
            MarkerKind::Warning,
            "/home/user/proj/a.R",
            5,
            2,
            "unused variable",
            true,
        );

        let value = marker_to_json(&marker, &home());

        assert_eq!(
            value,
            json!({
                "type": 1,
                "path": "~/proj/a.R",
                "line": 5,
                "column": 2,
                "message": "unused variable",
                "show_error_list": true,
            })
        );
    }

    #[test]
    fn marker_from_json_resolves_aliased_path() {
        let value = json!({
            "type": 0,
            "path": "~/proj/a.R",
            "line": 5,
            "column": 1,
            "message": "bad",
            "show_error_list": false,
        });

        let marker = marker_from_json(&value, &home()).unwrap();

        assert_eq!(marker.kind, MarkerKind::Error);
        assert_eq!(marker.path, PathBuf::from("/home/user/proj/a.R"));
        assert!(!marker.show_error_list);
    }

    #[test]
    fn marker_from_json_rejects_unknown_kind() {
        let value = json!({
            "type": 7,
            "path": "/a.R",
            "line": 1,
            "column": 1,
            "message": "x",
            "show_error_list": true,
        });

        let result = marker_from_json(&value, &IdentityAliaser);

        assert!(matches!(result, Err(ItemError::UnknownKind(7))));
    }

    #[test]
    fn marker_from_json_rejects_missing_field() {
        let value = json!({"type": 0, "path": "/a.R", "line": 1, "column": 1});

        let result = marker_from_json(&value, &IdentityAliaser);

        assert!(matches!(result, Err(ItemError::Malformed(_))));
    }

    #[test]
    fn marker_set_to_json_adds_trailing_separator_to_base_path() {
        let set = MarkerSet::new("lint", Some(PathBuf::from("/proj")), vec![]);

        let value = marker_set_to_json(&set, &IdentityAliaser);

        assert_eq!(value["base_path"], json!("/proj/"));
    }

    #[test]
    fn marker_set_to_json_writes_null_without_base_path() {
        let set = MarkerSet::new("lint", None, vec![]);

        let value = marker_set_to_json(&set, &IdentityAliaser);

        assert_eq!(value["base_path"], Value::Null);
        assert_eq!(value["markers"], json!([]));
    }

    #[test]
    fn marker_set_from_json_skips_bad_markers_and_keeps_order() {
        let value = json!({
            "name": "build",
            "base_path": "/proj/",
            "markers": [
                {"type": 0, "path": "/proj/a.c", "line": 1, "column": 1, "message": "first", "show_error_list": true},
                {"type": 99, "path": "/proj/b.c", "line": 2, "column": 1, "message": "bad kind", "show_error_list": true},
                "not an object",
                {"type": 1, "path": "/proj/c.c", "line": 3, "column": 1, "message": "last", "show_error_list": false},
            ],
        });

        let set = marker_set_from_json(&value, &IdentityAliaser).unwrap();

        assert_eq!(set.name, "build");
        assert_eq!(set.base_path, Some(PathBuf::from("/proj/")));
        let messages: Vec<&str> = set.markers.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "last"]);
    }

    #[test]
    fn marker_set_from_json_treats_null_or_empty_base_path_as_none() {
        for base_path in [Value::Null, json!("")] {
            let value = json!({"name": "lint", "base_path": base_path, "markers": []});
            let set = marker_set_from_json(&value, &IdentityAliaser).unwrap();
            assert_eq!(set.base_path, None);
        }
    }

    #[test]
    fn marker_set_from_json_rejects_missing_name() {
        let value = json!({"base_path": null, "markers": []});

        let result = marker_set_from_json(&value, &IdentityAliaser);

        assert!(matches!(result, Err(ItemError::Malformed(_))));
    }
}
