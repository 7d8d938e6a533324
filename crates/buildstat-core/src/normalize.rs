//! Snapshot normalizer.
//!
//! Converts the host tool's raw compilation result (arbitrary JSON, usually
//! far larger than what we keep) into the canonical [`Snapshot`].
//!
//! ## Accepted shape
//!
//! - `version`, `hash`, `outputPath`: strings, absent → `""`
//! - `startTime`, `endTime`: epoch milliseconds (number) or RFC 3339 string
//! - `modules`, `assets`: arrays of artifact objects
//! - artifact: `name` (required string), `type` or `moduleType`, `size` or
//!   `sizeKB` (non-negative number), `built`, `cached`
//!
//! Unknown fields are ignored. `durationSeconds` is always recomputed.
//!
//! ## Guarantees
//!
//! - **No partial output**: either a complete snapshot or an error.
//! - **Idempotent**: normalizing the JSON form of a normalized snapshot
//!   yields the same snapshot.
//! - **Verbatim names**: no trimming, case folding, or path normalization.

use crate::errors::{ExError, ExErrorKind, Result, SnapshotError};
use crate::model::snapshot::duration_seconds;
use crate::model::{Artifact, ArtifactCollection, Snapshot};
use chrono::DateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Normalizer output: the snapshot plus any non-fatal findings.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub snapshot: Snapshot,
    pub warnings: Vec<NormalizeWarning>,
}

/// A non-fatal problem found while normalizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum NormalizeWarning {
    /// Two artifacts in one collection share a name. The later entry was
    /// kept at its own position; the earlier one was dropped.
    DuplicateArtifactName {
        collection: ArtifactCollection,
        name: String,
    },
}

impl NormalizeWarning {
    /// Stable code shared with the error taxonomy
    pub fn code(&self) -> &'static str {
        match self {
            NormalizeWarning::DuplicateArtifactName { .. } => {
                ExErrorKind::DuplicateArtifactName.code()
            }
        }
    }
}

impl std::fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeWarning::DuplicateArtifactName { collection, name } => write!(
                f,
                "[{}] duplicate name `{}` in {}; last occurrence kept",
                self.code(),
                name,
                collection.key()
            ),
        }
    }
}

/// Normalize raw compilation-result bytes (UTF-8 JSON).
///
/// # Errors
///
/// - `MalformedSnapshot` — bytes are not UTF-8 JSON, or [`normalize`] fails
pub fn normalize_bytes(bytes: &[u8]) -> Result<Normalized> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExError::new(ExErrorKind::MalformedSnapshot)
            .with_op("normalize_bytes")
            .with_message(format!("compilation result is not valid UTF-8: {}", e))
    })?;

    let raw: Value = serde_json::from_str(text).map_err(|e| {
        ExError::new(ExErrorKind::MalformedSnapshot)
            .with_op("normalize_bytes")
            .with_message(format!("compilation result is not valid JSON: {}", e))
    })?;

    normalize(&raw)
}

/// Normalize a raw compilation result into a [`Snapshot`].
///
/// # Errors
///
/// - `MalformedSnapshot` — root is not an object; `modules`/`assets` absent or
///   not arrays; an artifact lacks a string `name`; a known field has the
///   wrong type; timestamps absent or unparseable; a size is negative
pub fn normalize(raw: &Value) -> Result<Normalized> {
    normalize_value(raw).map_err(ExError::from)
}

fn normalize_value(raw: &Value) -> std::result::Result<Normalized, SnapshotError> {
    let obj = raw.as_object().ok_or(SnapshotError::NotAnObject)?;

    let version = optional_string(obj, "version")?;
    let hash = optional_string(obj, "hash")?;
    let output_path = optional_string(obj, "outputPath")?;
    let start_time = timestamp_millis(obj, "startTime")?;
    let end_time = timestamp_millis(obj, "endTime")?;

    let mut warnings = Vec::new();
    let modules = normalize_collection(obj, ArtifactCollection::Modules, &mut warnings)?;
    let assets = normalize_collection(obj, ArtifactCollection::Assets, &mut warnings)?;

    Ok(Normalized {
        snapshot: Snapshot {
            version,
            hash,
            output_path,
            start_time,
            end_time,
            duration_seconds: duration_seconds(start_time, end_time),
            modules,
            assets,
        },
        warnings,
    })
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &str,
) -> std::result::Result<String, SnapshotError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SnapshotError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a string, got {}", json_type(other)),
        }),
    }
}

fn timestamp_millis(
    obj: &Map<String, Value>,
    field: &str,
) -> std::result::Result<i64, SnapshotError> {
    let invalid = |reason: String| SnapshotError::InvalidField {
        field: field.to_string(),
        reason,
    };

    match obj.get(field) {
        None | Some(Value::Null) => Err(SnapshotError::MissingField {
            field: field.to_string(),
        }),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.round() as i64)
            })
            .ok_or_else(|| invalid(format!("{} is not a representable timestamp", n))),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.timestamp_millis())
            .map_err(|e| invalid(format!("not an RFC 3339 timestamp: {}", e))),
        Some(other) => Err(invalid(format!(
            "expected epoch milliseconds or RFC 3339 string, got {}",
            json_type(other)
        ))),
    }
}

fn normalize_collection(
    obj: &Map<String, Value>,
    collection: ArtifactCollection,
    warnings: &mut Vec<NormalizeWarning>,
) -> std::result::Result<Vec<Artifact>, SnapshotError> {
    let key = collection.key();
    let items = match obj.get(key) {
        None | Some(Value::Null) => {
            return Err(SnapshotError::MissingField {
                field: key.to_string(),
            })
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SnapshotError::CollectionNotSequence {
                collection: key.to_string(),
            })
        }
    };

    // Slots keep emission order; a duplicate empties the earlier slot.
    let mut slots: Vec<Option<Artifact>> = Vec::with_capacity(items.len());
    let mut slot_by_name: HashMap<String, usize> = HashMap::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let artifact = normalize_artifact(collection, index, item)?;
        if let Some(earlier) = slot_by_name.insert(artifact.name.clone(), slots.len()) {
            slots[earlier] = None;
            tracing::warn!(
                component = module_path!(),
                collection = key,
                artifact_name = artifact.name.as_str(),
                err_code = ExErrorKind::DuplicateArtifactName.code(),
                "duplicate artifact name; keeping last occurrence"
            );
            warnings.push(NormalizeWarning::DuplicateArtifactName {
                collection,
                name: artifact.name.clone(),
            });
        }
        slots.push(Some(artifact));
    }

    Ok(slots.into_iter().flatten().collect())
}

fn normalize_artifact(
    collection: ArtifactCollection,
    index: usize,
    item: &Value,
) -> std::result::Result<Artifact, SnapshotError> {
    let key = collection.key();
    let obj = item
        .as_object()
        .ok_or_else(|| SnapshotError::ArtifactNotObject {
            collection: key.to_string(),
            index,
        })?;

    let name = match obj.get("name") {
        Some(Value::String(name)) => name.clone(),
        _ => {
            return Err(SnapshotError::ArtifactMissingName {
                collection: key.to_string(),
                index,
            })
        }
    };

    let invalid = |field: &str, reason: String| SnapshotError::InvalidArtifactField {
        collection: key.to_string(),
        index,
        name: name.clone(),
        field: field.to_string(),
        reason,
    };

    let kind = match first_present(obj, &["type", "moduleType"]) {
        None => String::new(),
        Some((_, Value::String(s))) => s.clone(),
        Some((field, other)) => {
            return Err(invalid(
                field,
                format!("expected a string, got {}", json_type(other)),
            ))
        }
    };

    let size_kb = match first_present(obj, &["size", "sizeKB"]) {
        None => 0.0,
        Some((field, Value::Number(n))) => {
            let size = n.as_f64().unwrap_or(0.0);
            if size < 0.0 {
                return Err(invalid(field, format!("must be non-negative, got {}", n)));
            }
            size
        }
        Some((field, other)) => {
            return Err(invalid(
                field,
                format!("expected a number, got {}", json_type(other)),
            ))
        }
    };

    let flag = |field: &str| match obj.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(invalid(
            field,
            format!("expected a boolean, got {}", json_type(other)),
        )),
    };
    let built = flag("built")?;
    let cached = flag("cached")?;

    Ok(Artifact {
        name,
        kind,
        size_kb,
        built,
        cached,
    })
}

/// First non-null value among `fields`, with the field name it came from.
fn first_present<'a>(
    obj: &'a Map<String, Value>,
    fields: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    fields.iter().find_map(|field| match obj.get(*field) {
        None | Some(Value::Null) => None,
        Some(v) => Some((*field, v)),
    })
}
