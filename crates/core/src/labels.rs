//! Label resolution for status and dropdown columns
//!
//! Status (`color`) and dropdown values are stored as indexes into the column's
//! settings blob. This module parses those blobs and maps raw indexes back to the
//! labels shown in the monday UI.
//!
//! Status settings look like:
//!
//! ```json
//! {"labels": {"0": "Working on it", "1": "Done"}, "labels_positions_v2": {"0": 1, "1": 0}}
//! ```
//!
//! Dropdown settings look like:
//!
//! ```json
//! {"labels": [{"id": 1, "name": "Alpha"}, {"id": 2, "name": "Beta"}]}
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::model::{ColumnKind, ColumnType};

/// Error type for label resolution
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The settings blob does not have the shape its column type implies.
    #[error("Corrupt {column_type} column settings: {reason}")]
    MetadataCorrupt {
        column_type: ColumnType,
        reason: String,
    },

    /// A raw index or id has no entry in the settings.
    #[error("No {column_type} label for key {key}")]
    LabelNotFound { column_type: ColumnType, key: String },

    /// The raw value does not have the shape its column type implies.
    #[error("Malformed {column_type} value {value:?}: {reason}")]
    MalformedValue {
        column_type: ColumnType,
        value: String,
        reason: String,
    },
}

/// The outcome of resolving one raw value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A status label
    Label(String),
    /// Dropdown labels, in the order the value lists them
    Labels(Vec<String>),
}

impl Resolved {
    /// Renders the labels as a single display string.
    pub fn join(&self, separator: &str) -> String {
        match self {
            Resolved::Label(label) => label.clone(),
            Resolved::Labels(labels) => labels.join(separator),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawStatusSettings {
    labels: HashMap<String, String>,
    #[serde(default)]
    label_positions_v1: Option<HashMap<String, i64>>,
    #[serde(default)]
    labels_positions_v2: Option<HashMap<String, i64>>,
}

#[derive(Debug, Deserialize)]
struct RawDropdownSettings {
    labels: Vec<DropdownEntry>,
}

/// One dropdown option
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DropdownEntry {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RawStatusValue {
    index: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawDropdownValue {
    #[serde(default)]
    ids: Vec<u64>,
}

/// Parsed label metadata of a column
#[derive(Debug, Clone, PartialEq)]
pub enum LabelSettings {
    Status {
        labels: HashMap<String, String>,
        positions: HashMap<String, i64>,
    },
    Dropdown {
        entries: Vec<DropdownEntry>,
        names: HashMap<u64, String>,
    },
}

impl LabelSettings {
    /// Parses a settings blob according to its column type.
    ///
    /// Returns `Ok(None)` for column types without label metadata; their settings are
    /// never looked at.
    pub fn parse(column_type: &ColumnType, settings: &str) -> Result<Option<Self>, ResolveError> {
        match column_type.kind() {
            ColumnKind::Color => Self::parse_status(settings).map(Some),
            ColumnKind::Dropdown => Self::parse_dropdown(settings).map(Some),
            _ => Ok(None),
        }
    }

    fn parse_status(settings: &str) -> Result<Self, ResolveError> {
        let raw: RawStatusSettings =
            serde_json::from_str(settings).map_err(|e| corrupt(ColumnType::COLOR, e))?;

        Ok(LabelSettings::Status {
            labels: raw.labels,
            positions: raw
                .labels_positions_v2
                .or(raw.label_positions_v1)
                .unwrap_or_default(),
        })
    }

    fn parse_dropdown(settings: &str) -> Result<Self, ResolveError> {
        let raw: RawDropdownSettings =
            serde_json::from_str(settings).map_err(|e| corrupt(ColumnType::DROPDOWN, e))?;
        let names = raw
            .labels
            .iter()
            .map(|entry| (entry.id, entry.name.clone()))
            .collect();

        Ok(LabelSettings::Dropdown {
            entries: raw.labels,
            names,
        })
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            LabelSettings::Status { .. } => ColumnType::COLOR,
            LabelSettings::Dropdown { .. } => ColumnType::DROPDOWN,
        }
    }

    /// Looks up a status label by its string-encoded index.
    pub fn status_label(&self, index: &str) -> Result<&str, ResolveError> {
        let found = match self {
            LabelSettings::Status { labels, .. } => labels.get(index).map(String::as_str),
            LabelSettings::Dropdown { names, .. } => index
                .parse::<u64>()
                .ok()
                .and_then(|id| names.get(&id))
                .map(String::as_str),
        };

        found.ok_or_else(|| ResolveError::LabelNotFound {
            column_type: self.column_type(),
            key: index.to_string(),
        })
    }

    /// Looks up dropdown names for a list of ids, preserving their order.
    pub fn dropdown_labels(&self, ids: &[u64]) -> Result<Vec<&str>, ResolveError> {
        ids.iter()
            .map(|id| self.status_label(&id.to_string()))
            .collect()
    }

    /// Resolves a raw column value (`{"index":N}` or `{"ids":[...]}`).
    pub fn resolve(&self, raw_value: &str) -> Result<Resolved, ResolveError> {
        match self {
            LabelSettings::Status { .. } => {
                let index = status_index(raw_value)?;
                Ok(Resolved::Label(self.status_label(&index)?.to_string()))
            }
            LabelSettings::Dropdown { .. } => {
                let ids = dropdown_ids(raw_value)?;
                let labels = self.dropdown_labels(&ids)?;
                Ok(Resolved::Labels(
                    labels.into_iter().map(str::to_string).collect(),
                ))
            }
        }
    }

    /// Every (key, label) pair. Status labels follow their board position, dropdown
    /// options their settings order.
    pub fn entries(&self) -> Vec<(String, String)> {
        match self {
            LabelSettings::Status { labels, positions } => {
                let mut entries: Vec<(&String, &String)> = labels.iter().collect();
                entries.sort_by_key(|(key, _)| {
                    (
                        positions.get(*key).copied().unwrap_or(i64::MAX),
                        key.parse::<u64>().unwrap_or(u64::MAX),
                    )
                });
                entries
                    .into_iter()
                    .map(|(key, label)| (key.clone(), label.clone()))
                    .collect()
            }
            LabelSettings::Dropdown { entries, .. } => entries
                .iter()
                .map(|entry| (entry.id.to_string(), entry.name.clone()))
                .collect(),
        }
    }

    /// Reverse lookup: the key of the first label equal to `label`.
    pub fn index_of(&self, label: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|(_, name)| name == label)
            .map(|(key, _)| key)
    }
}

/// Extracts the string-encoded index from a status value.
pub fn status_index(raw_value: &str) -> Result<String, ResolveError> {
    let malformed = |reason: String| ResolveError::MalformedValue {
        column_type: ColumnType::COLOR,
        value: raw_value.to_string(),
        reason,
    };

    let raw: RawStatusValue =
        serde_json::from_str(raw_value).map_err(|e| malformed(e.to_string()))?;

    match raw.index {
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(serde_json::Value::String(s)) => Ok(s),
        _ => Err(malformed("missing index".to_string())),
    }
}

/// Extracts the selected ids from a dropdown value.
pub fn dropdown_ids(raw_value: &str) -> Result<Vec<u64>, ResolveError> {
    serde_json::from_str::<RawDropdownValue>(raw_value)
        .map(|raw| raw.ids)
        .map_err(|e| ResolveError::MalformedValue {
            column_type: ColumnType::DROPDOWN,
            value: raw_value.to_string(),
            reason: e.to_string(),
        })
}

fn corrupt(column_type: ColumnType, err: serde_json::Error) -> ResolveError {
    ResolveError::MetadataCorrupt {
        column_type,
        reason: err.to_string(),
    }
}

/// Resolves one string-encoded index against a column's settings.
///
/// Column types without label metadata never resolve and report the index as
/// [`ResolveError::LabelNotFound`].
pub fn resolve_label(
    column_type: &ColumnType,
    settings: &str,
    raw_index: &str,
) -> Result<String, ResolveError> {
    match LabelSettings::parse(column_type, settings)? {
        Some(labels) => labels.status_label(raw_index).map(str::to_string),
        None => Err(ResolveError::LabelNotFound {
            column_type: column_type.clone(),
            key: raw_index.to_string(),
        }),
    }
}

/// Resolves dropdown ids against a dropdown column's settings.
pub fn resolve_dropdown(settings: &str, ids: &[u64]) -> Result<Vec<String>, ResolveError> {
    Ok(LabelSettings::parse_dropdown(settings)?
        .dropdown_labels(ids)?
        .into_iter()
        .map(str::to_string)
        .collect())
}
