//! Column value decoding
//!
//! Items come back from the API with raw column values: status columns hold
//! `{"index":N}`, dropdowns `{"ids":[...]}`. Decoding replaces those encodings with the
//! labels configured on the board, so callers can show or compare them directly.
//!
//! Decoding is a structural transform. Items and column values keep their order,
//! assets and groups pass through untouched, and the inputs are never modified.

use std::collections::HashMap;

use crate::labels::{LabelSettings, ResolveError};
use crate::model::{Column, ColumnMap, ColumnValue, Item};

/// What to do when a single value cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Keep the raw value and record a [`Diagnostic`].
    #[default]
    Lenient,
    /// Abort on the first value that fails to resolve.
    Strict,
}

/// Decoding options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub policy: DecodePolicy,
    /// Joins the labels of multi-select dropdown values.
    pub dropdown_separator: String,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            policy: DecodePolicy::Lenient,
            dropdown_separator: ", ".to_string(),
        }
    }
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            policy: DecodePolicy::Strict,
            ..Self::default()
        }
    }
}

/// Why a value was left undecoded
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// The board has no column with this id (it may have been removed).
    UnknownColumn,
    /// The column is known but the value could not be resolved.
    Unresolved(ResolveError),
}

/// A value that was passed through raw
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub item_id: String,
    pub column_id: String,
    pub problem: Problem,
}

/// Result of a decode call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    pub items: Vec<Item>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
    /// Every value was either resolved or never needed resolution.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The diagnostic recorded for one value, if it was left raw.
    pub fn diagnostic(&self, item_id: &str, column_id: &str) -> Option<&Diagnostic> {
        self.diagnostics
            .iter()
            .find(|d| d.item_id == item_id && d.column_id == column_id)
    }
}

/// Strict decoding failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to decode column {column_id} of item {item_id}: {source}")]
pub struct DecodeError {
    pub item_id: String,
    pub column_id: String,
    #[source]
    pub source: ResolveError,
}

/// Decode the column values of `items` using the board's `columns`.
///
/// # Arguments
/// * `columns` - Column metadata of the board the items belong to
/// * `items` - Items with raw column values
/// * `options` - Failure policy and dropdown rendering
///
/// # Returns
/// * `Decoded` - New items with display values, plus one diagnostic per raw value left
///   in place. Fails only under [`DecodePolicy::Strict`].
pub fn decode_column_values(
    columns: &[Column],
    items: &[Item],
    options: &DecodeOptions,
) -> Result<Decoded, DecodeError> {
    let column_map = ColumnMap::from_columns(columns);
    // Settings are parsed at most once per column.
    let mut settings: HashMap<&str, Result<Option<LabelSettings>, ResolveError>> = HashMap::new();
    let mut decoded = Decoded {
        items: Vec::with_capacity(items.len()),
        diagnostics: Vec::new(),
    };

    for item in items {
        let mut column_values = Vec::with_capacity(item.column_values.len());

        for value in &item.column_values {
            let Some(column) = column_map.get(&value.id) else {
                decoded.diagnostics.push(Diagnostic {
                    item_id: item.id.clone(),
                    column_id: value.id.clone(),
                    problem: Problem::UnknownColumn,
                });
                column_values.push(value.clone());
                continue;
            };

            let mut output = ColumnValue {
                id: value.id.clone(),
                title: column.title.clone(),
                value: value.value.clone(),
                column_type: column.column_type.clone(),
            };

            if column.column_type.has_labels() && !is_unset(&value.value) {
                let labels = settings
                    .entry(column.id.as_str())
                    .or_insert_with(|| LabelSettings::parse(&column.column_type, &column.settings));

                let resolved = match labels {
                    Ok(Some(labels)) => labels
                        .resolve(&value.value)
                        .map(|r| Some(r.join(&options.dropdown_separator))),
                    Ok(None) => Ok(None),
                    Err(e) => Err(e.clone()),
                };

                match resolved {
                    Ok(Some(display)) => output.value = display,
                    Ok(None) => {}
                    Err(source) => match options.policy {
                        DecodePolicy::Strict => {
                            return Err(DecodeError {
                                item_id: item.id.clone(),
                                column_id: value.id.clone(),
                                source,
                            })
                        }
                        DecodePolicy::Lenient => decoded.diagnostics.push(Diagnostic {
                            item_id: item.id.clone(),
                            column_id: value.id.clone(),
                            problem: Problem::Unresolved(source),
                        }),
                    },
                }
            }

            column_values.push(output);
        }

        decoded.items.push(Item {
            id: item.id.clone(),
            name: item.name.clone(),
            group: item.group.clone(),
            column_values,
            assets: item.assets.clone(),
        });
    }

    Ok(decoded)
}

/// A column with no selection comes back as an empty or null value.
fn is_unset(raw_value: &str) -> bool {
    let trimmed = raw_value.trim();
    trimmed.is_empty() || trimmed == "null"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Asset, Board, ColumnType, Group};

    const ESTADO_SETTINGS: &str = r##"{"done_colors":[1],"color_mapping":{"0":1,"1":106,"2":0,"6":15,"9":2,"15":160,"106":6,"108":9,"160":108},"labels":{"0":"Disponible","1":"Escriturado","2":"Bloqueado","3":"Proceso de escrituración","160":"Apartado"},"labels_positions_v2":{"0":0,"1":4,"2":1,"3":3,"5":5,"160":2},"labels_colors":{"0":{"color":"#00c875","border":"#00B461","var_name":"green-shadow"},"1":{"color":"#68a1bd","border":"#68a1bd","var_name":"river"}}}"##;

    fn column(id: &str, title: &str, column_type: ColumnType, settings: &str) -> Column {
        Column {
            id: id.to_string(),
            title: title.to_string(),
            column_type,
            settings: settings.to_string(),
        }
    }

    fn raw_value(id: &str, value: &str) -> ColumnValue {
        ColumnValue {
            id: id.to_string(),
            title: String::new(),
            value: value.to_string(),
            column_type: ColumnType::default(),
        }
    }

    fn item(id: &str, values: Vec<ColumnValue>) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {id}"),
            group: None,
            column_values: values,
            assets: vec![],
        }
    }

    fn board() -> Board {
        Board {
            id: "1234567890".to_string(),
            name: "Board1".to_string(),
            columns: vec![
                column("estado2", "Estado", ColumnType::COLOR, ESTADO_SETTINGS),
                column(
                    "tags",
                    "Tags",
                    ColumnType::DROPDOWN,
                    r#"{"labels":[{"id":12,"name":"Alpha"},{"id":34,"name":"Beta"}]}"#,
                ),
                column("text", "Notes", ColumnType::TEXT, ""),
            ],
        }
    }

    #[test]
    fn test_decode_status_end_to_end() {
        // Arrange: the board and item the service would return
        let items = vec![Item {
            id: "1234567890".to_string(),
            name: "Item1".to_string(),
            group: None,
            column_values: vec![ColumnValue {
                id: "estado2".to_string(),
                title: "Estado".to_string(),
                value: r#"{"index":0,"post_id":null,"changed_at":"2018-07-30T06:27:05.982Z"}"#
                    .to_string(),
                column_type: ColumnType::COLOR,
            }],
            assets: vec![Asset {
                public_url: "https://source.unsplash.com/random/150x150".to_string(),
                ..Asset::default()
            }],
        }];

        // Act
        let decoded =
            decode_column_values(&board().columns, &items, &DecodeOptions::default()).unwrap();

        // Assert
        let expected = vec![Item {
            id: "1234567890".to_string(),
            name: "Item1".to_string(),
            group: None,
            column_values: vec![ColumnValue {
                id: "estado2".to_string(),
                title: "Estado".to_string(),
                value: "Disponible".to_string(),
                column_type: ColumnType::COLOR,
            }],
            assets: vec![Asset {
                public_url: "https://source.unsplash.com/random/150x150".to_string(),
                ..Asset::default()
            }],
        }];
        assert_eq!(decoded.items, expected);
        assert!(decoded.is_clean());
    }

    #[test]
    fn test_decode_dropdown_joins_labels() {
        // Arrange
        let items = vec![item("1", vec![raw_value("tags", r#"{"ids":[34,12]}"#)])];
        let options = DecodeOptions {
            dropdown_separator: " | ".to_string(),
            ..DecodeOptions::default()
        };

        // Act
        let decoded = decode_column_values(&board().columns, &items, &options).unwrap();

        // Assert
        assert_eq!(decoded.items[0].column_values[0].value, "Beta | Alpha");
        assert_eq!(decoded.items[0].column_values[0].title, "Tags");
    }

    #[test]
    fn test_decode_unknown_column_passes_through() {
        // Arrange: a value for a column the board no longer has
        let original = raw_value("deleted_col", r#"{"index":3}"#);
        let items = vec![item("1", vec![original.clone()])];

        // Act
        let decoded =
            decode_column_values(&board().columns, &items, &DecodeOptions::strict()).unwrap();

        // Assert: untouched and reported, even in strict mode
        assert_eq!(decoded.items[0].column_values[0], original);
        assert_eq!(
            decoded.diagnostic("1", "deleted_col").map(|d| &d.problem),
            Some(&Problem::UnknownColumn)
        );
    }

    #[test]
    fn test_decode_preserves_order() {
        // Arrange
        let items = vec![
            item(
                "A",
                vec![
                    raw_value("text", "\"first\""),
                    raw_value("estado2", r#"{"index":1}"#),
                ],
            ),
            item(
                "B",
                vec![
                    raw_value("text", "\"second\""),
                    raw_value("estado2", r#"{"index":2}"#),
                ],
            ),
        ];

        // Act
        let decoded =
            decode_column_values(&board().columns, &items, &DecodeOptions::default()).unwrap();

        // Assert
        let ids: Vec<&str> = decoded.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        for decoded_item in &decoded.items {
            let columns: Vec<&str> = decoded_item
                .column_values
                .iter()
                .map(|v| v.id.as_str())
                .collect();
            assert_eq!(columns, vec!["text", "estado2"]);
        }
        assert_eq!(decoded.items[0].column_values[1].value, "Escriturado");
        assert_eq!(decoded.items[1].column_values[1].value, "Bloqueado");
    }

    #[test]
    fn test_decode_other_types_copy_raw_value_and_take_column_title() {
        // Arrange
        let mut value = raw_value("text", "\"have a nice day\"");
        value.title = "Stale title".to_string();
        let items = vec![item("1", vec![value])];

        // Act
        let decoded =
            decode_column_values(&board().columns, &items, &DecodeOptions::default()).unwrap();

        // Assert
        let decoded_value = &decoded.items[0].column_values[0];
        assert_eq!(decoded_value.value, "\"have a nice day\"");
        assert_eq!(decoded_value.title, "Notes");
        assert_eq!(decoded_value.column_type, ColumnType::TEXT);
    }

    #[test]
    fn test_decode_lenient_isolates_failures() {
        // Arrange: a missing label in the first item must not stop the second
        let items = vec![
            item("1", vec![raw_value("estado2", r#"{"index":5}"#)]),
            item("2", vec![raw_value("estado2", r#"{"index":160}"#)]),
        ];

        // Act
        let decoded =
            decode_column_values(&board().columns, &items, &DecodeOptions::default()).unwrap();

        // Assert
        assert_eq!(decoded.items[0].column_values[0].value, r#"{"index":5}"#);
        assert_eq!(decoded.items[1].column_values[0].value, "Apartado");
        assert_eq!(decoded.diagnostics.len(), 1);
        assert!(matches!(
            decoded.diagnostics[0].problem,
            Problem::Unresolved(ResolveError::LabelNotFound { .. })
        ));
    }

    #[test]
    fn test_decode_strict_fails_on_missing_label() {
        let items = vec![item("1", vec![raw_value("estado2", r#"{"index":5}"#)])];

        let err =
            decode_column_values(&board().columns, &items, &DecodeOptions::strict()).unwrap_err();

        assert_eq!(err.item_id, "1");
        assert_eq!(err.column_id, "estado2");
        assert!(matches!(err.source, ResolveError::LabelNotFound { .. }));
    }

    #[test]
    fn test_decode_corrupt_settings_reported_per_value() {
        // Arrange
        let columns = vec![column("status", "Status", ColumnType::COLOR, "{broken")];
        let items = vec![
            item("1", vec![raw_value("status", r#"{"index":0}"#)]),
            item("2", vec![raw_value("status", r#"{"index":1}"#)]),
        ];

        // Act
        let decoded = decode_column_values(&columns, &items, &DecodeOptions::default()).unwrap();

        // Assert
        assert_eq!(decoded.diagnostics.len(), 2);
        assert!(decoded.diagnostics.iter().all(|d| matches!(
            d.problem,
            Problem::Unresolved(ResolveError::MetadataCorrupt { .. })
        )));
    }

    #[test]
    fn test_decode_unset_values_are_left_alone() {
        let items = vec![item(
            "1",
            vec![raw_value("estado2", ""), raw_value("tags", "null")],
        )];

        let decoded =
            decode_column_values(&board().columns, &items, &DecodeOptions::strict()).unwrap();

        assert_eq!(decoded.items[0].column_values[0].value, "");
        assert_eq!(decoded.items[0].column_values[1].value, "null");
        assert!(decoded.is_clean());
    }

    #[test]
    fn test_decode_does_not_mutate_inputs() {
        // Arrange
        let board = board();
        let mut original = item("1", vec![raw_value("estado2", r#"{"index":0}"#)]);
        original.group = Some(Group {
            id: "topics".to_string(),
            title: "Topics".to_string(),
        });
        let items = vec![original];
        let snapshot = items.clone();

        // Act
        let decoded =
            decode_column_values(&board.columns, &items, &DecodeOptions::default()).unwrap();

        // Assert
        assert_eq!(items, snapshot);
        assert_eq!(decoded.items[0].group, snapshot[0].group);
        assert_eq!(decoded.items[0].column_values[0].value, "Disponible");
    }

    #[test]
    fn test_decode_empty_items() {
        let decoded = decode_column_values(&board().columns, &[], &DecodeOptions::default())
            .unwrap();

        assert!(decoded.items.is_empty());
        assert!(decoded.is_clean());
    }
}
