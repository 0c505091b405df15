//! Domain model for monday boards, items and column values
//!
//! These types mirror the shapes returned by the monday v2 GraphQL API. Fields that a
//! particular query does not request default to empty values so one set of types
//! serves every operation.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

/// A monday board
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    /// Builds an id-indexed view over this board's columns.
    pub fn column_map(&self) -> ColumnMap<'_> {
        ColumnMap::from_columns(&self.columns)
    }
}

/// A monday group (a section of a board)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Column kinds the translation layer tells apart
///
/// Only the kinds that can be built or resolved get their own variant. Every other tag
/// is [`ColumnKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Text,
    Checkbox,
    /// Status columns.
    Color,
    Dropdown,
    Date,
    People,
    BoardRelation,
    Country,
    Other,
}

/// Column type tag
///
/// Keeps the tag exactly as the API spelled it ("status" and "color" are both status
/// columns) so it serializes back unchanged. Equality compares the kind, and the text
/// only for [`ColumnKind::Other`].
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(from = "String", into = "String")]
pub struct ColumnType {
    kind: ColumnKind,
    tag: Cow<'static, str>,
}

impl ColumnType {
    pub const TEXT: Self = Self::known(ColumnKind::Text, "text");
    pub const CHECKBOX: Self = Self::known(ColumnKind::Checkbox, "boolean");
    pub const COLOR: Self = Self::known(ColumnKind::Color, "color");
    pub const DROPDOWN: Self = Self::known(ColumnKind::Dropdown, "dropdown");
    pub const DATE: Self = Self::known(ColumnKind::Date, "date");
    pub const PEOPLE: Self = Self::known(ColumnKind::People, "multiple-person");
    pub const BOARD_RELATION: Self = Self::known(ColumnKind::BoardRelation, "board-relation");
    pub const COUNTRY: Self = Self::known(ColumnKind::Country, "country");

    const fn known(kind: ColumnKind, tag: &'static str) -> Self {
        Self {
            kind,
            tag: Cow::Borrowed(tag),
        }
    }

    /// Parses a wire type tag.
    pub fn from_tag(tag: &str) -> Self {
        let kind = match tag {
            "text" => ColumnKind::Text,
            "boolean" | "checkbox" => ColumnKind::Checkbox,
            "color" | "status" => ColumnKind::Color,
            "dropdown" => ColumnKind::Dropdown,
            "date" => ColumnKind::Date,
            "multiple-person" | "people" => ColumnKind::People,
            "board-relation" | "board_relation" => ColumnKind::BoardRelation,
            "country" => ColumnKind::Country,
            _ => ColumnKind::Other,
        };

        Self {
            kind,
            tag: Cow::Owned(tag.to_string()),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// The tag as the API spelled it.
    pub fn as_tag(&self) -> &str {
        &self.tag
    }

    /// Whether values of this type are indexes into label metadata.
    pub fn has_labels(&self) -> bool {
        matches!(self.kind, ColumnKind::Color | ColumnKind::Dropdown)
    }
}

impl PartialEq for ColumnType {
    fn eq(&self, other: &Self) -> bool {
        match (self.kind, other.kind) {
            (ColumnKind::Other, ColumnKind::Other) => self.tag == other.tag,
            (a, b) => a == b,
        }
    }
}

impl Eq for ColumnType {}

impl Hash for ColumnType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        if self.kind == ColumnKind::Other {
            self.tag.hash(state);
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        Self::known(ColumnKind::Other, "")
    }
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        ColumnType::from_tag(&tag)
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.tag.into_owned()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A column definition on a board
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// JSON-encoded settings. Shape depends on `column_type`.
    #[serde(rename = "settings_str", default)]
    pub settings: String,
}

/// The value of one column for one item
///
/// `value` holds the raw JSON encoding as returned by the API, or the display value
/// once the item went through [`crate::decode`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ColumnValue {
    /// Column id
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
}

/// A monday user
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// A file attached to an item
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub original_geometry: String,
    pub created_at: String,
    pub public_url: String,
    pub url: String,
    pub url_thumbnail: String,
    pub file_extension: String,
    #[serde(deserialize_with = "string_or_number")]
    pub file_size: String,
    pub uploaded_by: User,
}

/// An item (row) of a board
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Id-indexed lookup over a board's columns
///
/// Borrowed from the column slice it was built from and never outlives it.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap<'a> {
    columns: HashMap<&'a str, &'a Column>,
}

impl<'a> ColumnMap<'a> {
    pub fn from_columns(columns: &'a [Column]) -> Self {
        Self {
            columns: columns.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    pub fn get(&self, column_id: &str) -> Option<&'a Column> {
        self.columns.get(column_id).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}
