//! Builders for column write payloads
//!
//! Each typed column expects its own JSON shape in `create_item`,
//! `create_subitem` and `change_multiple_column_values`. The builders here produce
//! those fragments from native inputs, and [`ColumnValues`] collects them into the
//! per-column mapping the mutations take.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Date column payload
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DateTime {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Status column payload
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndex {
    pub index: u32,
}

/// Checkbox column payload
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub checked: String,
}

/// Kind of a people column entry
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    Person,
    Team,
}

/// One person or team reference
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PersonTeam {
    pub id: u64,
    pub kind: PersonKind,
}

/// People column payload
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct People {
    #[serde(rename = "personsAndTeams")]
    pub persons_and_teams: Vec<PersonTeam>,
}

/// Connect-boards column payload
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct ItemLinks {
    pub item_ids: Vec<u64>,
}

/// Country column payload
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Country {
    #[serde(rename = "countryCode")]
    pub country_code: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
}

/// Date only.
pub fn build_date(date: NaiveDate) -> DateTime {
    DateTime {
        date: date.format("%Y-%m-%d").to_string(),
        time: None,
    }
}

/// Date and time of day.
pub fn build_date_time(date: NaiveDate, time: NaiveTime) -> DateTime {
    DateTime {
        date: date.format("%Y-%m-%d").to_string(),
        time: Some(time.format("%H:%M:%S").to_string()),
    }
}

/// Selects a status label by its index. The service maps the index through the
/// column's own settings, so no metadata is needed here.
pub fn build_status_index(index: u32) -> StatusIndex {
    StatusIndex { index }
}

/// The mutation endpoint only accepts the checked flag as a string.
pub fn build_checkbox(checked: bool) -> Checkbox {
    Checkbox {
        checked: checked.to_string(),
    }
}

/// People references from user ids. Every entry is a person.
pub fn build_people(user_ids: impl IntoIterator<Item = u64>) -> People {
    People {
        persons_and_teams: user_ids
            .into_iter()
            .map(|id| PersonTeam {
                id,
                kind: PersonKind::Person,
            })
            .collect(),
    }
}

/// Links to items on a connected board.
pub fn build_item_links(item_ids: impl IntoIterator<Item = u64>) -> ItemLinks {
    ItemLinks {
        item_ids: item_ids.into_iter().collect(),
    }
}

pub fn build_country(code: impl Into<String>, name: impl Into<String>) -> Country {
    Country {
        country_code: code.into(),
        country_name: name.into(),
    }
}

/// A value written to a single column
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColumnInput {
    Text(String),
    Date(DateTime),
    Status(StatusIndex),
    People(People),
    Checkbox(Checkbox),
    ConnectBoards(ItemLinks),
    Country(Country),
    /// Any column type without a dedicated variant. Sent verbatim.
    Raw(serde_json::Value),
}

/// Column id to value mapping for write operations
///
/// ```rust,ignore
/// let values = ColumnValues::new()
///     .text("text", "have a nice day")
///     .date("date", build_date(NaiveDate::from_ymd_opt(2019, 5, 22).unwrap()))
///     .status("status", build_status_index(2))
///     .people("people", build_people([123456, 987654]));
/// ```
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct ColumnValues(BTreeMap<String, ColumnInput>);

impl ColumnValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a column, replacing any previous one.
    pub fn set(mut self, column_id: impl Into<String>, input: ColumnInput) -> Self {
        self.0.insert(column_id.into(), input);
        self
    }

    pub fn text(self, column_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(column_id, ColumnInput::Text(text.into()))
    }

    pub fn date(self, column_id: impl Into<String>, date: DateTime) -> Self {
        self.set(column_id, ColumnInput::Date(date))
    }

    pub fn status(self, column_id: impl Into<String>, status: StatusIndex) -> Self {
        self.set(column_id, ColumnInput::Status(status))
    }

    pub fn people(self, column_id: impl Into<String>, people: People) -> Self {
        self.set(column_id, ColumnInput::People(people))
    }

    pub fn checkbox(self, column_id: impl Into<String>, checkbox: Checkbox) -> Self {
        self.set(column_id, ColumnInput::Checkbox(checkbox))
    }

    pub fn connect_boards(self, column_id: impl Into<String>, links: ItemLinks) -> Self {
        self.set(column_id, ColumnInput::ConnectBoards(links))
    }

    pub fn country(self, column_id: impl Into<String>, country: Country) -> Self {
        self.set(column_id, ColumnInput::Country(country))
    }

    pub fn raw(self, column_id: impl Into<String>, value: serde_json::Value) -> Self {
        self.set(column_id, ColumnInput::Raw(value))
    }

    pub fn get(&self, column_id: &str) -> Option<&ColumnInput> {
        self.0.get(column_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the mapping as the JSON string bound to the `JSON!` mutation variable.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromIterator<(String, ColumnInput)> for ColumnValues {
    fn from_iter<I: IntoIterator<Item = (String, ColumnInput)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
