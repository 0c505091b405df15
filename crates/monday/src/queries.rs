//! GraphQL documents for the monday v2 API

pub const GET_BOARDS: &str = r#"
query {
  boards {
    id
    name
  }
}
"#;

pub const GET_BOARD: &str = r#"
query ($boardID: [Int]) {
  boards (ids: $boardID) {
    id
    name
    columns {
      id
      title
      type
      settings_str
    }
  }
}
"#;

pub const ITEMS_BY_COLUMN_VALUES: &str = r#"
query ($boardID: Int!, $columnID: String!, $columnValue: String!) {
  items_by_column_values (board_id: $boardID, column_id: $columnID, column_value: $columnValue) {
    id
    name
    column_values {
      id
      title
      value
      type
    }
    assets {
      id
      name
      original_geometry
      created_at
      public_url
      url
      url_thumbnail
      file_extension
      file_size
      uploaded_by {
        id
        email
      }
    }
  }
}
"#;

pub const GET_ITEMS: &str = r#"
query ($boardID: [Int]) {
  boards (ids: $boardID) {
    items {
      id
      name
      group {
        id
        title
      }
      column_values {
        id
        title
        value
        type
      }
    }
  }
}
"#;

pub const CREATE_ITEM: &str = r#"
mutation ($boardID: Int!, $itemName: String!) {
  create_item (board_id: $boardID, item_name: $itemName) {
    id
  }
}
"#;

pub const CREATE_ITEM_WITH_VALUES: &str = r#"
mutation ($boardID: Int!, $itemName: String!, $colValues: JSON!) {
  create_item (board_id: $boardID, item_name: $itemName, column_values: $colValues) {
    id
  }
}
"#;

pub const CREATE_SUBITEM: &str = r#"
mutation ($parentItemID: Int!, $itemName: String!, $columnValues: JSON!) {
  create_subitem (parent_item_id: $parentItemID, item_name: $itemName, column_values: $columnValues) {
    id
  }
}
"#;

pub const CREATE_UPDATE: &str = r#"
mutation ($itemID: Int!, $body: String!) {
  create_update (item_id: $itemID, body: $body) {
    id
  }
}
"#;

pub const CHANGE_MULTIPLE_COLUMN_VALUES: &str = r#"
mutation ($boardID: Int!, $itemID: Int!, $columnValues: JSON!) {
  change_multiple_column_values (item_id: $itemID, board_id: $boardID, column_values: $columnValues) {
    id
  }
}
"#;

pub const DELETE_ITEM: &str = r#"
mutation ($itemID: Int!) {
  delete_item (item_id: $itemID) {
    id
  }
}
"#;

pub const ADD_FILE_TO_COLUMN: &str = r#"
mutation ($itemID: Int!, $columnID: String!, $file: File!) {
  add_file_to_column (item_id: $itemID, column_id: $columnID, file: $file) {
    id
  }
}
"#;
