//! Request/response client for the monday v2 API
//!
//! Each method binds the variables of one fixed GraphQL document, sends it through the
//! matching transport and unmarshals the typed result. Writes are single remote calls:
//! calling `add_item` twice creates two items.

use monday_core::{Board, ColumnValues, Item};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::config::MondayConfig;
use crate::error::{Error, Result};
use crate::queries;
use crate::transport::{FileUpload, GraphqlRequest, HttpTransport, Transport};

/// monday API client
///
/// Holds two transports: `api` for JSON calls and `files` for multipart uploads. The
/// client has no other state and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    api: T,
    files: T,
}

impl Client<HttpTransport> {
    /// Builds the reqwest transports for `config`.
    pub fn new(config: &MondayConfig) -> Result<Self> {
        Ok(Self {
            api: HttpTransport::json(&config.api_url, &config.api_token)?,
            files: HttpTransport::multipart(&config.file_url, &config.api_token)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Id {
    id: String,
}

#[derive(Debug, Deserialize)]
struct BoardsResponse<B> {
    boards: Vec<B>,
}

#[derive(Debug, Deserialize)]
struct BoardItems {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct ItemsByColumnValuesResponse {
    items_by_column_values: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct CreateItemResponse {
    create_item: Id,
}

#[derive(Debug, Deserialize)]
struct CreateSubitemResponse {
    create_subitem: Id,
}

#[derive(Debug, Deserialize)]
struct CreateUpdateResponse {
    #[allow(dead_code)]
    create_update: Id,
}

#[derive(Debug, Deserialize)]
struct ChangeMultipleColumnValuesResponse {
    change_multiple_column_values: Id,
}

#[derive(Debug, Deserialize)]
struct DeleteItemResponse {
    delete_item: Id,
}

#[derive(Debug, Deserialize)]
struct AddFileToColumnResponse {
    add_file_to_column: Id,
}

impl<T: Transport> Client<T> {
    /// Uses the given transports instead of reqwest.
    pub fn with_transports(api: T, files: T) -> Self {
        Self { api, files }
    }

    pub fn api_transport(&self) -> &T {
        &self.api
    }

    pub fn files_transport(&self) -> &T {
        &self.files
    }

    async fn run<R: DeserializeOwned>(&self, request: GraphqlRequest) -> Result<R> {
        Self::unmarshal(self.api.execute(request).await?)
    }

    async fn run_with_file<R: DeserializeOwned>(&self, request: GraphqlRequest) -> Result<R> {
        Self::unmarshal(self.files.execute(request).await?)
    }

    fn unmarshal<R: DeserializeOwned>(data: serde_json::Value) -> Result<R> {
        serde_json::from_value(data)
            .map_err(|e| Error::UnexpectedResponse(format!("Failed to parse response: {e}")))
    }

    /// All boards (id and name only).
    pub async fn get_boards(&self) -> Result<Vec<Board>> {
        let request = GraphqlRequest::new("get_boards", queries::GET_BOARDS);
        let response: BoardsResponse<Board> = self.run(request).await?;
        Ok(response.boards)
    }

    /// One board with its column metadata.
    pub async fn get_board(&self, board_id: u64) -> Result<Board> {
        let request =
            GraphqlRequest::new("get_board", queries::GET_BOARD).var("boardID", json!([board_id]));
        let response: BoardsResponse<Board> = self.run(request).await?;

        response
            .boards
            .into_iter()
            .next()
            .ok_or(Error::BoardNotFound(board_id))
    }

    /// Items of a board whose column `column_id` has the value `column_value`.
    pub async fn get_items_by_column_values(
        &self,
        board_id: u64,
        column_id: &str,
        column_value: &str,
    ) -> Result<Vec<Item>> {
        let request = GraphqlRequest::new("items_by_column_values", queries::ITEMS_BY_COLUMN_VALUES)
            .var("boardID", board_id)
            .var("columnID", column_id)
            .var("columnValue", column_value);
        let response: ItemsByColumnValuesResponse = self.run(request).await?;
        Ok(response.items_by_column_values)
    }

    /// Creates an item and returns its id.
    pub async fn add_item(
        &self,
        board_id: u64,
        item_name: &str,
        column_values: Option<&ColumnValues>,
    ) -> Result<String> {
        let request = match column_values {
            None => GraphqlRequest::new("create_item", queries::CREATE_ITEM),
            Some(values) => GraphqlRequest::new("create_item", queries::CREATE_ITEM_WITH_VALUES)
                .var("colValues", values.to_json_string()?),
        }
        .var("boardID", board_id)
        .var("itemName", item_name);

        let response: CreateItemResponse = self.run(request).await?;
        Ok(response.create_item.id)
    }

    /// Creates a subitem under `parent_item_id` and returns its id.
    pub async fn add_subitem(
        &self,
        parent_item_id: u64,
        item_name: &str,
        column_values: &ColumnValues,
    ) -> Result<String> {
        let request = GraphqlRequest::new("create_subitem", queries::CREATE_SUBITEM)
            .var("parentItemID", parent_item_id)
            .var("itemName", item_name)
            .var("columnValues", column_values.to_json_string()?);

        let response: CreateSubitemResponse = self.run(request).await?;
        Ok(response.create_subitem.id)
    }

    /// Posts an update (comment) on an item.
    ///
    /// `item_id` must be numeric; anything else fails before a request is made.
    pub async fn add_item_update(&self, item_id: &str, body: &str) -> Result<()> {
        let item_id: u64 = item_id
            .trim()
            .parse()
            .map_err(|_| Error::InvalidItemId(item_id.to_string()))?;

        let request = GraphqlRequest::new("create_update", queries::CREATE_UPDATE)
            .var("itemID", item_id)
            .var("body", body);

        let _: CreateUpdateResponse = self.run(request).await?;
        Ok(())
    }

    /// Every item of a board, with its group.
    pub async fn get_items(&self, board_id: u64) -> Result<Vec<Item>> {
        let request =
            GraphqlRequest::new("get_items", queries::GET_ITEMS).var("boardID", json!([board_id]));
        let response: BoardsResponse<BoardItems> = self.run(request).await?;

        response
            .boards
            .into_iter()
            .next()
            .map(|board| board.items)
            .ok_or(Error::BoardNotFound(board_id))
    }

    /// Writes several columns of an item at once. Returns the item id.
    pub async fn change_multiple_column_values(
        &self,
        board_id: u64,
        item_id: u64,
        column_values: &ColumnValues,
    ) -> Result<String> {
        let request = GraphqlRequest::new(
            "change_multiple_column_values",
            queries::CHANGE_MULTIPLE_COLUMN_VALUES,
        )
        .var("boardID", board_id)
        .var("itemID", item_id)
        .var("columnValues", column_values.to_json_string()?);

        let response: ChangeMultipleColumnValuesResponse = self.run(request).await?;
        Ok(response.change_multiple_column_values.id)
    }

    /// Deletes an item. Returns the deleted item's id.
    pub async fn delete_item(&self, item_id: u64) -> Result<String> {
        let request =
            GraphqlRequest::new("delete_item", queries::DELETE_ITEM).var("itemID", item_id);
        let response: DeleteItemResponse = self.run(request).await?;
        Ok(response.delete_item.id)
    }

    /// Uploads a file to a file column. Returns the new asset id.
    pub async fn add_file_to_column(
        &self,
        item_id: u64,
        column_id: &str,
        file: FileUpload,
    ) -> Result<String> {
        let request = GraphqlRequest::new("add_file_to_column", queries::ADD_FILE_TO_COLUMN)
            .var("itemID", item_id)
            .var("columnID", column_id)
            .file(file);

        let response: AddFileToColumnResponse = self.run_with_file(request).await?;
        Ok(response.add_file_to_column.id)
    }
}
