//! Service facade
//!
//! [`Service`] is the public operation set. [`Monday`] implements it over a [`Client`]:
//! plain operations pass straight through, the decoded reads fetch items and run them
//! through [`monday_core::decode_column_values`] with the board's column metadata.

use std::future::Future;

use monday_core::{decode_column_values, Board, ColumnValues, DecodeOptions, Decoded, Item};

use crate::client::Client;
use crate::config::MondayConfig;
use crate::error::{Error, Result};
use crate::transport::{FileUpload, HttpTransport, Transport};

/// monday operations
pub trait Service: Send + Sync {
    fn get_boards(&self) -> impl Future<Output = Result<Vec<Board>>> + Send;

    /// One board with its columns.
    fn get_board(&self, board_id: u64) -> impl Future<Output = Result<Board>> + Send;

    fn get_items_by_column_values(
        &self,
        board_id: u64,
        column_id: &str,
        column_value: &str,
    ) -> impl Future<Output = Result<Vec<Item>>> + Send;

    /// Like [`Service::get_items_by_column_values`], with status and dropdown values
    /// replaced by their labels.
    ///
    /// `board` must carry its columns (see [`Service::get_board`]).
    fn get_decoded_items_by_column_values(
        &self,
        board: &Board,
        column_id: &str,
        column_value: &str,
        options: &DecodeOptions,
    ) -> impl Future<Output = Result<Decoded>> + Send;

    fn get_items(&self, board_id: u64) -> impl Future<Output = Result<Vec<Item>>> + Send;

    /// Every item of `board`, decoded.
    fn get_decoded_items(
        &self,
        board: &Board,
        options: &DecodeOptions,
    ) -> impl Future<Output = Result<Decoded>> + Send;

    fn add_item(
        &self,
        board_id: u64,
        item_name: &str,
        column_values: Option<&ColumnValues>,
    ) -> impl Future<Output = Result<String>> + Send;

    fn add_subitem(
        &self,
        parent_item_id: u64,
        item_name: &str,
        column_values: &ColumnValues,
    ) -> impl Future<Output = Result<String>> + Send;

    fn add_item_update(&self, item_id: &str, body: &str) -> impl Future<Output = Result<()>> + Send;

    fn change_multiple_column_values(
        &self,
        board_id: u64,
        item_id: u64,
        column_values: &ColumnValues,
    ) -> impl Future<Output = Result<String>> + Send;

    fn delete_item(&self, item_id: u64) -> impl Future<Output = Result<String>> + Send;

    fn add_file_to_column(
        &self,
        item_id: u64,
        column_id: &str,
        file: FileUpload,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone)]
pub struct Monday<T = HttpTransport> {
    client: Client<T>,
}

impl Monday<HttpTransport> {
    pub fn new(config: &MondayConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }

    /// Reads the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(&MondayConfig::from_env()?)
    }
}

impl<T: Transport> Monday<T> {
    pub fn with_client(client: Client<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client<T> {
        &self.client
    }
}

impl<T: Transport> Service for Monday<T> {
    async fn get_boards(&self) -> Result<Vec<Board>> {
        self.client.get_boards().await
    }

    async fn get_board(&self, board_id: u64) -> Result<Board> {
        self.client.get_board(board_id).await
    }

    async fn get_items_by_column_values(
        &self,
        board_id: u64,
        column_id: &str,
        column_value: &str,
    ) -> Result<Vec<Item>> {
        self.client
            .get_items_by_column_values(board_id, column_id, column_value)
            .await
    }

    async fn get_decoded_items_by_column_values(
        &self,
        board: &Board,
        column_id: &str,
        column_value: &str,
        options: &DecodeOptions,
    ) -> Result<Decoded> {
        let board_id = parse_board_id(board)?;
        let items = self
            .client
            .get_items_by_column_values(board_id, column_id, column_value)
            .await?;

        decode(board, &items, options)
    }

    async fn get_items(&self, board_id: u64) -> Result<Vec<Item>> {
        self.client.get_items(board_id).await
    }

    async fn get_decoded_items(&self, board: &Board, options: &DecodeOptions) -> Result<Decoded> {
        let board_id = parse_board_id(board)?;
        let items = self.client.get_items(board_id).await?;

        decode(board, &items, options)
    }

    async fn add_item(
        &self,
        board_id: u64,
        item_name: &str,
        column_values: Option<&ColumnValues>,
    ) -> Result<String> {
        self.client.add_item(board_id, item_name, column_values).await
    }

    async fn add_subitem(
        &self,
        parent_item_id: u64,
        item_name: &str,
        column_values: &ColumnValues,
    ) -> Result<String> {
        self.client
            .add_subitem(parent_item_id, item_name, column_values)
            .await
    }

    async fn add_item_update(&self, item_id: &str, body: &str) -> Result<()> {
        self.client.add_item_update(item_id, body).await
    }

    async fn change_multiple_column_values(
        &self,
        board_id: u64,
        item_id: u64,
        column_values: &ColumnValues,
    ) -> Result<String> {
        self.client
            .change_multiple_column_values(board_id, item_id, column_values)
            .await
    }

    async fn delete_item(&self, item_id: u64) -> Result<String> {
        self.client.delete_item(item_id).await
    }

    async fn add_file_to_column(
        &self,
        item_id: u64,
        column_id: &str,
        file: FileUpload,
    ) -> Result<String> {
        self.client.add_file_to_column(item_id, column_id, file).await
    }
}

fn parse_board_id(board: &Board) -> Result<u64> {
    board
        .id
        .trim()
        .parse()
        .map_err(|_| Error::InvalidBoardId(board.id.clone()))
}

fn decode(board: &Board, items: &[Item], options: &DecodeOptions) -> Result<Decoded> {
    let decoded = decode_column_values(&board.columns, items, options)?;

    if !decoded.is_clean() {
        log::debug!(
            "{} value(s) on board {} left undecoded",
            decoded.diagnostics.len(),
            board.id
        );
    }

    Ok(decoded)
}
