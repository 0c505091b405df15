//! monday.com GraphQL client
//!
//! This crate is the **Imperative Shell** of the monday client. It owns every side
//! effect: credentials, HTTP transport, GraphQL documents and the service facade.
//! Column-value translation lives in [`monday_core`].
//!
//! # Module Organization
//!
//! - [`config`]: Endpoints and the API token
//! - [`transport`]: GraphQL envelope and the reqwest transports (JSON and multipart)
//! - [`queries`]: Fixed query and mutation documents
//! - [`client`]: One typed method per remote operation
//! - [`service`]: The [`Service`] facade, adding decoded reads on top of the client
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use monday::{DecodeOptions, Monday, Service};
//!
//! let monday = Monday::from_env()?;
//! let board = monday.get_board(1234567890).await?;
//! let decoded = monday
//!     .get_decoded_items_by_column_values(&board, "estado2", "Disponible", &DecodeOptions::default())
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod queries;
pub mod service;
pub mod transport;

pub use monday_core::{
    Board, Column, ColumnInput, ColumnKind, ColumnType, ColumnValue, ColumnValues, DecodeOptions,
    DecodePolicy, Decoded, Item, LabelSettings,
};

pub use client::Client;
pub use config::{ApiToken, MondayConfig};
pub use error::{Error, Result};
pub use service::{Monday, Service};
pub use transport::{FileUpload, GraphqlRequest, HttpTransport, Transport};
