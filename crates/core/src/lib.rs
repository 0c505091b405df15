//! Core library for the monday client
//!
//! This crate implements the **Functional Core** of the monday client,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`monday_core`** (this crate): Pure column-value translation with zero I/O
//! - **`monday`**: GraphQL transport, request construction and the service facade
//!
//! All functions in this crate are pure: same input, same output, no network and
//! no hidden state. Everything can be tested with fixture data.
//!
//! # Module Organization
//!
//! - [`model`]: Boards, columns, items and the raw column values the API returns
//! - [`values`]: Builders for the payload fragments written to typed columns
//! - [`labels`]: Resolution of status indexes and dropdown ids into labels
//! - [`decode`]: Turns raw items into display-ready items using board metadata
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use monday_core::decode::{decode_column_values, DecodeOptions};
//!
//! let decoded = decode_column_values(&board.columns, &items, &DecodeOptions::default())?;
//!
//! for item in &decoded.items {
//!     for value in &item.column_values {
//!         println!("{}: {}", value.title, value.value);
//!     }
//! }
//! ```

pub mod decode;
pub mod labels;
pub mod model;
pub mod values;

pub use decode::{decode_column_values, DecodeError, DecodeOptions, DecodePolicy, Decoded};
pub use labels::{resolve_dropdown, resolve_label, LabelSettings, Resolved, ResolveError};
pub use model::{Asset, Board, Column, ColumnKind, ColumnMap, ColumnType, ColumnValue, Group, Item, User};
pub use values::{ColumnInput, ColumnValues};
