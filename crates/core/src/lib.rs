//! Core library for locsearch
//!
//! This crate implements the **Functional Core** of the locsearch application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`locsearch_core`** (this crate): Pure transformation functions with zero I/O
//! - **`locsearch`**: HTTP, CLI and MCP orchestration (the Imperative Shell)
//!
//! Everything the shell decides on while searching the Library of Congress
//! catalog (which URL to request, when to stop paginating, how a record
//! becomes a table row, how stored parameters are upgraded) lives here and
//! is tested with fixture data, no mocking required.
//!
//! # Module Organization
//!
//! - [`categories`]: The versioned list of "part of" collections
//! - [`columns`]: Output column schema and per-field normalization
//! - [`table`]: Result tables built from API pages
//! - [`search`]: Request construction, response model and pagination policy
//! - [`params`]: Persisted parameters and their migration
//! - [`error`]: Recoverable search errors
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use locsearch_core::search::{transform_search_page, SearchPage};
//!
//! let page: SearchPage = serde_json::from_str(body)?;
//! let table = transform_search_page(&page);
//!
//! assert_eq!(table.columns.len(), 10);
//! ```

pub mod categories;
pub mod columns;
pub mod error;
pub mod params;
pub mod search;
pub mod table;

pub use error::SearchError;
pub use search::SearchOutcome;
pub use table::ResultTable;
