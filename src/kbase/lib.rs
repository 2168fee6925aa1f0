//! # Knowledge Base Architecture
//!
//! `kbase` is a **UI-agnostic personal knowledge base**: posts (a title, a
//! markdown body and a list of tags) stored as plain JSON files, searchable by
//! text and tag, and browsable as folders derived from `_dir:<path>` tags.
//! The `kbase` binary is one client of this library; a web front end would be
//! another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, sets up logging, prints results        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result<CmdResult> values              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation: create, get, list, update,     │
//! │    tags, tree, config                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store/, filter.rs, tags.rs, tree.rs, id.rs)          │
//! │  - PostStore trait + FileStore                              │
//! │  - Listing filters, tag taxonomy, folder tree, ids          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<T, KbError>`, never prints and never exits. Diagnostics go through
//! the `log` facade; the binary decides whether anything listens.
//!
//! ## Data Flow for the Folder View
//!
//! `store.list()` reads and filters every post → [`tags::group_by_directory`]
//! keys them by `_dir:` path → [`tree::build_tree`] turns the sorted keys into
//! a hierarchy.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and the file-backed implementation
//! - [`model`]: The `Post` record
//! - [`id`]: Time-sortable post identifiers
//! - [`filter`]: Search and tag filters for listings
//! - [`tags`]: Tag taxonomy (plain, functional, directory)
//! - [`tree`]: Arena-backed folder tree
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod id;
pub mod model;
pub mod store;
pub mod tags;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_utils;
