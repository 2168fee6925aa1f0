//! # Storage Layer
//!
//! This module defines the storage abstraction for the knowledge base. The
//! [`PostStore`] trait is what the command layer talks to; [`fs::FileStore`] is
//! the production implementation.
//!
//! ## Storage Format
//!
//! ```text
//! posts/
//! ├── 0190f1a2b3c47d8e9f00112233445566.json   # one post per file
//! ├── 0190f1a2c0117a40b2e5d0c3f7a1b9e2.json
//! └── .0190f1a2c0117a40….tmp                  # in-flight write, ignored
//! ```
//!
//! Each file holds one JSON object with `id`, `title`, `content`, `tags`,
//! `createdTime` and `modifiedTime`. The file name is the id.
//!
//! ## Guarantees
//!
//! - **One write per change**: `create` and `update` each write exactly one
//!   file, through a temp file and an atomic rename, so readers never see a
//!   half-written post.
//! - **All-or-nothing reads**: `list` fails as a whole if any entry is
//!   unreadable. Corruption is surfaced, never skipped.
//! - **Stable order**: `list` returns posts sorted by id, which is creation order.
//!
//! ## Concurrency
//!
//! Stores hold no mutable state and take no locks. Two concurrent updates of
//! the same post race at the filesystem level and the last rename wins; there is
//! no compare-and-swap. Callers that need caching or deadlines wrap the store.

use crate::error::Result;
use crate::filter::ListOptions;
use crate::id::PostId;
use crate::model::Post;

pub mod fs;

/// Abstract interface for post storage.
pub trait PostStore {
    /// Get a post by id.
    fn get(&self, id: &PostId) -> Result<Post>;

    /// List posts matching `options`, sorted by id.
    fn list(&self, options: &ListOptions) -> Result<Vec<Post>>;

    /// Store a new post. The id and both timestamps are assigned here; any
    /// values already on `post` are ignored.
    fn create(&self, post: Post) -> Result<Post>;

    /// Overwrite an existing post, bumping its modified time. Fails with
    /// `NotFound` (and writes nothing) if the id is unknown.
    fn update(&self, post: Post) -> Result<Post>;
}
