//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every knowledge-base operation, whatever the UI.
//!
//! It dispatches to the right command, normalizes inputs (raw id strings,
//! tag lists) and returns structured [`CmdResult`] values. It holds no
//! business logic and performs no terminal I/O.
//!
//! `KbApi<S: PostStore>` is generic over the storage backend, so the same
//! facade serves the CLI (`KbApi<FileStore>`) and any other client.

use crate::commands;
use crate::config::SortOrder;
use crate::error::Result;
use crate::filter::ListOptions;
use crate::store::PostStore;

pub struct KbApi<S: PostStore> {
    store: S,
    paths: commands::KbPaths,
}

impl<S: PostStore> KbApi<S> {
    pub fn new(store: S, paths: commands::KbPaths) -> Self {
        Self { store, paths }
    }

    pub fn create_post(
        &self,
        title: String,
        content: String,
        tags: Vec<String>,
    ) -> Result<CmdResult> {
        commands::create::run(&self.store, title, content, tags)
    }

    pub fn get_posts<I: AsRef<str>>(&self, ids: &[I]) -> Result<CmdResult> {
        commands::get::run(&self.store, ids)
    }

    pub fn list_posts(&self, options: &ListOptions, sort: SortOrder) -> Result<CmdResult> {
        commands::list::run(&self.store, options, sort)
    }

    pub fn update_post(&self, update: &PostUpdate) -> Result<CmdResult> {
        commands::update::run(&self.store, update)
    }

    pub fn list_tags(&self, ignore_functional: bool) -> Result<CmdResult> {
        commands::tags::run(&self.store, ignore_functional)
    }

    pub fn folder_tree(&self) -> Result<CmdResult> {
        commands::tree::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::KbPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, KbPaths, MessageLevel, PostUpdate};
