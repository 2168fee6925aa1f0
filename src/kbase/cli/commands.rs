//! # CLI Layer
//!
//! This module is **one possible UI client** for the knowledge base, not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdin, stdout, stderr)
//! - Initializes a logger for the `log` facade
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the data directory and builds `AppContext`
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::print::{
    print_config, print_full_posts, print_messages, print_posts, print_tags, print_tree,
};
use super::setup::{Cli, Commands, ROOT_ENV};
use clap::Parser;
use directories::ProjectDirs;
use kbase::api::{ConfigAction, KbApi, KbPaths, PostUpdate};
use kbase::config::KbConfig;
use kbase::error::{KbError, Result};
use kbase::filter::ListOptions;
use kbase::id::PostId;
use kbase::store::fs::FileStore;
use log::debug;
use std::ffi::OsString;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

struct AppContext {
    api: KbApi<FileStore>,
    config: KbConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Create {
            title,
            content,
            tags,
        }) => handle_create(&ctx, title, content, tags),
        Some(Commands::List { search, tags }) => handle_list(&ctx, search, tags),
        Some(Commands::View { ids }) => handle_view(&ctx, ids),
        Some(Commands::Edit {
            id,
            title,
            content,
            tags,
            remove_tags,
            clear_tags,
        }) => {
            let mut update = PostUpdate::new(id.parse::<PostId>()?);
            update.title = title;
            update.content = content;
            update.add_tags = tags;
            update.remove_tags = remove_tags;
            update.clear_tags = clear_tags;
            handle_edit(&ctx, update)
        }
        Some(Commands::Tags { all }) => handle_tags(&ctx, all),
        Some(Commands::Tree) => handle_tree(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None, Vec::new()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// `--root` wins over `$KBASE_ROOT`, which wins over the platform data dir.
fn resolve_data_dir(flag: Option<&Path>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "knowledge-base")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| KbError::Config("Could not determine a data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.root.as_deref(), std::env::var_os(ROOT_ENV))?;
    debug!("event=init data_dir={}", data_dir.display());

    let paths = KbPaths::new(data_dir);
    let config = KbConfig::load(paths.config_dir())?;
    let store = FileStore::new(paths.posts_dir()).with_pretty_json(config.pretty_json);

    Ok(AppContext {
        api: KbApi::new(store, paths),
        config,
    })
}

fn handle_create(
    ctx: &AppContext,
    title: String,
    content: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let content = match content {
        Some(c) => c,
        None => read_piped_stdin(),
    };

    let result = ctx.api.create_post(title, content, tags)?;
    print_messages(&result.messages);
    Ok(())
}

/// Piped stdin content, or empty when stdin is a terminal or blank.
fn read_piped_stdin() -> String {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return String::new();
    }
    let mut buffer = String::new();
    if stdin.read_to_string(&mut buffer).is_ok() && !buffer.trim().is_empty() {
        buffer
    } else {
        String::new()
    }
}

fn handle_list(ctx: &AppContext, search: Option<String>, tags: Vec<String>) -> Result<()> {
    let mut options = ListOptions::new();
    if let Some(term) = search {
        options = options.search(term);
    }
    if !tags.is_empty() {
        options = options.tags(tags);
    }

    let result = ctx.api.list_posts(&options, ctx.config.sort)?;
    print_posts(&result.listed_posts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.get_posts(&ids)?;
    print_full_posts(&result.listed_posts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &AppContext, update: PostUpdate) -> Result<()> {
    let result = ctx.api.update_post(&update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &AppContext, all: bool) -> Result<()> {
    let ignore_functional = !(all || ctx.config.show_functional_tags);
    let result = ctx.api.list_tags(ignore_functional)?;
    print_tags(&result.tags);
    print_messages(&result.messages);
    Ok(())
}

fn handle_tree(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.folder_tree()?;
    if let Some(tree) = &result.tree {
        print_tree(tree);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
