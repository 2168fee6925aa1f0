use crate::config::KbConfig;
use crate::id::PostId;
use crate::model::Post;
use crate::tree::PostTree;
use std::path::{Path, PathBuf};

pub mod config;
pub mod create;
pub mod get;
pub mod list;
pub mod tags;
pub mod tree;
pub mod update;

const POSTS_DIR: &str = "posts";

/// Where the knowledge base keeps its files.
#[derive(Debug, Clone)]
pub struct KbPaths {
    pub data_dir: PathBuf,
}

impl KbPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding one file per post.
    pub fn posts_dir(&self) -> PathBuf {
        self.data_dir.join(POSTS_DIR)
    }

    /// Directory holding `config.json`.
    pub fn config_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_posts: Vec<Post>,
    pub listed_posts: Vec<Post>,
    pub tags: Vec<String>,
    pub tree: Option<PostTree>,
    pub config: Option<KbConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_posts(mut self, posts: Vec<Post>) -> Self {
        self.affected_posts = posts;
        self
    }

    pub fn with_listed_posts(mut self, posts: Vec<Post>) -> Self {
        self.listed_posts = posts;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_tree(mut self, tree: PostTree) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn with_config(mut self, config: KbConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Changes to apply to one stored post. `None` fields are left alone.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
    pub clear_tags: bool,
}

impl PostUpdate {
    pub fn new(id: PostId) -> Self {
        Self {
            id,
            title: None,
            content: None,
            add_tags: Vec::new(),
            remove_tags: Vec::new(),
            clear_tags: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tags.push(tag.into());
        self
    }

    pub fn remove_tag(mut self, tag: impl Into<String>) -> Self {
        self.remove_tags.push(tag.into());
        self
    }

    pub fn clear_tags(mut self) -> Self {
        self.clear_tags = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.add_tags.is_empty()
            && self.remove_tags.is_empty()
            && !self.clear_tags
    }

    /// Applies the changes to `post`. Tags are cleared first, then removed,
    /// then added, so `--clear-tags -t x` leaves exactly `x`.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if self.clear_tags {
            post.tags.clear();
        }
        post.tags.retain(|t| !self.remove_tags.contains(t));
        for tag in &self.add_tags {
            if !post.tags.contains(tag) {
                post.tags.push(tag.clone());
            }
        }
    }
}
