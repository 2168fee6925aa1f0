use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable naming the data directory when `--root` is absent.
pub const ROOT_ENV: &str = "KBASE_ROOT";

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "kbase", bin_name = "kbase", version = get_version())]
#[command(about = "Personal knowledge base of tagged markdown posts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $KBASE_ROOT, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new post
    #[command(alias = "n", display_order = 1)]
    Create {
        /// Post title
        title: String,

        /// Markdown content (read from stdin when omitted and piped)
        content: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// List posts
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Case-insensitive search over title and content
        #[arg(short, long)]
        search: Option<String>,

        /// Only posts carrying at least one of these tags (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// View one or more posts in full
    #[command(alias = "v", display_order = 3)]
    View {
        /// Post ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Change a post's title, content or tags
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Post id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Tag to remove (repeatable)
        #[arg(short, long = "remove-tag", value_name = "TAG")]
        remove_tags: Vec<String>,

        /// Drop every existing tag before adding new ones
        #[arg(long)]
        clear_tags: bool,
    },

    /// List distinct tags
    #[command(display_order = 5)]
    Tags {
        /// Include functional (`_`-prefixed) tags
        #[arg(short, long)]
        all: bool,
    },

    /// Show posts as folders derived from `_dir:` tags
    #[command(display_order = 6)]
    Tree,

    /// Get or set configuration
    #[command(display_order = 7)]
    Config {
        /// Configuration key (sort, pretty-json, show-functional-tags)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
