//! Tag taxonomy.
//!
//! Tags are free-form strings with two reserved conventions:
//!
//! - A tag starting with `_` is **functional**: it carries structure rather
//!   than user-facing categorization and is hidden from tag listings by default.
//! - A functional tag of the form `_dir:<path>` is a **directory** tag. It
//!   places the owning post at `<path>` in the folder view (see [`crate::tree`]).
//!   A post may carry several of them and then shows up in several folders.
//!
//! Posts keep their tags as plain strings on disk; [`Tag::parse`] is the only
//! place that interprets the prefixes.

use crate::model::Post;
use crate::tree::PATH_SEPARATOR;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const FUNCTIONAL_PREFIX: char = '_';
pub const DIRECTORY_KEY: &str = "_dir";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Plain(String),
    Functional(String),
    /// Directory placement, path stored without leading/trailing separators.
    Directory(String),
}

impl Tag {
    pub fn parse(raw: &str) -> Self {
        if !raw.starts_with(FUNCTIONAL_PREFIX) {
            return Tag::Plain(raw.to_string());
        }
        match raw.split_once(':') {
            Some((DIRECTORY_KEY, path)) => Tag::Directory(normalize_path(path).to_string()),
            _ => Tag::Functional(raw.to_string()),
        }
    }

    /// A tag pointing `path` in the folder view.
    pub fn directory(path: &str) -> Self {
        Tag::Directory(normalize_path(path).to_string())
    }

    pub fn is_functional(&self) -> bool {
        !matches!(self, Tag::Plain(_))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Plain(name) | Tag::Functional(name) => f.write_str(name),
            Tag::Directory(path) => write!(f, "{}:{}", DIRECTORY_KEY, path),
        }
    }
}

/// Strips leading and trailing separators from a folder path.
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches(|c| c == PATH_SEPARATOR)
}

/// Sorted, de-duplicated tags across `posts`.
pub fn list_tags(posts: &[Post], ignore_functional: bool) -> Vec<String> {
    let unique: BTreeSet<&str> = posts
        .iter()
        .flat_map(|p| p.tags.iter())
        .filter(|t| !(ignore_functional && Tag::parse(t).is_functional()))
        .map(String::as_str)
        .collect();
    unique.into_iter().map(str::to_string).collect()
}

/// Groups posts by the path of each of their directory tags.
///
/// Posts are appended in the order given, so a sorted listing yields sorted
/// folder contents. A post with no directory tag is left out.
pub fn group_by_directory(posts: Vec<Post>) -> BTreeMap<String, Vec<Post>> {
    let mut folders: BTreeMap<String, Vec<Post>> = BTreeMap::new();
    for post in posts {
        let dirs: BTreeSet<String> = post.directories().collect();
        for dir in dirs {
            folders.entry(dir).or_default().push(post.clone());
        }
    }
    folders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, tags: &[&str]) -> Post {
        Post::new(title, "", tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn parse_classifies_prefixes() {
        assert_eq!(Tag::parse("rust"), Tag::Plain("rust".into()));
        assert_eq!(Tag::parse("_draft"), Tag::Functional("_draft".into()));
        assert_eq!(Tag::parse("_dir:/foo/bar/"), Tag::Directory("foo/bar".into()));
        assert_eq!(Tag::parse("_dirt:foo"), Tag::Functional("_dirt:foo".into()));
        assert_eq!(Tag::parse("dir:foo"), Tag::Plain("dir:foo".into()));
    }

    #[test]
    fn display_round_trips_normalized_forms() {
        for raw in ["rust", "_draft", "_dir:foo/bar"] {
            assert_eq!(Tag::parse(raw).to_string(), raw);
        }
        assert_eq!(Tag::directory("/a/b/").to_string(), "_dir:a/b");
    }

    #[test]
    fn list_tags_ignores_functional_tags() {
        let posts = vec![
            post("foo", &["a", "b", "c", "_dir:/foo"]),
            post("alice", &["d", "e", "_dir:/foo/bar"]),
        ];
        assert_eq!(list_tags(&posts, true), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(
            list_tags(&posts, false),
            vec!["_dir:/foo", "_dir:/foo/bar", "a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn list_tags_deduplicates() {
        let posts = vec![post("1", &["x", "x", "y"]), post("2", &["y", "X"])];
        assert_eq!(list_tags(&posts, true), vec!["X", "x", "y"]);
    }

    #[test]
    fn grouping_appends_for_each_directory() {
        let posts = vec![
            post("one", &["_dir:foo", "_dir:/bar"]),
            post("two", &["_dir:foo/"]),
            post("three", &["plain"]),
        ];
        let folders = group_by_directory(posts);
        assert_eq!(folders.keys().collect::<Vec<_>>(), vec!["bar", "foo"]);
        let foo: Vec<_> = folders["foo"].iter().map(|p| p.title.as_str()).collect();
        assert_eq!(foo, vec!["one", "two"]);
        assert_eq!(folders["bar"][0].title, "one");
    }
}
