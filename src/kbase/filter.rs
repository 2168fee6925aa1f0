//! Listing filters.
//!
//! A listing applies up to two predicates:
//!
//! - **search**: case-insensitive substring of the title or the content,
//! - **tags**: the post carries at least one of the requested tags
//!   (exact, case-sensitive).
//!
//! When both are active a post must pass both. An empty search term or an
//! empty tag set counts as "not active", so the default options match every post.

use crate::model::Post;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub search_term: Option<String>,
    pub tags_filter: Option<BTreeSet<String>>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags_filter
            .get_or_insert_with(BTreeSet::new)
            .extend(tags.into_iter().map(Into::into));
        self
    }

    fn active_search(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    fn active_tags(&self) -> Option<&BTreeSet<String>> {
        self.tags_filter.as_ref().filter(|t| !t.is_empty())
    }

    /// Compiles the options into a reusable predicate.
    pub fn matcher(&self) -> PostMatcher<'_> {
        PostMatcher {
            needle: self.active_search(),
            tags: self.active_tags(),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.matcher().matches(post)
    }
}

/// Predicate built once per listing so the search term is lowercased only once.
#[derive(Debug)]
pub struct PostMatcher<'a> {
    needle: Option<String>,
    tags: Option<&'a BTreeSet<String>>,
}

impl PostMatcher<'_> {
    pub fn matches(&self, post: &Post) -> bool {
        self.matches_text(post) && self.matches_tags(post)
    }

    fn matches_text(&self, post: &Post) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => {
                post.title.to_lowercase().contains(needle.as_str())
                    || post.content.to_lowercase().contains(needle.as_str())
            }
        }
    }

    fn matches_tags(&self, post: &Post) -> bool {
        match self.tags {
            None => true,
            Some(wanted) => post.tags.iter().any(|t| wanted.contains(t)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, content: &str, tags: &[&str]) -> Post {
        Post::new(title, content, tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn default_options_match_everything() {
        let opts = ListOptions::default();
        assert!(opts.matches(&post("", "", &[])));
        let empty = ListOptions::new().search("").tags(Vec::<String>::new());
        assert!(empty.matches(&post("x", "", &[])));
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let p = post("Meeting Notes", "Discussed the ROADMAP", &[]);
        assert!(ListOptions::new().search("meeting").matches(&p));
        assert!(ListOptions::new().search("roadmap").matches(&p));
        assert!(!ListOptions::new().search("budget").matches(&p));
    }

    #[test]
    fn tags_match_any_of_the_filter() {
        let p = post("t", "", &["b", "c"]);
        assert!(ListOptions::new().tags(["a", "c"]).matches(&p));
        assert!(!ListOptions::new().tags(["a", "d"]).matches(&p));
        assert!(!ListOptions::new().tags(["B"]).matches(&p));
    }

    #[test]
    fn tag_match_is_not_cut_short_by_the_first_filter_entry() {
        // The first filter entry ("a") is absent; the later one must still count.
        let p = post("t", "", &["z", "y"]);
        assert!(ListOptions::new().tags(["a", "y"]).matches(&p));
    }

    #[test]
    fn both_predicates_must_hold() {
        let p = post("title7", "content7", &["tag7"]);
        assert!(ListOptions::new().search("content7").tags(["tag7"]).matches(&p));
        assert!(!ListOptions::new().search("content7").tags(["tag3"]).matches(&p));
        assert!(!ListOptions::new().search("content3").tags(["tag7"]).matches(&p));
    }
}
