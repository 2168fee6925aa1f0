use crate::id::PostId;
use crate::tags::Tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single knowledge-base entry.
///
/// `id`, `created_time` and `modified_time` are owned by the store: `create`
/// overwrites all three and `update` overwrites `modified_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(alias = "ID")]
    pub id: PostId,
    #[serde(alias = "Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(alias = "Content", default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(alias = "Tags", default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(alias = "CreatedTime")]
    pub created_time: DateTime<Utc>,
    #[serde(alias = "ModifiedTime")]
    pub modified_time: DateTime<Utc>,
}

// Older files were written with `null` for empty tag lists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Post {
    /// A post that has not been stored yet. The id and timestamps are
    /// placeholders until the store assigns real ones.
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::default(),
            title: title.into(),
            content: content.into(),
            tags,
            created_time: now,
            modified_time: now,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Tags parsed into their taxonomy variants, in stored order.
    pub fn parsed_tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tags.iter().map(|t| Tag::parse(t))
    }

    /// Paths of every `_dir:` tag on this post.
    pub fn directories(&self) -> impl Iterator<Item = String> + '_ {
        self.parsed_tags().filter_map(|t| match t {
            Tag::Directory(path) => Some(path),
            _ => None,
        })
    }
}
