//! Time-sortable post identifiers.
//!
//! Ids are UUIDv7 values rendered in their 32 character "simple" form. The
//! first 48 bits carry the Unix timestamp in milliseconds, so plain string
//! comparison of two ids orders them by creation time. Within one process a
//! shared context fills the bits below the timestamp with a counter, so ids
//! generated in the same millisecond still come out strictly increasing.
//!
//! Ids double as file names inside the storage root, so [`PostId::from_str`]
//! only accepts a restricted alphabet.

use crate::error::{KbError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use uuid::{ContextV7, Timestamp, Uuid};

/// Length of a freshly generated id.
pub const ID_LEN: usize = 32;

static ID_CONTEXT: Mutex<ContextV7> = Mutex::new(ContextV7::new());

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `s` can be used as an id (and therefore as a file name).
    pub fn is_valid(s: &str) -> bool {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PostId {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self> {
        if PostId::is_valid(s) {
            Ok(PostId(s.to_string()))
        } else {
            Err(KbError::NotFound(s.to_string()))
        }
    }
}

impl AsRef<str> for PostId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generates a new identifier for a post created at `now`.
pub fn new_id(now: DateTime<Utc>) -> Result<PostId> {
    let secs = u64::try_from(now.timestamp()).map_err(|_| {
        KbError::IdGeneration(format!("timestamp {} predates the Unix epoch", now))
    })?;
    let ts = Timestamp::from_unix(&ID_CONTEXT, secs, now.timestamp_subsec_nanos());
    let id = Uuid::new_v7(ts);
    Ok(PostId(id.simple().to_string()))
}
