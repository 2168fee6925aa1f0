use super::PostStore;
use crate::error::{KbError, Result};
use crate::filter::ListOptions;
use crate::id::{new_id, PostId};
use crate::model::Post;
use chrono::{Duration, Utc};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const POST_EXT: &str = ".json";

#[cfg(unix)]
const FILE_MODE: u32 = 0o640;
#[cfg(unix)]
const DIR_MODE: u32 = 0o750;

pub struct FileStore {
    root: PathBuf,
    pretty: bool,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pretty: true,
        }
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn post_filename(id: &PostId) -> String {
        format!("{}{}", id, POST_EXT)
    }

    /// Find the file for a given id, checking `<id>.json` first and then a
    /// bare `<id>` as written by older versions. Only a missing file counts
    /// as absent; any other stat failure is an error.
    fn find_post_file(&self, id: &PostId) -> Result<Option<PathBuf>> {
        for path in [
            self.root.join(Self::post_filename(id)),
            self.root.join(id.as_str()),
        ] {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => return Ok(Some(path)),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(KbError::Io(e)),
            }
        }
        Ok(None)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            let mut builder = fs::DirBuilder::new();
            builder.recursive(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::DirBuilderExt;
                builder.mode(DIR_MODE);
            }
            builder.create(&self.root).map_err(KbError::Io)?;
        }
        Ok(())
    }

    fn encode(&self, post: &Post) -> Result<String> {
        let content = if self.pretty {
            serde_json::to_string_pretty(post)
        } else {
            serde_json::to_string(post)
        };
        content.map_err(KbError::Serialization)
    }

    fn decode(file_id: &str, bytes: &[u8]) -> Result<Post> {
        let post: Post = serde_json::from_slice(bytes).map_err(|source| {
            warn!("event=post_decode status=corrupt id={}", file_id);
            KbError::Corrupt {
                id: file_id.to_string(),
                source,
            }
        })?;
        if post.id.as_str() != file_id {
            warn!(
                "event=post_decode status=id_mismatch id={} stored={}",
                file_id, post.id
            );
            return Err(KbError::CorruptId {
                file: file_id.to_string(),
                stored: post.id.to_string(),
            });
        }
        Ok(post)
    }

    fn read_post(&self, file_id: &str, path: &Path) -> Result<Post> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => KbError::NotFound(file_id.to_string()),
            _ => KbError::Io(e),
        })?;
        Self::decode(file_id, &bytes)
    }

    /// Sets the final mode on a written temp file and renames it into place.
    fn commit_tmp(tmp_path: &Path, target: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp_path, fs::Permissions::from_mode(FILE_MODE))?;
        }
        fs::rename(tmp_path, target)
    }

    /// Atomic write: temp file in the same directory, then rename over `target`.
    fn write_post(&self, target: &Path, post: &Post) -> Result<()> {
        self.ensure_dir()?;
        let content = self.encode(post)?;

        let tmp_path = self.root.join(format!(".{}-{}.tmp", post.id, Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(KbError::Io)?;
        if let Err(e) = Self::commit_tmp(&tmp_path, target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(KbError::Io(e));
        }

        debug!(
            "event=post_write id={} path={}",
            post.id,
            target.display()
        );
        Ok(())
    }
}

impl PostStore for FileStore {
    fn get(&self, id: &PostId) -> Result<Post> {
        let path = self
            .find_post_file(id)?
            .ok_or_else(|| KbError::NotFound(id.to_string()))?;
        self.read_post(id.as_str(), &path)
    }

    fn list(&self, options: &ListOptions) -> Result<Vec<Post>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(KbError::Io(e)),
        };

        let mut files = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(KbError::Io)?;
            if !entry.file_type().map_err(KbError::Io)?.is_file() {
                continue;
            }
            let name = entry.file_name().into_string().map_err(|raw| {
                warn!("event=post_list status=unreadable_name name={:?}", raw);
                KbError::Io(io::Error::new(
                    ErrorKind::InvalidData,
                    format!("post file name is not valid UTF-8: {:?}", raw),
                ))
            })?;
            if name.starts_with('.') {
                continue;
            }
            files.insert(name, entry.path());
        }

        let matcher = options.matcher();
        let mut posts = Vec::new();
        let mut scanned = 0usize;

        for (name, path) in &files {
            let file_id = match name.strip_suffix(POST_EXT) {
                Some(id) => id,
                // A legacy bare file shadowed by its `.json` twin.
                None if files.contains_key(&format!("{}{}", name, POST_EXT)) => continue,
                None => name.as_str(),
            };
            let post = self.read_post(file_id, path)?;
            scanned += 1;
            if matcher.matches(&post) {
                posts.push(post);
            }
        }

        posts.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(
            "event=post_list root={} scanned={} matched={}",
            self.root.display(),
            scanned,
            posts.len()
        );
        Ok(posts)
    }

    fn create(&self, mut post: Post) -> Result<Post> {
        let now = Utc::now();
        post.id = new_id(now)?;
        post.created_time = now;
        post.modified_time = now;

        let target = self.root.join(Self::post_filename(&post.id));
        self.write_post(&target, &post)?;
        Ok(post)
    }

    fn update(&self, mut post: Post) -> Result<Post> {
        let target = self
            .find_post_file(&post.id)?
            .ok_or_else(|| KbError::NotFound(post.id.to_string()))?;
        let stored = self.read_post(post.id.as_str(), &target)?;

        // Strictly after the previous write, never before creation.
        let now = Utc::now();
        post.modified_time = now
            .max(stored.modified_time + Duration::nanoseconds(1))
            .max(post.created_time);

        self.write_post(&target, &post)?;
        Ok(post)
    }
}
