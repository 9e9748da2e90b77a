// ABOUTME: Typed persistence adapter mapping the post list onto one key-value entry.
// ABOUTME: Reads and rewrites the full JSON-serialized post blob on every mutation.

use std::path::Path;

use inkstone_core::Post;
use thiserror::Error;
use ulid::Ulid;

use crate::kv::{KvError, KvStore};

/// The fixed entry name the serialized post list lives under.
pub const POSTS_KEY: &str = "blogPosts";

/// Errors that can occur in the post persistence adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("kv error: {0}")]
    Kv(#[from] KvError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence adapter for the post list. The whole list is kept as one
/// JSON array under POSTS_KEY; every mutation re-reads the persisted blob
/// and rewrites it in full, independently of any in-memory copy.
pub struct PostStore {
    kv: KvStore,
}

impl PostStore {
    /// Open the adapter over a store database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            kv: KvStore::open(path)?,
        })
    }

    /// Read the full persisted post list. An absent entry is an empty
    /// list; an unparseable blob is an error for the caller to surface.
    pub fn load(&self) -> Result<Vec<Post>, StoreError> {
        match self.kv.get(POSTS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Prepend a post to the persisted list (newest-created first) and
    /// rewrite the blob.
    pub fn insert(&self, post: &Post) -> Result<(), StoreError> {
        let mut posts = self.load()?;
        posts.insert(0, post.clone());
        self.write(&posts)
    }

    /// Replace the persisted entry whose id matches and rewrite the blob.
    /// An absent id rewrites the list unchanged.
    pub fn update(&self, post: &Post) -> Result<(), StoreError> {
        let posts: Vec<Post> = self
            .load()?
            .into_iter()
            .map(|p| if p.id == post.id { post.clone() } else { p })
            .collect();
        self.write(&posts)
    }

    /// Filter the matching id out of the persisted list and rewrite the blob.
    pub fn remove(&self, id: Ulid) -> Result<(), StoreError> {
        let posts: Vec<Post> = self.load()?.into_iter().filter(|p| p.id != id).collect();
        self.write(&posts)
    }

    fn write(&self, posts: &[Post]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(posts)?;
        self.kv.put(POSTS_KEY, &raw)?;
        Ok(())
    }
}
