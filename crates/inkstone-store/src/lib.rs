// ABOUTME: Persistence layer for inkstone, mirroring the in-memory post list to disk.
// ABOUTME: Provides a SQLite-backed key-value store and the typed post-blob adapter over it.

pub mod kv;
pub mod posts;

pub use kv::{KvError, KvStore};
pub use posts::{POSTS_KEY, PostStore, StoreError};
