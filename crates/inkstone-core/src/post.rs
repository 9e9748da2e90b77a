// ABOUTME: Defines the Post struct representing a single blog entry.
// ABOUTME: Posts carry markdown content, a publication flag, and creation/update timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A single blog entry. The id is assigned once at creation and never
/// changes; created_at is immutable; updated_at moves forward on every
/// mutation.
///
/// Serialized field names are camelCase to match the persisted blob layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Ulid,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post with a fresh ULID and both timestamps set to the
    /// creation instant.
    pub fn new(title: String, content: String, published: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Ulid::new(),
            title,
            content,
            published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance updated_at to now. Called before persisting a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Input for creating a post: everything except the id and timestamps,
/// which the save operation assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl From<PostDraft> for Post {
    fn from(draft: PostDraft) -> Self {
        Post::new(draft.title, draft.content, draft.published)
    }
}
