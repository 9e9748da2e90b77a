// ABOUTME: BlogSession synchronizes the in-memory blog state with the persistence adapter.
// ABOUTME: Every mutation dispatches an action to the reducer and rewrites the persisted blob.

use inkstone_core::{Action, BlogState, Post, PostDraft};
use inkstone_store::{PostStore, StoreError};
use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use ulid::Ulid;

/// The per-process blog session: the authoritative in-memory state plus
/// the persistence adapter. Mutations are serialized through the write
/// lock, so there is exactly one writer at a time.
///
/// Memory is mutated optimistically before the storage write; a storage
/// failure leaves the two out of step and is surfaced to the caller for
/// the notification surface. The adapter re-reads the persisted blob on
/// each mutation rather than deriving it from memory.
pub struct BlogSession {
    state: RwLock<BlogState>,
    store: Mutex<PostStore>,
}

impl BlogSession {
    /// Create a session with an empty state over the given adapter.
    pub fn new(store: PostStore) -> Self {
        Self {
            state: RwLock::new(BlogState::new()),
            store: Mutex::new(store),
        }
    }

    /// Read-only access to the current state for views.
    pub async fn read_state(&self) -> RwLockReadGuard<'_, BlogState> {
        self.state.read().await
    }

    async fn dispatch(&self, action: Action) {
        self.state.write().await.apply(action);
    }

    /// Load the persisted post list into memory. A missing blob yields an
    /// empty list; an unparseable blob is reported through the state's
    /// error message and never returned to the caller.
    pub async fn load_posts(&self) {
        self.dispatch(Action::SetLoading { loading: true }).await;

        let loaded = self.store.lock().await.load();
        match loaded {
            Ok(posts) => {
                self.dispatch(Action::SetPosts { posts }).await;
            }
            Err(e) => {
                tracing::error!("failed to load persisted posts: {}", e);
                self.dispatch(Action::SetError {
                    message: Some("Failed to load blog posts".to_string()),
                })
                .await;
            }
        }
    }

    /// Create a post from a draft: assign a fresh ULID and identical
    /// timestamps, add it to memory, then prepend it to the persisted blob.
    pub async fn save_post(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post: Post = draft.into();

        self.dispatch(Action::AddPost { post: post.clone() }).await;

        if let Err(e) = self.store.lock().await.insert(&post) {
            tracing::error!("failed to persist new post {}: {}", post.id, e);
            return Err(e);
        }

        Ok(post)
    }

    /// Update a post: advance updated_at, replace it in memory, then map
    /// it over the persisted blob.
    pub async fn update_post(&self, mut post: Post) -> Result<Post, StoreError> {
        post.touch();

        self.dispatch(Action::UpdatePost { post: post.clone() }).await;

        if let Err(e) = self.store.lock().await.update(&post) {
            tracing::error!("failed to persist update for post {}: {}", post.id, e);
            return Err(e);
        }

        Ok(post)
    }

    /// Delete a post by id from memory and filter it out of the persisted blob.
    pub async fn delete_post(&self, id: Ulid) -> Result<(), StoreError> {
        self.dispatch(Action::DeletePost { id }).await;

        if let Err(e) = self.store.lock().await.remove(id) {
            tracing::error!("failed to persist delete for post {}: {}", id, e);
            return Err(e);
        }

        Ok(())
    }

    /// Set or clear the current selection. No storage involved.
    pub async fn set_current_post(&self, post: Option<Post>) {
        self.dispatch(Action::SetCurrentPost { post }).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstone_store::{KvStore, POSTS_KEY};
    use tempfile::TempDir;

    fn make_session(dir: &TempDir) -> BlogSession {
        let store = PostStore::open(&dir.path().join("inkstone.db")).unwrap();
        BlogSession::new(store)
    }

    fn make_draft(title: &str, content: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: content.to_string(),
            published: false,
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips_through_storage() {
        let dir = TempDir::new().unwrap();
        let session = make_session(&dir);

        let saved = session
            .save_post(make_draft("Hello", "World"))
            .await
            .unwrap();
        assert_eq!(saved.created_at, saved.updated_at);

        // A fresh session over the same database sees the post
        let session2 = make_session(&dir);
        session2.load_posts().await;

        let state = session2.read_state().await;
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.posts[0].id, saved.id);
        assert_eq!(state.posts[0].title, "Hello");
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn save_assigns_distinct_ids_newest_first() {
        let dir = TempDir::new().unwrap();
        let session = make_session(&dir);

        let first = session.save_post(make_draft("First", "a")).await.unwrap();
        let second = session.save_post(make_draft("Second", "b")).await.unwrap();
        assert_ne!(first.id, second.id);

        let state = session.read_state().await;
        assert_eq!(state.posts[0].id, second.id);
        assert_eq!(state.posts[1].id, first.id);
    }

    #[tokio::test]
    async fn update_bumps_updated_at_and_keeps_id() {
        let dir = TempDir::new().unwrap();
        let session = make_session(&dir);

        let saved = session
            .save_post(make_draft("Hello", "World"))
            .await
            .unwrap();
        let original_updated = saved.updated_at;

        let mut changed = saved.clone();
        changed.content = "World!".to_string();
        let updated = session.update_post(changed).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert!(updated.updated_at >= original_updated);
        assert!(updated.updated_at >= updated.created_at);

        let state = session.read_state().await;
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.posts[0].content, "World!");
    }

    #[tokio::test]
    async fn delete_clears_matching_selection() {
        let dir = TempDir::new().unwrap();
        let session = make_session(&dir);

        let saved = session.save_post(make_draft("Doomed", "x")).await.unwrap();
        session.set_current_post(Some(saved.clone())).await;

        session.delete_post(saved.id).await.unwrap();

        let state = session.read_state().await;
        assert!(state.posts.is_empty());
        assert!(state.current_post.is_none());

        // And the persisted blob is empty too
        drop(state);
        let session2 = make_session(&dir);
        session2.load_posts().await;
        assert!(session2.read_state().await.posts.is_empty());
    }

    #[tokio::test]
    async fn load_surfaces_corrupt_blob_as_error_message() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inkstone.db");

        {
            let kv = KvStore::open(&path).unwrap();
            kv.put(POSTS_KEY, "{not json").unwrap();
        }

        let store = PostStore::open(&path).unwrap();
        let session = BlogSession::new(store);
        session.load_posts().await;

        let state = session.read_state().await;
        assert!(state.posts.is_empty());
        assert_eq!(state.error.as_deref(), Some("Failed to load blog posts"));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn create_update_delete_lifecycle() {
        let dir = TempDir::new().unwrap();
        let session = make_session(&dir);

        let saved = session
            .save_post(make_draft("Hello", "World"))
            .await
            .unwrap();
        {
            let state = session.read_state().await;
            assert_eq!(state.posts.len(), 1);
            assert_eq!(state.posts[0].created_at, state.posts[0].updated_at);
        }

        let mut changed = saved.clone();
        changed.content = "World!".to_string();
        session.set_current_post(Some(saved.clone())).await;
        let updated = session.update_post(changed).await.unwrap();
        {
            let state = session.read_state().await;
            assert_eq!(state.posts.len(), 1);
            assert_eq!(state.posts[0].id, saved.id);
            assert_eq!(state.posts[0].content, "World!");
            // The selection was refreshed by the update
            let current = state.current_post.as_ref().unwrap();
            assert_eq!(current.content, "World!");
        }
        assert!(updated.updated_at >= saved.updated_at);

        session.delete_post(saved.id).await.unwrap();
        let state = session.read_state().await;
        assert!(state.posts.is_empty());
        assert!(state.current_post.is_none());
    }
}
