// ABOUTME: Defines BlogState and its reducer over Action values.
// ABOUTME: The apply() method pattern-matches on Action to fold mutations into current state.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::post::Post;

/// The in-memory blog state: the ordered post list (newest-created first),
/// the current selection, a loading flag, and an optional error message.
///
/// The selection holds a Post by value and may go stale relative to the
/// list; it is only refreshed or cleared by an update or delete of the
/// matching id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogState {
    pub posts: Vec<Post>,
    pub current_post: Option<Post>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl BlogState {
    /// Create an empty BlogState: no posts, no selection, not loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single action to mutate this state. Every arm is total; an
    /// update whose id matches nothing leaves the list unchanged.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetLoading { loading } => {
                self.is_loading = loading;
            }

            Action::SetPosts { posts } => {
                self.posts = posts;
                self.is_loading = false;
            }

            Action::AddPost { post } => {
                self.posts.insert(0, post);
                self.is_loading = false;
            }

            Action::UpdatePost { post } => {
                if let Some(entry) = self.posts.iter_mut().find(|p| p.id == post.id) {
                    *entry = post.clone();
                }
                if self.current_post.as_ref().is_some_and(|c| c.id == post.id) {
                    self.current_post = Some(post);
                }
                self.is_loading = false;
            }

            Action::DeletePost { id } => {
                self.posts.retain(|p| p.id != id);
                if self.current_post.as_ref().is_some_and(|c| c.id == id) {
                    self.current_post = None;
                }
                self.is_loading = false;
            }

            Action::SetCurrentPost { post } => {
                self.current_post = post;
            }

            Action::SetError { message } => {
                self.error = message;
                self.is_loading = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_post(title: &str) -> Post {
        Post::new(title.to_string(), format!("{} content", title), false)
    }

    #[test]
    fn set_loading_touches_only_the_flag() {
        let mut state = BlogState::new();
        state.error = Some("previous".to_string());

        state.apply(Action::SetLoading { loading: true });

        assert!(state.is_loading);
        assert!(state.posts.is_empty());
        assert_eq!(state.error.as_deref(), Some("previous"));

        state.apply(Action::SetLoading { loading: false });
        assert!(!state.is_loading);
    }

    #[test]
    fn set_posts_replaces_list_wholesale_and_clears_loading() {
        let mut state = BlogState::new();
        state.apply(Action::AddPost { post: make_post("Old") });
        state.apply(Action::SetLoading { loading: true });

        let replacement = vec![make_post("New A"), make_post("New B")];
        state.apply(Action::SetPosts { posts: replacement });

        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.posts[0].title, "New A");
        assert_eq!(state.posts[1].title, "New B");
        assert!(!state.is_loading);
    }

    #[test]
    fn add_post_prepends_newest_first() {
        let mut state = BlogState::new();

        state.apply(Action::AddPost { post: make_post("First") });
        state.apply(Action::AddPost { post: make_post("Second") });
        state.apply(Action::AddPost { post: make_post("Third") });

        assert_eq!(state.posts.len(), 3);
        assert_eq!(state.posts[0].title, "Third");
        assert_eq!(state.posts[1].title, "Second");
        assert_eq!(state.posts[2].title, "First");
    }

    #[test]
    fn update_post_replaces_exactly_the_matching_entry() {
        let mut state = BlogState::new();
        state.apply(Action::AddPost { post: make_post("A") });
        state.apply(Action::AddPost { post: make_post("B") });

        let mut updated = state.posts[1].clone();
        updated.content = "rewritten".to_string();
        updated.touch();
        let untouched_title = state.posts[0].title.clone();

        state.apply(Action::UpdatePost { post: updated.clone() });

        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.posts[1].content, "rewritten");
        assert_eq!(state.posts[0].title, untouched_title);
    }

    #[test]
    fn update_post_with_absent_id_leaves_list_unchanged() {
        let mut state = BlogState::new();
        state.apply(Action::AddPost { post: make_post("Only") });

        let ghost = make_post("Ghost");
        state.apply(Action::UpdatePost { post: ghost });

        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.posts[0].title, "Only");
    }

    #[test]
    fn update_post_refreshes_matching_selection() {
        let mut state = BlogState::new();
        let post = make_post("Selected");
        state.apply(Action::AddPost { post: post.clone() });
        state.apply(Action::SetCurrentPost { post: Some(post.clone()) });

        let mut updated = post.clone();
        updated.title = "Selected v2".to_string();
        state.apply(Action::UpdatePost { post: updated });

        let current = state.current_post.as_ref().expect("selection kept");
        assert_eq!(current.title, "Selected v2");
    }

    #[test]
    fn update_post_leaves_unrelated_selection_alone() {
        let mut state = BlogState::new();
        let selected = make_post("Selected");
        let other = make_post("Other");
        state.apply(Action::AddPost { post: selected.clone() });
        state.apply(Action::AddPost { post: other.clone() });
        state.apply(Action::SetCurrentPost { post: Some(selected.clone()) });

        let mut updated = other.clone();
        updated.title = "Other v2".to_string();
        state.apply(Action::UpdatePost { post: updated });

        let current = state.current_post.as_ref().expect("selection kept");
        assert_eq!(current.id, selected.id);
        assert_eq!(current.title, "Selected");
    }

    #[test]
    fn delete_post_removes_one_entry_and_preserves_order() {
        let mut state = BlogState::new();
        state.apply(Action::AddPost { post: make_post("A") });
        state.apply(Action::AddPost { post: make_post("B") });
        state.apply(Action::AddPost { post: make_post("C") });

        let middle_id = state.posts[1].id;
        state.apply(Action::DeletePost { id: middle_id });

        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.posts[0].title, "C");
        assert_eq!(state.posts[1].title, "A");
    }

    #[test]
    fn delete_post_with_absent_id_is_a_no_op_on_the_list() {
        let mut state = BlogState::new();
        state.apply(Action::AddPost { post: make_post("Keep") });

        state.apply(Action::DeletePost { id: ulid::Ulid::new() });

        assert_eq!(state.posts.len(), 1);
    }

    #[test]
    fn delete_post_clears_matching_selection() {
        let mut state = BlogState::new();
        let post = make_post("Doomed");
        state.apply(Action::AddPost { post: post.clone() });
        state.apply(Action::SetCurrentPost { post: Some(post.clone()) });

        state.apply(Action::DeletePost { id: post.id });

        assert!(state.posts.is_empty());
        assert!(state.current_post.is_none());
    }

    #[test]
    fn delete_post_keeps_unrelated_selection() {
        let mut state = BlogState::new();
        let selected = make_post("Selected");
        let other = make_post("Other");
        state.apply(Action::AddPost { post: selected.clone() });
        state.apply(Action::AddPost { post: other.clone() });
        state.apply(Action::SetCurrentPost { post: Some(selected.clone()) });

        state.apply(Action::DeletePost { id: other.id });

        let current = state.current_post.as_ref().expect("selection kept");
        assert_eq!(current.id, selected.id);
    }

    #[test]
    fn set_current_post_does_not_touch_loading_or_list() {
        let mut state = BlogState::new();
        state.apply(Action::AddPost { post: make_post("A") });
        state.apply(Action::SetLoading { loading: true });

        state.apply(Action::SetCurrentPost {
            post: Some(make_post("Detached")),
        });

        assert!(state.is_loading);
        assert_eq!(state.posts.len(), 1);
        assert!(state.current_post.is_some());

        state.apply(Action::SetCurrentPost { post: None });
        assert!(state.current_post.is_none());
    }

    #[test]
    fn set_error_sets_message_and_clears_loading() {
        let mut state = BlogState::new();
        state.apply(Action::SetLoading { loading: true });

        state.apply(Action::SetError {
            message: Some("Failed to load blog posts".to_string()),
        });

        assert_eq!(state.error.as_deref(), Some("Failed to load blog posts"));
        assert!(!state.is_loading);

        state.apply(Action::SetError { message: None });
        assert!(state.error.is_none());
    }

    #[test]
    fn add_count_matches_list_length() {
        let mut state = BlogState::new();
        for i in 0..25 {
            state.apply(Action::AddPost {
                post: make_post(&format!("Post {}", i)),
            });
        }

        assert_eq!(state.posts.len(), 25);
        assert_eq!(state.posts[0].title, "Post 24");
        assert_eq!(state.posts[24].title, "Post 0");
    }
}
