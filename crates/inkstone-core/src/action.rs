// ABOUTME: Defines the Action enum covering every mutation the blog state accepts.
// ABOUTME: Actions are discrete inputs folded into BlogState by the reducer.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::post::Post;

/// A state transition input. The reducer applies exactly one action at a
/// time; every variant is total over any BlogState.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    SetLoading {
        loading: bool,
    },
    SetPosts {
        posts: Vec<Post>,
    },
    AddPost {
        post: Post,
    },
    UpdatePost {
        post: Post,
    },
    DeletePost {
        id: Ulid,
    },
    SetCurrentPost {
        post: Option<Post>,
    },
    SetError {
        message: Option<String>,
    },
}
