// ABOUTME: Web UI route handlers serving HTML via Askama templates and HTMX.
// ABOUTME: Provides the post list, markdown post view, editor with validation, and login flow.

use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::{DateTime, Utc};
use inkstone_core::{BlogState, Post, PostDraft};
use serde::Deserialize;
use ulid::Ulid;

use crate::app_state::SharedState;
use crate::auth::SESSION_COOKIE;

use askama::Template;
use askama_derive_axum::IntoResponse as AskamaIntoResponse;

/// How many characters of content the list preview shows before truncating.
const PREVIEW_CHARS: usize = 200;

/// Truncate content to the preview length, appending an ellipsis when cut.
/// Operates on characters, never inside a multi-byte sequence.
fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let mut cut: String = content.chars().take(PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

/// Render markdown source to HTML for the post view page.
fn render_markdown(content: &str) -> String {
    let parser = pulldown_cmark::Parser::new(content);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%B %e, %Y").to_string()
}

/// Serializable post data for list templates.
pub struct PostView {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub published: bool,
    pub preview: String,
}

impl PostView {
    fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            created_at: format_date(&post.created_at),
            published: post.published,
            preview: preview(&post.content),
        }
    }
}

fn post_views(state: &BlogState) -> Vec<PostView> {
    state.posts.iter().map(PostView::from_post).collect()
}

/// A notification for the editor surface: title, description, severity.
pub struct NoticeView {
    pub title: String,
    pub description: String,
    pub severity: String,
}

impl NoticeView {
    fn success(description: &str) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.to_string(),
            severity: "success".to_string(),
        }
    }

    fn error(description: &str) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.to_string(),
            severity: "error".to_string(),
        }
    }
}

/// Index page: heading, nav, and the post list.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub posts: Vec<PostView>,
    pub authed: bool,
    pub error: Option<String>,
}

/// GET / - Render the blog page with the current post list.
pub async fn index(State(state): State<SharedState>, headers: HeaderMap) -> IndexTemplate {
    let blog = state.session.read_state().await;
    IndexTemplate {
        posts: post_views(&blog),
        authed: state.auth.is_authenticated(&headers),
        error: blog.error.clone(),
    }
}

/// Partial: the post list.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "partials/post_list.html")]
pub struct PostListTemplate {
    pub posts: Vec<PostView>,
    pub authed: bool,
}

/// GET /web/posts - Return the post list as an HTML partial.
pub async fn post_list(State(state): State<SharedState>, headers: HeaderMap) -> PostListTemplate {
    let blog = state.session.read_state().await;
    PostListTemplate {
        posts: post_views(&blog),
        authed: state.auth.is_authenticated(&headers),
    }
}

/// Editor page wrapping the editor form.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "write.html")]
pub struct EditorPageTemplate {
    pub post_id: Option<String>,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub notice: Option<NoticeView>,
}

/// Editor form partial, returned by create/update so HTMX can swap it in place.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "partials/editor_form.html")]
pub struct EditorFormTemplate {
    pub post_id: Option<String>,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub notice: Option<NoticeView>,
}

/// GET /write - Render the editor with empty fields.
pub async fn editor() -> EditorPageTemplate {
    EditorPageTemplate {
        post_id: None,
        title: String::new(),
        content: String::new(),
        published: false,
        notice: None,
    }
}

/// Form data for creating or updating a post. The checkbox arrives as
/// "on" when checked and is absent otherwise.
#[derive(Deserialize)]
pub struct EditorForm {
    pub title: String,
    pub content: String,
    pub published: Option<String>,
}

/// Validate the editor form: trimmed title first, then trimmed content.
/// Returns the trimmed values, or the notice to show for the first failure.
fn validate_editor_form(form: &EditorForm) -> Result<(String, String), NoticeView> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(NoticeView::error(
            "Please enter a title for your blog post.",
        ));
    }

    let content = form.content.trim();
    if content.is_empty() {
        return Err(NoticeView::error(
            "Please enter some content for your blog post.",
        ));
    }

    Ok((title.to_string(), content.to_string()))
}

/// POST /web/posts - Create a post from the editor form.
/// On success the returned form is cleared for the next post.
pub async fn create_post(
    State(state): State<SharedState>,
    Form(form): Form<EditorForm>,
) -> impl IntoResponse {
    let published = form.published.is_some();

    let (title, content) = match validate_editor_form(&form) {
        Ok(fields) => fields,
        Err(notice) => {
            return (
                StatusCode::BAD_REQUEST,
                EditorFormTemplate {
                    post_id: None,
                    title: form.title,
                    content: form.content,
                    published,
                    notice: Some(notice),
                },
            )
                .into_response();
        }
    };

    let draft = PostDraft {
        title,
        content,
        published,
    };

    match state.session.save_post(draft).await {
        Ok(post) => {
            tracing::info!("created post {}", post.id);
            EditorFormTemplate {
                post_id: None,
                title: String::new(),
                content: String::new(),
                published: false,
                notice: Some(NoticeView::success("Blog post saved successfully!")),
            }
            .into_response()
        }
        Err(e) => {
            tracing::error!("failed to save post: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                EditorFormTemplate {
                    post_id: None,
                    title: form.title,
                    content: form.content,
                    published,
                    notice: Some(NoticeView::error(
                        "Failed to save blog post. Please try again.",
                    )),
                },
            )
                .into_response()
        }
    }
}

/// Helper to parse a ULID from a path string, returning an error response on failure.
fn parse_post_id(id: &str) -> Result<Ulid, Box<Response>> {
    id.parse::<Ulid>().map_err(|_| {
        Box::new(
            (
                StatusCode::BAD_REQUEST,
                Html("<p class=\"error-msg\">Invalid post ID.</p>".to_string()),
            )
                .into_response(),
        )
    })
}

/// Look up a post by id in the in-memory list.
async fn find_post(state: &SharedState, id: Ulid) -> Option<Post> {
    let blog = state.session.read_state().await;
    blog.posts.iter().find(|p| p.id == id).cloned()
}

/// GET /web/posts/{id}/edit - Render the editor pre-filled with a post.
pub async fn edit_post_form(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let post_id = match parse_post_id(&id) {
        Ok(id) => id,
        Err(resp) => return *resp,
    };

    let post = match find_post(&state, post_id).await {
        Some(p) => p,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Html("<p class=\"error-msg\">Post not found.</p>".to_string()),
            )
                .into_response();
        }
    };

    state.session.set_current_post(Some(post.clone())).await;

    EditorPageTemplate {
        post_id: Some(id),
        title: post.title,
        content: post.content,
        published: post.published,
        notice: None,
    }
    .into_response()
}

/// PUT /web/posts/{id} - Update a post from the editor form.
pub async fn update_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<EditorForm>,
) -> impl IntoResponse {
    let post_id = match parse_post_id(&id) {
        Ok(id) => id,
        Err(resp) => return *resp,
    };

    let published = form.published.is_some();

    let (title, content) = match validate_editor_form(&form) {
        Ok(fields) => fields,
        Err(notice) => {
            return (
                StatusCode::BAD_REQUEST,
                EditorFormTemplate {
                    post_id: Some(id),
                    title: form.title,
                    content: form.content,
                    published,
                    notice: Some(notice),
                },
            )
                .into_response();
        }
    };

    let mut post = match find_post(&state, post_id).await {
        Some(p) => p,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Html("<p class=\"error-msg\">Post not found.</p>".to_string()),
            )
                .into_response();
        }
    };

    post.title = title;
    post.content = content;
    post.published = published;

    match state.session.update_post(post).await {
        Ok(post) => {
            tracing::info!("updated post {}", post.id);
            EditorFormTemplate {
                post_id: Some(id),
                title: post.title,
                content: post.content,
                published: post.published,
                notice: Some(NoticeView::success("Blog post saved successfully!")),
            }
            .into_response()
        }
        Err(e) => {
            tracing::error!("failed to update post {}: {}", post_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                EditorFormTemplate {
                    post_id: Some(id),
                    title: form.title,
                    content: form.content,
                    published,
                    notice: Some(NoticeView::error(
                        "Failed to save blog post. Please try again.",
                    )),
                },
            )
                .into_response()
        }
    }
}

/// DELETE /web/posts/{id} - Delete a post, return empty content so HTMX
/// removes the card element.
pub async fn delete_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let post_id = match parse_post_id(&id) {
        Ok(id) => id,
        Err(resp) => return *resp,
    };

    match state.session.delete_post(post_id).await {
        Ok(()) => Html(String::new()).into_response(),
        Err(e) => {
            tracing::error!("failed to delete post {}: {}", post_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<p class=\"error-msg\">Failed to delete post. Please try again.</p>".to_string()),
            )
                .into_response()
        }
    }
}

/// Full post view page with markdown rendered to HTML.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "post.html")]
pub struct PostPageTemplate {
    pub id: String,
    pub title: String,
    pub content_html: String,
    pub created_at: String,
    pub updated_at: String,
    pub published: bool,
    pub authed: bool,
}

/// GET /web/posts/{id} - Render a single post and select it.
pub async fn view_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let post_id = match parse_post_id(&id) {
        Ok(id) => id,
        Err(resp) => return *resp,
    };

    let post = match find_post(&state, post_id).await {
        Some(p) => p,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Html("<p class=\"error-msg\">Post not found.</p>".to_string()),
            )
                .into_response();
        }
    };

    state.session.set_current_post(Some(post.clone())).await;

    PostPageTemplate {
        id,
        title: post.title.clone(),
        content_html: render_markdown(&post.content),
        created_at: format_date(&post.created_at),
        updated_at: format_date(&post.updated_at),
        published: post.published,
        authed: state.auth.is_authenticated(&headers),
    }
    .into_response()
}

/// Login page.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub failed: bool,
}

/// GET /login - Render the login form.
pub async fn login_form() -> LoginTemplate {
    LoginTemplate { failed: false }
}

/// Form data for signing in.
#[derive(Deserialize)]
pub struct LoginForm {
    pub token: String,
}

/// POST /login - Check the submitted token and set the session cookie.
pub async fn login(
    State(state): State<SharedState>,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    if !state.auth.has_token() {
        // Single-user local mode: nothing to check
        return Redirect::to("/write").into_response();
    }

    if state.auth.token_matches(&form.token) {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, form.token
        );
        return Response::builder()
            .status(StatusCode::SEE_OTHER)
            .header(header::LOCATION, "/write")
            .header(header::SET_COOKIE, cookie)
            .body(axum::body::Body::empty())
            .unwrap();
    }

    (StatusCode::UNAUTHORIZED, LoginTemplate { failed: true }).into_response()
}

/// POST /logout - Clear the session cookie.
pub async fn logout() -> Response {
    let cookie = format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE);
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, "/")
        .header(header::SET_COOKIE, cookie)
        .body(axum::body::Body::empty())
        .unwrap()
}
