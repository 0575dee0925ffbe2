//! Browser routes: landing page, blog, dashboard and the post form.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, http::header::ContentType, web};
use serde::Deserialize;

use writer_core::domain::{NewPost, PostChanges};
use writer_core::ports::{BaseRepository, PostRepository};

use crate::middleware::error::PageResult;
use crate::state::AppState;
use crate::views::{self, PostFormView};

const DASHBOARD: &str = "/dashboard";
const MISSING_FIELDS: &str = "タイトルと内容を入力してください";

/// Fields posted by the create / edit form.
#[derive(Debug, Deserialize)]
pub struct PostFormData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn post_not_found() -> HttpResponse {
    html(StatusCode::NOT_FOUND, views::post_not_found_page())
}

/// GET /
pub async fn home() -> HttpResponse {
    html(StatusCode::OK, views::home_page())
}

/// GET /blog
pub async fn blog(state: web::Data<AppState>) -> PageResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    Ok(html(StatusCode::OK, views::blog_page(&posts)))
}

/// GET /dashboard
pub async fn dashboard(state: web::Data<AppState>) -> PageResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    Ok(html(StatusCode::OK, views::dashboard_page(&posts)))
}

/// GET /dashboard/new
pub async fn new_post() -> HttpResponse {
    html(StatusCode::OK, views::post_form_page(&PostFormView::new_post()))
}

/// POST /dashboard/new
pub async fn create_post(
    state: web::Data<AppState>,
    form: web::Form<PostFormData>,
) -> PageResult<HttpResponse> {
    let PostFormData { title, content } = form.into_inner();

    let draft = NewPost::new(title.clone(), content.clone(), state.default_author.clone());
    if draft.validate().is_err() {
        let view = PostFormView {
            editing: None,
            title,
            content,
            error: Some(MISSING_FIELDS.to_string()),
        };
        return Ok(html(
            StatusCode::UNPROCESSABLE_ENTITY,
            views::post_form_page(&view),
        ));
    }

    let post = state.posts.create(draft).await?;
    tracing::info!(post_id = %post.id, "Post created from form");

    Ok(see_other(DASHBOARD))
}

/// GET /dashboard/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    match state.posts.find_by_id(path.into_inner()).await? {
        Some(post) => Ok(html(StatusCode::OK, views::post_detail_page(&post))),
        None => Ok(post_not_found()),
    }
}

/// GET /dashboard/{id}/edit
pub async fn edit_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    match state.posts.find_by_id(path.into_inner()).await? {
        Some(post) => Ok(html(
            StatusCode::OK,
            views::post_form_page(&PostFormView::edit(&post)),
        )),
        None => Ok(post_not_found()),
    }
}

/// POST /dashboard/{id}/edit
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<PostFormData>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    let PostFormData { title, content } = form.into_inner();

    let changes = PostChanges::title_and_content(title.clone(), content.clone());
    if changes.validate().is_err() {
        let view = PostFormView {
            editing: Some(id),
            title,
            content,
            error: Some(MISSING_FIELDS.to_string()),
        };
        return Ok(html(
            StatusCode::UNPROCESSABLE_ENTITY,
            views::post_form_page(&view),
        ));
    }

    match state.posts.update(id, changes).await? {
        Some(post) => {
            tracing::info!(post_id = %post.id, "Post updated from form");
            Ok(see_other(DASHBOARD))
        }
        None => Ok(post_not_found()),
    }
}

/// POST /dashboard/{id}/delete
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    if state.posts.delete(id.clone()).await? {
        tracing::info!(post_id = %id, "Post deleted from dashboard");
    }
    Ok(see_other(DASHBOARD))
}

/// Fallback for unknown paths, including the unimplemented `/login`.
pub async fn not_found() -> HttpResponse {
    html(StatusCode::NOT_FOUND, views::not_found_page())
}
