//! JSON API over the post repository.

use actix_web::{HttpResponse, web};

use writer_core::DomainError;
use writer_core::domain::{NewPost, Post, PostChanges};
use writer_core::ports::{BaseRepository, PostRepository};
use writer_shared::ApiResponse;
use writer_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        created_at: post.created_at.to_rfc3339(),
        user_id: post.user_id,
    }
}

fn not_found(id: String) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id.clone())
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user_id = req
        .user_id
        .unwrap_or_else(|| state.default_author.clone());

    let draft = NewPost::new(req.title, req.content, user_id);
    draft.validate()?;

    let post = state.posts.create(draft).await?;
    tracing::info!(request_id = %request_id.as_str(), post_id = %post.id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post created",
    )))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        user_id: req.user_id,
    };
    changes.validate()?;

    let post = state
        .posts
        .update(id.clone(), changes)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(request_id = %request_id.as_str(), post_id = %post.id, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// DELETE /api/posts/{id}
///
/// Succeeds whether or not the post existed.
pub async fn delete_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state.posts.delete(id.clone()).await?;
    tracing::info!(request_id = %request_id.as_str(), post_id = %id, removed, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
