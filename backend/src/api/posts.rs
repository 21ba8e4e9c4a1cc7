//! Post API handlers: the feed, authoring, likes, and comments.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::api::state::HttpState;
use crate::domain::{
    CommentWithAuthor, Error, FeedPost, NewComment, NewNotification, NewPost, NotificationKind,
    Post, PostComment, ValidatedPost,
};

/// Whether the caller has liked a post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikedResponse {
    pub liked: bool,
}

/// The global feed: posts joined with author and optional game/community
/// tags, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "Feed", body = [FeedPost]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FeedPost>>> {
    session.require_user_id()?;
    let posts = state.storage().all_posts().await?;
    Ok(web::Json(posts))
}

/// Posts from every community the caller belongs to, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts/feed",
    responses(
        (status = 200, description = "Community feed", body = [Post]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "communityFeed"
)]
#[get("/posts/feed")]
pub async fn community_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Post>>> {
    let user_id = session.require_user_id()?;
    let posts = state.storage().community_feed(user_id).await?;
    Ok(web::Json(posts))
}

/// Create a post. The metadata payload is validated against the declared
/// post type before anything touches storage.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = NewPost,
    responses(
        (status = 200, description = "Created post", body = Post),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewPost>,
) -> ApiResult<web::Json<Post>> {
    let user_id = session.require_user_id()?;
    let request = payload.into_inner();
    let post_type = request.post_type;
    let validated = ValidatedPost::from_request(user_id, request).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "postType": post_type.as_str() }))
    })?;
    let post = state.storage().create_post(validated).await?;
    Ok(web::Json(post))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 404, description = "Unknown post", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Post>> {
    session.require_user_id()?;
    let post = state
        .storage()
        .get_post(*path)
        .await?
        .ok_or_else(|| Error::not_found("post not found"))?;
    Ok(web::Json(post))
}

/// Delete the caller's own post. Posts by other authors are reported as not
/// found rather than revealing their existence.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 404, description = "No such post owned by the caller", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let deleted = state.storage().delete_post(*path, user_id).await?;
    if !deleted {
        return Err(Error::not_found("post not found").into());
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Like a post and notify its author. No dedup: liking twice inserts a
/// second row and double-counts.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/likes",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 204, description = "Liked"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "likePost"
)]
#[post("/posts/{id}/likes")]
pub async fn like_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let post_id = *path;
    state.storage().like_post(post_id, user_id).await?;
    if let Some(post) = state.storage().get_post(post_id).await? {
        if post.user_id != user_id {
            state
                .storage()
                .create_notification(NewNotification {
                    user_id: post.user_id,
                    kind: NotificationKind::PostLike,
                    title: "Your post got a like".to_owned(),
                    message: None,
                    data: Some(json!({ "postId": post_id, "likedBy": user_id })),
                })
                .await?;
        }
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Remove the caller's like rows from a post.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/likes",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 204, description = "Unliked"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "unlikePost"
)]
#[delete("/posts/{id}/likes")]
pub async fn unlike_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.storage().unlike_post(*path, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Whether the caller has liked a post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/likes/me",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Like state", body = LikedResponse),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "isPostLiked"
)]
#[get("/posts/{id}/likes/me")]
pub async fn post_liked(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<LikedResponse>> {
    let user_id = session.require_user_id()?;
    let liked = state.storage().is_post_liked(*path, user_id).await?;
    Ok(web::Json(LikedResponse { liked }))
}

/// Comments on a post, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments", body = [CommentWithAuthor]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "listComments"
)]
#[get("/posts/{id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<CommentWithAuthor>>> {
    session.require_user_id()?;
    let comments = state.storage().post_comments(*path).await?;
    Ok(web::Json(comments))
}

/// Comment on a post and notify its author.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = NewComment,
    responses(
        (status = 200, description = "Created comment", body = PostComment),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "createComment"
)]
#[post("/posts/{id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<NewComment>,
) -> ApiResult<web::Json<PostComment>> {
    let user_id = session.require_user_id()?;
    let post_id = *path;
    let request = payload.into_inner();
    if request.content.trim().is_empty() {
        return Err(Error::invalid_request("comment must not be empty").into());
    }
    let comment = state
        .storage()
        .create_comment(post_id, user_id, request)
        .await?;
    if let Some(post) = state.storage().get_post(post_id).await? {
        if post.user_id != user_id {
            state
                .storage()
                .create_notification(NewNotification {
                    user_id: post.user_id,
                    kind: NotificationKind::Comment,
                    title: "New comment on your post".to_owned(),
                    message: None,
                    data: Some(json!({ "postId": post_id, "commentId": comment.id })),
                })
                .await?;
        }
    }
    Ok(web::Json(comment))
}

/// Posts authored by one user, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/posts",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User posts", body = [Post]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["posts"],
    operation_id = "userPosts"
)]
#[get("/users/{id}/posts")]
pub async fn user_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Post>>> {
    session.require_user_id()?;
    let posts = state.storage().user_posts(*path).await?;
    Ok(web::Json(posts))
}
