//! Community API handlers: listings, creation, and membership.

use actix_web::{HttpResponse, delete, get, post, web};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::api::state::HttpState;
use crate::domain::{Community, Error, NewCommunity, Post};

/// List all communities, most members first.
#[utoipa::path(
    get,
    path = "/api/v1/communities",
    responses(
        (status = 200, description = "Communities", body = [Community]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["communities"],
    operation_id = "listCommunities"
)]
#[get("/communities")]
pub async fn list_communities(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Community>>> {
    session.require_user_id()?;
    let communities = state.storage().all_communities().await?;
    Ok(web::Json(communities))
}

/// Create a community owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/communities",
    request_body = NewCommunity,
    responses(
        (status = 200, description = "Created community", body = Community),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["communities"],
    operation_id = "createCommunity"
)]
#[post("/communities")]
pub async fn create_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewCommunity>,
) -> ApiResult<web::Json<Community>> {
    let user_id = session.require_user_id()?;
    let request = payload.into_inner();
    if request.name.trim().is_empty() {
        return Err(Error::invalid_request("community name must not be empty").into());
    }
    let community = state.storage().create_community(user_id, request).await?;
    Ok(web::Json(community))
}

/// Fetch one community.
#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}",
    params(("id" = Uuid, Path, description = "Community id")),
    responses(
        (status = 200, description = "Community", body = Community),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 404, description = "Unknown community", body = ApiError)
    ),
    tags = ["communities"],
    operation_id = "getCommunity"
)]
#[get("/communities/{id}")]
pub async fn get_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Community>> {
    session.require_user_id()?;
    let community = state
        .storage()
        .get_community(*path)
        .await?
        .ok_or_else(|| Error::not_found("community not found"))?;
    Ok(web::Json(community))
}

/// Posts tagged to a community, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}/posts",
    params(("id" = Uuid, Path, description = "Community id")),
    responses(
        (status = 200, description = "Community posts", body = [Post]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["communities"],
    operation_id = "communityPosts"
)]
#[get("/communities/{id}/posts")]
pub async fn community_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Post>>> {
    session.require_user_id()?;
    let posts = state.storage().community_posts(*path).await?;
    Ok(web::Json(posts))
}

/// Join a community; inserts a membership row and bumps the member counter.
/// No dedup: joining twice inserts a second row and double-counts.
#[utoipa::path(
    post,
    path = "/api/v1/communities/{id}/members",
    params(("id" = Uuid, Path, description = "Community id")),
    responses(
        (status = 204, description = "Joined"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["communities"],
    operation_id = "joinCommunity"
)]
#[post("/communities/{id}/members")]
pub async fn join_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.storage().join_community(*path, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Leave a community; removes the membership rows and decrements the member
/// counter.
#[utoipa::path(
    delete,
    path = "/api/v1/communities/{id}/members",
    params(("id" = Uuid, Path, description = "Community id")),
    responses(
        (status = 204, description = "Left"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["communities"],
    operation_id = "leaveCommunity"
)]
#[delete("/communities/{id}/members")]
pub async fn leave_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.storage().leave_community(*path, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Communities the caller belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/communities",
    responses(
        (status = 200, description = "Joined communities", body = [Community]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["communities"],
    operation_id = "myCommunities"
)]
#[get("/users/me/communities")]
pub async fn my_communities(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Community>>> {
    let user_id = session.require_user_id()?;
    let communities = state.storage().user_communities(user_id).await?;
    Ok(web::Json(communities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_utils::{authenticate, session_seed_route, test_session_middleware};
    use crate::domain::ports::MockStorage;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::Utc;
    use std::sync::Arc;

    fn sample_community(admin: Uuid, name: &str) -> Community {
        Community {
            id: Uuid::new_v4(),
            game_id: None,
            name: name.to_owned(),
            description: None,
            admin_user_id: admin,
            member_count: 0,
            image_url: None,
            is_private: false,
            created_at: Utc::now(),
        }
    }

    fn test_app(
        storage: MockStorage,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(HttpState::new(Arc::new(storage))))
            .service(session_seed_route())
            .service(list_communities)
            .service(create_community)
            .service(get_community)
            .service(community_posts)
            .service(join_community)
            .service(leave_community)
            .service(my_communities)
    }

    #[actix_web::test]
    async fn create_sets_the_caller_as_admin() {
        let user_id = Uuid::new_v4();
        let mut storage = MockStorage::new();
        storage
            .expect_create_community()
            .withf(move |admin, request| *admin == user_id && request.name == "Tarkov Raiders")
            .times(1)
            .returning(|admin, request| Ok(sample_community(admin, &request.name)));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, user_id).await;

        let req = test::TestRequest::post()
            .uri("/communities")
            .cookie(cookie)
            .set_json(serde_json::json!({ "name": "Tarkov Raiders" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Community = test::read_body_json(res).await;
        assert_eq!(body.admin_user_id, user_id);
    }

    #[actix_web::test]
    async fn join_and_leave_hit_storage_once_each() {
        let user_id = Uuid::new_v4();
        let community_id = Uuid::new_v4();
        let mut storage = MockStorage::new();
        storage
            .expect_join_community()
            .withf(move |community, user| *community == community_id && *user == user_id)
            .times(1)
            .returning(|_, _| Ok(()));
        storage
            .expect_leave_community()
            .withf(move |community, user| *community == community_id && *user == user_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, user_id).await;

        let join = test::TestRequest::post()
            .uri(&format!("/communities/{community_id}/members"))
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(
            test::call_service(&app, join).await.status(),
            StatusCode::NO_CONTENT
        );

        let leave = test::TestRequest::delete()
            .uri(&format!("/communities/{community_id}/members"))
            .cookie(cookie)
            .to_request();
        assert_eq!(
            test::call_service(&app, leave).await.status(),
            StatusCode::NO_CONTENT
        );
    }

    #[actix_web::test]
    async fn unknown_community_is_404() {
        let mut storage = MockStorage::new();
        storage.expect_get_community().returning(|_| Ok(None));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/communities/{}", Uuid::new_v4()))
            .cookie(cookie)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
