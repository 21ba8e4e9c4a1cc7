//! Friendship API handlers.
//!
//! The state machine is small on purpose: request creates a pending row,
//! accept flips it, reject deletes it outright. There is no dedup on
//! sending, so repeated requests pile up pending rows.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::api::state::HttpState;
use crate::domain::{
    Error, Friendship, FriendshipStatus, NewNotification, NotificationKind, PendingFriendRequest,
    User,
};

/// Body of a friend-request creation call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestBody {
    pub addressee_id: Uuid,
}

/// Friendship status between the caller and another user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipStatusResponse {
    pub status: Option<FriendshipStatus>,
}

/// Users with an accepted friendship involving the caller, regardless of
/// which side sent the request.
#[utoipa::path(
    get,
    path = "/api/v1/friends",
    responses(
        (status = 200, description = "Friends", body = [User]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["friends"],
    operation_id = "listFriends"
)]
#[get("/friends")]
pub async fn list_friends(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    let user_id = session.require_user_id()?;
    let friends = state.storage().friends(user_id).await?;
    Ok(web::Json(friends))
}

/// Friends currently flagged online.
#[utoipa::path(
    get,
    path = "/api/v1/friends/online",
    responses(
        (status = 200, description = "Online friends", body = [User]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["friends"],
    operation_id = "onlineFriends"
)]
#[get("/friends/online")]
pub async fn online_friends(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    let user_id = session.require_user_id()?;
    let friends = state.storage().online_friends(user_id).await?;
    Ok(web::Json(friends))
}

/// Incoming pending requests joined with their requesters.
#[utoipa::path(
    get,
    path = "/api/v1/friends/requests",
    responses(
        (status = 200, description = "Pending requests", body = [PendingFriendRequest]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["friends"],
    operation_id = "listFriendRequests"
)]
#[get("/friends/requests")]
pub async fn list_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PendingFriendRequest>>> {
    let user_id = session.require_user_id()?;
    let requests = state.storage().friend_requests(user_id).await?;
    Ok(web::Json(requests))
}

/// Send a friend request and notify the addressee.
#[utoipa::path(
    post,
    path = "/api/v1/friends/requests",
    request_body = FriendRequestBody,
    responses(
        (status = 200, description = "Created request", body = Friendship),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["friends"],
    operation_id = "sendFriendRequest"
)]
#[post("/friends/requests")]
pub async fn send_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FriendRequestBody>,
) -> ApiResult<web::Json<Friendship>> {
    let user_id = session.require_user_id()?;
    let addressee_id = payload.addressee_id;
    if addressee_id == user_id {
        return Err(Error::invalid_request("cannot befriend yourself").into());
    }
    let friendship = state
        .storage()
        .send_friend_request(user_id, addressee_id)
        .await?;
    state
        .storage()
        .create_notification(NewNotification {
            user_id: addressee_id,
            kind: NotificationKind::FriendRequest,
            title: "New friend request".to_owned(),
            message: None,
            data: Some(json!({ "friendshipId": friendship.id, "requesterId": user_id })),
        })
        .await?;
    Ok(web::Json(friendship))
}

/// Accept an incoming request, transitioning it from pending to accepted.
#[utoipa::path(
    post,
    path = "/api/v1/friends/requests/{id}/accept",
    params(("id" = Uuid, Path, description = "Friendship id")),
    responses(
        (status = 204, description = "Accepted"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["friends"],
    operation_id = "acceptFriendRequest"
)]
#[post("/friends/requests/{id}/accept")]
pub async fn accept_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    state.storage().accept_friend_request(*path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Reject an incoming request. The row is deleted outright; no history is
/// retained.
#[utoipa::path(
    delete,
    path = "/api/v1/friends/requests/{id}",
    params(("id" = Uuid, Path, description = "Friendship id")),
    responses(
        (status = 204, description = "Rejected and removed"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["friends"],
    operation_id = "rejectFriendRequest"
)]
#[delete("/friends/requests/{id}")]
pub async fn reject_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    state.storage().reject_friend_request(*path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Status of whichever friendship row links the caller and another user.
#[utoipa::path(
    get,
    path = "/api/v1/friends/status/{userId}",
    params(("userId" = Uuid, Path, description = "Other user id")),
    responses(
        (status = 200, description = "Friendship status", body = FriendshipStatusResponse),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["friends"],
    operation_id = "friendshipStatus"
)]
#[get("/friends/status/{user_id}")]
pub async fn friendship_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<FriendshipStatusResponse>> {
    let user_id = session.require_user_id()?;
    let status = state.storage().friendship_status(user_id, *path).await?;
    Ok(web::Json(FriendshipStatusResponse { status }))
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

    fn sample_friendship(requester: Uuid, addressee: Uuid, status: FriendshipStatus) -> Friendship {
        Friendship {
            id: Uuid::new_v4(),
            requester_id: requester,
            addressee_id: addressee,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
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
            .service(list_friends)
            .service(online_friends)
            .service(list_requests)
            .service(send_request)
            .service(accept_request)
            .service(reject_request)
            .service(friendship_status)
    }

    #[actix_web::test]
    async fn sending_a_request_notifies_the_addressee() {
        let requester = Uuid::new_v4();
        let addressee = Uuid::new_v4();

        let mut storage = MockStorage::new();
        storage
            .expect_send_friend_request()
            .withf(move |from, to| *from == requester && *to == addressee)
            .times(1)
            .returning(|from, to| {
                Ok(sample_friendship(from, to, FriendshipStatus::Pending))
            });
        storage
            .expect_create_notification()
            .withf(move |notification| {
                notification.user_id == addressee
                    && notification.kind == NotificationKind::FriendRequest
            })
            .times(1)
            .returning(|notification| {
                Ok(crate::domain::Notification {
                    id: Uuid::new_v4(),
                    user_id: notification.user_id,
                    kind: notification.kind,
                    title: notification.title,
                    message: notification.message,
                    data: notification.data,
                    is_read: false,
                    created_at: Utc::now(),
                })
            });

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, requester).await;

        let req = test::TestRequest::post()
            .uri("/friends/requests")
            .cookie(cookie)
            .set_json(serde_json::json!({ "addresseeId": addressee }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Friendship = test::read_body_json(res).await;
        assert_eq!(body.status, FriendshipStatus::Pending);
    }

    #[actix_web::test]
    async fn befriending_yourself_is_rejected() {
        let user_id = Uuid::new_v4();
        let app = test::init_service(test_app(MockStorage::new())).await;
        let cookie = authenticate(&app, user_id).await;

        let req = test::TestRequest::post()
            .uri("/friends/requests")
            .cookie(cookie)
            .set_json(serde_json::json!({ "addresseeId": user_id }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn accept_then_reject_reach_storage() {
        let friendship_id = Uuid::new_v4();
        let mut storage = MockStorage::new();
        storage
            .expect_accept_friend_request()
            .withf(move |id| *id == friendship_id)
            .times(1)
            .returning(|_| Ok(()));
        storage
            .expect_reject_friend_request()
            .withf(move |id| *id == friendship_id)
            .times(1)
            .returning(|_| Ok(()));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let accept = test::TestRequest::post()
            .uri(&format!("/friends/requests/{friendship_id}/accept"))
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(
            test::call_service(&app, accept).await.status(),
            StatusCode::NO_CONTENT
        );

        let reject = test::TestRequest::delete()
            .uri(&format!("/friends/requests/{friendship_id}"))
            .cookie(cookie)
            .to_request();
        assert_eq!(
            test::call_service(&app, reject).await.status(),
            StatusCode::NO_CONTENT
        );
    }

    #[actix_web::test]
    async fn status_is_null_for_strangers() {
        let mut storage = MockStorage::new();
        storage.expect_friendship_status().returning(|_, _| Ok(None));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/friends/status/{}", Uuid::new_v4()))
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["status"], serde_json::Value::Null);
    }

    #[actix_web::test]
    async fn online_friends_only_returns_online_users() {
        let caller = Uuid::new_v4();
        let mut storage = MockStorage::new();
        storage
            .expect_online_friends()
            .withf(move |id| *id == caller)
            .times(1)
            .returning(|_| Ok(vec![]));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, caller).await;

        let req = test::TestRequest::get()
            .uri("/friends/online")
            .cookie(cookie)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
