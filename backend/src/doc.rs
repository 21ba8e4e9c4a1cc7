//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::error::ApiError;
use crate::api::friends::{FriendRequestBody, FriendshipStatusResponse};
use crate::api::notifications::UnreadCountResponse;
use crate::api::posts::LikedResponse;
use crate::api::tournaments::ParticipationResponse;
use crate::api::users::LoginRequest;
use crate::domain::{
    AchievementMetadata, ClipMetadata, CommentWithAuthor, Community, ErrorCode, FeedPost,
    Friendship, FriendshipStatus, Game, LibraryEntry, LibraryEntryWithGame, NewComment,
    NewCommunity, NewGame, NewLibraryEntry, NewPost, Notification, NotificationKind, OnlineStatus,
    PendingFriendRequest, Post, PostComment, PostKind, PostMetadata, ProfileUpdate,
    TournamentMetadata, TournamentStatus, User,
};

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::users::login,
        crate::api::users::logout,
        crate::api::users::current_user,
        crate::api::users::update_profile,
        crate::api::users::update_status,
        crate::api::users::search_users,
        crate::api::games::list_games,
        crate::api::games::create_game,
        crate::api::games::search_games,
        crate::api::games::get_game,
        crate::api::games::game_communities,
        crate::api::communities::list_communities,
        crate::api::communities::create_community,
        crate::api::communities::get_community,
        crate::api::communities::community_posts,
        crate::api::communities::join_community,
        crate::api::communities::leave_community,
        crate::api::communities::my_communities,
        crate::api::posts::list_posts,
        crate::api::posts::community_feed,
        crate::api::posts::create_post,
        crate::api::posts::get_post,
        crate::api::posts::delete_post,
        crate::api::posts::like_post,
        crate::api::posts::unlike_post,
        crate::api::posts::post_liked,
        crate::api::posts::list_comments,
        crate::api::posts::create_comment,
        crate::api::posts::user_posts,
        crate::api::friends::list_friends,
        crate::api::friends::online_friends,
        crate::api::friends::list_requests,
        crate::api::friends::send_request,
        crate::api::friends::accept_request,
        crate::api::friends::reject_request,
        crate::api::friends::friendship_status,
        crate::api::library::my_games,
        crate::api::library::add_game,
        crate::api::library::remove_game,
        crate::api::notifications::list_notifications,
        crate::api::notifications::mark_read,
        crate::api::notifications::unread_count,
        crate::api::tournaments::join_tournament,
        crate::api::tournaments::leave_tournament,
        crate::api::tournaments::participation,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        User,
        LoginRequest,
        ProfileUpdate,
        OnlineStatus,
        Game,
        NewGame,
        Community,
        NewCommunity,
        Post,
        NewPost,
        FeedPost,
        PostKind,
        PostMetadata,
        ClipMetadata,
        AchievementMetadata,
        TournamentMetadata,
        TournamentStatus,
        PostComment,
        NewComment,
        CommentWithAuthor,
        Friendship,
        FriendshipStatus,
        PendingFriendRequest,
        FriendRequestBody,
        FriendshipStatusResponse,
        LibraryEntry,
        NewLibraryEntry,
        LibraryEntryWithGame,
        Notification,
        NotificationKind,
        LikedResponse,
        UnreadCountResponse,
        ParticipationResponse,
    )),
    tags(
        (name = "users", description = "Login, profile, presence, search"),
        (name = "games", description = "Game catalogue"),
        (name = "communities", description = "Communities and membership"),
        (name = "posts", description = "Feed, likes, comments"),
        (name = "friends", description = "Friendship requests and listings"),
        (name = "library", description = "Per-user game library"),
        (name = "notifications", description = "Per-user notifications"),
        (name = "tournaments", description = "Tournament participation"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_builds_and_covers_the_api() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;
        assert!(paths.contains_key("/api/v1/posts"));
        assert!(paths.contains_key("/api/v1/friends/online"));
        assert!(paths.contains_key("/api/v1/tournaments/{postId}/participants"));
        assert!(paths.contains_key("/health/ready"));
    }
}
