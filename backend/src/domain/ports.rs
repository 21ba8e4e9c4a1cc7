//! Domain ports defining the edge of the application.
//!
//! The whole persistent surface hangs off one façade: every data operation
//! is a narrow, single-purpose method rather than a generic query interface,
//! and adapters map their failures into the strongly typed [`StorageError`]
//! instead of returning `anyhow::Result`.

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    CommentWithAuthor, Community, Error, FeedPost, Friendship, FriendshipStatus, Game,
    LibraryEntry, LibraryEntryWithGame, NewComment, NewCommunity, NewGame, NewLibraryEntry,
    NewNotification, Notification, OnlineStatus, PendingFriendRequest, Post, PostComment,
    ProfileUpdate, UpsertUser, User, ValidatedPost,
};

/// Failures raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Connection could not be established or was lost mid-operation.
    #[error("storage connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("storage query failed: {message}")]
    Query { message: String },
    /// The write collided with a uniqueness constraint.
    #[error("storage conflict: {message}")]
    Conflict { message: String },
}

impl StorageError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

impl From<StorageError> for Error {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Conflict { message } => Error::conflict(message),
            StorageError::Connection { .. } | StorageError::Query { .. } => {
                Error::internal(error.to_string())
            }
        }
    }
}

/// The storage façade: sole boundary between the application and persistent
/// state.
///
/// Reads return joined, denormalized views ordered by recency or member
/// count. Writes pair row mutations with denormalized counter adjustments
/// inside one transaction per operation. Like/join/friend-request writes
/// perform no pre-existence check: repeated calls insert duplicate rows,
/// except tournament joins where the schema's unique constraint rejects the
/// second attempt with [`StorageError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    // --- users ---

    /// Fetch a user by id.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StorageError>;

    /// Insert a user or, on username conflict, merge the identity fields
    /// onto the existing row and refresh `updated_at`.
    async fn upsert_user(&self, user: UpsertUser) -> Result<User, StorageError>;

    /// Apply a partial profile update and return the refreshed row.
    async fn update_user_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, StorageError>;

    /// Persist an online-status ping.
    async fn update_online_status(
        &self,
        id: Uuid,
        status: OnlineStatus,
    ) -> Result<(), StorageError>;

    /// Case-insensitive substring search over username and real names.
    async fn search_users(&self, query: &str) -> Result<Vec<User>, StorageError>;

    // --- games ---

    /// All active catalogue games, name descending.
    async fn all_games(&self) -> Result<Vec<Game>, StorageError>;

    /// Fetch a game by id, active or not.
    async fn get_game(&self, id: Uuid) -> Result<Option<Game>, StorageError>;

    /// Create a catalogue entry.
    async fn create_game(&self, game: NewGame) -> Result<Game, StorageError>;

    /// Case-insensitive substring search over active game names.
    async fn search_games(&self, query: &str) -> Result<Vec<Game>, StorageError>;

    // --- communities ---

    /// All communities, most members first.
    async fn all_communities(&self) -> Result<Vec<Community>, StorageError>;

    /// Fetch a community by id.
    async fn get_community(&self, id: Uuid) -> Result<Option<Community>, StorageError>;

    /// Create a community owned by `admin_user_id`.
    async fn create_community(
        &self,
        admin_user_id: Uuid,
        community: NewCommunity,
    ) -> Result<Community, StorageError>;

    /// Communities scoped to a game, most members first.
    async fn communities_by_game(&self, game_id: Uuid) -> Result<Vec<Community>, StorageError>;

    /// Insert a membership row and bump `member_count`.
    async fn join_community(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StorageError>;

    /// Delete the membership rows for the pair and decrement `member_count`.
    async fn leave_community(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StorageError>;

    /// Communities the user belongs to.
    async fn user_communities(&self, user_id: Uuid) -> Result<Vec<Community>, StorageError>;

    // --- posts ---

    /// The global feed: every post joined with its author and optional game
    /// and community tags, newest first.
    async fn all_posts(&self) -> Result<Vec<FeedPost>, StorageError>;

    /// Fetch a post by id.
    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, StorageError>;

    /// Insert a validated post.
    async fn create_post(&self, post: ValidatedPost) -> Result<Post, StorageError>;

    /// Posts authored by a user, newest first.
    async fn user_posts(&self, user_id: Uuid) -> Result<Vec<Post>, StorageError>;

    /// Posts tagged to a community, newest first.
    async fn community_posts(&self, community_id: Uuid) -> Result<Vec<Post>, StorageError>;

    /// Posts from every community the user belongs to, newest first.
    async fn community_feed(&self, user_id: Uuid) -> Result<Vec<Post>, StorageError>;

    /// Delete a post if it belongs to `user_id`; reports whether a row went
    /// away.
    async fn delete_post(&self, id: Uuid, user_id: Uuid) -> Result<bool, StorageError>;

    /// Insert a like row and bump `likes_count`.
    async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<(), StorageError>;

    /// Delete the like rows for the pair and decrement `likes_count`.
    async fn unlike_post(&self, post_id: Uuid, user_id: Uuid) -> Result<(), StorageError>;

    /// Whether the user has at least one like row on the post.
    async fn is_post_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, StorageError>;

    // --- comments ---

    /// Comments on a post joined with their authors, newest first.
    async fn post_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, StorageError>;

    /// Insert a comment and bump the post's `comments_count`.
    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        comment: NewComment,
    ) -> Result<PostComment, StorageError>;

    // --- friendships ---

    /// Users with an accepted friendship row involving `user_id`, regardless
    /// of which side sent the request.
    async fn friends(&self, user_id: Uuid) -> Result<Vec<User>, StorageError>;

    /// [`Storage::friends`] filtered to currently-online users.
    async fn online_friends(&self, user_id: Uuid) -> Result<Vec<User>, StorageError>;

    /// Insert a pending request row.
    async fn send_friend_request(
        &self,
        requester_id: Uuid,
        addressee_id: Uuid,
    ) -> Result<Friendship, StorageError>;

    /// Transition a request to accepted.
    async fn accept_friend_request(&self, friendship_id: Uuid) -> Result<(), StorageError>;

    /// Delete the request row entirely; no history is retained.
    async fn reject_friend_request(&self, friendship_id: Uuid) -> Result<(), StorageError>;

    /// Incoming pending requests joined with their requesters.
    async fn friend_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PendingFriendRequest>, StorageError>;

    /// Status of whichever friendship row links the pair, if any.
    async fn friendship_status(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Option<FriendshipStatus>, StorageError>;

    // --- game library ---

    /// Library entries joined with their games, newest first.
    async fn user_games(&self, user_id: Uuid) -> Result<Vec<LibraryEntryWithGame>, StorageError>;

    /// Insert a library entry.
    async fn add_game_to_library(
        &self,
        user_id: Uuid,
        entry: NewLibraryEntry,
    ) -> Result<LibraryEntry, StorageError>;

    /// Delete the library rows for the pair.
    async fn remove_game_from_library(
        &self,
        user_id: Uuid,
        game_id: Uuid,
    ) -> Result<(), StorageError>;

    // --- notifications ---

    /// A user's notifications, newest first.
    async fn user_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>, StorageError>;

    /// Insert a notification.
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StorageError>;

    /// Flag a notification as read.
    async fn mark_notification_read(&self, id: Uuid) -> Result<(), StorageError>;

    /// Count of unread notifications.
    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, StorageError>;

    // --- tournaments ---

    /// Insert a participant row; the composite unique constraint makes the
    /// second join for a pair fail with [`StorageError::Conflict`].
    async fn join_tournament(
        &self,
        tournament_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StorageError>;

    /// Delete the participant row for the pair.
    async fn leave_tournament(
        &self,
        tournament_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StorageError>;

    /// Whether the pair has a participant row.
    async fn is_tournament_participant(
        &self,
        tournament_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(StorageError::connection("pool exhausted"), ErrorCode::InternalError)]
    #[case(StorageError::query("syntax error"), ErrorCode::InternalError)]
    #[case(StorageError::conflict("duplicate participant"), ErrorCode::Conflict)]
    fn storage_errors_map_to_domain_codes(
        #[case] error: StorageError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn conflict_keeps_its_message() {
        let err = Error::from(StorageError::conflict("duplicate participant"));
        assert_eq!(err.message(), "duplicate participant");
    }
}
