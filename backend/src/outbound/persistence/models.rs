//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations. Generated columns
//! (`id`, creation timestamps) are omitted from the insertable structs so
//! the database defaults apply.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    communities, community_members, friendships, games, notifications, post_comments, post_likes,
    posts, tournament_participants, user_games, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub bio: Option<String>,
    pub xp_points: i32,
    pub level: i32,
    pub gaming_platforms: Vec<String>,
    pub twitch_username: Option<String>,
    pub youtube_username: Option<String>,
    pub discord_username: Option<String>,
    pub is_online: bool,
    pub current_game: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for the login upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Changeset for partial profile updates; `None` fields stay untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub bio: Option<String>,
    pub xp_points: Option<i32>,
    pub level: Option<i32>,
    pub gaming_platforms: Option<Vec<String>>,
    pub twitch_username: Option<String>,
    pub youtube_username: Option<String>,
    pub discord_username: Option<String>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

/// Row struct for reading from the games table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GameRow {
    pub id: Uuid,
    pub name: String,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating catalogue entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = games)]
pub(crate) struct NewGameRow {
    pub name: String,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Communities
// ---------------------------------------------------------------------------

/// Row struct for reading from the communities table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = communities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommunityRow {
    pub id: Uuid,
    pub game_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub admin_user_id: Uuid,
    pub member_count: i32,
    pub image_url: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating communities; `member_count` starts at the
/// schema default of zero.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = communities)]
pub(crate) struct NewCommunityRow {
    pub game_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub admin_user_id: Uuid,
    pub image_url: Option<String>,
    pub is_private: bool,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: Option<Uuid>,
    pub game_id: Option<Uuid>,
    pub content: String,
    pub media_urls: Vec<String>,
    pub post_type: String,
    pub metadata: Option<serde_json::Value>,
    pub likes_count: i32,
    pub comments_count: i32,
    pub shares_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating posts; the counters start at the schema
/// default of zero.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow {
    pub user_id: Uuid,
    pub community_id: Option<Uuid>,
    pub game_id: Option<Uuid>,
    pub content: String,
    pub media_urls: Vec<String>,
    pub post_type: String,
    pub metadata: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Friendships
// ---------------------------------------------------------------------------

/// Row struct for reading from the friendships table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = friendships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FriendshipRow {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub addressee_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating friend requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = friendships)]
pub(crate) struct NewFriendshipRow {
    pub requester_id: Uuid,
    pub addressee_id: Uuid,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Game library
// ---------------------------------------------------------------------------

/// Row struct for reading from the user_games table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserGameRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub game_id: Uuid,
    pub achievements: Vec<String>,
    pub hours_played: i32,
    pub is_favorite: bool,
    pub added_at: DateTime<Utc>,
}

/// Insertable struct for creating library entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_games)]
pub(crate) struct NewUserGameRow {
    pub user_id: Uuid,
    pub game_id: Uuid,
    pub achievements: Vec<String>,
    pub hours_played: i32,
    pub is_favorite: bool,
}

// ---------------------------------------------------------------------------
// Join tables
// ---------------------------------------------------------------------------

/// Insertable struct for like rows.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = post_likes)]
pub(crate) struct NewPostLikeRow {
    pub post_id: Uuid,
    pub user_id: Uuid,
}

/// Row struct for reading from the post_comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostCommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for comment rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_comments)]
pub(crate) struct NewPostCommentRow {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
}

/// Insertable struct for membership rows; `role` follows the schema default.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = community_members)]
pub(crate) struct NewCommunityMemberRow {
    pub community_id: Uuid,
    pub user_id: Uuid,
}

/// Insertable struct for tournament participant rows.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = tournament_participants)]
pub(crate) struct NewTournamentParticipantRow {
    pub tournament_id: Uuid,
    pub user_id: Uuid,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Row struct for reading from the notifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for notification rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow {
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
}
