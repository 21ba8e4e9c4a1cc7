//! User entity and the write-side shapes that mutate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Application user.
///
/// Rows are created by the login upsert and mutated by profile edits and
/// online-status pings. `xp_points` and `level` are gamification counters
/// owned by the write path, not derived on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Stable user identifier.
    pub id: Uuid,
    /// Unique handle used by the login upsert and user search.
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

/// Identity fields supplied at login; inserted or merged onto the existing
/// row keyed by `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Partial profile update; `None` fields are left untouched. The
/// gamification counters ride along with profile edits rather than having a
/// write path of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
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
}

/// Presence ping payload: online flag plus the game currently being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnlineStatus {
    pub is_online: bool,
    pub current_game: Option<String>,
}
