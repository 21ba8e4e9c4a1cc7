//! Community entity and creation payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A community, optionally scoped to a game.
///
/// `member_count` is a denormalized aggregate maintained by the join/leave
/// write path; it tracks, but is not guaranteed to equal, the number of
/// membership rows under concurrent writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Community {
    pub id: Uuid,
    pub game_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    /// Owner; set to the creating user.
    pub admin_user_id: Uuid,
    pub member_count: i32,
    pub image_url: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a community. The admin is taken from the session,
/// never from the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunity {
    pub game_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}
