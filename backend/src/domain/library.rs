//! Game-library entries linking users to catalogue games.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Game;

/// A user's library entry for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub game_id: Uuid,
    pub achievements: Vec<String>,
    pub hours_played: i32,
    pub is_favorite: bool,
    pub added_at: DateTime<Utc>,
}

/// Payload for adding a game to the caller's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewLibraryEntry {
    pub game_id: Uuid,
    #[serde(default)]
    pub hours_played: i32,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// A library entry joined with its game, as listed on the library page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntryWithGame {
    #[serde(flatten)]
    pub entry: LibraryEntry,
    pub game: Game,
}
