//! Game catalogue entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalogue entry for a game. Seeded by administrators; inactive games are
/// hidden from listings and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub name: String,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
}
