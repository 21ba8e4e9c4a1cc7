//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered user accounts with profile, gamification, and presence
    /// columns. `username` is unique; rows are created by the login upsert.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Nullable<Varchar>,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        profile_image_url -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        xp_points -> Int4,
        level -> Int4,
        gaming_platforms -> Array<Text>,
        twitch_username -> Nullable<Varchar>,
        youtube_username -> Nullable<Varchar>,
        discord_username -> Nullable<Varchar>,
        is_online -> Bool,
        current_game -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Game catalogue, seeded by administrators and read-only otherwise.
    games (id) {
        id -> Uuid,
        name -> Varchar,
        genre -> Nullable<Varchar>,
        platform -> Nullable<Varchar>,
        cover_image_url -> Nullable<Varchar>,
        description -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Communities, optionally scoped to a game. `member_count` is a
    /// denormalized aggregate maintained by the join/leave write path.
    communities (id) {
        id -> Uuid,
        game_id -> Nullable<Uuid>,
        name -> Varchar,
        description -> Nullable<Text>,
        admin_user_id -> Uuid,
        member_count -> Int4,
        image_url -> Nullable<Varchar>,
        is_private -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Feed posts. `post_type` discriminates the jsonb `metadata` payload;
    /// the three counters are denormalized aggregates.
    posts (id) {
        id -> Uuid,
        user_id -> Uuid,
        community_id -> Nullable<Uuid>,
        game_id -> Nullable<Uuid>,
        content -> Text,
        media_urls -> Array<Text>,
        post_type -> Varchar,
        metadata -> Nullable<Jsonb>,
        likes_count -> Int4,
        comments_count -> Int4,
        shares_count -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed friendship requests. No uniqueness guard on the user pair.
    friendships (id) {
        id -> Uuid,
        requester_id -> Uuid,
        addressee_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user game library entries.
    user_games (id) {
        id -> Uuid,
        user_id -> Uuid,
        game_id -> Uuid,
        achievements -> Array<Text>,
        hours_played -> Int4,
        is_favorite -> Bool,
        added_at -> Timestamptz,
    }
}

diesel::table! {
    /// Post like rows. Duplicates are possible; see `tournament_participants`
    /// for the one guarded join table.
    post_likes (id) {
        id -> Uuid,
        post_id -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Post comment rows.
    post_comments (id) {
        id -> Uuid,
        post_id -> Uuid,
        user_id -> Uuid,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Community membership rows. Duplicates are possible.
    community_members (id) {
        id -> Uuid,
        community_id -> Uuid,
        user_id -> Uuid,
        role -> Varchar,
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user notifications with a jsonb payload.
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        kind -> Varchar,
        title -> Varchar,
        message -> Nullable<Text>,
        data -> Nullable<Jsonb>,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tournament participation rows, keyed by the tournament post. The
    /// composite unique constraint is the only duplicate guard in the schema.
    tournament_participants (id) {
        id -> Uuid,
        tournament_id -> Uuid,
        user_id -> Uuid,
        joined_at -> Timestamptz,
    }
}

diesel::joinable!(communities -> games (game_id));
diesel::joinable!(posts -> users (user_id));
diesel::joinable!(posts -> games (game_id));
diesel::joinable!(posts -> communities (community_id));
diesel::joinable!(user_games -> users (user_id));
diesel::joinable!(user_games -> games (game_id));
diesel::joinable!(post_likes -> posts (post_id));
diesel::joinable!(post_likes -> users (user_id));
diesel::joinable!(post_comments -> posts (post_id));
diesel::joinable!(post_comments -> users (user_id));
diesel::joinable!(community_members -> communities (community_id));
diesel::joinable!(community_members -> users (user_id));
diesel::joinable!(notifications -> users (user_id));
diesel::joinable!(tournament_participants -> posts (tournament_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    games,
    communities,
    posts,
    friendships,
    user_games,
    post_likes,
    post_comments,
    community_members,
    notifications,
    tournament_participants,
);
