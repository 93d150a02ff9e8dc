//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260301000001_create_users_and_sessions.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ARTIST: &str = "artist";
