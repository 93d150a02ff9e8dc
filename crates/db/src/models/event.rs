//! Event log entity model.

use serde::Serialize;
use sqlx::FromRow;

use plinth_core::types::{DbId, Timestamp};

/// A row from the append-only `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    /// Dot-separated event name, e.g. `"registration.submitted"`.
    pub event_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
