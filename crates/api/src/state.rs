use std::sync::Arc;

use plinth_events::EventBus;
use plinth_payments::PaymentsClient;
use plinth_storage::StorageClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: plinth_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing domain events.
    pub event_bus: Arc<EventBus>,
    /// Object storage client. `None` when `S3_BUCKET` is unset; image
    /// uploads return 503 in that case.
    pub storage: Option<StorageClient>,
    /// Payment gateway client. `None` when `PSP_API_KEY` is unset; checkout
    /// creation returns 503 (manual mark-paid still works).
    pub payments: Option<PaymentsClient>,
}
