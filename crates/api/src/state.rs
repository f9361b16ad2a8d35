use std::sync::Arc;

use crate::config::ServerConfig;
use crate::payments::PaymentGateway;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; everything heavy sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: sadaqah_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Platform events for admin notifications.
    pub event_bus: Arc<sadaqah_events::EventBus>,
    /// Payment provider client; a fake in tests.
    pub payments: Arc<dyn PaymentGateway>,
}
