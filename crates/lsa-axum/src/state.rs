//! Shared application state type.

use crate::bootstrap::AdapterContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Read-only after construction; handlers never mutate it.
pub type AppState = Arc<AdapterContext>;
