//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use adherence_core::AdherencePercentCalculator;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// The event-stream port is not held here: each request brings its own streams.
/// Configuration is consumed at startup and not carried into handlers.
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<dyn AdherencePercentCalculator>,
}
