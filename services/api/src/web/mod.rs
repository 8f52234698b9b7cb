pub mod protocol;
pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible to the binary that
// builds the web server router.
pub use rest::{health_handler, weekly_report_handler};
