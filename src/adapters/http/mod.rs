//! HTTP adapters - REST API implementations.

pub mod diagnostic;

pub use diagnostic::{diagnostic_routes, DiagnosticHandlers};
