//! The operator-facing HTTP surface.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
