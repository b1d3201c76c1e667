//! HTTP API handlers.

pub mod export;
pub mod invoice;
pub mod logo;
pub mod preview;
