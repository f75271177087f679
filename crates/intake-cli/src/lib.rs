//! Shared CLI infrastructure.

pub mod logging;
