//! Error types for fieldgrid.
//!
//! Each concern owns a `thiserror` enum next to the code that raises it;
//! [`AppError`] gathers them for the binary so `?` composes across layers.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned from `main`
//!   - [`PersistenceError`] - layout store reads/writes
//!   - [`DragError`] - rejected drag gestures
//!   - [`ConfigError`] - config file loading
//!   - [`LoggingError`] - tracing subscriber setup
//!
//! # Recovery Strategy
//!
//! Layout engine operations are total and never fail. A corrupt or missing
//! layout store is **non-fatal**: the session logs it and starts from an empty
//! collection. Only write failures on an explicit save or delete surface as
//! errors.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::persistence::PersistenceError;
use crate::state::drag::DragError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// The layout store could not be read or written.
    #[error("Layout store error: {0}")]
    Persistence(#[from] PersistenceError),

    /// A drag gesture was rejected by the drag coordinator.
    #[error("Drag rejected: {0}")]
    Drag(#[from] DragError),

    /// The configuration file exists but is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// A layout requested on the command line does not exist.
    #[error("No saved layout under key '{0}'")]
    UnknownLayout(String),
}
