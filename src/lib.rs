//! fieldgrid
//!
//! Adaptive form layout engine: arranges a dataset's columns into rows of
//! resizable fields, reorders them with fractional order keys, and keeps
//! named layouts per dataset in a key-value store.

pub mod config;
pub mod logging;
pub mod model;
pub mod order;
pub mod persistence;
pub mod state;
pub mod view;
