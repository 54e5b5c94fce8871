//! API types for frontend-backend bridge.
//!
//! This module defines stable types for Tauri commands and events,
//! isolating plugin handle internals from the frontend.

pub mod types;
