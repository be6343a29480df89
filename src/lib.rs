//! Match View - client-side view engine for paginated user match feeds
//!
//! This library normalizes user records fetched page by page, derives each
//! user's average match level, filters and sorts the loaded page, and keeps
//! pagination and list/detail state consistent while fetches race.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{average_match_level, FilterCriteria, SortConfig, ViewController, ViewSnapshot};
pub use crate::models::{Match, PageResponse, RawUser, User};
pub use crate::services::{DataSource, HttpDataSource, TransportError, ViewSession};
