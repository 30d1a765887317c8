//! Bookshelf application library
//!
//! Client-side views over the books REST service: a sortable, paginated list
//! with add and confirmed delete, and a per-book detail page.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;
