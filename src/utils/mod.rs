//! Utils - Shared Helpers

pub mod format;
