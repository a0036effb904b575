//! Sales Dashboard Library
//!
//! A monthly sales dashboard: one shared month selection drives a paginated,
//! searchable transactions table, a price range histogram and a summary
//! statistics panel, each loaded from the sales service on its own.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;
