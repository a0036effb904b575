//! Application Layer
//!
//! Console front end driving the dashboard.

pub mod application;
