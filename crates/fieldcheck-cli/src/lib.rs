//! CLI library components for fieldcheck.

pub mod commands;
pub mod logging;
