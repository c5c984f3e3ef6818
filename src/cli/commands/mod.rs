//! CLI command implementations

pub mod calendar;
pub mod completions;
pub mod config;
pub mod init;
pub mod inspno;
pub mod range;
pub mod report;
pub mod week;
pub mod yymm;
