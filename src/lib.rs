//! QCF: fiscal calendar toolkit for manufacturing quality control
//!
//! Converts dates to July-anchored fiscal years and weeks, issues inspection
//! numbers, and rolls inspection records up into weekly and yearly summaries.

pub mod cli;
pub mod core;
pub mod diagnostics;
pub mod entities;
