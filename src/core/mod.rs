//! Core module - fiscal calendar and the quality-control logic built on it

pub mod config;
pub mod fiscal;
pub mod inspection;
pub mod project;
pub mod summary;

pub use config::Config;
pub use fiscal::{
    fiscal_week_number, fiscal_week_number_strict, fiscal_week_range, fiscal_week_to_year_month,
    fiscal_year, format_fiscal_week, DateInput, FiscalError, FiscalWeek, FiscalWeekFormat,
    FiscalWeekRange, StartDay,
};
pub use inspection::{next_inspection_number, InspectionNumber, InspectionNumberError};
pub use project::{Project, ProjectError};
pub use summary::{weekly_summary, yearly_summary, PeriodSummary};
