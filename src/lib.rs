//! courseval: harvests course-evaluation reports from the university
//! portal and flattens them into per-question CSV tables.
//!
//! The decision logic lives in [`extract`]; [`portal`] and [`store`] are
//! I/O plumbing around it.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod portal;
pub mod records;
pub mod store;

pub use error::ExtractError;
pub use records::{CourseHeading, FieldEntry, SearchRow, StatisticRecord};
