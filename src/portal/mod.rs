//! Portal plumbing: the HTTP client and the search-form field mapper.
//!
//! Nothing in here makes extraction decisions; it fetches documents and
//! discovers the identifiers the search form posts back.

pub mod client;
pub mod fields;

pub use client::PortalClient;
pub use fields::extract_field_entries;
