//! [`PageDriver`](webassist_protocols::PageDriver) over a CDP page session.

mod page_driver;

pub use page_driver::CdpPageDriver;

/// Selector helper evaluated with every element operation. Called as
/// `(selector, op, arg)` and returns a [`QueryResult`](crate::cdp::QueryResult).
pub(crate) const QUERY_SCRIPT: &str = include_str!("query.js");

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
