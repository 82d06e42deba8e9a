//! Survey aggregation.
//!
//! Filters the loaded records, then derives the dashboard view model: score
//! means, the recommendation index, per-store comparison, rating histogram,
//! best/worst rankings and the daily trend.

pub mod aggregate;
pub mod date_key;
pub mod filter;
pub mod types;
pub mod utility;
