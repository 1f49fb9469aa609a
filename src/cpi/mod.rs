//! The computational core: price-index construction and deflation.
//!
//! - `index`: turn a per-year inflation-rate series into a cumulative price
//!   index anchored at a base year
//! - `deflate`: join that index onto nominal figures and divide
//!
//! Both are pure functions of their inputs; all validation failures are
//! reported through [`crate::error::SeriesError`].

pub mod deflate;
pub mod index;

pub use deflate::*;
pub use index::*;
