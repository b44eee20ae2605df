//! redis-hll: a wire-compatible HyperLogLog cardinality estimator
//!
//! Produces and consumes the exact `HYLL` byte payload a widely deployed
//! in-memory data store returns from `GETRANGE`/`SET` on one of its own HLL
//! keys: same dense/sparse encodings, same promotion thresholds, same
//! bias-corrected estimator. See [`Hll`] for the public API.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
mod estimator;
pub mod hash;
mod hll;
pub mod registers;

pub use error::{HllError, Result};
pub use hll::Hll;
