//! Deterministic record → delimited-text-line encoding.
//!
//! One mapping-shaped [`Value`] goes in, one CSV-style line comes out;
//! column selection and order, missing-field substitution, extra-field
//! policy, and the delimiter/quoting profile are all explicit. The whole
//! crate is pure and synchronous — the hosting pipeline owns parallelism,
//! retries, and I/O.

pub mod dialect;
pub mod encode;
pub mod error;
pub mod render;
pub mod value;

pub use dialect::{Dialect, QuoteStyle};
pub use encode::{EncodeOptions, encode};
pub use error::{EncodeError, ErrorKind};
pub use value::Value;
