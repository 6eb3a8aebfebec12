//! Per-element stage wrapper around the rowline codec.
//!
//! A [`Stage`] processes one record at a time, returning zero or more output
//! lines. The trait is the only surface a hosting data-parallel framework
//! needs to adapt — it carries no scheduling, batching, or retry semantics
//! of its own.

pub mod record_to_csv;
pub mod stage;

pub use record_to_csv::{RecordToCsv, StageConfig};
pub use stage::Stage;
