//! Core domain types
//!
//! Entities shared between the monitor (persistence, aggregation) and the
//! client/CLI (display). Log entries are immutable once stored.

pub mod log;
