//! Data Transfer Objects for the monitor API
//!
//! Request and response shapes exchanged between the monitor, the client
//! crate, and the dashboard. Field names follow the dashboard's camelCase
//! wire contract.

pub mod log;
