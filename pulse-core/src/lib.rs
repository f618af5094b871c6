//! Pulse Core
//!
//! Shared types for the Pulse interface-monitoring system.
//!
//! This crate contains:
//! - Domain types: the persisted log entity and its status enum
//! - DTOs: request and response objects for the monitor API
//! - Query planning: normalization of the list endpoint's filter parameters

pub mod domain;
pub mod dto;
pub mod query;
