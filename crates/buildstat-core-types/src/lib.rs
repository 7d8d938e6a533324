//! Core types shared across buildstat facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: BuildEventId for tying every log line of one
//!   build-completion event together
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::BuildEventId;
