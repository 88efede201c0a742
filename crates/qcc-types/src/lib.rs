//! Foundation types for QCC.
//!
//! Shared by every QCC crate: error types, configuration, the job, model and
//! backend records, styled output lines, and key events.

pub mod backend;
pub mod config;
pub mod error;
pub mod input;
pub mod job;
pub mod output;
