//! Core domain types
//!
//! These types describe what the campaign page reports about a bulk-send
//! job and what the console remembers between runs.

pub mod campaign;
pub mod email;
pub mod job;
pub mod sort;
