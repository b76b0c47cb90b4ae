//! Mailwatch Core
//!
//! Core types shared by the Mailwatch client and console.
//!
//! This crate contains:
//! - Domain types: send-job progress, per-recipient records, campaign summaries, sort state
//! - DTOs: the response envelope and the form bodies posted to the campaign page

pub mod domain;
pub mod dto;
