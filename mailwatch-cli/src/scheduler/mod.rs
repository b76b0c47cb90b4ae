//! Scheduler layer
//!
//! Drives the status poll loop: decides when to ask the campaign page for
//! send-job progress and hands each response to the renderer.

pub mod poller;

pub use poller::{PollerState, StatusDisplay, StatusPanel, StatusPoller};
