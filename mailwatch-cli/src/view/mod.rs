//! View layer
//!
//! Everything the console shows: the send-job status panel, the sortable
//! campaign list, and their terminal rendering.

pub mod campaigns;
pub mod status;
pub mod terminal;

pub use campaigns::{CampaignList, SortControls};
pub use terminal::TerminalDisplay;
