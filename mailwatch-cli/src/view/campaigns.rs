//! Sortable campaign list
//!
//! Rows keep the position they had when the list was loaded; that position
//! breaks ties between rows with the same sort text, so every sort is a
//! total order and a descending sort is the exact reverse of an ascending
//! one.

use anyhow::Result;
use mailwatch_core::domain::campaign::CampaignSummary;
use mailwatch_core::domain::sort::{SORT_STATE_KEY, SortDirection, SortField, SortState};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::service::StateStore;

/// One campaign row as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRow {
    /// Position in the list as loaded
    pub position: usize,
    pub campaign: CampaignSummary,
    pub date: String,
    pub name: String,
    pub status: String,
    /// Alternating-row marker, recomputed after every change
    pub odd: bool,
}

impl CampaignRow {
    fn new(position: usize, campaign: CampaignSummary) -> Self {
        Self {
            position,
            date: campaign.display_date(),
            name: campaign.display_title().to_string(),
            status: campaign.display_status(),
            campaign,
            odd: false,
        }
    }

    /// Displayed text for `field`
    pub fn text(&self, field: SortField) -> &str {
        match field {
            SortField::Date => &self.date,
            SortField::Name => &self.name,
            SortField::Status => &self.status,
        }
    }

    fn sort_key(&self, field: SortField) -> (&str, usize) {
        (self.text(field), self.position)
    }
}

/// The campaign list in display order
#[derive(Debug, Clone, Default)]
pub struct CampaignList {
    rows: Vec<CampaignRow>,
}

impl CampaignList {
    pub fn new(campaigns: Vec<CampaignSummary>) -> Self {
        let rows = campaigns
            .into_iter()
            .enumerate()
            .map(|(position, campaign)| CampaignRow::new(position, campaign))
            .collect();

        let mut list = Self { rows };
        list.restripe();
        list
    }

    pub fn rows(&self) -> &[CampaignRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Re-orders the rows by `field`
    pub fn sort_by(&mut self, field: SortField, ascending: bool) {
        self.rows
            .sort_by(|a, b| a.sort_key(field).cmp(&b.sort_key(field)));

        if !ascending {
            self.rows.reverse();
        }

        self.restripe();
    }

    /// Removes the campaign named `name` from the list
    pub fn remove(&mut self, name: &str) -> Option<CampaignRow> {
        let idx = self.rows.iter().position(|row| row.campaign.name == name)?;
        let row = self.rows.remove(idx);
        self.restripe();
        Some(row)
    }

    fn restripe(&mut self) {
        for (idx, row) in self.rows.iter_mut().enumerate() {
            row.odd = idx % 2 == 1;
        }
    }
}

/// Toggle indicators of the sort controls
///
/// Each field remembers the direction its next activation applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortControls {
    next: HashMap<SortField, SortDirection>,
}

impl Default for SortControls {
    fn default() -> Self {
        Self {
            next: SortField::ALL
                .iter()
                .map(|field| (*field, SortDirection::Ascending))
                .collect(),
        }
    }
}

impl SortControls {
    pub fn next_direction(&self, field: SortField) -> SortDirection {
        self.next
            .get(&field)
            .copied()
            .unwrap_or(SortDirection::Ascending)
    }

    /// Points the indicator of the sorted field at the opposite direction
    fn mark_sorted(&mut self, state: SortState) {
        self.next.insert(state.field, state.direction().flipped());
    }
}

/// Sorts the list as the user asked and remembers the choice
pub fn apply_user_sort(
    list: &mut CampaignList,
    controls: &mut SortControls,
    state: SortState,
    store: &mut dyn StateStore,
) -> Result<()> {
    list.sort_by(state.field, state.ascending);
    controls.mark_sorted(state);
    store.set(SORT_STATE_KEY, &state.encode())?;

    debug!("Sorted campaigns by {}", state.encode());
    Ok(())
}

/// Activates the sort control of `field`
///
/// Sorts in the direction the control currently points to, persists the
/// choice and flips the control.
pub fn activate_control(
    list: &mut CampaignList,
    controls: &mut SortControls,
    field: SortField,
    store: &mut dyn StateStore,
) -> Result<SortState> {
    let state = SortState::new(field, controls.next_direction(field).is_ascending());
    apply_user_sort(list, controls, state, store)?;
    Ok(state)
}

/// Re-applies the persisted sort, if any
///
/// Nothing is written back. A value that cannot be decoded is logged and
/// ignored.
pub fn restore_sort(
    list: &mut CampaignList,
    controls: &mut SortControls,
    store: &dyn StateStore,
) -> Result<Option<SortState>> {
    let Some(raw) = store.get(SORT_STATE_KEY)? else {
        return Ok(None);
    };

    let state = match SortState::decode(&raw) {
        Ok(state) => state,
        Err(err) => {
            warn!("Ignoring persisted sort {:?}: {}", raw, err);
            return Ok(None);
        }
    };

    list.sort_by(state.field, state.ascending);
    controls.mark_sorted(state);
    Ok(Some(state))
}
