//! Serializable UI state. Each piece is owned by the screen that shows it and
//! passed down by value; toggles are plain two-state flips.

use crate::domain::filter::PredictionFilter;
use crate::domain::grouping::{GroupBy, PredictionGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Criteria currently selected on the prediction list.
pub type FilterState = PredictionFilter;

/// Collapsible group panel on the expert page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupPanelState {
    pub group_by: GroupBy,
    pub open: BTreeSet<String>,
}

impl GroupPanelState {
    /// Initial state: every group open.
    pub fn new(group_by: GroupBy, groups: &[PredictionGroup<'_>]) -> Self {
        Self {
            group_by,
            open: groups.iter().map(|g| g.id.clone()).collect(),
        }
    }

    /// Switch mode and reopen every group of the new grouping.
    pub fn set_group_by(&mut self, group_by: GroupBy, groups: &[PredictionGroup<'_>]) {
        *self = Self::new(group_by, groups);
    }

    pub fn toggle(&mut self, group_id: &str) {
        if !self.open.remove(group_id) {
            self.open.insert(group_id.to_string());
        }
    }

    pub fn is_open(&self, group_id: &str) -> bool {
        self.open.contains(group_id)
    }
}

/// Prediction detail modal with its nested share modal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalState {
    pub prediction_id: Option<String>,
    pub share_open: bool,
}

impl ModalState {
    pub fn open(&mut self, prediction_id: &str) {
        self.prediction_id = Some(prediction_id.to_string());
        self.share_open = false;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.prediction_id.is_some()
    }

    pub fn toggle_share(&mut self) {
        self.share_open = self.is_open() && !self.share_open;
    }
}

/// Expanded / collapsed long quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteState {
    pub expanded: bool,
}

impl QuoteState {
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

/// Image export in progress. Disables the export action while set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportState {
    pub generating: bool,
}
