use serde::{Deserialize, Serialize};

use crate::api::ChartFrame;
use crate::core::{CategoryIndex, Table};

/// Message emitted once per selector interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    CategorySelected { category: String },
}

impl SelectionEvent {
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::CategorySelected { category } => category,
        }
    }
}

/// Read-only view handed to subscribers alongside each event.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub table: &'a Table,
    pub index: &'a CategoryIndex,
    /// Number of selections dispatched so far, including this one.
    pub sequence: u64,
}

/// Independent chart updater driven by selection events.
///
/// Subscribers observe events and read shared data without mutating it.
pub trait ChartSubscriber {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &SelectionEvent, context: SelectionContext<'_>);

    /// Frame produced for the most recent event, for subscribers that keep one.
    fn latest_frame(&self) -> Option<&ChartFrame> {
        None
    }
}
