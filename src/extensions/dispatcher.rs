use tracing::{debug, trace};

use crate::api::ChartFrame;
use crate::core::{CategoryIndex, Table};
use crate::error::{ChartError, ChartResult};

use super::{ChartSubscriber, SelectionContext, SelectionEvent};

/// Owns the loaded table and fans selection events out to subscribers.
///
/// Replaces a selector shared implicitly between charts: every chart
/// registers here and receives the same `CategorySelected` message.
pub struct SelectionDispatcher {
    table: Table,
    index: CategoryIndex,
    subscribers: Vec<Box<dyn ChartSubscriber>>,
    selected: Option<String>,
    sequence: u64,
}

impl SelectionDispatcher {
    pub fn new(table: Table) -> ChartResult<Self> {
        let index = CategoryIndex::build(&table)?;
        Ok(Self {
            table,
            index,
            subscribers: Vec::new(),
            selected: None,
            sequence: 0,
        })
    }

    /// Registers a subscriber with unique identifier.
    pub fn register(&mut self, subscriber: Box<dyn ChartSubscriber>) -> ChartResult<()> {
        let subscriber_id = subscriber.id().to_owned();
        if subscriber_id.is_empty() {
            return Err(ChartError::InvalidData(
                "subscriber id must not be empty".to_owned(),
            ));
        }
        if self.has_subscriber(&subscriber_id) {
            return Err(ChartError::InvalidData(format!(
                "subscriber with id `{subscriber_id}` is already registered"
            )));
        }
        debug!(subscriber_id = %subscriber_id, "subscriber registered");
        self.subscribers.push(subscriber);
        Ok(())
    }

    /// Unregisters a subscriber by id. Returns `true` when removed.
    pub fn unregister(&mut self, subscriber_id: &str) -> bool {
        if let Some(position) = self
            .subscribers
            .iter()
            .position(|entry| entry.id() == subscriber_id)
        {
            self.subscribers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    #[must_use]
    pub fn has_subscriber(&self, subscriber_id: &str) -> bool {
        self.subscribers
            .iter()
            .any(|subscriber| subscriber.id() == subscriber_id)
    }

    /// Latest frame held by the subscriber registered as `subscriber_id`.
    #[must_use]
    pub fn latest_frame(&self, subscriber_id: &str) -> Option<&ChartFrame> {
        self.subscribers
            .iter()
            .find(|subscriber| subscriber.id() == subscriber_id)
            .and_then(|subscriber| subscriber.latest_frame())
    }

    /// Selector options in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.index.categories().map(str::to_owned).collect()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Dispatches one `CategorySelected` event to every subscriber.
    pub fn select(&mut self, category: &str) -> ChartResult<()> {
        if !self.index.contains(category) {
            return Err(ChartError::UnknownCategory(category.to_owned()));
        }

        self.sequence += 1;
        self.selected = Some(category.to_owned());
        let event = SelectionEvent::CategorySelected {
            category: category.to_owned(),
        };
        let context = SelectionContext {
            table: &self.table,
            index: &self.index,
            sequence: self.sequence,
        };
        trace!(
            category,
            sequence = self.sequence,
            subscribers = self.subscribers.len(),
            "dispatch selection"
        );
        for subscriber in &mut self.subscribers {
            subscriber.on_event(&event, context);
        }
        Ok(())
    }

    /// Selects the first category, as done when the selector is first shown.
    pub fn select_initial(&mut self) -> ChartResult<()> {
        let first = self
            .index
            .categories()
            .next()
            .map(str::to_owned)
            .ok_or(ChartError::EmptyTable)?;
        self.select(&first)
    }
}
