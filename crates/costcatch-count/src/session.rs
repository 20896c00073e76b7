//! # Count Session
//!
//! The state machine behind the quick-count screen. One session covers
//! one walkthrough of the inventory: the counter moves item to item,
//! enters quantities, and finally submits the whole count at once.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Phase Transitions                            │
//! │                                                                         │
//! │   Idle ──begin_entry──► Editing ──commit_entry──► Counting              │
//! │                            ▲  │cancel_entry          │                  │
//! │                            │  ▼                      │                  │
//! │                            Counting ◄────────────────┘                  │
//! │                               │begin_submit                             │
//! │                               ▼                                         │
//! │                           Submitting ──complete_submit──► Complete      │
//! │                               │fail_submit                              │
//! │                               ▼                                         │
//! │                           Counting   (quantities preserved)             │
//! │                                                                         │
//! │  NOTE: a failed submit NEVER loses entered quantities. The counter      │
//! │        walked the whole stockroom for those numbers.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use costcatch_core::types::{InventoryItem, NewCountItem, NewInventoryCount};

use crate::context::SessionContext;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No quantity entered yet.
    Idle,
    /// At least one quantity entered, none being edited.
    Counting,
    /// The number pad is open for one item.
    Editing { item_id: String },
    /// A submission is in flight; entries are frozen.
    Submitting,
    /// The count was saved.
    Complete,
}

impl SessionPhase {
    fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Counting => "counting",
            SessionPhase::Editing { .. } => "editing",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Complete => "complete",
        }
    }
}

/// Session-level failures. All leave the session unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("item {0} is not part of this count")]
    UnknownItem(String),

    #[error("quantity cannot be negative: {0}")]
    NegativeQuantity(f64),

    #[error("no quantities entered yet")]
    NothingCounted,

    #[error("not allowed while session is {0}")]
    WrongPhase(&'static str),
}

/// One quick-count walkthrough.
///
/// ## Invariants
/// - `quantities` only holds ids of items in `items`
/// - `started_at` is set exactly once, by the first committed entry
/// - entries are immutable while `Submitting` and after `Complete`
#[derive(Debug, Clone)]
pub struct CountSession {
    restaurant_id: String,
    counted_by: String,
    /// Active items eligible for this count, in display order.
    items: Vec<InventoryItem>,
    /// Entered quantities by item id.
    quantities: HashMap<String, f64>,
    phase: SessionPhase,
    /// When the first quantity was committed.
    started_at: Option<DateTime<Utc>>,
    /// Restrict the visible list to one category id.
    category_filter: Option<String>,
}

impl CountSession {
    /// Starts a session over the restaurant's items under the given
    /// identity. Inactive items are dropped here so they can never be
    /// counted. An empty item list is allowed - the session just has
    /// nothing to submit.
    pub fn new(context: &SessionContext, items: Vec<InventoryItem>) -> Self {
        CountSession {
            restaurant_id: context.restaurant_id.clone(),
            counted_by: context.user_id.clone(),
            items: items.into_iter().filter(|i| i.is_active).collect(),
            quantities: HashMap::new(),
            phase: SessionPhase::Idle,
            started_at: None,
            category_filter: None,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    // =========================================================================
    // Entry
    // =========================================================================

    /// Opens the number pad for an item. Allowed while idle, counting,
    /// or already editing (tapping another item switches to it).
    pub fn begin_entry(&mut self, item_id: &str) -> Result<&InventoryItem, SessionError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Counting | SessionPhase::Editing { .. } => {}
            _ => return Err(SessionError::WrongPhase(self.phase.name())),
        }

        let item = self
            .items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| SessionError::UnknownItem(item_id.to_string()))?;

        self.phase = SessionPhase::Editing {
            item_id: item_id.to_string(),
        };
        Ok(item)
    }

    /// Commits the entered quantity for the item being edited.
    ///
    /// The first commit starts the session clock. Committing 0 is
    /// legitimate - "we're out of this" is information.
    pub fn commit_entry(&mut self, quantity: f64) -> Result<(), SessionError> {
        let item_id = match &self.phase {
            SessionPhase::Editing { item_id } => item_id.clone(),
            other => return Err(SessionError::WrongPhase(other.name())),
        };
        if quantity < 0.0 {
            return Err(SessionError::NegativeQuantity(quantity));
        }

        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
        self.quantities.insert(item_id, quantity);
        self.phase = SessionPhase::Counting;
        Ok(())
    }

    /// Closes the number pad without recording anything.
    pub fn cancel_entry(&mut self) {
        if matches!(self.phase, SessionPhase::Editing { .. }) {
            self.phase = if self.quantities.is_empty() {
                SessionPhase::Idle
            } else {
                SessionPhase::Counting
            };
        }
    }

    /// Removes an item's entered quantity.
    pub fn clear_quantity(&mut self, item_id: &str) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Counting => {}
            _ => return Err(SessionError::WrongPhase(self.phase.name())),
        }
        self.quantities.remove(item_id);
        if self.quantities.is_empty() && self.phase == SessionPhase::Counting {
            self.phase = SessionPhase::Idle;
        }
        Ok(())
    }

    pub fn quantity_for(&self, item_id: &str) -> Option<f64> {
        self.quantities.get(item_id).copied()
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Number of items with a committed quantity.
    pub fn items_counted(&self) -> usize {
        self.quantities.len()
    }

    /// Counted items as a percentage of the whole list, 0 for an empty
    /// item list.
    pub fn percent_complete(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.quantities.len() as f64 / self.items.len() as f64 * 100.0
    }

    /// Running value of everything counted so far. Unpriced items count
    /// as $0 - they still count toward progress.
    pub fn total_value(&self) -> f64 {
        self.items
            .iter()
            .filter_map(|item| self.quantities.get(&item.id).map(|qty| item.value_of(*qty)))
            .sum()
    }

    /// Seconds since the first quantity was committed, 0 before that.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.started_at
            .map(|started| (now - started).num_seconds().max(0))
            .unwrap_or(0)
    }

    // =========================================================================
    // Display Grouping
    // =========================================================================

    /// Restricts [`grouped_items`](Self::grouped_items) to one category
    /// id, or clears the restriction with `None`.
    pub fn set_category_filter(&mut self, category_id: Option<String>) {
        self.category_filter = category_id;
    }

    /// The visible item list grouped by category name, in the order
    /// categories first appear in the item list.
    pub fn grouped_items(&self) -> Vec<(&str, Vec<&InventoryItem>)> {
        let mut groups: Vec<(&str, Vec<&InventoryItem>)> = Vec::new();

        for item in &self.items {
            if let Some(filter) = &self.category_filter {
                if item.category_id.as_ref() != Some(filter) {
                    continue;
                }
            }

            let name = item.category_name();
            match groups.iter_mut().find(|(group, _)| *group == name) {
                Some((_, members)) => members.push(item),
                None => groups.push((name, vec![item])),
            }
        }

        groups
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Builds the rows a submission writes, freezing each item's current
    /// price into its line.
    ///
    /// Lines follow item-list order, skipping uncounted items. The
    /// header total is the sum of the frozen line totals.
    pub fn build_submission(
        &self,
        count_date: NaiveDate,
    ) -> Result<(NewInventoryCount, Vec<NewCountItem>), SessionError> {
        if self.quantities.is_empty() {
            return Err(SessionError::NothingCounted);
        }

        let lines: Vec<NewCountItem> = self
            .items
            .iter()
            .filter_map(|item| {
                self.quantities.get(&item.id).map(|qty| {
                    let unit_price = item.current_price.unwrap_or(0.0);
                    NewCountItem {
                        item_id: item.id.clone(),
                        quantity: *qty,
                        unit_price,
                        total_value: qty * unit_price,
                    }
                })
            })
            .collect();

        let header = NewInventoryCount {
            restaurant_id: self.restaurant_id.clone(),
            counted_by: self.counted_by.clone(),
            count_date,
            total_value: lines.iter().map(|line| line.total_value).sum(),
        };

        Ok((header, lines))
    }

    /// Freezes entries for a submission attempt.
    pub fn begin_submit(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Counting => {}
            _ => return Err(SessionError::WrongPhase(self.phase.name())),
        }
        if self.quantities.is_empty() {
            return Err(SessionError::NothingCounted);
        }
        self.phase = SessionPhase::Submitting;
        Ok(())
    }

    /// Returns to counting after a failed submission. Every entered
    /// quantity survives.
    pub fn fail_submit(&mut self) {
        if self.phase == SessionPhase::Submitting {
            self.phase = SessionPhase::Counting;
        }
    }

    /// Marks the session saved.
    pub fn complete_submit(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Submitting => {
                self.phase = SessionPhase::Complete;
                Ok(())
            }
            _ => Err(SessionError::WrongPhase(self.phase.name())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use costcatch_core::types::Category;

    fn test_item(id: &str, category: Option<&str>, price: Option<f64>) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            restaurant_id: "r1".to_string(),
            category_id: category.map(|c| format!("cat-{c}")),
            name: format!("Item {id}"),
            unit: "lb".to_string(),
            current_price: price,
            par_level: None,
            vendor_id: None,
            is_active: true,
            created_at: Utc::now(),
            category: category.map(|c| Category {
                id: format!("cat-{c}"),
                restaurant_id: "r1".to_string(),
                name: c.to_string(),
                sort_order: 0,
            }),
            vendor: None,
        }
    }

    fn ctx() -> SessionContext {
        SessionContext::silent("r1", "u1")
    }

    fn five_item_session() -> CountSession {
        CountSession::new(
            &ctx(),
            vec![
                test_item("a", Some("Proteins"), Some(4.0)),
                test_item("b", Some("Proteins"), Some(2.0)),
                test_item("c", Some("Produce"), Some(1.5)),
                test_item("d", Some("Produce"), None),
                test_item("e", None, Some(10.0)),
            ],
        )
    }

    fn enter(session: &mut CountSession, item_id: &str, quantity: f64) {
        session.begin_entry(item_id).unwrap();
        session.commit_entry(quantity).unwrap();
    }

    #[test]
    fn test_progress_two_of_five() {
        let mut session = five_item_session();
        enter(&mut session, "a", 3.0);
        enter(&mut session, "c", 2.0);

        assert_eq!(session.items_counted(), 2);
        assert_eq!(session.percent_complete(), 40.0);
        assert_eq!(session.total_value(), 3.0 * 4.0 + 2.0 * 1.5);
    }

    #[test]
    fn test_recount_replaces_quantity() {
        let mut session = five_item_session();
        enter(&mut session, "a", 3.0);
        enter(&mut session, "a", 5.0);

        assert_eq!(session.items_counted(), 1);
        assert_eq!(session.quantity_for("a"), Some(5.0));
    }

    #[test]
    fn test_zero_quantity_counts_as_counted() {
        let mut session = five_item_session();
        enter(&mut session, "a", 0.0);

        assert_eq!(session.items_counted(), 1);
        assert_eq!(session.total_value(), 0.0);
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut session = five_item_session();
        session.begin_entry("a").unwrap();
        assert_eq!(
            session.commit_entry(-1.0),
            Err(SessionError::NegativeQuantity(-1.0))
        );
        // still editing; a valid commit goes through
        session.commit_entry(1.0).unwrap();
    }

    #[test]
    fn test_unknown_item_rejected() {
        let mut session = five_item_session();
        assert_eq!(
            session.begin_entry("nope").unwrap_err(),
            SessionError::UnknownItem("nope".to_string())
        );
        assert_eq!(*session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_inactive_items_excluded() {
        let mut inactive = test_item("z", None, Some(1.0));
        inactive.is_active = false;
        let session = CountSession::new(&ctx(), vec![inactive, test_item("a", None, Some(1.0))]);

        assert_eq!(session.items().len(), 1);
        assert_eq!(session.items()[0].id, "a");
    }

    #[test]
    fn test_empty_item_list_is_inert() {
        // A failed item load degrades to an empty session rather than
        // blocking; there is just nothing to count or submit.
        let mut session = CountSession::new(&ctx(), vec![]);

        assert_eq!(session.items_counted(), 0);
        assert_eq!(session.percent_complete(), 0.0);
        assert_eq!(session.total_value(), 0.0);
        assert!(session.grouped_items().is_empty());
        assert!(matches!(
            session.begin_entry("a"),
            Err(SessionError::UnknownItem(_))
        ));
        assert_eq!(
            session.build_submission("2025-03-07".parse().unwrap()).unwrap_err(),
            SessionError::NothingCounted
        );
        assert_eq!(session.begin_submit(), Err(SessionError::WrongPhase("idle")));
    }

    #[test]
    fn test_cancel_entry_restores_phase() {
        let mut session = five_item_session();
        session.begin_entry("a").unwrap();
        session.cancel_entry();
        assert_eq!(*session.phase(), SessionPhase::Idle);

        enter(&mut session, "a", 1.0);
        session.begin_entry("b").unwrap();
        session.cancel_entry();
        assert_eq!(*session.phase(), SessionPhase::Counting);
        assert_eq!(session.items_counted(), 1);
    }

    #[test]
    fn test_grouping_first_seen_order() {
        let session = five_item_session();
        let groups = session.grouped_items();

        let names: Vec<&str> = groups.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["Proteins", "Produce", "Uncategorized"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_category_filter() {
        let mut session = five_item_session();
        session.set_category_filter(Some("cat-Produce".to_string()));

        let groups = session.grouped_items();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Produce");
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_submission_freezes_prices_and_totals() {
        let mut session = five_item_session();
        enter(&mut session, "a", 2.0);
        enter(&mut session, "d", 5.0); // unpriced item

        let (header, lines) = session.build_submission("2025-03-07".parse().unwrap()).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_id, "a");
        assert_eq!(lines[0].unit_price, 4.0);
        assert_eq!(lines[0].total_value, 8.0);
        assert_eq!(lines[1].unit_price, 0.0);
        assert_eq!(lines[1].total_value, 0.0);
        assert_eq!(header.total_value, 8.0);
        assert_eq!(header.restaurant_id, "r1");
        assert_eq!(header.counted_by, "u1");
    }

    #[test]
    fn test_empty_submission_rejected() {
        let session = five_item_session();
        assert_eq!(
            session.build_submission("2025-03-07".parse().unwrap()).unwrap_err(),
            SessionError::NothingCounted
        );
    }

    #[test]
    fn test_failed_submit_preserves_entries() {
        let mut session = five_item_session();
        enter(&mut session, "a", 3.0);
        enter(&mut session, "b", 1.0);

        session.begin_submit().unwrap();
        assert_eq!(*session.phase(), SessionPhase::Submitting);
        // entries frozen while in flight
        assert!(session.begin_entry("c").is_err());

        session.fail_submit();
        assert_eq!(*session.phase(), SessionPhase::Counting);
        assert_eq!(session.items_counted(), 2);
        assert_eq!(session.quantity_for("a"), Some(3.0));
    }

    #[test]
    fn test_complete_submit() {
        let mut session = five_item_session();
        enter(&mut session, "a", 3.0);

        session.begin_submit().unwrap();
        session.complete_submit().unwrap();
        assert_eq!(*session.phase(), SessionPhase::Complete);
        assert!(session.begin_entry("b").is_err());
    }

    #[test]
    fn test_elapsed_clock_starts_on_first_commit() {
        let mut session = five_item_session();
        let now = Utc::now();
        assert_eq!(session.elapsed_seconds(now), 0);

        enter(&mut session, "a", 1.0);
        assert_eq!(session.elapsed_seconds(Utc::now() + Duration::seconds(90)), 90);
    }
}
