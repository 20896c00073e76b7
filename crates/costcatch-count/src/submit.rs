//! # Count Submission
//!
//! Drives a session through its submission: build the rows, freeze the
//! session, write through [`CountStore`], and report the outcome.
//!
//! The store writes the header and all lines as ONE transaction - a
//! count either exists with every line or not at all. There is no
//! header-then-lines window where a crash strands an empty count.

use async_trait::async_trait;
use chrono::NaiveDate;
use costcatch_core::types::{InventoryCount, NewCountItem, NewInventoryCount};
use tracing::{debug, error, info};

use crate::context::SessionContext;
use crate::session::{CountSession, SessionError};

/// Storage-level failures, as seen from the session engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("a count for {0} already exists")]
    DuplicateCountDate(NaiveDate),
}

/// Where finished counts go.
///
/// `create_count` persists the header and its lines atomically and
/// returns the stored count.
#[async_trait]
pub trait CountStore: Send + Sync {
    async fn create_count(
        &self,
        count: &NewInventoryCount,
        items: &[NewCountItem],
    ) -> Result<InventoryCount, StoreError>;
}

/// Why a submission didn't save.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Submits a session's count for `count_date`.
///
/// On success the session is `Complete` and the context's notifier
/// hears "Count saved". On a store failure the session returns to
/// `Counting` with every quantity intact, the notifier hears about it,
/// and the error comes back for the caller to decide on a retry.
pub async fn submit_count(
    session: &mut CountSession,
    count_date: NaiveDate,
    store: &dyn CountStore,
    context: &SessionContext,
) -> Result<InventoryCount, SubmitError> {
    let (header, lines) = session.build_submission(count_date)?;
    session.begin_submit()?;

    debug!(
        restaurant_id = %header.restaurant_id,
        lines = lines.len(),
        total_value = header.total_value,
        "submitting inventory count"
    );

    match store.create_count(&header, &lines).await {
        Ok(count) => {
            session.complete_submit()?;
            info!(count_id = %count.id, lines = lines.len(), "inventory count saved");
            context.notifier().success("Count saved");
            Ok(count)
        }
        Err(err) => {
            session.fail_submit();
            error!(error = %err, "inventory count submission failed");
            context.notifier().error("Failed to save count");
            Err(err.into())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use costcatch_core::types::{CountItem, InventoryItem};

    use crate::context::Notify;
    use crate::session::SessionPhase;

    fn test_item(id: &str, price: f64) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            restaurant_id: "r1".to_string(),
            category_id: None,
            name: format!("Item {id}"),
            unit: "lb".to_string(),
            current_price: Some(price),
            par_level: None,
            vendor_id: None,
            is_active: true,
            created_at: Utc::now(),
            category: None,
            vendor: None,
        }
    }

    /// Notifier that records what it was told.
    #[derive(Default)]
    struct RecordingNotify {
        messages: Mutex<Vec<String>>,
    }

    impl Notify for RecordingNotify {
        fn success(&self, message: &str) {
            self.messages.lock().unwrap().push(format!("ok: {message}"));
        }
        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(format!("err: {message}"));
        }
    }

    fn recording_context() -> (SessionContext, Arc<RecordingNotify>) {
        let notify = Arc::new(RecordingNotify::default());
        (
            SessionContext::new("r1", "u1", notify.clone()),
            notify,
        )
    }

    fn counted_session(context: &SessionContext) -> CountSession {
        let mut session = CountSession::new(
            context,
            vec![test_item("a", 4.0), test_item("b", 2.0)],
        );
        session.begin_entry("a").unwrap();
        session.commit_entry(3.0).unwrap();
        session
    }

    fn march_7() -> NaiveDate {
        "2025-03-07".parse().unwrap()
    }

    /// Store that saves, echoing the rows back as a stored count.
    struct OkStore;

    #[async_trait]
    impl CountStore for OkStore {
        async fn create_count(
            &self,
            count: &NewInventoryCount,
            items: &[NewCountItem],
        ) -> Result<InventoryCount, StoreError> {
            Ok(InventoryCount {
                id: "count-1".to_string(),
                restaurant_id: count.restaurant_id.clone(),
                counted_by: count.counted_by.clone(),
                count_date: count.count_date,
                total_value: Some(count.total_value),
                created_at: Utc::now(),
                items: Some(
                    items
                        .iter()
                        .map(|line| CountItem {
                            id: format!("line-{}", line.item_id),
                            count_id: "count-1".to_string(),
                            item_id: line.item_id.clone(),
                            quantity: line.quantity,
                            unit_price: line.unit_price,
                            total_value: line.total_value,
                            item: None,
                        })
                        .collect(),
                ),
            })
        }
    }

    /// Store that always fails.
    struct FailStore;

    #[async_trait]
    impl CountStore for FailStore {
        async fn create_count(
            &self,
            _count: &NewInventoryCount,
            _items: &[NewCountItem],
        ) -> Result<InventoryCount, StoreError> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
    }

    /// Store that already holds a count for every date.
    struct ConflictStore;

    #[async_trait]
    impl CountStore for ConflictStore {
        async fn create_count(
            &self,
            count: &NewInventoryCount,
            _items: &[NewCountItem],
        ) -> Result<InventoryCount, StoreError> {
            Err(StoreError::DuplicateCountDate(count.count_date))
        }
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let (context, notify) = recording_context();
        let mut session = counted_session(&context);

        // through the crate-root re-export, the path embedders use
        let count = crate::submit_count(&mut session, march_7(), &OkStore, &context)
            .await
            .unwrap();

        assert_eq!(count.id, "count-1");
        assert_eq!(count.total_value, Some(12.0));
        assert_eq!(count.items.as_ref().unwrap().len(), 1);
        assert_eq!(*session.phase(), SessionPhase::Complete);
        assert_eq!(
            *notify.messages.lock().unwrap(),
            vec!["ok: Count saved".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_submission_preserves_session() {
        let (context, notify) = recording_context();
        let mut session = counted_session(&context);

        let result = submit_count(&mut session, march_7(), &FailStore, &context).await;

        assert!(matches!(
            result,
            Err(SubmitError::Store(StoreError::Backend(_)))
        ));
        assert_eq!(*session.phase(), SessionPhase::Counting);
        assert_eq!(session.quantity_for("a"), Some(3.0));
        assert_eq!(
            *notify.messages.lock().unwrap(),
            vec!["err: Failed to save count".to_string()]
        );

        // retry against a working store succeeds with the same entries
        let count = submit_count(&mut session, march_7(), &OkStore, &context)
            .await
            .unwrap();
        assert_eq!(count.total_value, Some(12.0));
    }

    #[tokio::test]
    async fn test_duplicate_date_conflict_surfaces() {
        let (context, _notify) = recording_context();
        let mut session = counted_session(&context);

        let result = submit_count(&mut session, march_7(), &ConflictStore, &context).await;

        match result {
            Err(SubmitError::Store(StoreError::DuplicateCountDate(date))) => {
                assert_eq!(date, march_7());
            }
            other => panic!("expected duplicate-date conflict, got {other:?}"),
        }
        // a conflict is a failure like any other: entries survive
        assert_eq!(*session.phase(), SessionPhase::Counting);
        assert_eq!(session.quantity_for("a"), Some(3.0));
    }

    #[tokio::test]
    async fn test_empty_session_never_reaches_store() {
        let (context, notify) = recording_context();
        let mut session = CountSession::new(&context, vec![test_item("a", 4.0)]);

        let result = submit_count(&mut session, march_7(), &FailStore, &context).await;

        assert!(matches!(
            result,
            Err(SubmitError::Session(SessionError::NothingCounted))
        ));
        // no toast for a submission that never started
        assert!(notify.messages.lock().unwrap().is_empty());
    }
}
