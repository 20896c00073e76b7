//! End-to-end walkthrough of a quick-count session against an
//! in-memory store.
//!
//! Run with: `cargo run -p costcatch-count --example quick_count`

use async_trait::async_trait;
use chrono::Utc;
use costcatch_core::seed;
use costcatch_core::types::{CountItem, InventoryCount, NewCountItem, NewInventoryCount};
use costcatch_count::{CountSession, CountStore, Notify, SessionContext, StoreError, submit_count};
use tracing::info;
use uuid::Uuid;

/// Store that keeps counts in memory.
#[derive(Default)]
struct MemoryStore;

#[async_trait]
impl CountStore for MemoryStore {
    async fn create_count(
        &self,
        count: &NewInventoryCount,
        items: &[NewCountItem],
    ) -> Result<InventoryCount, StoreError> {
        let count_id = Uuid::new_v4().to_string();
        Ok(InventoryCount {
            id: count_id.clone(),
            restaurant_id: count.restaurant_id.clone(),
            counted_by: count.counted_by.clone(),
            count_date: count.count_date,
            total_value: Some(count.total_value),
            created_at: Utc::now(),
            items: Some(
                items
                    .iter()
                    .map(|line| CountItem {
                        id: Uuid::new_v4().to_string(),
                        count_id: count_id.clone(),
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

struct StdoutNotify;

impl Notify for StdoutNotify {
    fn success(&self, message: &str) {
        println!("[toast] {message}");
    }
    fn error(&self, message: &str) {
        println!("[toast!] {message}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // A fresh restaurant gets the seed catalog.
    let restaurant_id = Uuid::new_v4().to_string();
    let categories = seed::default_categories(&restaurant_id);
    let items = seed::default_items(&restaurant_id, &categories);
    info!(items = items.len(), "seeded restaurant");

    let context = SessionContext::new(&restaurant_id, "demo-user", std::sync::Arc::new(StdoutNotify));
    let mut session = CountSession::new(&context, items);

    // Count the first few proteins.
    for (item_id, quantity) in session
        .items()
        .iter()
        .take(3)
        .map(|item| (item.id.clone(), 12.0))
        .collect::<Vec<_>>()
    {
        session.begin_entry(&item_id)?;
        session.commit_entry(quantity)?;
    }

    println!(
        "counted {} of {} items ({:.0}% complete), running value {}",
        session.items_counted(),
        session.items().len(),
        session.percent_complete(),
        costcatch_core::format::format_currency(session.total_value()),
    );

    let count = submit_count(
        &mut session,
        Utc::now().date_naive(),
        &MemoryStore,
        &context,
    )
    .await?;

    println!(
        "saved count {} with {} lines, total {}",
        count.id,
        count.items.as_ref().map(Vec::len).unwrap_or(0),
        costcatch_core::format::format_currency(count.total_value.unwrap_or(0.0)),
    );

    Ok(())
}
