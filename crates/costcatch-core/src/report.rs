//! # Period Reports
//!
//! Assembles the dashboard's period report from already-fetched rows.
//! Pure aggregation: the caller queries counts and waste logs for the
//! window and hands them over; nothing here touches storage.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calc;
use crate::types::{InventoryCount, InventoryItem, WasteLog, WasteReason, UNCATEGORIZED};

// =============================================================================
// Report Shapes
// =============================================================================

/// The reporting window, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportPeriod {
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
    pub days: u32,
}

impl ReportPeriod {
    /// Builds a period from its endpoints, deriving the day span.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let days = (end - start).num_days().max(0) as u32 + 1;
        Self { start, end, days }
    }
}

/// Headline numbers for the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportSummary {
    /// Total value of the latest count in the period, 0 with no counts.
    pub total_inventory_value: f64,
    pub total_waste: f64,
    pub waste_percentage: f64,
    pub counts_completed: usize,
    pub waste_events: usize,
}

/// One point on a per-count trend line. `value` is `None` on legacy
/// counts that never stored a total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendPoint {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A category's share of a rollup, in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryValue {
    pub name: String,
    pub value: f64,
}

/// Everything the report page renders for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PeriodReport {
    pub period: ReportPeriod,
    pub summary: ReportSummary,
    pub waste_by_reason: BTreeMap<WasteReason, f64>,
    pub waste_by_category: Vec<CategoryValue>,
    /// Category breakdown of the latest count in the period.
    pub inventory_by_category: Vec<CategoryValue>,
    /// Count totals over the period, date-ascending.
    pub inventory_value_trend: Vec<TrendPoint>,
}

// =============================================================================
// Assembly
// =============================================================================

/// Builds the period report from the window's counts and waste logs.
///
/// `counts` must be date-ascending (the query orders them); the last
/// entry is treated as the latest count. Waste percentage is measured
/// against that latest count's value, mirroring the dashboard headline.
pub fn build_period_report(
    period: ReportPeriod,
    counts: &[InventoryCount],
    waste_logs: &[WasteLog],
) -> PeriodReport {
    let latest_value = counts
        .last()
        .and_then(|count| count.total_value)
        .unwrap_or(0.0);

    let total_waste = calc::waste_total(waste_logs);

    let summary = ReportSummary {
        total_inventory_value: latest_value,
        total_waste,
        waste_percentage: calc::waste_percentage(total_waste, latest_value),
        counts_completed: counts.len(),
        waste_events: waste_logs.len(),
    };

    let inventory_by_category = counts
        .last()
        .and_then(|count| count.items.as_deref())
        .map(|items| {
            rollup(items.iter().map(|line| {
                (category_of(line.item.as_ref()), line.total_value)
            }))
        })
        .unwrap_or_default();

    let waste_by_category = rollup(waste_logs.iter().map(|log| {
        (category_of(log.item.as_ref()), log.total_value.unwrap_or(0.0))
    }));

    let inventory_value_trend = counts
        .iter()
        .map(|count| TrendPoint {
            date: count.count_date,
            value: count.total_value,
        })
        .collect();

    PeriodReport {
        period,
        summary,
        waste_by_reason: calc::waste_by_reason(waste_logs),
        waste_by_category,
        inventory_by_category,
        inventory_value_trend,
    }
}

fn category_of(item: Option<&InventoryItem>) -> &str {
    item.map(InventoryItem::category_name).unwrap_or(UNCATEGORIZED)
}

/// Sums values per category, keeping first-seen category order.
fn rollup<'a>(entries: impl Iterator<Item = (&'a str, f64)>) -> Vec<CategoryValue> {
    let mut totals: Vec<CategoryValue> = Vec::new();

    for (name, value) in entries {
        match totals.iter_mut().find(|t| t.name == name) {
            Some(total) => total.value += value,
            None => totals.push(CategoryValue {
                name: name.to_string(),
                value,
            }),
        }
    }

    totals
}

// =============================================================================
// Unit Tests
// =============================================================================
