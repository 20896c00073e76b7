//! # Calculation Engine
//!
//! Pure functions computing food-cost percentage, inventory usage, count
//! and waste totals, par variance, price deltas, category rollups, and
//! ROI projections over already-validated in-memory records.
//!
//! ## Where These Run
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Calculation Flow                                    │
//! │                                                                         │
//! │  Hosted data service ──► validated records ──► THIS MODULE ──► format  │
//! │                                                                         │
//! │  Dashboard cards:   food_cost_percentage ──► food_cost_status          │
//! │  Count review:      count_total, category_totals                       │
//! │  Waste analytics:   waste_total, waste_by_reason, waste_percentage     │
//! │  Item alerts:       par_variance, price_change                         │
//! │  Marketing page:    roi_projection                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fallback Contract
//! None of these functions return an error or panic. Degenerate numeric
//! input (zero revenue, missing previous count, null totals) resolves to
//! a defined fallback - callers always receive a numeric result they can
//! render. Replacing a fallback with an error is a breaking change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::billing::STARTER_MONTHLY_PRICE;
use crate::types::{CountItem, InventoryCount, WasteLog, WasteReason, UNCATEGORIZED};
use crate::{
    DEFAULT_CURRENT_WASTE_PCT, DEFAULT_TARGET_WASTE_PCT, FOOD_COST_DANGER_ABOVE,
    FOOD_COST_GOOD_BELOW,
};

// =============================================================================
// Food Cost
// =============================================================================

/// Food cost as a percentage of revenue.
///
/// Returns 0 when revenue is 0 - a brand-new restaurant with no sales
/// renders "0%" rather than faulting.
///
/// ## Example
/// ```rust
/// use costcatch_core::calc::food_cost_percentage;
///
/// assert_eq!(food_cost_percentage(8_400.0, 28_000.0), 30.0);
/// assert_eq!(food_cost_percentage(8_400.0, 0.0), 0.0);
/// ```
pub fn food_cost_percentage(inventory_usage: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        return 0.0;
    }
    (inventory_usage / revenue) * 100.0
}

/// Inventory used between two counts.
///
/// Encodes the accounting identity
/// `usage = beginning inventory + purchases - ending inventory`.
/// With no usable previous count there is no baseline, so usage is 0.
pub fn inventory_usage(
    previous_count: Option<&InventoryCount>,
    current_count: &InventoryCount,
    purchases: f64,
) -> f64 {
    let prev_value = match previous_count.and_then(|c| c.total_value) {
        Some(v) => v,
        None => return 0.0,
    };
    let curr_value = current_count.total_value.unwrap_or(0.0);

    prev_value + purchases - curr_value
}

/// Traffic-light classification of a food-cost percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FoodCostStatus {
    Good,
    Warning,
    Danger,
}

/// Classifies a food-cost percentage against the published thresholds.
///
/// ## Boundaries
/// Exactly 30 is a warning; exactly 35 is still a warning; 35.01 is
/// danger. The dashboard badge colors depend on these exact cutoffs.
pub fn food_cost_status(percentage: f64) -> FoodCostStatus {
    if percentage < FOOD_COST_GOOD_BELOW {
        FoodCostStatus::Good
    } else if percentage <= FOOD_COST_DANGER_ABOVE {
        FoodCostStatus::Warning
    } else {
        FoodCostStatus::Danger
    }
}

// =============================================================================
// Count Totals
// =============================================================================

/// Sum of a count's line values.
///
/// For any count built by the Quick-Count session this equals the stored
/// `InventoryCount.total_value`.
pub fn count_total(items: &[CountItem]) -> f64 {
    items.iter().map(|item| item.total_value).sum()
}

/// Value of one counted line.
pub fn item_value(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Per-category rollup of counted quantity and value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryTotal {
    pub name: String,
    pub quantity: f64,
    pub value: f64,
}

/// Groups count lines by their item's category name.
///
/// Lines whose item or category is missing fall into "Uncategorized".
/// Entries appear in first-seen order - the order categories occur in
/// the input - and only categories actually present appear at all.
pub fn category_totals(items: &[CountItem]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for line in items {
        let name = line
            .item
            .as_ref()
            .map(|i| i.category_name())
            .unwrap_or(UNCATEGORIZED);

        match totals.iter_mut().find(|t| t.name == name) {
            Some(entry) => {
                entry.quantity += line.quantity;
                entry.value += line.total_value;
            }
            None => totals.push(CategoryTotal {
                name: name.to_string(),
                quantity: line.quantity,
                value: line.total_value,
            }),
        }
    }

    totals
}

// =============================================================================
// Waste
// =============================================================================

/// Total value written off across a set of waste logs.
///
/// Legacy rows with a null `total_value` count as 0.
pub fn waste_total(waste_logs: &[WasteLog]) -> f64 {
    waste_logs
        .iter()
        .map(|log| log.total_value.unwrap_or(0.0))
        .sum()
}

/// Waste value grouped by reason.
///
/// The map is sparse: reasons absent from the input never appear as
/// 0-valued keys. Callers rely on key presence to mean "has waste of
/// this type" - do not zero-fill.
pub fn waste_by_reason(waste_logs: &[WasteLog]) -> BTreeMap<WasteReason, f64> {
    let mut by_reason = BTreeMap::new();

    for log in waste_logs {
        *by_reason.entry(log.reason).or_insert(0.0) += log.total_value.unwrap_or(0.0);
    }

    by_reason
}

/// Waste as a percentage of total inventory value.
///
/// Returns 0 when the denominator is 0.
pub fn waste_percentage(waste_value: f64, total_inventory_value: f64) -> f64 {
    if total_inventory_value == 0.0 {
        return 0.0;
    }
    (waste_value / total_inventory_value) * 100.0
}

// =============================================================================
// Par Variance
// =============================================================================

/// Whether an item is over, under, or at its par level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ParStatus {
    Over,
    Under,
    At,
}

/// Difference between on-hand quantity and par level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParVariance {
    pub variance: f64,
    pub status: ParStatus,
}

/// How far the current quantity sits from the par level.
pub fn par_variance(current_quantity: f64, par_level: f64) -> ParVariance {
    let variance = current_quantity - par_level;
    let status = if variance > 0.0 {
        ParStatus::Over
    } else if variance < 0.0 {
        ParStatus::Under
    } else {
        ParStatus::At
    };

    ParVariance { variance, status }
}

// =============================================================================
// Price Change
// =============================================================================

/// Absolute and relative movement between two prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceChange {
    pub change: f64,
    pub percent_change: f64,
}

/// Delta between the current and previous price of an item.
///
/// `percent_change` is 0 unless the previous price was positive - a
/// price appearing for the first time has no meaningful relative change.
pub fn price_change(current_price: f64, previous_price: f64) -> PriceChange {
    let change = current_price - previous_price;
    let percent_change = if previous_price > 0.0 {
        (change / previous_price) * 100.0
    } else {
        0.0
    };

    PriceChange {
        change,
        percent_change,
    }
}

// =============================================================================
// ROI Projection
// =============================================================================

/// Projected savings from cutting waste, against the subscription cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoiProjection {
    pub annual_savings: f64,
    pub roi: f64,
}

/// Projects annual savings and ROI for a given monthly food spend.
///
/// `annual_cost` is 12 × the Starter plan price - the marketing
/// calculator quotes ROI against the cheapest plan. A target above the
/// current waste percentage is allowed and yields negative savings;
/// the calculator renders the negative number rather than rejecting it.
///
/// ## Example
/// ```rust
/// use costcatch_core::calc::roi_projection;
///
/// let p = roi_projection(25_000.0, 20.0, 10.0);
/// assert_eq!(p.annual_savings, 30_000.0);
/// ```
pub fn roi_projection(
    monthly_food_spend: f64,
    current_waste_pct: f64,
    target_waste_pct: f64,
) -> RoiProjection {
    let waste_reduction = current_waste_pct - target_waste_pct;
    let monthly_savings = monthly_food_spend * (waste_reduction / 100.0);
    let annual_savings = monthly_savings * 12.0;
    let annual_cost = STARTER_MONTHLY_PRICE * 12.0;
    let roi = ((annual_savings - annual_cost) / annual_cost) * 100.0;

    RoiProjection {
        annual_savings,
        roi,
    }
}

/// [`roi_projection`] with the marketing calculator's default
/// assumptions (20% current waste, 10% target).
pub fn roi_projection_default(monthly_food_spend: f64) -> RoiProjection {
    roi_projection(
        monthly_food_spend,
        DEFAULT_CURRENT_WASTE_PCT,
        DEFAULT_TARGET_WASTE_PCT,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
