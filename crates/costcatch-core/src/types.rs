//! # Domain Types
//!
//! Core domain entities for CostCatch.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │                      ┌──────────────────┐                               │
//! │                      │    Restaurant    │  tenant root                  │
//! │                      └────────┬─────────┘                               │
//! │          ┌────────────┬───────┴──────┬──────────────┐                   │
//! │  ┌───────▼──────┐ ┌───▼────┐ ┌───────▼───────┐ ┌────▼─────┐            │
//! │  │InventoryItem │ │Category│ │InventoryCount │ │ WasteLog │            │
//! │  │ name, unit   │ │ name   │ │ count_date    │ │ reason   │            │
//! │  │ price, par   │ │ order  │ │ total_value   │ │ snapshot │            │
//! │  └───────┬──────┘ └────────┘ └───────┬───────┘ └──────────┘            │
//! │  ┌───────▼──────┐            ┌───────▼───────┐                          │
//! │  │    Vendor    │            │   CountItem   │  price snapshot          │
//! │  └──────────────┘            └───────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tenant Partition
//! Every entity except [`Restaurant`] carries a `restaurant_id`; all
//! queries against the hosted data service must filter by it. Nothing in
//! this crate ever crosses that partition.
//!
//! ## Price Snapshots
//! [`CountItem`] and [`WasteLog`] copy `unit_price` from the item at
//! creation time instead of joining the live price. Historical records
//! stay stable when prices are edited later. This is deliberate - do not
//! "fix" it by dereferencing the live item.
//!
//! ## Why f64 and not integer cents?
//! The hosted data service stores numerics as floating point and the
//! dashboard never does ledger arithmetic on them; rounding is applied at
//! display time only (see [`crate::format`]). Sums here must match what
//! the service stores, so this crate keeps the same representation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Subscription Status
// =============================================================================

/// Billing state of a restaurant's subscription.
///
/// Driven entirely by payment-provider webhook events; see
/// [`crate::billing::subscription_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Newly signed up, not yet paying.
    Trial,
    /// Checkout completed and invoices are being paid.
    Active,
    /// Subscription ended by the customer or the provider.
    Canceled,
    /// An invoice failed; access may be restricted.
    PastDue,
}

impl SubscriptionStatus {
    /// Wire representation used by the data service.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::PastDue => "past_due",
        }
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        SubscriptionStatus::Trial
    }
}

impl FromStr for SubscriptionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial" => Ok(SubscriptionStatus::Trial),
            "active" => Ok(SubscriptionStatus::Active),
            "canceled" => Ok(SubscriptionStatus::Canceled),
            "past_due" => Ok(SubscriptionStatus::PastDue),
            other => Err(CoreError::UnknownSubscriptionStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Waste Reason
// =============================================================================

/// Why inventory was written off.
///
/// ## Closed Set
/// Reasons are a closed enum so an unchecked value can never enter a
/// [`WasteLog`]. Wire strings convert through [`FromStr`] only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WasteReason {
    /// Product expired or went bad.
    Spoilage,
    /// Made too much, couldn't sell.
    Overproduction,
    /// Error during preparation.
    Mistake,
    /// Sent back by customer.
    CustomerReturn,
}

impl WasteReason {
    /// All reasons, in the order the waste form lists them.
    pub const ALL: [WasteReason; 4] = [
        WasteReason::Spoilage,
        WasteReason::Overproduction,
        WasteReason::Mistake,
        WasteReason::CustomerReturn,
    ];

    /// Wire representation used by the data service.
    pub const fn as_str(&self) -> &'static str {
        match self {
            WasteReason::Spoilage => "spoilage",
            WasteReason::Overproduction => "overproduction",
            WasteReason::Mistake => "mistake",
            WasteReason::CustomerReturn => "customer_return",
        }
    }

    /// Short label shown on the waste form.
    pub const fn label(&self) -> &'static str {
        match self {
            WasteReason::Spoilage => "Spoilage",
            WasteReason::Overproduction => "Overproduction",
            WasteReason::Mistake => "Prep Mistake",
            WasteReason::CustomerReturn => "Customer Return",
        }
    }

    /// One-line description shown under the label.
    pub const fn description(&self) -> &'static str {
        match self {
            WasteReason::Spoilage => "Product expired or went bad",
            WasteReason::Overproduction => "Made too much, couldn't sell",
            WasteReason::Mistake => "Error during preparation",
            WasteReason::CustomerReturn => "Sent back by customer",
        }
    }
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteReason {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spoilage" => Ok(WasteReason::Spoilage),
            "overproduction" => Ok(WasteReason::Overproduction),
            "mistake" => Ok(WasteReason::Mistake),
            "customer_return" => Ok(WasteReason::CustomerReturn),
            other => Err(CoreError::UnknownWasteReason(other.to_string())),
        }
    }
}

// =============================================================================
// Restaurant
// =============================================================================

/// The tenant root. Every other entity belongs to exactly one restaurant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Restaurant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning auth user (issued by the hosted auth service).
    pub user_id: String,

    /// Display name.
    pub name: String,

    /// Restaurant type ("Fast Casual", "Fine Dining", ...).
    /// Free-form; suggestions live in [`crate::seed::RESTAURANT_TYPES`].
    /// The data service column is `type`, which is reserved in Rust.
    #[serde(rename = "type")]
    pub restaurant_type: Option<String>,

    /// Target food-cost percentage the owner is steering towards.
    pub target_food_cost_pct: f64,

    /// Self-reported monthly food spend, used for ROI projections.
    pub monthly_food_spend: Option<f64>,

    /// Payment provider customer reference, set on first checkout.
    pub stripe_customer_id: Option<String>,

    /// Current billing state.
    pub subscription_status: SubscriptionStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// Groups items for display and cost rollups.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    /// Position in lists; lower sorts first.
    pub sort_order: i32,
}

// =============================================================================
// Vendor
// =============================================================================

/// A supplier. Supplies zero or more items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vendor {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inventory Item
// =============================================================================

/// Something the restaurant counts: a case of lettuce, a pound of butter.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItem {
    pub id: String,
    pub restaurant_id: String,
    pub category_id: Option<String>,
    pub name: String,
    /// Unit of measure ("lb", "case", "each", ...). Free-form; suggestions
    /// live in [`crate::seed::UNIT_OPTIONS`].
    pub unit: String,
    /// Live price per unit. Null until the owner enters one.
    pub current_price: Option<f64>,
    /// Desired on-hand quantity; drives par-variance alerts.
    pub par_level: Option<f64>,
    pub vendor_id: Option<String>,
    /// Cleared instead of deleting once historical counts reference the
    /// item (soft exclusion from active counts).
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Joined category, when the query embedded it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<Category>,

    /// Joined vendor, when the query embedded it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub vendor: Option<Vendor>,
}

impl InventoryItem {
    /// Value of `quantity` units at the current price.
    ///
    /// Unpriced items contribute 0 - counting can proceed before every
    /// price has been entered.
    pub fn value_of(&self, quantity: f64) -> f64 {
        quantity * self.current_price.unwrap_or(0.0)
    }

    /// Name of the joined category, or the display fallback.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// Display bucket for items without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

// =============================================================================
// Inventory Count
// =============================================================================

/// A count session's persisted result. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryCount {
    pub id: String,
    pub restaurant_id: String,
    /// Acting user who performed the count.
    pub counted_by: String,
    #[ts(as = "String")]
    pub count_date: NaiveDate,
    /// Sum of the line items' `total_value`. Nullable on legacy rows.
    pub total_value: Option<f64>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Joined line items, when the query embedded them.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub items: Option<Vec<CountItem>>,
}

/// Creation shape for an [`InventoryCount`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewInventoryCount {
    pub restaurant_id: String,
    pub counted_by: String,
    #[ts(as = "String")]
    pub count_date: NaiveDate,
    pub total_value: f64,
}

// =============================================================================
// Count Item
// =============================================================================

/// One counted line within an [`InventoryCount`].
///
/// ## Invariant
/// `total_value == quantity * unit_price` at creation time, and the
/// parent count's `total_value` equals the sum of its lines.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CountItem {
    pub id: String,
    pub count_id: String,
    pub item_id: String,
    pub quantity: f64,
    /// Price per unit at count time (frozen).
    pub unit_price: f64,
    /// quantity × unit_price at count time (frozen).
    pub total_value: f64,

    /// Joined item, when the query embedded it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub item: Option<InventoryItem>,
}

/// Creation shape for a [`CountItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCountItem {
    pub item_id: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_value: f64,
}

// =============================================================================
// Waste Log
// =============================================================================

/// A single write-off event.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WasteLog {
    pub id: String,
    pub restaurant_id: String,
    pub item_id: String,
    pub quantity: f64,
    /// Price per unit at logging time (frozen). Nullable on legacy rows.
    pub unit_price: Option<f64>,
    /// quantity × unit_price at logging time (frozen).
    pub total_value: Option<f64>,
    pub reason: WasteReason,
    pub notes: Option<String>,
    /// Acting user who logged the waste.
    pub logged_by: String,
    #[ts(as = "String")]
    pub logged_at: DateTime<Utc>,

    /// Joined item, when the query embedded it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub item: Option<InventoryItem>,
}

/// Creation shape for a [`WasteLog`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewWasteLog {
    pub restaurant_id: String,
    pub item_id: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_value: f64,
    pub reason: WasteReason,
    pub notes: Option<String>,
    pub logged_by: String,
}

impl NewWasteLog {
    /// Builds a waste entry for `item`, snapshotting its current price.
    ///
    /// Items without a price snapshot 0, matching the count flow.
    pub fn for_item(
        item: &InventoryItem,
        quantity: f64,
        reason: WasteReason,
        notes: Option<String>,
        logged_by: impl Into<String>,
    ) -> Self {
        let unit_price = item.current_price.unwrap_or(0.0);
        NewWasteLog {
            restaurant_id: item.restaurant_id.clone(),
            item_id: item.id.clone(),
            quantity,
            unit_price,
            total_value: quantity * unit_price,
            reason,
            notes,
            logged_by: logged_by.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
