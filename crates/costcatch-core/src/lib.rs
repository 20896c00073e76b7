//! # costcatch-core: Pure Business Logic for CostCatch
//!
//! This crate is the **heart** of CostCatch, a food-cost and inventory
//! platform for restaurants. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CostCatch Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Dashboard (TypeScript)                         │   │
//! │  │   Quick Count ──► Waste Log ──► Reports ──► Settings           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     API Boundary                                │   │
//! │  │   validate body ──► compute ──► persist via hosted data svc    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ costcatch-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │  │  types  │ │  calc   │ │validation│ │  format  │ │ report │ │   │
//! │  │  │ entities│ │ cost %  │ │  rules   │ │ currency │ │ period │ │   │
//! │  │  │  enums  │ │ waste   │ │  checks  │ │ quantity │ │ rollup │ │   │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  External collaborators: hosted relational data service, hosted        │
//! │  auth, hosted payments (webhook events mapped by [`billing`])          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (InventoryItem, InventoryCount, WasteLog, ...)
//! - [`calc`] - Food-cost / waste / ROI calculation engine
//! - [`format`] - Currency, percentage, and quantity rendering
//! - [`validation`] - Request-body validation before persistence
//! - [`seed`] - Default catalog for new restaurants
//! - [`billing`] - Plan catalog and payment webhook mapping
//! - [`report`] - Period report assembly
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Defined Fallbacks**: Zero denominators resolve to 0, never to an error -
//!    callers always receive a numeric result
//! 4. **Explicit Errors**: Where errors exist, they are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use costcatch_core::calc::{food_cost_percentage, food_cost_status, FoodCostStatus};
//!
//! let pct = food_cost_percentage(8_400.0, 28_000.0);
//! assert_eq!(pct, 30.0);
//! assert_eq!(food_cost_status(pct), FoodCostStatus::Warning);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod calc;
pub mod error;
pub mod format;
pub mod report;
pub mod seed;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use costcatch_core::WasteReason` instead of
// `use costcatch_core::types::WasteReason`

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Food-cost percentage below which a restaurant is in good shape.
///
/// ## Why a constant?
/// The 30/35 thresholds are published product policy - the dashboard
/// badge colors, the alert engine, and this crate must all agree.
pub const FOOD_COST_GOOD_BELOW: f64 = 30.0;

/// Food-cost percentage above which a restaurant is in the danger band.
/// Exactly 35.0 is still a warning, not danger.
pub const FOOD_COST_DANGER_ABOVE: f64 = 35.0;

/// Default assumed waste percentage for ROI projections.
///
/// ## Business Reason
/// Industry baseline used on the marketing calculator when a prospect
/// has not measured their own waste yet.
pub const DEFAULT_CURRENT_WASTE_PCT: f64 = 20.0;

/// Default target waste percentage for ROI projections.
pub const DEFAULT_TARGET_WASTE_PCT: f64 = 10.0;
