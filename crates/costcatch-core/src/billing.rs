//! # Billing
//!
//! Plan catalog and the pure mapping from payment-provider webhook
//! events to subscription updates.
//!
//! ## Division of Labor
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Payment Webhook Flow                                  │
//! │                                                                         │
//! │  Payment provider ──► webhook endpoint (external)                      │
//! │        │                    │ verify signature, parse event            │
//! │        │                    ▼                                           │
//! │        │          BillingEvent ──► subscription_update()  ◄── HERE     │
//! │        │                    │                                           │
//! │        │                    ▼                                           │
//! │        └──────────► SubscriptionUpdate ──► hosted data service         │
//! │                                                                         │
//! │  This module decides WHAT to update; receiving, verifying, and         │
//! │  writing are the endpoint's job.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::SubscriptionStatus;

// =============================================================================
// Plan Catalog
// =============================================================================

/// Starter plan monthly price in dollars. Also the reference
/// subscription cost for ROI projections ([`crate::calc::roi_projection`]).
pub const STARTER_MONTHLY_PRICE: f64 = 79.0;

/// Growth plan monthly price in dollars.
pub const GROWTH_MONTHLY_PRICE: f64 = 129.0;

/// Subscription plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Starter,
    Growth,
}

/// What a plan allows. `items: None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlanLimits {
    pub items: Option<u32>,
    pub users: u32,
    pub history_days: u32,
}

/// One entry in the pricing table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingPlan {
    pub id: SubscriptionPlan,
    pub name: String,
    /// Monthly price in dollars.
    pub price: f64,
    /// Payment provider price reference.
    pub price_id: String,
    pub features: Vec<String>,
    pub limits: PlanLimits,
}

/// The published pricing table, Starter first.
pub fn pricing_plans() -> Vec<PricingPlan> {
    vec![
        PricingPlan {
            id: SubscriptionPlan::Starter,
            name: "Starter".to_string(),
            price: STARTER_MONTHLY_PRICE,
            price_id: "price_starter_monthly".to_string(),
            features: vec![
                "Up to 100 inventory items".to_string(),
                "Daily inventory counts".to_string(),
                "Waste tracking".to_string(),
                "Basic reports".to_string(),
                "1 user".to_string(),
                "Email support".to_string(),
            ],
            limits: PlanLimits {
                items: Some(100),
                users: 1,
                history_days: 30,
            },
        },
        PricingPlan {
            id: SubscriptionPlan::Growth,
            name: "Growth".to_string(),
            price: GROWTH_MONTHLY_PRICE,
            price_id: "price_growth_monthly".to_string(),
            features: vec![
                "Unlimited inventory items".to_string(),
                "Real-time inventory counts".to_string(),
                "Advanced waste analytics".to_string(),
                "Custom reports & exports".to_string(),
                "Up to 5 users".to_string(),
                "Vendor management".to_string(),
                "Price tracking & alerts".to_string(),
                "Priority support".to_string(),
            ],
            limits: PlanLimits {
                items: None,
                users: 5,
                history_days: 365,
            },
        },
    ]
}

// =============================================================================
// Webhook Event Mapping
// =============================================================================

/// A payment-provider webhook event, already verified and parsed by the
/// receiving endpoint. Only the fields this mapping needs survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEvent {
    /// `checkout.session.completed` - a customer finished hosted checkout.
    /// `restaurant_id` comes from the checkout session's metadata and may
    /// be absent on sessions this product didn't create.
    CheckoutCompleted {
        restaurant_id: Option<String>,
        customer_id: String,
    },
    /// `customer.subscription.updated` - carries the provider's status
    /// string ("active", "past_due", "unpaid", ...).
    SubscriptionUpdated {
        customer_id: String,
        provider_status: String,
    },
    /// `customer.subscription.deleted`.
    SubscriptionDeleted { customer_id: String },
    /// `invoice.payment_failed`.
    PaymentFailed { customer_id: String },
}

/// How to find the restaurant row a [`SubscriptionUpdate`] applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestaurantSelector {
    /// Match on the restaurant's own id (checkout metadata).
    ById(String),
    /// Match on the stored payment customer reference.
    ByCustomer(String),
}

/// The storage update a billing event translates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionUpdate {
    pub selector: RestaurantSelector,
    pub status: SubscriptionStatus,
    /// Set on first checkout so later events can select by customer.
    pub customer_id: Option<String>,
}

/// Maps a billing event to the subscription update it implies.
///
/// Returns `None` for events that should be acknowledged but ignored
/// (a checkout session without restaurant metadata). The caller applies
/// the update to storage and nothing else - this mapping is the entire
/// business meaning of the webhook endpoint.
pub fn subscription_update(event: &BillingEvent) -> Option<SubscriptionUpdate> {
    match event {
        BillingEvent::CheckoutCompleted {
            restaurant_id,
            customer_id,
        } => restaurant_id.as_ref().map(|id| SubscriptionUpdate {
            selector: RestaurantSelector::ById(id.clone()),
            status: SubscriptionStatus::Active,
            customer_id: Some(customer_id.clone()),
        }),

        BillingEvent::SubscriptionUpdated {
            customer_id,
            provider_status,
        } => {
            // Any provider status other than "active" parks the account
            // in past_due until the next event says otherwise
            let status = if provider_status == "active" {
                SubscriptionStatus::Active
            } else {
                SubscriptionStatus::PastDue
            };
            Some(SubscriptionUpdate {
                selector: RestaurantSelector::ByCustomer(customer_id.clone()),
                status,
                customer_id: None,
            })
        }

        BillingEvent::SubscriptionDeleted { customer_id } => Some(SubscriptionUpdate {
            selector: RestaurantSelector::ByCustomer(customer_id.clone()),
            status: SubscriptionStatus::Canceled,
            customer_id: None,
        }),

        BillingEvent::PaymentFailed { customer_id } => Some(SubscriptionUpdate {
            selector: RestaurantSelector::ByCustomer(customer_id.clone()),
            status: SubscriptionStatus::PastDue,
            customer_id: None,
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_table() {
        let plans = pricing_plans();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].id, SubscriptionPlan::Starter);
        assert_eq!(plans[0].price, 79.0);
        assert_eq!(plans[0].limits.items, Some(100));
        assert_eq!(plans[1].id, SubscriptionPlan::Growth);
        assert_eq!(plans[1].price, 129.0);
        assert_eq!(plans[1].limits.items, None);
    }

    #[test]
    fn test_checkout_completed_activates_and_links_customer() {
        let update = subscription_update(&BillingEvent::CheckoutCompleted {
            restaurant_id: Some("rest-1".to_string()),
            customer_id: "cus_123".to_string(),
        })
        .unwrap();

        assert_eq!(update.selector, RestaurantSelector::ById("rest-1".to_string()));
        assert_eq!(update.status, SubscriptionStatus::Active);
        assert_eq!(update.customer_id.as_deref(), Some("cus_123"));
    }

    #[test]
    fn test_checkout_without_metadata_is_ignored() {
        let update = subscription_update(&BillingEvent::CheckoutCompleted {
            restaurant_id: None,
            customer_id: "cus_123".to_string(),
        });
        assert!(update.is_none());
    }

    #[test]
    fn test_subscription_updated_maps_provider_status() {
        let active = subscription_update(&BillingEvent::SubscriptionUpdated {
            customer_id: "cus_123".to_string(),
            provider_status: "active".to_string(),
        })
        .unwrap();
        assert_eq!(active.status, SubscriptionStatus::Active);

        let lapsed = subscription_update(&BillingEvent::SubscriptionUpdated {
            customer_id: "cus_123".to_string(),
            provider_status: "unpaid".to_string(),
        })
        .unwrap();
        assert_eq!(lapsed.status, SubscriptionStatus::PastDue);
        assert_eq!(
            lapsed.selector,
            RestaurantSelector::ByCustomer("cus_123".to_string())
        );
    }

    #[test]
    fn test_deletion_and_failure_events() {
        let deleted = subscription_update(&BillingEvent::SubscriptionDeleted {
            customer_id: "cus_123".to_string(),
        })
        .unwrap();
        assert_eq!(deleted.status, SubscriptionStatus::Canceled);

        let failed = subscription_update(&BillingEvent::PaymentFailed {
            customer_id: "cus_123".to_string(),
        })
        .unwrap();
        assert_eq!(failed.status, SubscriptionStatus::PastDue);
        assert!(failed.customer_id.is_none());
    }
}
