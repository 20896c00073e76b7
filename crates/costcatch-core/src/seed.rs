//! # Seed Catalog
//!
//! Default categories and items materialized for a brand-new restaurant
//! so the first count can start immediately after signup, plus the
//! suggestion lists the settings and item forms offer.
//!
//! The catalog is data, not behavior: constructing the rows is the only
//! logic here, and ids/timestamps are the only non-deterministic parts.

use chrono::Utc;
use uuid::Uuid;

use crate::types::{Category, InventoryItem};

// =============================================================================
// Catalog Data
// =============================================================================

/// A category seeded for every new restaurant: `(name, sort_order)`.
pub const DEFAULT_CATEGORIES: [(&str, i32); 6] = [
    ("Proteins", 1),
    ("Produce", 2),
    ("Dairy", 3),
    ("Dry Goods", 4),
    ("Beverages", 5),
    ("Frozen", 6),
];

/// An item seeded for every new restaurant.
#[derive(Debug, Clone, Copy)]
pub struct SeedItem {
    pub name: &'static str,
    pub unit: &'static str,
    pub category: &'static str,
    pub default_price: f64,
}

const fn seed_item(
    name: &'static str,
    unit: &'static str,
    category: &'static str,
    default_price: f64,
) -> SeedItem {
    SeedItem {
        name,
        unit,
        category,
        default_price,
    }
}

/// The starter item catalog, grouped by category.
pub const DEFAULT_ITEMS: [SeedItem; 35] = [
    // Proteins
    seed_item("Chicken breast", "lb", "Proteins", 3.99),
    seed_item("Ground beef", "lb", "Proteins", 5.49),
    seed_item("Salmon fillet", "lb", "Proteins", 12.99),
    seed_item("Shrimp", "lb", "Proteins", 9.99),
    seed_item("Pork loin", "lb", "Proteins", 4.29),
    seed_item("Bacon", "lb", "Proteins", 7.99),
    seed_item("Turkey breast", "lb", "Proteins", 6.99),
    // Produce
    seed_item("Lettuce (romaine)", "case", "Produce", 24.99),
    seed_item("Tomatoes", "lb", "Produce", 2.49),
    seed_item("Onions", "lb", "Produce", 1.29),
    seed_item("Potatoes", "lb", "Produce", 0.89),
    seed_item("Avocados", "each", "Produce", 1.49),
    seed_item("Bell peppers", "lb", "Produce", 3.29),
    seed_item("Carrots", "lb", "Produce", 1.49),
    seed_item("Lemons", "each", "Produce", 0.49),
    seed_item("Garlic", "lb", "Produce", 4.99),
    // Dairy
    seed_item("Milk", "gal", "Dairy", 4.29),
    seed_item("Heavy cream", "qt", "Dairy", 5.49),
    seed_item("Butter", "lb", "Dairy", 4.99),
    seed_item("Cheese, cheddar", "lb", "Dairy", 6.49),
    seed_item("Eggs", "case", "Dairy", 45.00),
    seed_item("Sour cream", "lb", "Dairy", 2.99),
    seed_item("Parmesan", "lb", "Dairy", 12.99),
    // Dry Goods
    seed_item("Rice", "lb", "Dry Goods", 1.49),
    seed_item("Pasta", "lb", "Dry Goods", 1.99),
    seed_item("Flour", "lb", "Dry Goods", 0.69),
    seed_item("Oil, vegetable", "gal", "Dry Goods", 8.99),
    seed_item("Sugar", "lb", "Dry Goods", 0.79),
    seed_item("Olive oil", "gal", "Dry Goods", 28.99),
    seed_item("Bread crumbs", "lb", "Dry Goods", 2.49),
    // Beverages
    seed_item("Coffee beans", "lb", "Beverages", 12.99),
    seed_item("Tea bags", "box", "Beverages", 8.99),
    seed_item("Orange juice", "gal", "Beverages", 6.99),
    // Frozen
    seed_item("French fries", "case", "Frozen", 32.99),
    seed_item("Ice cream", "gal", "Frozen", 14.99),
];

/// Restaurant types offered on the signup form. Free-form entry is
/// still allowed; these are suggestions.
pub const RESTAURANT_TYPES: [&str; 10] = [
    "Fast Food",
    "Fast Casual",
    "Casual Dining",
    "Fine Dining",
    "Cafe/Coffee Shop",
    "Bar/Pub",
    "Food Truck",
    "Catering",
    "Ghost Kitchen",
    "Other",
];

/// Unit-of-measure suggestions for the item form: `(value, label)`.
pub const UNIT_OPTIONS: [(&str, &str); 8] = [
    ("lb", "Pounds (lb)"),
    ("oz", "Ounces (oz)"),
    ("case", "Case"),
    ("each", "Each"),
    ("gal", "Gallons (gal)"),
    ("qt", "Quarts (qt)"),
    ("box", "Box"),
    ("bag", "Bag"),
];

// =============================================================================
// Row Construction
// =============================================================================

/// Builds the default category rows for a new restaurant.
pub fn default_categories(restaurant_id: &str) -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, sort_order)| Category {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: name.to_string(),
            sort_order: *sort_order,
        })
        .collect()
}

/// Builds the default item rows for a new restaurant, wiring each item
/// to its seeded category by name.
///
/// Items whose category is not in `categories` are created
/// uncategorized rather than dropped; the signup bootstrap always
/// passes the full [`default_categories`] set, so in practice every
/// item lands in its category.
pub fn default_items(restaurant_id: &str, categories: &[Category]) -> Vec<InventoryItem> {
    let now = Utc::now();

    DEFAULT_ITEMS
        .iter()
        .map(|seed| {
            let category_id = categories
                .iter()
                .find(|c| c.name == seed.category)
                .map(|c| c.id.clone());

            InventoryItem {
                id: Uuid::new_v4().to_string(),
                restaurant_id: restaurant_id.to_string(),
                category_id,
                name: seed.name.to_string(),
                unit: seed.unit.to_string(),
                current_price: Some(seed.default_price),
                par_level: None,
                vendor_id: None,
                is_active: true,
                created_at: now,
                category: None,
                vendor: None,
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
