//! # Validation Layer
//!
//! Request-body validation applied before any mutating request reaches
//! the hosted data service.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard forms (TypeScript)                                 │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API boundary (Rust)                                          │
//! │  └── THIS MODULE: schema checks on the raw JSON body                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Hosted data service                                          │
//! │  ├── NOT NULL / foreign key constraints                                │
//! │  └── Row-level tenant policies                                         │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! Validators classify, never mutate, and never return `Err` - the
//! outcome is a [`ValidationReport`] value listing every field complaint
//! found. They run against the raw `serde_json::Value` body because type
//! mismatches ("quantity must be a valid number") are themselves
//! complaints the dashboard renders.
//!
//! ## Usage
//! ```rust
//! use costcatch_core::validation::validate_waste_create;
//! use serde_json::json;
//!
//! let report = validate_waste_create(&json!({
//!     "item_id": "11111111-1111-4111-8111-111111111111",
//!     "quantity": 2.5,
//!     "reason": "spoilage",
//! }));
//! assert!(report.is_valid());
//! ```

use serde_json::Value;
use uuid::Uuid;

use crate::error::ValidationError;

// =============================================================================
// Validation Report
// =============================================================================

/// Outcome of validating one request body.
///
/// A value, not an exception: invalid input is an expected, ordinary
/// result at the API boundary.
#[derive(Debug, Default)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport { errors: Vec::new() }
    }

    /// True when no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The typed complaints, in the order the rules ran.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Human-readable field complaints for the response body.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    fn push(&mut self, error: Option<ValidationError>) {
        if let Some(error) = error {
            self.errors.push(error);
        }
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// A field is required: present, non-null, and not the empty string.
pub fn validate_required(body: &Value, field: &str) -> Option<ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Some(ValidationError::Required {
            field: field.to_string(),
        }),
        Some(Value::String(s)) if s.is_empty() => Some(ValidationError::Required {
            field: field.to_string(),
        }),
        Some(_) => None,
    }
}

/// A string with optional length bounds.
pub fn validate_string(
    value: &Value,
    field: &str,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Option<ValidationError> {
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            return Some(ValidationError::NotAString {
                field: field.to_string(),
            })
        }
    };

    if let Some(min) = min_length {
        if s.chars().count() < min {
            return Some(ValidationError::TooShort {
                field: field.to_string(),
                min,
            });
        }
    }

    if let Some(max) = max_length {
        if s.chars().count() > max {
            return Some(ValidationError::TooLong {
                field: field.to_string(),
                max,
            });
        }
    }

    None
}

/// A finite number with optional range bounds.
pub fn validate_number(
    value: &Value,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Option<ValidationError> {
    let n = match value.as_f64() {
        Some(n) => n,
        None => {
            return Some(ValidationError::NotANumber {
                field: field.to_string(),
            })
        }
    };

    if let Some(min) = min {
        if n < min {
            return Some(ValidationError::BelowMinimum {
                field: field.to_string(),
                min,
            });
        }
    }

    if let Some(max) = max {
        if n > max {
            return Some(ValidationError::AboveMaximum {
                field: field.to_string(),
                max,
            });
        }
    }

    None
}

/// A canonical 36-character hyphenated UUID.
pub fn validate_uuid(value: &Value, field: &str) -> Option<ValidationError> {
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            return Some(ValidationError::NotAString {
                field: field.to_string(),
            })
        }
    };

    // Uuid::try_parse also accepts simple/braced/urn forms; the length
    // check pins the canonical hyphenated shape the data service stores
    if s.len() != 36 || Uuid::try_parse(s).is_err() {
        return Some(ValidationError::InvalidUuid {
            field: field.to_string(),
        });
    }

    None
}

/// A plausible email address: one `@`, a dotted domain, no whitespace.
pub fn validate_email(value: &Value, field: &str) -> Option<ValidationError> {
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            return Some(ValidationError::NotAString {
                field: field.to_string(),
            })
        }
    };

    if is_plausible_email(s) {
        None
    } else {
        Some(ValidationError::InvalidEmail {
            field: field.to_string(),
        })
    }
}

fn is_plausible_email(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }

    let mut parts = s.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    if local.is_empty() {
        return false;
    }

    // Domain needs a dot with at least one character on each side
    match domain.rfind('.') {
        Some(i) => i > 0 && i < domain.len() - 1,
        None => false,
    }
}

/// An ISO-parseable date: `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn validate_date(value: &Value, field: &str) -> Option<ValidationError> {
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            return Some(ValidationError::NotAString {
                field: field.to_string(),
            })
        }
    };

    let parses = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(s).is_ok();

    if parses {
        None
    } else {
        Some(ValidationError::InvalidDate {
            field: field.to_string(),
        })
    }
}

/// An array with an optional minimum length.
pub fn validate_array(
    value: &Value,
    field: &str,
    min_length: Option<usize>,
) -> Option<ValidationError> {
    let arr = match value.as_array() {
        Some(arr) => arr,
        None => {
            return Some(ValidationError::NotAnArray {
                field: field.to_string(),
            })
        }
    };

    if let Some(min) = min_length {
        if arr.len() < min {
            return Some(ValidationError::TooFewItems {
                field: field.to_string(),
                min,
            });
        }
    }

    None
}

// =============================================================================
// Schema Validators
// =============================================================================
// One per creatable/updatable entity. Each mirrors what its API route
// inserts: required fields checked first, optional fields checked only
// when present and non-null.

/// Validates an inventory-item creation body.
pub fn validate_item_create(body: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    report.push(
        validate_required(body, "name")
            .or_else(|| validate_string(&body["name"], "name", Some(1), Some(200))),
    );
    report.push(
        validate_required(body, "unit")
            .or_else(|| validate_string(&body["unit"], "unit", Some(1), Some(50))),
    );

    if let Some(category_id) = present(body, "category_id") {
        report.push(validate_uuid(category_id, "category_id"));
    }
    if let Some(vendor_id) = present(body, "vendor_id") {
        report.push(validate_uuid(vendor_id, "vendor_id"));
    }
    if let Some(price) = present(body, "current_price") {
        report.push(validate_number(price, "current_price", Some(0.0), None));
    }
    if let Some(par) = present(body, "par_level") {
        report.push(validate_number(par, "par_level", Some(0.0), None));
    }

    report
}

/// Validates an inventory-item update body.
pub fn validate_item_update(body: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    report.push(validate_required(body, "id").or_else(|| validate_uuid(&body["id"], "id")));

    if let Some(name) = body.get("name") {
        report.push(validate_string(name, "name", Some(1), Some(200)));
    }
    if let Some(unit) = body.get("unit") {
        report.push(validate_string(unit, "unit", Some(1), Some(50)));
    }
    if let Some(price) = present(body, "current_price") {
        report.push(validate_number(price, "current_price", Some(0.0), None));
    }

    report
}

/// Validates a vendor creation body.
pub fn validate_vendor_create(body: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    report.push(
        validate_required(body, "name")
            .or_else(|| validate_string(&body["name"], "name", Some(1), Some(200))),
    );

    if let Some(contact) = present_non_empty(body, "contact_name") {
        report.push(validate_string(contact, "contact_name", None, Some(100)));
    }
    if let Some(email) = present_non_empty(body, "email") {
        report.push(validate_email(email, "email"));
    }
    if let Some(phone) = present_non_empty(body, "phone") {
        report.push(validate_string(phone, "phone", None, Some(30)));
    }

    report
}

/// Validates a vendor update body.
pub fn validate_vendor_update(body: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    report.push(validate_required(body, "id").or_else(|| validate_uuid(&body["id"], "id")));

    if let Some(name) = body.get("name") {
        report.push(validate_string(name, "name", Some(1), Some(200)));
    }
    if let Some(email) = present_non_empty(body, "email") {
        report.push(validate_email(email, "email"));
    }

    report
}

/// Validates an inventory-count creation body.
///
/// The count is submitted as one logical write: a non-empty `items`
/// array, each line carrying an item id and a non-negative quantity.
pub fn validate_count_create(body: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    let items_error = validate_required(body, "items")
        .or_else(|| validate_array(&body["items"], "items", Some(1)));

    match items_error {
        Some(error) => report.push(Some(error)),
        None => {
            // Non-empty array confirmed; check each line
            if let Some(items) = body["items"].as_array() {
                for (index, line) in items.iter().enumerate() {
                    if !line.is_object() {
                        report.push(Some(ValidationError::NotAnObject {
                            field: format!("items[{}]", index),
                        }));
                        continue;
                    }

                    let item_id_field = format!("items[{}].item_id", index);
                    report.push(
                        validate_required(line, "item_id")
                            .map(|_| ValidationError::Required {
                                field: item_id_field.clone(),
                            })
                            .or_else(|| validate_uuid(&line["item_id"], &item_id_field)),
                    );

                    let quantity_field = format!("items[{}].quantity", index);
                    report.push(
                        validate_required(line, "quantity")
                            .map(|_| ValidationError::Required {
                                field: quantity_field.clone(),
                            })
                            .or_else(|| {
                                validate_number(
                                    &line["quantity"],
                                    &quantity_field,
                                    Some(0.0),
                                    None,
                                )
                            }),
                    );
                }
            }
        }
    }

    if let Some(count_date) = present(body, "count_date") {
        report.push(validate_date(count_date, "count_date"));
    }

    report
}

/// Validates a waste-log creation body.
pub fn validate_waste_create(body: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    report.push(
        validate_required(body, "item_id").or_else(|| validate_uuid(&body["item_id"], "item_id")),
    );
    report.push(
        validate_required(body, "quantity")
            .or_else(|| validate_number(&body["quantity"], "quantity", Some(0.0), None)),
    );
    report.push(
        validate_required(body, "reason")
            .or_else(|| validate_string(&body["reason"], "reason", Some(1), Some(100))),
    );

    if let Some(notes) = present_non_empty(body, "notes") {
        report.push(validate_string(notes, "notes", None, Some(500)));
    }

    report
}

// =============================================================================
// Helpers
// =============================================================================

/// The field, when present and non-null.
fn present<'a>(body: &'a Value, field: &str) -> Option<&'a Value> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// The field, when present, non-null, and not the empty string.
/// Optional text fields treat "" the same as absent.
fn present_non_empty<'a>(body: &'a Value, field: &str) -> Option<&'a Value> {
    match present(body, field) {
        Some(Value::String(s)) if s.is_empty() => None,
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GOOD_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_validate_required() {
        assert!(validate_required(&json!({}), "name").is_some());
        assert!(validate_required(&json!({ "name": null }), "name").is_some());
        assert!(validate_required(&json!({ "name": "" }), "name").is_some());
        assert!(validate_required(&json!({ "name": "Flour" }), "name").is_none());
        assert!(validate_required(&json!({ "name": 0 }), "name").is_none());
    }

    #[test]
    fn test_validate_string_bounds() {
        assert!(validate_string(&json!("ok"), "name", Some(1), Some(10)).is_none());
        assert!(validate_string(&json!(""), "name", Some(1), None).is_some());
        assert!(validate_string(&json!("toolongname"), "name", None, Some(5)).is_some());
        assert!(validate_string(&json!(42), "name", None, None).is_some());
    }

    #[test]
    fn test_validate_number_bounds() {
        assert!(validate_number(&json!(2.5), "quantity", Some(0.0), None).is_none());
        assert!(validate_number(&json!(0), "quantity", Some(0.0), None).is_none());
        assert!(validate_number(&json!(-1), "quantity", Some(0.0), None).is_some());
        assert!(validate_number(&json!("2.5"), "quantity", None, None).is_some());
        assert!(validate_number(&json!(101), "pct", None, Some(100.0)).is_some());
    }

    #[test]
    fn test_validate_uuid_canonical_only() {
        assert!(validate_uuid(&json!(GOOD_UUID), "id").is_none());
        assert!(validate_uuid(&json!("not-a-uuid"), "id").is_some());
        // Simple (unhyphenated) form is rejected - storage keys are canonical
        assert!(validate_uuid(&json!("550e8400e29b41d4a716446655440000"), "id").is_some());
        assert!(validate_uuid(&json!(123), "id").is_some());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email(&json!("chef@bistro.com"), "email").is_none());
        assert!(validate_email(&json!("a@b.co"), "email").is_none());
        assert!(validate_email(&json!("no-at-sign.com"), "email").is_some());
        assert!(validate_email(&json!("two@@signs.com"), "email").is_some());
        assert!(validate_email(&json!("spaces in@mail.com"), "email").is_some());
        assert!(validate_email(&json!("nodot@domain"), "email").is_some());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date(&json!("2024-03-01"), "count_date").is_none());
        assert!(validate_date(&json!("2024-03-01T12:00:00Z"), "count_date").is_none());
        assert!(validate_date(&json!("yesterday"), "count_date").is_some());
        assert!(validate_date(&json!(20240301), "count_date").is_some());
    }

    #[test]
    fn test_validate_array() {
        assert!(validate_array(&json!([1]), "items", Some(1)).is_none());
        assert!(validate_array(&json!([]), "items", Some(1)).is_some());
        assert!(validate_array(&json!("nope"), "items", None).is_some());
    }

    #[test]
    fn test_validate_item_create_happy_path() {
        let report = validate_item_create(&json!({
            "name": "Chicken breast",
            "unit": "lb",
            "category_id": GOOD_UUID,
            "current_price": 3.99,
            "par_level": 20,
        }));
        assert!(report.is_valid());
        assert!(report.messages().is_empty());
    }

    #[test]
    fn test_validate_item_create_collects_all_errors() {
        let report = validate_item_create(&json!({
            "unit": "lb",
            "category_id": "bogus",
            "current_price": -2,
        }));
        assert!(!report.is_valid());
        let messages = report.messages();
        assert!(messages.contains(&"name is required".to_string()));
        assert!(messages.contains(&"category_id must be a valid UUID".to_string()));
        assert!(messages.contains(&"current_price must be at least 0".to_string()));
    }

    #[test]
    fn test_validate_item_update_requires_id() {
        let report = validate_item_update(&json!({ "name": "Flour" }));
        assert!(!report.is_valid());
        assert_eq!(report.messages(), vec!["id is required".to_string()]);

        let report = validate_item_update(&json!({ "id": GOOD_UUID, "name": "Flour" }));
        assert!(report.is_valid());
    }

    #[test]
    fn test_validate_vendor_create_optional_fields() {
        // Empty-string optionals are treated as absent
        let report = validate_vendor_create(&json!({
            "name": "Sysco",
            "email": "",
            "phone": "",
        }));
        assert!(report.is_valid());

        let report = validate_vendor_create(&json!({
            "name": "Sysco",
            "email": "not-an-email",
        }));
        assert_eq!(
            report.messages(),
            vec!["email must be a valid email address".to_string()]
        );
    }

    #[test]
    fn test_validate_vendor_update() {
        let report = validate_vendor_update(&json!({ "id": "nope" }));
        assert_eq!(
            report.messages(),
            vec!["id must be a valid UUID".to_string()]
        );
    }

    #[test]
    fn test_validate_count_create_requires_nonempty_items() {
        let report = validate_count_create(&json!({}));
        assert_eq!(report.messages(), vec!["items is required".to_string()]);

        let report = validate_count_create(&json!({ "items": [] }));
        assert_eq!(
            report.messages(),
            vec!["items must have at least 1 items".to_string()]
        );
    }

    #[test]
    fn test_validate_count_create_checks_each_line() {
        let report = validate_count_create(&json!({
            "items": [
                { "item_id": GOOD_UUID, "quantity": 2.5 },
                { "item_id": "bad", "quantity": -1 },
                "not-an-object",
            ],
            "count_date": "2024-03-01",
        }));
        let messages = report.messages();
        assert!(messages.contains(&"items[1].item_id must be a valid UUID".to_string()));
        assert!(messages.contains(&"items[1].quantity must be at least 0".to_string()));
        assert!(messages.contains(&"items[2] must be an object".to_string()));
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_validate_waste_create_reference_case() {
        // Bad id format, negative quantity, empty reason: three complaints
        let report = validate_waste_create(&json!({
            "item_id": "not-a-uuid",
            "quantity": -1,
            "reason": "",
        }));
        assert!(!report.is_valid());
        let messages = report.messages();
        assert_eq!(messages.len(), 3);
        assert!(messages.contains(&"item_id must be a valid UUID".to_string()));
        assert!(messages.contains(&"quantity must be at least 0".to_string()));
        assert!(messages.contains(&"reason is required".to_string()));
    }

    #[test]
    fn test_validate_waste_create_happy_path() {
        let report = validate_waste_create(&json!({
            "item_id": GOOD_UUID,
            "quantity": 2,
            "reason": "spoilage",
            "notes": "walk-in door left open",
        }));
        assert!(report.is_valid());
    }

    #[test]
    fn test_validators_do_not_mutate_input() {
        let body = json!({ "item_id": "not-a-uuid", "quantity": -1, "reason": "" });
        let before = body.clone();
        let _ = validate_waste_create(&body);
        assert_eq!(body, before);
    }
}
