//! # Formatting Utilities
//!
//! Renders numbers as the strings the dashboard shows. Rounding happens
//! HERE and only here - stored sums stay unrounded (see [`crate::types`]).
//!
//! ## Usage
//! ```rust
//! use costcatch_core::format::{format_currency, format_percentage, format_quantity};
//!
//! assert_eq!(format_currency(12847.5), "$12,847.50");
//! assert_eq!(format_percentage(31.275, 1), "31.3%");
//! assert_eq!(format_quantity(2.5, "lb"), "2.50 lb");
//! ```

// =============================================================================
// Currency
// =============================================================================

/// Formats a dollar amount with thousands separators and 2 decimals.
///
/// Matches the dashboard's en-US currency rendering: `$1,234.56`,
/// negatives as `-$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    // Round to whole cents first, then split into dollars and cents
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let cents_part = cents % 100;

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        group_thousands(dollars),
        cents_part
    )
}

/// Inserts comma separators into a whole-dollar amount.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Percentage
// =============================================================================

/// Formats a percentage with a fixed number of decimals and a trailing `%`.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

// =============================================================================
// Quantity
// =============================================================================

/// Formats a counted quantity with its unit label.
///
/// Whole quantities are unadorned ("3 lb"); fractional quantities show
/// 2 decimals ("2.50 lb").
pub fn format_quantity(quantity: f64, unit: &str) -> String {
    if quantity.fract() == 0.0 {
        format!("{} {}", quantity, unit)
    } else {
        format!("{:.2} {}", quantity, unit)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_basic() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.0), "$5.00");
        assert_eq!(format_currency(10.99), "$10.99");
    }

    #[test]
    fn test_format_currency_thousands_grouping() {
        assert_eq!(format_currency(1_234.56), "$1,234.56");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(999.99), "$999.99");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-550.5), "-$550.50");
        assert_eq!(format_currency(-1_234.56), "-$1,234.56");
    }

    #[test]
    fn test_format_currency_rounds_to_cents() {
        assert_eq!(format_currency(10.006), "$10.01");
        assert_eq!(format_currency(10.004), "$10.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(31.275, 1), "31.3%");
        assert_eq!(format_percentage(31.275, 0), "31%");
        assert_eq!(format_percentage(0.0, 1), "0.0%");
        assert_eq!(format_percentage(-2.5, 2), "-2.50%");
    }

    #[test]
    fn test_format_quantity_whole_numbers_unadorned() {
        assert_eq!(format_quantity(3.0, "lb"), "3 lb");
        assert_eq!(format_quantity(0.0, "each"), "0 each");
        assert_eq!(format_quantity(12.0, "case"), "12 case");
    }

    #[test]
    fn test_format_quantity_fractional_two_decimals() {
        assert_eq!(format_quantity(2.5, "lb"), "2.50 lb");
        assert_eq!(format_quantity(1.25, "gal"), "1.25 gal");
        assert_eq!(format_quantity(0.333, "lb"), "0.33 lb");
    }
}
