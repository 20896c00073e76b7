//! # Quantity Entry Buffer
//!
//! The number-pad buffer a counter types into. Keystrokes edit a string,
//! not a float, so "1.0" and "1.05" behave the way the display shows
//! them and nothing rounds until the value is committed.
//!
//! ## Rules
//! - Digits append; at most one decimal point
//! - At most 2 digits after the decimal point
//! - Delete removes the last keystroke; empty buffer displays as "0"

/// Maximum digits after the decimal point.
const MAX_FRACTION_DIGITS: usize = 2;

/// A number-pad entry in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityEntry {
    buffer: String,
}

impl QuantityEntry {
    /// Creates an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entry pre-filled from an existing quantity, for
    /// re-editing an already-counted item.
    pub fn from_quantity(quantity: f64) -> Self {
        let buffer = if quantity.fract() == 0.0 {
            format!("{}", quantity as i64)
        } else {
            format!("{:.2}", quantity)
        };
        Self { buffer }
    }

    /// Appends a digit. Ignored when the fraction already has 2 digits.
    pub fn push_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        if let Some(dot) = self.buffer.find('.') {
            if self.buffer.len() - dot - 1 >= MAX_FRACTION_DIGITS {
                return;
            }
        }
        self.buffer.push((b'0' + digit) as char);
    }

    /// Appends the decimal point. Ignored if one is already present.
    /// On an empty buffer this produces "0." so the display never
    /// starts with a bare dot.
    pub fn push_decimal(&mut self) {
        if self.buffer.contains('.') {
            return;
        }
        if self.buffer.is_empty() {
            self.buffer.push('0');
        }
        self.buffer.push('.');
    }

    /// Removes the last keystroke. The "0." produced by a leading
    /// decimal point deletes as one keystroke.
    pub fn delete(&mut self) {
        if self.buffer.ends_with('.') && self.buffer == "0." {
            self.buffer.clear();
        } else {
            self.buffer.pop();
        }
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// What the pad display shows: the buffer, or "0" when empty.
    pub fn display(&self) -> &str {
        if self.buffer.is_empty() {
            "0"
        } else {
            &self.buffer
        }
    }

    /// The entered quantity, or `None` when nothing parseable has been
    /// typed (empty, or a trailing-dot buffer like "0.").
    pub fn quantity(&self) -> Option<f64> {
        if self.buffer.is_empty() || self.buffer.ends_with('.') {
            return None;
        }
        self.buffer.parse().ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
