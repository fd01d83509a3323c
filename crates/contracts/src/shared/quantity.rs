//! Quantity input validation shared by the per-keystroke check and the save
//! check of the inline editor. Zero is a valid quantity (out of stock); the
//! rule is deliberately identical at both checkpoints.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    Empty,
    NotANumber,
    Negative,
}

impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityError::Empty => write!(f, "Quantity is required"),
            QuantityError::NotANumber => write!(f, "Quantity must be a whole number"),
            QuantityError::Negative => write!(f, "Quantity cannot be negative"),
        }
    }
}

/// Validate a staged quantity string. Invalid when empty, non-numeric or
/// negative; `"0"` parses to a valid 0.
pub fn validate_quantity(raw: &str) -> Result<i64, QuantityError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(QuantityError::Negative),
        Ok(n) => Ok(n),
        Err(_) => Err(QuantityError::NotANumber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(validate_quantity(""), Err(QuantityError::Empty));
        assert_eq!(validate_quantity("   "), Err(QuantityError::Empty));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(validate_quantity("abc"), Err(QuantityError::NotANumber));
        assert_eq!(validate_quantity("1.5"), Err(QuantityError::NotANumber));
        assert_eq!(validate_quantity("1e3"), Err(QuantityError::NotANumber));
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(validate_quantity("-1"), Err(QuantityError::Negative));
        assert_eq!(validate_quantity("-0"), Ok(0));
    }

    #[test]
    fn zero_is_valid_at_every_checkpoint() {
        // The same function backs keystroke and save validation, so a staged
        // "0" passes both.
        assert_eq!(validate_quantity("0"), Ok(0));
    }

    #[test]
    fn accepts_surrounding_whitespace() {
        assert_eq!(validate_quantity(" 12 "), Ok(12));
    }
}
