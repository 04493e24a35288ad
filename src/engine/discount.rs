use serde::Serialize;

use super::BookingError;
use crate::models::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountCode {
    pub code: String,
    pub percentage: u8,
    pub description: String,
}

impl DiscountCode {
    pub fn new(code: &str, percentage: u8, description: &str) -> Self {
        Self {
            code: code.to_ascii_uppercase(),
            percentage: percentage.min(100),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountResult {
    pub code: String,
    pub percentage: u8,
    pub subtotal: Money,
    pub discounted_amount: Money,
    pub savings: Money,
}

/// Static promo catalog. Lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountCatalog {
    codes: Vec<DiscountCode>,
}

impl Default for DiscountCatalog {
    fn default() -> Self {
        Self::festive()
    }
}

impl DiscountCatalog {
    pub fn new(codes: Vec<DiscountCode>) -> Self {
        Self { codes }
    }

    pub fn festive() -> Self {
        Self::new(vec![
            DiscountCode::new("DIWALI25", 25, "Diwali Special - 25% OFF"),
            DiscountCode::new("FESTIVE20", 20, "Festival Bonanza - 20% OFF"),
            DiscountCode::new("LIGHTS15", 15, "Festival of Lights - 15% OFF"),
        ])
    }

    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }

    pub fn lookup(&self, code: &str) -> Option<&DiscountCode> {
        let code = code.trim();
        self.codes.iter().find(|d| d.code.eq_ignore_ascii_case(code))
    }

    pub fn apply_code(&self, code: &str, subtotal: Money) -> Result<DiscountResult, BookingError> {
        let entry = self
            .lookup(code)
            .ok_or_else(|| BookingError::InvalidCode(code.trim().to_string()))?;

        let discounted_amount = subtotal.less_percent(entry.percentage);
        Ok(DiscountResult {
            code: entry.code.clone(),
            percentage: entry.percentage,
            subtotal,
            discounted_amount,
            savings: subtotal - discounted_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let catalog = DiscountCatalog::default();
        assert_eq!(catalog.lookup("diwali25").unwrap().percentage, 25);
        assert_eq!(catalog.lookup("  Festive20 ").unwrap().percentage, 20);
        assert!(catalog.lookup("DIWALI").is_none());
    }

    #[test]
    fn test_apply_code() {
        let catalog = DiscountCatalog::default();
        let result = catalog.apply_code("DIWALI25", Money::from_rupees(1600)).unwrap();
        assert_eq!(result.percentage, 25);
        assert_eq!(result.discounted_amount, Money::from_rupees(1200));
        assert_eq!(result.savings, Money::from_rupees(400));
        assert_eq!(result.discounted_amount.to_string(), "1200.00");
    }

    #[test]
    fn test_unknown_code() {
        let catalog = DiscountCatalog::default();
        let err = catalog.apply_code("NOTREAL", Money::from_rupees(800)).unwrap_err();
        assert_eq!(err, BookingError::InvalidCode("NOTREAL".to_string()));
        assert_eq!(err.kind(), "invalid_code");
    }

    #[test]
    fn test_same_input_same_amount() {
        let catalog = DiscountCatalog::default();
        let a = catalog.apply_code("lights15", Money::from_rupees(1800)).unwrap();
        let b = catalog.apply_code("LIGHTS15", Money::from_rupees(1800)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.discounted_amount, Money::from_rupees(1530));
    }

    #[test]
    fn test_percentage_clamped() {
        let catalog = DiscountCatalog::new(vec![DiscountCode::new("free", 250, "Everything free")]);
        let result = catalog.apply_code("FREE", Money::from_rupees(600)).unwrap();
        assert_eq!(result.percentage, 100);
        assert_eq!(result.discounted_amount, Money::ZERO);
    }
}
