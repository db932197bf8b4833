//! Derived price values for the detail panel and buy bar.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole-percent discount of `current` against `original`, rounded half
/// up. `None` unless `original` is strictly greater and in the same
/// currency.
///
/// ```
/// use urbno_commerce::display::discount_percent;
/// use urbno_commerce::money::{Currency, Money};
///
/// let was = Money::from_major(3999, Currency::INR);
/// let now = Money::from_major(2999, Currency::INR);
/// assert_eq!(discount_percent(&was, &now), Some(25));
/// ```
pub fn discount_percent(original: &Money, current: &Money) -> Option<u32> {
    if original.currency != current.currency || original.minor_units <= current.minor_units {
        return None;
    }
    let original = i128::from(original.minor_units);
    let saved = original - i128::from(current.minor_units);
    if original <= 0 {
        return None;
    }
    // round(saved / original * 100)
    let percent = (saved * 200 + original) / (original * 2);
    u32::try_from(percent).ok()
}

/// Price block: current price, optional struck-through price and the
/// discount badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDisplay {
    pub current: Money,
    /// Present only when it is higher than `current`.
    pub original: Option<Money>,
    pub discount_percent: Option<u32>,
}

impl PriceDisplay {
    pub fn new(current: Money, original: Option<Money>) -> Self {
        let discount = original.and_then(|was| discount_percent(&was, &current));
        Self {
            current,
            original: original.filter(|_| discount.is_some()),
            discount_percent: discount,
        }
    }

    pub fn is_discounted(&self) -> bool {
        self.discount_percent.is_some()
    }

    pub fn current_label(&self) -> String {
        self.current.display_compact()
    }

    pub fn original_label(&self) -> Option<String> {
        self.original.map(|m| m.display_compact())
    }

    /// "25% OFF".
    pub fn discount_label(&self) -> Option<String> {
        self.discount_percent.map(|p| format!("{p}% OFF"))
    }
}

impl fmt::Display for PriceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_label())?;
        if let (Some(was), Some(off)) = (self.original_label(), self.discount_label()) {
            write!(f, "  {was}  {off}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn inr(major: i64) -> Money {
        Money::from_major(major, Currency::INR)
    }

    #[test]
    fn test_backpack_discount() {
        assert_eq!(discount_percent(&inr(3999), &inr(2999)), Some(25));
        assert_eq!(discount_percent(&Money::new(3999, Currency::INR), &Money::new(2999, Currency::INR)), Some(25));
    }

    #[test]
    fn test_shop_discounts() {
        assert_eq!(discount_percent(&inr(999), &inr(699)), Some(30));
        assert_eq!(discount_percent(&inr(1499), &inr(799)), Some(47));
        assert_eq!(discount_percent(&inr(1199), &inr(749)), Some(38));
    }

    #[test]
    fn test_half_rounds_up() {
        // 1/8 = 12.5%
        assert_eq!(discount_percent(&Money::new(800, Currency::INR), &Money::new(700, Currency::INR)), Some(13));
    }

    #[test]
    fn test_no_discount_when_not_cheaper() {
        assert_eq!(discount_percent(&inr(999), &inr(999)), None);
        assert_eq!(discount_percent(&inr(799), &inr(999)), None);
    }

    #[test]
    fn test_mixed_currency_has_no_discount() {
        let was = Money::from_major(40, Currency::USD);
        assert_eq!(discount_percent(&was, &inr(30)), None);
    }

    #[test]
    fn test_price_display() {
        let display = PriceDisplay::new(inr(2999), Some(inr(3999)));
        assert!(display.is_discounted());
        assert_eq!(display.to_string(), "\u{20b9}2999  \u{20b9}3999  25% OFF");

        let plain = PriceDisplay::new(inr(999), None);
        assert_eq!(plain.to_string(), "\u{20b9}999");

        let higher = PriceDisplay::new(inr(999), Some(inr(899)));
        assert_eq!(higher.original, None);
        assert_eq!(higher.discount_label(), None);
    }
}
