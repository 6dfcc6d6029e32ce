//! # Money Module
//!
//! Provides the `Money` type for handling Thai baht safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Satang (1 THB = 100 satang)                      │
//! │    Prices, line totals, shipping and order totals are all i64 satang   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiger_core::money::Money;
//!
//! let price = Money::from_baht(750);      // 750.00 THB
//! let line = price * 2;                   // 1,500.00 THB
//! let total = line + Money::from_baht(50);
//! assert_eq!(total.satang(), 155_000);
//! assert_eq!(total.to_string(), "1,550.00 THB");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in satang (the smallest baht unit).
///
/// ## Where Money is Used
/// ```text
/// ShirtDesign.price ──► OrderLineItem.price_per_unit ──► line total
///                                                            │
///                       shipping (delivery orders only) ─────┤
///                                                            ▼
///                                                    Order.total_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from satang.
    #[inline]
    pub const fn from_satang(satang: i64) -> Self {
        Money(satang)
    }

    /// Creates a Money value from whole baht.
    ///
    /// ## Example
    /// ```rust
    /// use tiger_core::money::Money;
    ///
    /// assert_eq!(Money::from_baht(1100).satang(), 110_000);
    /// ```
    #[inline]
    pub const fn from_baht(baht: i64) -> Self {
        Money(baht * 100)
    }

    /// Returns the value in satang.
    #[inline]
    pub const fn satang(&self) -> i64 {
        self.0
    }

    /// Returns the whole-baht part (truncated toward zero).
    #[inline]
    pub const fn baht(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the satang part (0-99).
    #[inline]
    pub const fn satang_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero baht.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Line total for `quantity` units at this unit price.
    #[inline]
    pub const fn multiply_quantity(&self, quantity: i64) -> Money {
        Money(self.0 * quantity)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows baht with thousands separators, e.g. `1,550.00 THB`.
///
/// Used in chat notifications; the admin UI formats on its own.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.baht().abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}{}.{:02} THB", sign, grouped, self.satang_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_baht() {
        let money = Money::from_baht(750);
        assert_eq!(money.satang(), 75_000);
        assert_eq!(money.baht(), 750);
        assert_eq!(money.satang_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_baht(750).to_string(), "750.00 THB");
        assert_eq!(Money::from_baht(1100).to_string(), "1,100.00 THB");
        assert_eq!(Money::from_satang(123_456_789).to_string(), "1,234,567.89 THB");
        assert_eq!(Money::from_satang(-550).to_string(), "-5.50 THB");
        assert_eq!(Money::zero().to_string(), "0.00 THB");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_baht(10);
        let b = Money::from_baht(5);

        assert_eq!((a + b).baht(), 15);
        assert_eq!((a - b).baht(), 5);
        assert_eq!((a * 3).baht(), 30);
        assert_eq!(a.multiply_quantity(4).baht(), 40);
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![Money::from_baht(700), Money::from_baht(500)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_baht(1200));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }
}
