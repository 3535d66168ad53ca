//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise for INR, cents for USD)      │
//! │    ₹499.50 is stored as 49950                                          │
//! │    Cart totals are exact integer sums                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Boundary
//! The catalog and order endpoints speak in major units (`"price": 499`).
//! `Money` serializes to and from that shape: whole amounts become JSON
//! integers, fractional amounts become JSON decimals. The conversion from a
//! JSON decimal is the only place a float is ever touched.
//!
//! ## Usage
//! ```rust
//! use shopit_core::money::Money;
//!
//! let price = Money::from_major(499);
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.minor(), 99_800);
//! assert_eq!(line.to_string(), "998.00");
//! ```

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Minor units per major unit (100 paise per rupee).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLine.line_total ──► total_amount ──► PriceDetails
///                                                               │
///                        Payment widget (minor units) ◄─────────┤
///                        Order.amount (major units JSON) ◄──────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (paise, cents).
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ## Example
    /// ```rust
    /// use shopit_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(49).minor(), 4_900);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Creates a Money value from major and minor parts.
    ///
    /// For negative amounts only the major part carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Returns the value in minor units.
    ///
    /// This is the amount handed to the payment widget.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole major-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use shopit_core::money::Money;
    ///
    /// let unit_price = Money::from_major(50);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_major(150));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns true when the amount has no fractional part.
    #[inline]
    pub const fn is_whole(&self) -> bool {
        self.0 % MINOR_PER_MAJOR == 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering without a currency symbol.
///
/// The storefront config adds the symbol when formatting for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde (major units on the wire)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.major())
        } else {
            serializer.serialize_f64(self.0 as f64 / MINOR_PER_MAJOR as f64)
        }
    }
}

struct MajorUnitsVisitor;

impl<'de> Visitor<'de> for MajorUnitsVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a monetary amount in major units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(MINOR_PER_MAJOR)
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let v = i64::try_from(v).map_err(|_| E::custom("amount out of range"))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        Ok(Money((v * MINOR_PER_MAJOR as f64).round() as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        let parsed: f64 = v
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid amount '{}'", v)))?;
        self.visit_f64(parsed)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MajorUnitsVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
