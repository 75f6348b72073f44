//! Exact decimal quantities for prices and package weights.
//!
//! Both types wrap `rust_decimal::Decimal`, so sums such as `2 × 0.2 + 0.7`
//! come out as exactly `1.1` and the shipping formula never drifts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount in a single, fixed currency.
///
/// Displayed values are whole units truncated toward zero, never rounded.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use checkout_engine::Money;
///
/// let price = Money::from_str("30.99").unwrap();
/// assert_eq!(price.whole_units(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates an amount from a whole number of currency units.
    pub const fn whole(units: u32) -> Self {
        Money(Decimal::from_parts(units, 0, 0, false, 0))
    }

    /// Wraps a raw decimal.
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Integer part of the amount, truncated toward zero.
    ///
    /// Every integral `Decimal` fits in an `i128`.
    pub fn whole_units(&self) -> i128 {
        self.0.trunc().to_i128().unwrap_or_default()
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Unit price times quantity.
impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Money(self.0 * Decimal::from(rhs))
    }
}

/// Rate per kilogram times a weight.
impl Mul<Weight> for Money {
    type Output = Self;

    fn mul(self, rhs: Weight) -> Self::Output {
        Money(self.0 * rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A mass in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Weight(Decimal);

impl Weight {
    /// Zero value.
    pub const ZERO: Self = Weight(Decimal::ZERO);

    /// Creates a weight from a whole number of kilograms.
    pub const fn whole_kg(kg: u32) -> Self {
        Weight(Decimal::from_parts(kg, 0, 0, false, 0))
    }

    /// Wraps a raw decimal number of kilograms.
    pub fn from_kg(kg: Decimal) -> Self {
        Weight(kg)
    }

    /// Returns `true` if this weight is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this weight is below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Whole grams, rounded half away from zero.
    ///
    /// Returns `None` when the weight is negative or too large to express.
    pub fn grams(&self) -> Option<u64> {
        self.0
            .checked_mul(Decimal::from(1000u32))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
    }

    /// Kilograms with one decimal place, rounded half away from zero.
    pub fn kg_one_decimal(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.1}", rounded)
    }
}

impl FromStr for Weight {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Weight)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg", self.0.normalize())
    }
}

impl Add for Weight {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Weight(self.0 + rhs.0)
    }
}

impl Mul<u32> for Weight {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Weight(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::ZERO, Add::add)
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Weight::from_str(&s).map_err(serde::de::Error::custom)
    }
}
