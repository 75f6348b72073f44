//! Product model.
//!
//! The set of product kinds is closed: every capability question
//! (expirable, shippable, weight) is answered by matching on [`ProductKind`].

use crate::decimal::{Money, Weight};
use crate::error::{CheckoutError, Result};
use chrono::{Local, NaiveDate};

/// Largest unit price the catalog accepts.
///
/// With quantities bounded by `u32` stock, line and cart totals stay far
/// inside `Decimal` range.
pub const MAX_UNIT_PRICE: Money = Money::whole(1_000_000_000);

/// Largest unit weight the catalog accepts; keeps line weights within `u64` grams.
pub const MAX_UNIT_WEIGHT: Weight = Weight::whole_kg(1_000_000);

/// The kind of a product together with the data only that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKind {
    /// Shippable, never expires.
    Electronics { weight: Weight },

    /// Shippable and expirable.
    Food { expires_on: NaiveDate, weight: Weight },

    /// Neither shippable nor expirable.
    Digital,
}

/// A product held in the catalog.
///
/// # Invariants
///
/// - `weight()` is zero whenever `is_shippable()` is `false`
/// - `expiration_date()` is `Some` iff `is_expirable()`
/// - `stock` only changes through [`Product::reduce_stock`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: String,
    unit_price: Money,
    stock: u32,
    kind: ProductKind,
}

impl Product {
    pub fn new(name: impl Into<String>, unit_price: Money, stock: u32, kind: ProductKind) -> Self {
        Product {
            name: name.into(),
            unit_price,
            stock,
            kind,
        }
    }

    pub fn electronics(name: impl Into<String>, unit_price: Money, stock: u32, weight: Weight) -> Self {
        Self::new(name, unit_price, stock, ProductKind::Electronics { weight })
    }

    pub fn food(
        name: impl Into<String>,
        unit_price: Money,
        stock: u32,
        expires_on: NaiveDate,
        weight: Weight,
    ) -> Self {
        Self::new(name, unit_price, stock, ProductKind::Food { expires_on, weight })
    }

    pub fn digital(name: impl Into<String>, unit_price: Money, stock: u32) -> Self {
        Self::new(name, unit_price, stock, ProductKind::Digital)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Units currently available.
    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn is_expirable(&self) -> bool {
        matches!(self.kind, ProductKind::Food { .. })
    }

    pub fn is_shippable(&self) -> bool {
        match self.kind {
            ProductKind::Electronics { .. } | ProductKind::Food { .. } => true,
            ProductKind::Digital => false,
        }
    }

    /// Weight of a single unit; zero for products that are not shipped.
    pub fn weight(&self) -> Weight {
        match self.kind {
            ProductKind::Electronics { weight } | ProductKind::Food { weight, .. } => weight,
            ProductKind::Digital => Weight::ZERO,
        }
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        match self.kind {
            ProductKind::Food { expires_on, .. } => Some(expires_on),
            _ => None,
        }
    }

    /// Returns `true` if the product is expirable and `today` is past its date.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiration_date()
            .map(|expires_on| today > expires_on)
            .unwrap_or(false)
    }

    /// Expiry check against the local calendar date.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Local::now().date_naive())
    }

    /// Checks that price and weight are non-negative and within
    /// [`MAX_UNIT_PRICE`] and [`MAX_UNIT_WEIGHT`].
    pub fn check_bounds(&self) -> std::result::Result<(), String> {
        if self.unit_price.is_negative() {
            return Err(format!("negative price {}", self.unit_price));
        }
        if self.unit_price > MAX_UNIT_PRICE {
            return Err(format!(
                "price {} exceeds maximum {}",
                self.unit_price, MAX_UNIT_PRICE
            ));
        }

        let weight = self.weight();
        if weight.is_negative() {
            return Err(format!("negative weight {}", weight));
        }
        if weight > MAX_UNIT_WEIGHT {
            return Err(format!("weight {} exceeds maximum {}", weight, MAX_UNIT_WEIGHT));
        }

        Ok(())
    }

    /// Removes `quantity` units from stock.
    ///
    /// Fails with `InsufficientStock` and leaves stock untouched when
    /// `quantity > stock`.
    pub fn reduce_stock(&mut self, quantity: u32) -> Result<()> {
        if quantity > self.stock {
            return Err(CheckoutError::InsufficientStock {
                product: self.name.clone(),
                available: self.stock,
                requested: quantity,
            });
        }

        self.stock -= quantity;
        Ok(())
    }
}
