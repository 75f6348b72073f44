//! Shopping cart.
//!
//! A cart validates each insertion against the catalog's current stock and
//! the product's expiry, but never reserves or decrements stock itself.

use crate::catalog::{Catalog, ProductId};
use crate::decimal::{Money, Weight};
use crate::error::{CheckoutError, Result};
use chrono::{Local, NaiveDate};
use log::debug;

/// One product and the quantity requested of it.
///
/// Price, weight and shippability are fixed once a product is in the
/// catalog, so they are captured here; stock is always read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    product: ProductId,
    name: String,
    unit_price: Money,
    unit_weight: Weight,
    shippable: bool,
    quantity: u32,
}

impl CartLine {
    pub fn product_id(&self) -> ProductId {
        self.product
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn is_shippable(&self) -> bool {
        self.shippable
    }

    /// `unit_price × quantity`
    pub fn total_price(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// `unit_weight × quantity`; zero for lines that are not shipped.
    pub fn total_weight(&self) -> Weight {
        self.unit_weight * self.quantity
    }
}

/// Cart lines in insertion order, at most one per product.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds `quantity` units of the named product, checking expiry against
    /// the local date.
    pub fn add(&mut self, catalog: &Catalog, name: &str, quantity: u32) -> Result<()> {
        self.add_on(catalog, name, quantity, Local::now().date_naive())
    }

    /// Adds `quantity` units of the named product as of `today`.
    ///
    /// Fails, leaving the cart unchanged, when:
    /// - the product is not in the catalog
    /// - `quantity` is zero
    /// - the product is expirable and expired on `today`
    /// - `quantity`, or the line's quantity after adding it, exceeds stock
    ///
    /// Otherwise the existing line grows or a new line is appended.
    pub fn add_on(
        &mut self,
        catalog: &Catalog,
        name: &str,
        quantity: u32,
        today: NaiveDate,
    ) -> Result<()> {
        let id = catalog
            .find(name)
            .ok_or_else(|| CheckoutError::UnknownProduct(name.to_string()))?;
        let product = catalog
            .get(id)
            .ok_or_else(|| CheckoutError::UnknownProduct(name.to_string()))?;

        if quantity == 0 {
            return Err(CheckoutError::InvalidQuantity {
                product: name.to_string(),
                quantity,
            });
        }

        if product.is_expired_on(today) {
            return Err(CheckoutError::ExpiredProduct(name.to_string()));
        }

        let stock = product.stock();
        if quantity > stock {
            return Err(CheckoutError::InsufficientStock {
                product: name.to_string(),
                available: stock,
                requested: quantity,
            });
        }

        match self.lines.iter_mut().find(|line| line.product == id) {
            Some(line) => {
                let combined = line.quantity.saturating_add(quantity);
                if combined > stock {
                    return Err(CheckoutError::InsufficientStock {
                        product: name.to_string(),
                        available: stock,
                        requested: combined,
                    });
                }
                line.quantity = combined;
                debug!("Cart: {} now at {} unit(s)", name, combined);
            }
            None => {
                self.lines.push(CartLine {
                    product: id,
                    name: product.name().to_string(),
                    unit_price: product.unit_price(),
                    unit_weight: product.weight(),
                    shippable: product.is_shippable(),
                    quantity,
                });
                debug!("Cart: added {}x {}", quantity, name);
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// All lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity held for the named product, if it has a line.
    pub fn quantity_of(&self, name: &str) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.name == name)
            .map(|line| line.quantity)
    }

    /// Sum of every line's total price.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::total_price).sum()
    }

    /// Sum of the shippable lines' weight.
    pub fn total_weight(&self) -> Weight {
        self.shippable_lines().map(CartLine::total_weight).sum()
    }

    /// Shippable lines, preserving insertion order.
    pub fn shippable_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|line| line.shippable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use std::str::FromStr;

    fn kg(s: &str) -> Weight {
        Weight::from_str(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .insert(Product::food(
                "Cheese",
                Money::whole(100),
                10,
                NaiveDate::from_ymd_opt(2026, 10, 23).unwrap(),
                kg("0.2"),
            ))
            .unwrap();
        catalog
            .insert(Product::food(
                "Biscuits",
                Money::whole(150),
                5,
                NaiveDate::from_ymd_opt(2026, 11, 15).unwrap(),
                kg("0.7"),
            ))
            .unwrap();
        catalog
            .insert(Product::electronics("TV", Money::whole(500), 3, kg("15")))
            .unwrap();
        catalog
            .insert(Product::digital("Scratch Card", Money::whole(50), 100))
            .unwrap();
        catalog
            .insert(Product::food(
                "Old Cheese",
                Money::whole(100),
                5,
                NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
                kg("0.2"),
            ))
            .unwrap();
        catalog
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::ZERO);
        assert_eq!(cart.total_weight(), Weight::ZERO);
    }

    #[test]
    fn test_aggregates_mixed_cart() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_on(&catalog, "Cheese", 2, today()).unwrap();
        cart.add_on(&catalog, "Biscuits", 1, today()).unwrap();
        cart.add_on(&catalog, "Scratch Card", 1, today()).unwrap();

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.subtotal(), Money::whole(450));
        assert_eq!(cart.total_weight(), kg("1.1"));

        let shippable: Vec<&str> = cart.shippable_lines().map(CartLine::name).collect();
        assert_eq!(shippable, vec!["Cheese", "Biscuits"]);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_on(&catalog, "TV", 1, today()).unwrap();
        cart.add_on(&catalog, "Cheese", 1, today()).unwrap();
        cart.add_on(&catalog, "TV", 1, today()).unwrap();

        let names: Vec<&str> = cart.lines().iter().map(CartLine::name).collect();
        assert_eq!(names, vec!["TV", "Cheese"]);
        assert_eq!(cart.quantity_of("TV"), Some(2));
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let catalog = catalog();
        let mut split = Cart::new();
        split.add_on(&catalog, "Cheese", 3, today()).unwrap();
        split.add_on(&catalog, "Cheese", 4, today()).unwrap();

        let mut single = Cart::new();
        single.add_on(&catalog, "Cheese", 7, today()).unwrap();

        assert_eq!(split.lines(), single.lines());
    }

    #[test]
    fn test_quantity_over_stock_rejected() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let err = cart.add_on(&catalog, "TV", 5, today()).unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            }
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_combined_quantity_over_stock_rejected() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_on(&catalog, "TV", 2, today()).unwrap();

        let err = cart.add_on(&catalog, "TV", 2, today()).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InsufficientStock {
                available: 3,
                requested: 4,
                ..
            }
        ));
        assert_eq!(cart.quantity_of("TV"), Some(2));
    }

    #[test]
    fn test_expired_product_rejected() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let err = cart.add_on(&catalog, "Old Cheese", 1, today()).unwrap_err();

        assert!(matches!(err, CheckoutError::ExpiredProduct(name) if name == "Old Cheese"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_product_expiring_today_accepted() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let expiry_day = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        cart.add_on(&catalog, "Old Cheese", 1, expiry_day).unwrap();
        assert_eq!(cart.quantity_of("Old Cheese"), Some(1));
    }

    #[test]
    fn test_unknown_product_and_zero_quantity() {
        let catalog = catalog();
        let mut cart = Cart::new();

        assert!(matches!(
            cart.add_on(&catalog, "Sofa", 1, today()).unwrap_err(),
            CheckoutError::UnknownProduct(_)
        ));
        assert!(matches!(
            cart.add_on(&catalog, "TV", 0, today()).unwrap_err(),
            CheckoutError::InvalidQuantity { quantity: 0, .. }
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_digital_lines_weigh_nothing() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_on(&catalog, "Scratch Card", 3, today()).unwrap();

        assert_eq!(cart.lines()[0].total_weight(), Weight::ZERO);
        assert_eq!(cart.total_weight(), Weight::ZERO);
        assert_eq!(cart.shippable_lines().count(), 0);
    }
}
