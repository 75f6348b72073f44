//! Checkout: totals, shipping, payment and stock commit.
//!
//! Every validation gate runs before anything is mutated, so a rejected
//! checkout leaves the customer's balance and the catalog's stock untouched.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::customer::Customer;
use crate::decimal::{Money, Weight};
use crate::error::{CheckoutError, Result};
use crate::receipt::{Receipt, ReceiptLine, ShipmentLine};
use log::{debug, info};

/// Flat fee charged on any order with shippable weight.
pub const BASE_SHIPPING_FEE: Money = Money::whole(20);

/// Fee per kilogram of shippable weight.
pub const SHIPPING_RATE_PER_KG: Money = Money::whole(10);

/// Shipping fee for a package: zero when nothing is shipped, otherwise
/// `BASE_SHIPPING_FEE + SHIPPING_RATE_PER_KG × weight`.
pub fn shipping_fee(weight: Weight) -> Money {
    if weight.is_zero() {
        return Money::ZERO;
    }
    BASE_SHIPPING_FEE + SHIPPING_RATE_PER_KG * weight
}

/// Checks out `cart` for `customer`, charging their balance and drawing
/// stock from `catalog`.
///
/// # Errors
///
/// - `EmptyCart` if the cart has no lines
/// - `InsufficientFunds` if the balance does not cover subtotal plus shipping
/// - `InsufficientStock` if stock fell below a line's quantity after it was
///   added (for instance, another cart was checked out first)
/// - `UnknownProduct` if a line's product is not in `catalog` (the cart was
///   built against a different catalog)
/// - `OutOfRange` if a shipped line's weight cannot be expressed in grams
/// - `Fatal` if the commit fails after every gate passed
pub fn checkout(catalog: &mut Catalog, customer: &mut Customer, cart: &Cart) -> Result<Receipt> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let subtotal = cart.subtotal();
    let shipped_weight = cart.total_weight();
    let shipping_fee = shipping_fee(shipped_weight);
    let total = subtotal + shipping_fee;

    if customer.balance() < total {
        return Err(CheckoutError::InsufficientFunds {
            required: total,
            available: customer.balance(),
        });
    }

    for line in cart.lines() {
        let available = catalog
            .get(line.product_id())
            .filter(|product| product.name() == line.name())
            .map(|product| product.stock())
            .ok_or_else(|| CheckoutError::UnknownProduct(line.name().to_string()))?;
        if line.quantity() > available {
            return Err(CheckoutError::InsufficientStock {
                product: line.name().to_string(),
                available,
                requested: line.quantity(),
            });
        }
    }

    let mut shipment = Vec::new();
    for line in cart.shippable_lines() {
        let grams = line
            .total_weight()
            .grams()
            .ok_or_else(|| CheckoutError::OutOfRange {
                product: line.name().to_string(),
                message: format!(
                    "package weight {} cannot be expressed in grams",
                    line.total_weight()
                ),
            })?;
        shipment.push(ShipmentLine {
            name: line.name().to_string(),
            quantity: line.quantity(),
            grams,
        });
    }

    // Commit: nothing below may fail unless an invariant is already broken.
    customer
        .deduct(total)
        .map_err(|e| CheckoutError::Fatal(format!("payment failed after validation: {}", e)))?;
    for line in cart.lines() {
        catalog
            .reduce_stock(line.product_id(), line.quantity())
            .map_err(|e| CheckoutError::Fatal(format!("stock commit failed: {}", e)))?;
        debug!("Checkout: drew {}x {} from stock", line.quantity(), line.name());
    }

    info!(
        "Checkout for {}: subtotal {}, shipping {}, charged {}, balance now {}",
        customer.name(),
        subtotal,
        shipping_fee,
        total,
        customer.balance()
    );

    Ok(Receipt {
        customer: customer.name().to_string(),
        lines: cart
            .lines()
            .iter()
            .map(|line| ReceiptLine {
                name: line.name().to_string(),
                quantity: line.quantity(),
                total: line.total_price(),
            })
            .collect(),
        shipment,
        subtotal,
        shipping_fee,
        total,
        remaining_balance: customer.balance(),
        shipped_weight,
    })
}
