//! Error types for the checkout engine.

use crate::decimal::Money;
use thiserror::Error;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Errors that can occur while building carts, checking out or loading input.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Requested quantity exceeds the product's current stock
    #[error("Not enough quantity available for {product}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        product: String,
        available: u32,
        requested: u32,
    },

    /// Product is past its expiration date
    #[error("Cannot add expired product: {0}")]
    ExpiredProduct(String),

    /// Checkout attempted with no lines in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// Customer balance does not cover the order total
    #[error("Insufficient balance. Required: {required}, Available: {available}")]
    InsufficientFunds { required: Money, available: Money },

    /// Commit phase failed after every gate passed
    #[error("Checkout invariant violated: {0}")]
    Fatal(String),

    /// No product with this name or id in the catalog
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Catalog already holds a product with this name
    #[error("Duplicate product: {0}")]
    DuplicateProduct(String),

    /// Price or weight outside the range the engine can total without overflow
    #[error("Value out of range for {product}: {message}")]
    OutOfRange { product: String, message: String },

    /// Customers cannot open with a balance below zero
    #[error("Negative balance {balance} for {customer}")]
    NegativeBalance { customer: String, balance: Money },

    /// Cart lines must carry a positive quantity
    #[error("Invalid quantity {quantity} for {product}")]
    InvalidQuantity { product: String, quantity: u32 },

    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid catalog or order record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing input file arguments
    #[error("Missing input file argument. Usage: checkout-engine <catalog.csv> <orders.csv>")]
    MissingArgument,
}

impl CheckoutError {
    /// Returns `true` for state-consistency bugs rather than business rejections.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CheckoutError::Fatal(_))
    }
}
