//! # Checkout Engine
//!
//! A retail checkout flow: a catalog of products that may ship and may
//! expire, carts validated against stock, and a checkout that charges the
//! customer for subtotal plus shipping and produces a receipt.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: prices and weights use `rust_decimal`
//! - **Single stock owner**: carts refer to catalog products by id
//! - **All-or-nothing checkout**: every gate runs before any mutation
//! - **Truncated display**: receipt money prints whole units, never rounded
//!
//! ## Example
//!
//! ```
//! use checkout_engine::{checkout, Cart, Catalog, Customer, Money, Product};
//!
//! let mut catalog = Catalog::new();
//! catalog
//!     .insert(Product::digital("Scratch Card", Money::whole(50), 100))
//!     .unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add(&catalog, "Scratch Card", 3).unwrap();
//!
//! let mut customer = Customer::new("Bob", Money::whole(200)).unwrap();
//! let receipt = checkout(&mut catalog, &mut customer, &cart).unwrap();
//! assert_eq!(receipt.total, Money::whole(150));
//! receipt.write_to(std::io::stdout()).unwrap();
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customer;
pub mod decimal;
pub mod error;
pub mod orders;
pub mod product;
pub mod receipt;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, Category, ProductId, ProductRecord};
pub use checkout::{checkout, shipping_fee, BASE_SHIPPING_FEE, SHIPPING_RATE_PER_KG};
pub use customer::Customer;
pub use decimal::{Money, Weight};
pub use error::{CheckoutError, Result};
pub use orders::{OrderProcessor, OrderRecord};
pub use product::{Product, ProductKind, MAX_UNIT_PRICE, MAX_UNIT_WEIGHT};
pub use receipt::{write_error, Receipt, ReceiptLine, ShipmentLine};
