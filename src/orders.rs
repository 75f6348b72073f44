//! Order processing: streams an orders CSV through carts and checkout.
//!
//! Consecutive rows sharing an order id form one cart. When the order id
//! changes (or input ends) the cart is checked out and the receipt or error
//! is written to the output.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::checkout;
use crate::customer::Customer;
use crate::decimal::Money;
use crate::error::Result;
use crate::receipt::write_error;
use chrono::{Local, NaiveDate};
use csv::{ReaderBuilder, Trim};
use log::{debug, error, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::{Read, Write};

/// Raw order row as read from CSV.
#[derive(Debug, Deserialize)]
pub struct OrderRecord {
    /// Order id; consecutive rows with the same id share a cart
    pub order: u32,

    /// Customer name
    pub customer: String,

    /// Opening balance, read the first time a customer appears
    pub balance: Option<Money>,

    /// Product name; empty for a row that adds nothing
    pub product: Option<String>,

    /// Units to add; required when `product` is present
    pub quantity: Option<u32>,
}

/// An order whose rows are still being read.
struct PendingOrder {
    id: u32,
    customer: String,
    cart: Cart,

    /// A cart add failed; the error is already written and checkout is skipped.
    rejected: bool,
}

/// Runs orders against one catalog and a set of customers whose balances
/// carry over between orders.
pub struct OrderProcessor {
    catalog: Catalog,
    customers: HashMap<String, Customer>,
    today: Option<NaiveDate>,
}

impl OrderProcessor {
    /// Creates a processor over `catalog` with no customers.
    pub fn new(catalog: Catalog) -> Self {
        OrderProcessor {
            catalog,
            customers: HashMap::new(),
            today: None,
        }
    }

    /// Pins the date used for expiry checks instead of the local date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Processes orders from a CSV reader in streaming fashion, writing each
    /// order's receipt or `ERROR:` line followed by a blank line.
    ///
    /// Invalid records are logged at warn level and skipped.
    pub fn process_csv<R: Read, W: Write>(&mut self, reader: R, mut out: W) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut pending: Option<PendingOrder> = None;

        for (row_idx, result) in csv_reader.deserialize::<OrderRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => self.process_record(&mut pending, record, row_num, &mut out)?,
                Err(e) => warn!("Row {}: CSV parse error: {}", row_num, e),
            }
        }

        if let Some(order) = pending.take() {
            self.finish_order(order, &mut out)?;
        }

        out.flush()?;
        Ok(())
    }

    fn process_record<W: Write>(
        &mut self,
        pending: &mut Option<PendingOrder>,
        record: OrderRecord,
        row: usize,
        out: &mut W,
    ) -> Result<()> {
        let customer = record.customer.trim().to_string();
        if customer.is_empty() {
            warn!("Row {}: Missing customer name, ignoring", row);
            return Ok(());
        }

        if pending.as_ref().map(|o| o.id) != Some(record.order) {
            if let Some(order) = pending.take() {
                self.finish_order(order, out)?;
            }
        }

        if let Some(order) = pending.as_ref() {
            if order.customer != customer {
                warn!(
                    "Row {}: Order {} belongs to {}, not {}, ignoring",
                    row, order.id, order.customer, customer
                );
                return Ok(());
            }
        }

        if !self.register_customer(&customer, record.balance, row) {
            return Ok(());
        }

        let order = pending.get_or_insert_with(|| PendingOrder {
            id: record.order,
            customer: customer.clone(),
            cart: Cart::new(),
            rejected: false,
        });

        if order.rejected {
            debug!("Row {}: Order {} already rejected, ignoring", row, order.id);
            return Ok(());
        }

        let product = match record.product {
            Some(product) => product,
            None => return Ok(()),
        };
        let quantity = match record.quantity {
            Some(quantity) => quantity,
            None => {
                warn!("Row {}: Missing quantity for {}, ignoring", row, product);
                return Ok(());
            }
        };

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        if let Err(e) = order.cart.add_on(&self.catalog, &product, quantity, today) {
            debug!("Row {}: Order {} rejected: {}", row, order.id, e);
            write_error(&mut *out, &e)?;
            order.rejected = true;
        }

        Ok(())
    }

    /// Makes sure `name` is a known customer. Returns `false` if the row
    /// cannot be attributed to one.
    fn register_customer(&mut self, name: &str, balance: Option<Money>, row: usize) -> bool {
        match (self.customers.contains_key(name), balance) {
            (true, Some(_)) => {
                debug!("Row {}: Customer {} already registered, balance ignored", row, name);
                true
            }
            (true, None) => true,
            (false, Some(balance)) => match Customer::new(name, balance) {
                Ok(customer) => {
                    self.customers.insert(name.to_string(), customer);
                    debug!("Row {}: Registered {} with balance {}", row, name, balance);
                    true
                }
                Err(e) => {
                    warn!("Row {}: {}, ignoring", row, e);
                    false
                }
            },
            (false, None) => {
                warn!("Row {}: Unknown customer {} without balance, ignoring", row, name);
                false
            }
        }
    }

    fn finish_order<W: Write>(&mut self, order: PendingOrder, out: &mut W) -> Result<()> {
        if !order.rejected {
            match self.customers.get_mut(&order.customer) {
                Some(customer) => match checkout(&mut self.catalog, customer, &order.cart) {
                    Ok(receipt) => receipt.write_to(&mut *out)?,
                    Err(e) => {
                        if e.is_fatal() {
                            error!("Order {}: {}", order.id, e);
                        }
                        write_error(&mut *out, &e)?;
                    }
                },
                None => warn!("Order {}: Customer {} vanished", order.id, order.customer),
            }
        }

        writeln!(out)?;
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn customer(&self, name: &str) -> Option<&Customer> {
        self.customers.get(name)
    }
}
