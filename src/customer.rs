//! Customer model.
//!
//! Maintains the invariant: `balance >= 0` after every operation.

use crate::decimal::Money;
use crate::error::{CheckoutError, Result};

/// A paying customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    name: String,
    balance: Money,
}

impl Customer {
    /// Creates a customer with an opening balance.
    ///
    /// Fails with `NegativeBalance` when `balance < 0`.
    pub fn new(name: impl Into<String>, balance: Money) -> Result<Self> {
        let name = name.into();
        if balance.is_negative() {
            return Err(CheckoutError::NegativeBalance {
                customer: name,
                balance,
            });
        }

        Ok(Customer { name, balance })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Takes `amount` out of the balance.
    ///
    /// Fails with `InsufficientFunds`, leaving the balance unchanged, when
    /// `amount > balance`.
    pub fn deduct(&mut self, amount: Money) -> Result<()> {
        if amount > self.balance {
            return Err(CheckoutError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        Ok(())
    }
}
