//! Receipt produced by a successful checkout, and its text rendering.

use crate::decimal::{Money, Weight};
use crate::error::CheckoutError;
use std::io::{self, Write};

/// One row of the checkout receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub total: Money,
}

/// One row of the shipment notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentLine {
    pub name: String,
    pub quantity: u32,
    pub grams: u64,
}

/// Totals and line breakdown of a completed checkout.
///
/// `subtotal + shipping_fee == total` holds exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub customer: String,

    /// Every cart line, in cart order.
    pub lines: Vec<ReceiptLine>,

    /// Shippable cart lines only; empty when nothing is shipped.
    pub shipment: Vec<ShipmentLine>,

    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
    pub remaining_balance: Money,
    pub shipped_weight: Weight,
}

impl Receipt {
    /// Writes the shipment notice (if anything ships) followed by the
    /// checkout receipt.
    ///
    /// Money is printed in whole units truncated toward zero.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if !self.shipment.is_empty() {
            writeln!(writer, "** Shipment notice **")?;
            for line in &self.shipment {
                writeln!(writer, "{}x {} {}g", line.quantity, line.name, line.grams)?;
            }
            writeln!(
                writer,
                "Total package weight {}kg",
                self.shipped_weight.kg_one_decimal()
            )?;
            writeln!(writer)?;
        }

        writeln!(writer, "** Checkout receipt **")?;
        for line in &self.lines {
            writeln!(
                writer,
                "{}x {} {}",
                line.quantity,
                line.name,
                line.total.whole_units()
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "---")?;
        writeln!(writer)?;
        writeln!(writer, "Subtotal {}", self.subtotal.whole_units())?;
        if !self.shipping_fee.is_zero() {
            writeln!(writer, "Shipping {}", self.shipping_fee.whole_units())?;
        }
        writeln!(writer, "Amount {}", self.total.whole_units())?;
        writeln!(
            writer,
            "Customer balance after payment: {}",
            self.remaining_balance.whole_units()
        )?;
        writeln!(writer)?;
        writeln!(writer, "END.")?;
        Ok(())
    }
}

/// Writes a rejected cart operation or checkout as a single `ERROR:` line.
pub fn write_error<W: Write>(mut writer: W, error: &CheckoutError) -> io::Result<()> {
    writeln!(writer, "ERROR: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn render(receipt: &Receipt) -> String {
        let mut output = Vec::new();
        receipt.write_to(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn mixed_receipt() -> Receipt {
        Receipt {
            customer: "John Doe".to_string(),
            lines: vec![
                ReceiptLine {
                    name: "Cheese".to_string(),
                    quantity: 2,
                    total: money("200"),
                },
                ReceiptLine {
                    name: "Biscuits".to_string(),
                    quantity: 1,
                    total: money("150"),
                },
                ReceiptLine {
                    name: "Mobile Scratch Card".to_string(),
                    quantity: 1,
                    total: money("50"),
                },
            ],
            shipment: vec![
                ShipmentLine {
                    name: "Cheese".to_string(),
                    quantity: 2,
                    grams: 400,
                },
                ShipmentLine {
                    name: "Biscuits".to_string(),
                    quantity: 1,
                    grams: 700,
                },
            ],
            subtotal: money("450"),
            shipping_fee: money("31"),
            total: money("481"),
            remaining_balance: money("1019"),
            shipped_weight: Weight::from_str("1.1").unwrap(),
        }
    }

    #[test]
    fn test_full_receipt_layout() {
        let expected = "\
** Shipment notice **
2x Cheese 400g
1x Biscuits 700g
Total package weight 1.1kg

** Checkout receipt **
2x Cheese 200
1x Biscuits 150
1x Mobile Scratch Card 50

---

Subtotal 450
Shipping 31
Amount 481
Customer balance after payment: 1019

END.
";
        assert_eq!(render(&mixed_receipt()), expected);
    }

    #[test]
    fn test_no_shipment_section_or_shipping_line_when_nothing_ships() {
        let receipt = Receipt {
            customer: "Bob Wilson".to_string(),
            lines: vec![ReceiptLine {
                name: "Mobile Scratch Card".to_string(),
                quantity: 3,
                total: money("150"),
            }],
            shipment: Vec::new(),
            subtotal: money("150"),
            shipping_fee: Money::ZERO,
            total: money("150"),
            remaining_balance: money("50"),
            shipped_weight: Weight::ZERO,
        };

        let output = render(&receipt);
        assert!(output.starts_with("** Checkout receipt **\n"));
        assert!(!output.contains("Shipment notice"));
        assert!(!output.contains("Shipping"));
        assert!(output.contains("Customer balance after payment: 50\n"));
    }

    #[test]
    fn test_money_is_truncated_not_rounded() {
        let mut receipt = mixed_receipt();
        receipt.lines[0].total = money("199.99");
        receipt.shipping_fee = money("30.999");
        receipt.remaining_balance = money("1019.5");

        let output = render(&receipt);
        assert!(output.contains("2x Cheese 199\n"));
        assert!(output.contains("Shipping 30\n"));
        assert!(output.contains("Customer balance after payment: 1019\n"));
    }

    #[test]
    fn test_error_line() {
        let mut output = Vec::new();
        write_error(&mut output, &CheckoutError::EmptyCart).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "ERROR: Cart is empty\n");
    }
}
