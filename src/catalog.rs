//! Product catalog: the single owner of products and their stock.
//!
//! Carts refer to products by [`ProductId`] and never hold a copy of the
//! stock count, so every decrement goes through [`Catalog::reduce_stock`].

use crate::decimal::{Money, Weight};
use crate::error::{CheckoutError, Result};
use crate::product::{Product, ProductKind};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Stable identity of a product inside one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(usize);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Product kind column of the catalog CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Food,
    Digital,
}

/// Raw product row as read from the catalog CSV.
///
/// `weight` is required for shippable kinds and `expires` for food; both
/// must be empty otherwise.
#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub kind: Category,
    pub price: Money,
    pub stock: u32,
    pub weight: Option<Weight>,
    pub expires: Option<NaiveDate>,
}

impl ProductRecord {
    /// Validates the row and builds the product it describes.
    pub fn into_product(self, row: usize) -> Result<Product> {
        let invalid = |message: String| CheckoutError::InvalidRecord { row, message };

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(invalid("product name is empty".to_string()));
        }

        let kind = match (self.kind, self.weight, self.expires) {
            (Category::Electronics, Some(weight), None) => ProductKind::Electronics { weight },
            (Category::Food, Some(weight), Some(expires_on)) => {
                ProductKind::Food { expires_on, weight }
            }
            (Category::Digital, None, None) => ProductKind::Digital,
            (Category::Electronics, None, _) | (Category::Food, None, _) => {
                return Err(invalid(format!("missing weight for {}", name)))
            }
            (Category::Food, Some(_), None) => {
                return Err(invalid(format!("missing expiry date for {}", name)))
            }
            (Category::Electronics, Some(_), Some(_)) => {
                return Err(invalid(format!("electronics product {} cannot expire", name)))
            }
            (Category::Digital, _, _) => {
                return Err(invalid(format!(
                    "digital product {} cannot carry weight or expiry",
                    name
                )))
            }
        };

        let product = Product::new(name, self.price, self.stock, kind);
        product
            .check_bounds()
            .map_err(|message| invalid(format!("{} for {}", message, product.name())))?;
        Ok(product)
    }
}

/// Products indexed by id, with a unique-name lookup.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_name: HashMap<String, ProductId>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog {
            products: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Loads a catalog from CSV with header `name,kind,price,stock,weight,expires`.
    ///
    /// Unlike order input, a bad catalog row aborts the load.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut catalog = Catalog::new();
        for (row_idx, result) in csv_reader.deserialize::<ProductRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row
            let product = result?.into_product(row_num)?;
            let id = catalog.insert(product)?;
            debug!("Row {}: Loaded product {}", row_num, id);
        }

        Ok(catalog)
    }

    /// Adds a product, failing on a name already in use or on a price or
    /// weight outside the accepted range.
    pub fn insert(&mut self, product: Product) -> Result<ProductId> {
        product
            .check_bounds()
            .map_err(|message| CheckoutError::OutOfRange {
                product: product.name().to_string(),
                message,
            })?;
        if self.by_name.contains_key(product.name()) {
            return Err(CheckoutError::DuplicateProduct(product.name().to_string()));
        }

        let id = ProductId(self.products.len());
        self.by_name.insert(product.name().to_string(), id);
        self.products.push(product);
        Ok(id)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(id.0)
    }

    /// Looks up a product id by its unique name.
    pub fn find(&self, name: &str) -> Option<ProductId> {
        self.by_name.get(name).copied()
    }

    /// Looks up a product by name.
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.find(name).and_then(|id| self.get(id))
    }

    /// Decrements stock for a product.
    pub fn reduce_stock(&mut self, id: ProductId, quantity: u32) -> Result<()> {
        self.products
            .get_mut(id.0)
            .ok_or_else(|| CheckoutError::UnknownProduct(id.to_string()))?
            .reduce_stock(quantity)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, &Product)> {
        self.products
            .iter()
            .enumerate()
            .map(|(idx, product)| (ProductId(idx), product))
    }
}
