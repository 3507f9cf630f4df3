use std::path::Path;

use log::info;
use rust_decimal::Decimal;

use crate::{
    aggregate::{count_by_key, sum_by_key, Grouping},
    cleaner::clean,
    dataset::{Dataset, TRANSACTION_MONTH},
    error::Result,
    loader::load_path,
    profile::{profile, TableProfile},
    table::Table,
};

/// The six tables of one fiscal year.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub price_list: Table,
    pub begin_inventory: Table,
    pub end_inventory: Table,
    pub invoice_purchases: Table,
    pub purchases: Table,
    pub sales: Table,
}

impl Inventory {
    /// Load all six tables from `dir`. Stops at the first table that fails.
    pub fn load(dir: &Path) -> Result<Self> {
        info!("loading inventory data from {}", dir.display());
        Ok(Self {
            price_list: load_path(dir, Dataset::PriceList)?,
            begin_inventory: load_path(dir, Dataset::BeginInventory)?,
            end_inventory: load_path(dir, Dataset::EndInventory)?,
            invoice_purchases: load_path(dir, Dataset::InvoicePurchases)?,
            purchases: load_path(dir, Dataset::Purchases)?,
            sales: load_path(dir, Dataset::Sales)?,
        })
    }

    pub fn table(&self, dataset: Dataset) -> &Table {
        match dataset {
            Dataset::PriceList => &self.price_list,
            Dataset::BeginInventory => &self.begin_inventory,
            Dataset::EndInventory => &self.end_inventory,
            Dataset::InvoicePurchases => &self.invoice_purchases,
            Dataset::Purchases => &self.purchases,
            Dataset::Sales => &self.sales,
        }
    }

    pub fn profiles(&self) -> Vec<TableProfile> {
        Dataset::ALL.iter().map(|d| profile(self.table(*d))).collect()
    }

    /// Clean every table with its own dataset policy.
    pub fn clean(self) -> Result<Self> {
        Ok(Self {
            price_list: clean(self.price_list, Dataset::PriceList)?,
            begin_inventory: clean(self.begin_inventory, Dataset::BeginInventory)?,
            end_inventory: clean(self.end_inventory, Dataset::EndInventory)?,
            invoice_purchases: clean(self.invoice_purchases, Dataset::InvoicePurchases)?,
            purchases: clean(self.purchases, Dataset::Purchases)?,
            sales: clean(self.sales, Dataset::Sales)?,
        })
    }
}

/// Every grouping the report is built from. Computed from cleaned tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub begin_on_hand: Grouping<Decimal>,
    pub end_on_hand: Grouping<Decimal>,
    pub product_sales: Grouping<Decimal>,
    pub sales_by_month: Grouping<u64>,
    pub revenue_by_day: Grouping<Decimal>,
    pub revenue_by_vendor: Grouping<Decimal>,
    pub sales_by_inventory: Grouping<Decimal>,
}

impl Analysis {
    pub fn compute(inventory: &Inventory) -> Result<Self> {
        let sales = &inventory.sales;
        Ok(Self {
            begin_on_hand: sum_by_key(&inventory.begin_inventory, &["Description"], "onHand")?,
            end_on_hand: sum_by_key(&inventory.end_inventory, &["Description"], "onHand")?,
            product_sales: sum_by_key(sales, &["Brand", "Description"], "SalesQuantity")?,
            sales_by_month: count_by_key(sales, TRANSACTION_MONTH)?,
            revenue_by_day: sum_by_key(sales, &["SalesDate"], "SalesDollars")?,
            revenue_by_vendor: sum_by_key(sales, &["VendorName"], "SalesDollars")?,
            sales_by_inventory: sum_by_key(sales, &["InventoryId"], "SalesQuantity")?,
        })
    }
}

/// Load, clean and aggregate in one pass.
pub fn run(dir: &Path) -> Result<(Inventory, Analysis)> {
    let inventory = Inventory::load(dir)?.clean()?;
    let analysis = Analysis::compute(&inventory)?;
    Ok((inventory, analysis))
}
