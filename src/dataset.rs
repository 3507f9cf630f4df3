use std::fmt;

/// Which cells must be present for a row to survive `drop_incomplete`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Required<'a> {
    Nothing,
    AllColumns,
    Columns(&'a [&'a str]),
}

/// Fixed description of one of the six input tables.
#[derive(Debug, PartialEq)]
pub struct TableSpec {
    pub name: &'static str,
    pub file_name: &'static str,
    /// Columns that must exist in the file header.
    pub schema: &'static [&'static str],
    pub required: Required<'static>,
    pub date_columns: &'static [&'static str],
    /// `(source, target)` pair for the derived month column, if any.
    pub month_column: Option<(&'static str, &'static str)>,
}

pub const SALES_DATE: &str = "SalesDate";
pub const TRANSACTION_MONTH: &str = "TransactionMonth";

const PRICE_LIST: TableSpec = TableSpec {
    name: "purchase price list",
    file_name: "2017PurchasePricesDec.csv",
    schema: &["Description", "Price"],
    required: Required::AllColumns,
    date_columns: &[],
    month_column: None,
};

const BEGIN_INVENTORY: TableSpec = TableSpec {
    name: "beginning inventory",
    file_name: "BegInvFINAL12312016.csv",
    schema: &["InventoryId", "Description", "onHand", "startDate"],
    required: Required::Nothing,
    date_columns: &["startDate"],
    month_column: None,
};

const END_INVENTORY: TableSpec = TableSpec {
    name: "end inventory",
    file_name: "EndInvFINAL12312016.csv",
    schema: &["InventoryId", "Description", "onHand", "endDate"],
    required: Required::Nothing,
    date_columns: &["endDate"],
    month_column: None,
};

const INVOICE_PURCHASES: TableSpec = TableSpec {
    name: "invoice purchases",
    file_name: "InvoicePurchases12312016.csv",
    schema: &["VendorName", "InvoiceDate", "PODate", "PayDate"],
    required: Required::Nothing,
    date_columns: &["InvoiceDate", "PODate", "PayDate"],
    month_column: None,
};

const PURCHASES: TableSpec = TableSpec {
    name: "purchases",
    file_name: "PurchasesFINAL12312016.csv",
    schema: &["PODate", "ReceivingDate", "InvoiceDate", "PayDate"],
    required: Required::AllColumns,
    date_columns: &["PODate", "ReceivingDate", "InvoiceDate", "PayDate"],
    month_column: None,
};

const SALES: TableSpec = TableSpec {
    name: "sales",
    file_name: "SalesFINAL12312016.csv",
    schema: &[
        "InventoryId",
        "Brand",
        "Description",
        "VendorName",
        "SalesQuantity",
        "SalesDollars",
        SALES_DATE,
    ],
    required: Required::Nothing,
    date_columns: &[SALES_DATE],
    month_column: Some((SALES_DATE, TRANSACTION_MONTH)),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    PriceList,
    BeginInventory,
    EndInventory,
    InvoicePurchases,
    Purchases,
    Sales,
}

impl Dataset {
    pub const ALL: [Dataset; 6] = [
        Dataset::PriceList,
        Dataset::BeginInventory,
        Dataset::EndInventory,
        Dataset::InvoicePurchases,
        Dataset::Purchases,
        Dataset::Sales,
    ];

    pub fn spec(self) -> &'static TableSpec {
        match self {
            Dataset::PriceList => &PRICE_LIST,
            Dataset::BeginInventory => &BEGIN_INVENTORY,
            Dataset::EndInventory => &END_INVENTORY,
            Dataset::InvoicePurchases => &INVOICE_PURCHASES,
            Dataset::Purchases => &PURCHASES,
            Dataset::Sales => &SALES,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec().name)
    }
}
