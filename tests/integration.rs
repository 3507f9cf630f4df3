use std::{fs, path::Path};

use inventory_analysis::{
    aggregate::{top_n, GroupKey},
    error::Error,
    pipeline::run,
    report::{write_analysis, Options},
    table::Value,
};
use rust_decimal_macros::dec;

const PRICE_LIST: &str = r#"Brand,Description,Price,Size,VendorName
58,Gendarme Cognac,12.99,750mL,PERNOD RICARD USA
62,Capt Morgan Spiced Rum,36.99,1.75L,DIAGEO NORTH AMERICA INC
63,Jameson Irish Whiskey,,1.75L,PERNOD RICARD USA
58,Gendarme Cognac,12.99,750mL,PERNOD RICARD USA"#;

const BEGIN_INVENTORY: &str = r#"InventoryId,Store,Description,onHand,startDate
1_HARDERSFIELD_58,1,Smirnoff 80 Proof,50,2016-01-01
1_HARDERSFIELD_62,1,Capt Morgan Spiced Rum,5,2016-01-01
2_ASHBORNE_58,2,Smirnoff 80 Proof,30,2016-01-01
2_ASHBORNE_58,2,Smirnoff 80 Proof,30,2016-01-01"#;

const END_INVENTORY: &str = r#"InventoryId,Store,Description,onHand,endDate
1_HARDERSFIELD_62,1,Capt Morgan Spiced Rum,70,2016-12-31
1_HARDERSFIELD_63,1,Jameson Irish Whiskey,40,2016-12-31
2_ASHBORNE_58,2,Smirnoff 80 Proof,,2016-12-31"#;

const INVOICE_PURCHASES: &str = r#"VendorNumber,VendorName,InvoiceDate,PONumber,PODate,PayDate,Dollars
105,ALTAMAR BRANDS LLC,2016-01-04,8124,2015-12-21,2016-02-16,214.26"#;

const PURCHASES: &str = r#"InventoryId,PODate,ReceivingDate,InvoiceDate,PayDate,Quantity
69_MOUNTMEND_8412,2015-12-21,2016-01-02,2016-01-04,2016-02-16,6
30_CULCHETH_5255,2015-12-22,2016-01-01,,2016-02-21,4"#;

const SALES: &str = r#"InventoryId,Brand,Description,VendorName,SalesQuantity,SalesDollars,SalesDate
1_HARDERSFIELD_58,58,Smirnoff 80 Proof,X,2,100.00,2016-01-15
1_HARDERSFIELD_58,58,Smirnoff 80 Proof,X,2,100.00,2016-01-15
1_HARDERSFIELD_62,62,Capt Morgan Spiced Rum,X,1,50.00,2016-01-16
2_ASHBORNE_58,58,Smirnoff 80 Proof,Y,3,30.00,2016-02-01"#;

fn write_dataset(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn full_dataset(dir: &Path) {
    write_dataset(
        dir,
        &[
            ("2017PurchasePricesDec.csv", PRICE_LIST),
            ("BegInvFINAL12312016.csv", BEGIN_INVENTORY),
            ("EndInvFINAL12312016.csv", END_INVENTORY),
            ("InvoicePurchases12312016.csv", INVOICE_PURCHASES),
            ("PurchasesFINAL12312016.csv", PURCHASES),
            ("SalesFINAL12312016.csv", SALES),
        ],
    );
}

#[test]
fn cleans_every_table() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    let (inventory, _) = run(dir.path()).unwrap();

    // one incomplete row and one duplicate dropped
    assert_eq!(inventory.price_list.len(), 2);
    assert_eq!(inventory.begin_inventory.len(), 3);
    // incomplete rows survive outside the price list and purchases
    assert_eq!(inventory.end_inventory.len(), 3);
    assert_eq!(inventory.invoice_purchases.len(), 1);
    assert_eq!(inventory.purchases.len(), 1);
    assert_eq!(inventory.sales.len(), 3);

    let months: Vec<&Value> = inventory.sales.column("TransactionMonth").unwrap().collect();
    assert_eq!(months, [&Value::Int(1), &Value::Int(1), &Value::Int(2)]);
}

#[test]
fn rankings() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    let (_, analysis) = run(dir.path()).unwrap();

    assert_eq!(
        top_n(&analysis.begin_on_hand, 1),
        vec![(GroupKey::text(&["Smirnoff 80 Proof"]), dec!(80))]
    );
    assert_eq!(
        top_n(&analysis.end_on_hand, 3),
        vec![
            (GroupKey::text(&["Capt Morgan Spiced Rum"]), dec!(70)),
            (GroupKey::text(&["Jameson Irish Whiskey"]), dec!(40)),
            (GroupKey::text(&["Smirnoff 80 Proof"]), dec!(0)),
        ]
    );
    assert_eq!(
        top_n(&analysis.revenue_by_vendor, 1),
        vec![(GroupKey::text(&["X"]), dec!(150.00))]
    );
    assert_eq!(
        top_n(&analysis.product_sales, 1),
        vec![(GroupKey::text(&["58", "Smirnoff 80 Proof"]), dec!(5))]
    );
    assert_eq!(analysis.sales_by_month.total(), 3);
    assert_eq!(analysis.revenue_by_day.total(), dec!(180.00));
    assert_eq!(analysis.sales_by_inventory.len(), 3);
}

#[test]
fn report_output() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    let (_, analysis) = run(dir.path()).unwrap();

    let mut output = Vec::<u8>::new();
    write_analysis(&analysis, &Options::default(), &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Top 10 HIGH VALUE products at the Beginning of the year"));
    assert!(text.contains("entered: Jameson Irish Whiskey"));
    assert!(text.contains("Periodic Sales Revenue"));
    assert!(text.contains('█'));

    let mut output = Vec::<u8>::new();
    let options = Options {
        top: 1,
        csv: true,
        charts: false,
    };
    write_analysis(&analysis, &options, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("# Sales Revenue by top 1 Vendors\nkey,value\nX,150.00\n"));
    assert!(!text.contains('█'));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(run(dir.path()), Err(Error::Io { table, .. }) if table == "purchase price list"));
}

#[test]
fn missing_column() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    write_dataset(
        dir.path(),
        &[("SalesFINAL12312016.csv", "InventoryId,Brand,Description\n1,58,Smirnoff")],
    );
    assert_eq!(
        run(dir.path()).unwrap_err(),
        Error::Schema {
            table: "sales".to_string(),
            column: "VendorName".to_string()
        }
    );
}

#[test]
fn bad_date() {
    let dir = tempfile::tempdir().unwrap();
    full_dataset(dir.path());
    write_dataset(
        dir.path(),
        &[(
            "EndInvFINAL12312016.csv",
            "InventoryId,Description,onHand,endDate\n1,Smirnoff 80 Proof,3,end of year",
        )],
    );
    assert_eq!(
        run(dir.path()).unwrap_err(),
        Error::DateParse {
            table: "end inventory".to_string(),
            column: "endDate".to_string(),
            row: 2,
            value: "end of year".to_string()
        }
    );
}
