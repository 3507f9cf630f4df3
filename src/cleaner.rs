use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::{debug, info};

use crate::{
    dataset::{Dataset, Required},
    error::{Error, Result},
    table::{Row, Table, Value},
};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Remove every row with a missing cell in one of the `required` columns.
pub fn drop_incomplete(table: Table, required: Required) -> Result<Table> {
    let indices: Vec<usize> = match required {
        Required::Nothing => return Ok(table),
        Required::AllColumns => (0..table.headers().len()).collect(),
        Required::Columns(columns) => columns
            .iter()
            .map(|c| table.column_index(c))
            .collect::<Result<_>>()?,
    };

    let before = table.len();
    let (name, headers, rows) = table.into_parts();
    let rows: Vec<Row> = rows
        .into_iter()
        .filter(|row| indices.iter().all(|&i| !row.values[i].is_missing()))
        .collect();
    info!("{}: dropped {} incomplete rows", name, before - rows.len());
    Ok(Table::new(name, headers, rows))
}

/// Remove rows whose cells equal those of an earlier row. The first
/// occurrence is kept and row order is preserved.
pub fn drop_duplicate_rows(table: Table) -> Table {
    let before = table.len();
    let (name, headers, mut rows) = table.into_parts();
    let keep: Vec<bool> = {
        let mut seen: HashSet<&[Value]> = HashSet::with_capacity(rows.len());
        rows.iter().map(|row| seen.insert(row.values.as_slice())).collect()
    };
    let mut keep = keep.into_iter();
    rows.retain(|_| keep.next().unwrap_or(false));
    info!("{}: dropped {} duplicate rows", name, before - rows.len());
    Table::new(name, headers, rows)
}

/// Turn the text cells of `column` into dates.
pub fn parse_dates(table: Table, column: &str) -> Result<Table> {
    let idx = table.column_index(column)?;
    let (name, headers, rows) = table.into_parts();
    let rows = rows
        .into_iter()
        .map(|mut row| {
            if let Value::Text(text) = &row.values[idx] {
                let date = parse_date(text).ok_or_else(|| Error::DateParse {
                    table: name.clone(),
                    column: column.to_string(),
                    row: row.line,
                    value: text.clone(),
                })?;
                row.values[idx] = Value::Date(date);
            }
            Ok(row)
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("{}: parsed dates in column {}", name, column);
    Ok(Table::new(name, headers, rows))
}

/// Set `target` to the calendar month of the date in `source`, appending the
/// column if it does not exist yet.
pub fn derive_month(table: Table, source: &str, target: &str) -> Result<Table> {
    let src = table.column_index(source)?;
    let existing = table.column_index(target).ok();
    let (name, mut headers, rows) = table.into_parts();
    if existing.is_none() {
        headers.push(target.to_string());
    }

    let rows = rows
        .into_iter()
        .map(|mut row| {
            let month = match &row.values[src] {
                Value::Date(date) => Value::Int(i64::from(date.month())),
                Value::Missing => Value::Missing,
                other => {
                    return Err(Error::DateParse {
                        table: name.clone(),
                        column: source.to_string(),
                        row: row.line,
                        value: other.to_string(),
                    })
                }
            };
            match existing {
                Some(idx) => row.values[idx] = month,
                None => row.values.push(month),
            }
            Ok(row)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Table::new(name, headers, rows))
}

/// Run the full cleaning sequence for `dataset`: incomplete rows, then
/// duplicates, then date columns, then the derived month column.
pub fn clean(table: Table, dataset: Dataset) -> Result<Table> {
    let spec = dataset.spec();
    let table = drop_incomplete(table, spec.required)?;
    let mut table = drop_duplicate_rows(table);
    for column in spec.date_columns {
        table = parse_dates(table, column)?;
    }
    if let Some((source, target)) = spec.month_column {
        table = derive_month(table, source, target)?;
    }
    Ok(table)
}
