use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::{
    cleaner::parse_date,
    table::{Table, Value},
};

/// Narrowest kind able to hold every present value of a column. Ordered
/// from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColumnKind {
    Empty,
    Integer,
    Decimal,
    Date,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Empty => "empty",
            ColumnKind::Integer => "integer",
            ColumnKind::Decimal => "decimal",
            ColumnKind::Date => "date",
            ColumnKind::Text => "text",
        };
        f.write_str(name)
    }
}

fn kind_of(value: &Value) -> ColumnKind {
    match value {
        Value::Missing => ColumnKind::Empty,
        Value::Int(_) => ColumnKind::Integer,
        Value::Date(_) => ColumnKind::Date,
        Value::Text(s) if i64::from_str(s).is_ok() => ColumnKind::Integer,
        Value::Text(s) if Decimal::from_str(s).is_ok() => ColumnKind::Decimal,
        Value::Text(s) if parse_date(s).is_some() => ColumnKind::Date,
        Value::Text(_) => ColumnKind::Text,
    }
}

/// Numbers and dates do not mix into anything but text.
fn widen(a: ColumnKind, b: ColumnKind) -> ColumnKind {
    let numeric = |k: ColumnKind| matches!(k, ColumnKind::Integer | ColumnKind::Decimal);
    match (a, b) {
        (ColumnKind::Empty, k) | (k, ColumnKind::Empty) => k,
        (ColumnKind::Date, k) | (k, ColumnKind::Date) if numeric(k) => ColumnKind::Text,
        (a, b) => a.max(b),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub present: usize,
    pub missing: usize,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableProfile {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

pub fn profile(table: &Table) -> TableProfile {
    let columns = table
        .headers()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let (present, kind) = table
                .rows()
                .iter()
                .map(|r| &r.values[i])
                .filter(|v| !v.is_missing())
                .fold((0, ColumnKind::Empty), |(n, kind), v| (n + 1, widen(kind, kind_of(v))));
            ColumnProfile {
                name: name.clone(),
                present,
                missing: table.len() - present,
                kind,
            }
        })
        .collect();
    TableProfile {
        name: table.name().to_string(),
        rows: table.len(),
        columns,
    }
}
