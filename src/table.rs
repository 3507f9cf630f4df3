use std::fmt;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Cell texts read as missing, the same set pandas' CSV reader treats as NA.
pub const NULL_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell. Loaded cells are `Text` or `Missing`; cleaning turns date
/// columns into `Date` and adds derived `Int` columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Missing,
    Text(String),
    Date(NaiveDate),
    Int(i64),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || NULL_TOKENS.contains(&s) {
            Value::Missing
        } else {
            Value::Text(s.to_string())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "(missing)"),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Line in the source file, kept for diagnostics only.
    pub line: u64,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Build a table from string cells, numbering rows as if read from a
    /// file with a header line. Empty cells become `Value::Missing`.
    pub fn from_strings(name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .enumerate()
                .map(|(i, cells)| Row {
                    line: i as u64 + 2,
                    values: cells.iter().map(|c| Value::from(*c)).collect(),
                })
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| Error::Schema {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn column(&self, column: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |r| &r.values[idx]))
    }

    pub fn into_parts(self) -> (String, Vec<String>, Vec<Row>) {
        (self.name, self.headers, self.rows)
    }
}
