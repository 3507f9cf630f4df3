use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
    ops::AddAssign,
    str::FromStr,
};

use itertools::Itertools;
use rust_decimal::Decimal;

use crate::{
    error::{Error, Result},
    table::{Table, Value},
};

/// Group identity: the cells of the grouping columns, in the order the
/// columns were given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(pub Vec<Value>);

impl GroupKey {
    pub fn text(parts: &[&str]) -> Self {
        GroupKey(parts.iter().map(|p| Value::from(*p)).collect())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" / "))
    }
}

/// Ordered `(key, value)` pairs produced by a grouped reduction. Every key
/// appears once and only for groups with at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<V> {
    entries: Vec<(GroupKey, V)>,
}

impl<V> Grouping<V> {
    pub fn entries(&self) -> &[(GroupKey, V)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Sort by ascending key.
    pub fn by_key(mut self) -> Self {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }
}

impl<V: Ord> Grouping<V> {
    /// Sort by descending value; equal values keep their current order.
    pub fn ranked(mut self) -> Self {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self
    }
}

impl<V: Copy + std::iter::Sum<V>> Grouping<V> {
    pub fn total(&self) -> V {
        self.entries.iter().map(|(_, v)| *v).sum()
    }
}

/// Accumulate values per key, remembering first-seen key order.
fn fold_groups<V, I>(items: I) -> Grouping<V>
where
    V: AddAssign,
    I: IntoIterator<Item = (GroupKey, V)>,
{
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut entries: Vec<(GroupKey, V)> = Vec::new();
    for (key, value) in items {
        match index.entry(key) {
            Entry::Occupied(slot) => entries[*slot.get()].1 += value,
            Entry::Vacant(slot) => {
                entries.push((slot.key().clone(), value));
                slot.insert(entries.len() - 1);
            }
        }
    }
    Grouping { entries }
}

fn decimal_cell(table: &Table, column: &str, line: u64, value: &Value) -> Result<Decimal> {
    let invalid = || Error::ValueParse {
        table: table.name().to_string(),
        column: column.to_string(),
        row: line,
        value: value.to_string(),
    };
    match value {
        Value::Missing => Ok(Decimal::ZERO),
        Value::Int(n) => Ok(Decimal::from(*n)),
        Value::Text(s) => Decimal::from_str(s).map_err(|_| invalid()),
        Value::Date(_) => Err(invalid()),
    }
}

/// Sum `value_column` per distinct combination of `group_columns`, ranked by
/// descending sum. Missing values count as zero; rows with missing key
/// cells form their own group.
pub fn sum_by_key(table: &Table, group_columns: &[&str], value_column: &str) -> Result<Grouping<Decimal>> {
    let keys = group_columns
        .iter()
        .map(|c| table.column_index(c))
        .collect::<Result<Vec<_>>>()?;
    let val = table.column_index(value_column)?;

    let items = table.rows().iter().map(|row| -> Result<(GroupKey, Decimal)> {
        let key = GroupKey(keys.iter().map(|&i| row.values[i].clone()).collect());
        let value = decimal_cell(table, value_column, row.line, &row.values[val])?;
        Ok((key, value))
    });
    let grouping = itertools::process_results(items, |items| fold_groups::<Decimal, _>(items))?;
    Ok(grouping.ranked())
}

/// Count rows per value of `group_column`, ordered by ascending key.
pub fn count_by_key(table: &Table, group_column: &str) -> Result<Grouping<u64>> {
    let idx = table.column_index(group_column)?;
    let items = table
        .rows()
        .iter()
        .map(|row| (GroupKey(vec![row.values[idx].clone()]), 1u64));
    Ok(fold_groups(items).by_key())
}

/// The first `n` entries of the grouping, largest first for ranked input.
pub fn top_n<V: Clone>(grouping: &Grouping<V>, n: usize) -> Vec<(GroupKey, V)> {
    grouping.entries.iter().take(n).cloned().collect()
}

/// The last `n` entries of the same sequence `top_n` reads, smallest first.
pub fn bottom_n<V: Clone>(grouping: &Grouping<V>, n: usize) -> Vec<(GroupKey, V)> {
    grouping.entries.iter().rev().take(n).cloned().collect()
}

/// Keys that moved into or out of the top `n` between two rankings.
#[derive(Debug, Default, PartialEq)]
pub struct TopShift {
    pub entered: Vec<GroupKey>,
    pub dropped: Vec<GroupKey>,
}

pub fn compare_top<V>(before: &Grouping<V>, after: &Grouping<V>, n: usize) -> TopShift {
    let head = |g: &Grouping<V>| -> Vec<GroupKey> {
        g.entries.iter().take(n).map(|(k, _)| k.clone()).collect()
    };
    let (before, after) = (head(before), head(after));
    TopShift {
        entered: after.iter().filter(|k| !before.contains(k)).cloned().collect(),
        dropped: before.iter().filter(|k| !after.contains(k)).cloned().collect(),
    }
}
