use std::fmt::Display;

use comfy_table::{Cell, CellAlignment, Table};
use itertools::Itertools;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::Serialize;

use crate::{
    aggregate::{bottom_n, compare_top, top_n, GroupKey},
    error::Result,
    pipeline::Analysis,
    profile::TableProfile,
};

const CHART_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Bar,
    Line,
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig<'a> {
    pub kind: ChartKind,
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Anything that can be drawn as a bar length.
pub trait Magnitude {
    fn magnitude(&self) -> f64;
}

impl Magnitude for Decimal {
    fn magnitude(&self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }
}

impl Magnitude for u64 {
    fn magnitude(&self) -> f64 {
        *self as f64
    }
}

pub fn render_table<V: Display>(title: &str, headers: [&str; 2], entries: &[(GroupKey, V)]) -> String {
    let mut table = Table::new();
    table.set_header(headers.to_vec());
    for (key, value) in entries {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    format!("{title}\n{table}\n")
}

fn scaled(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        0
    } else {
        ((value / max) * CHART_WIDTH as f64).round() as usize
    }
}

/// Draw `entries` as text. Bar and count charts get one horizontal bar per
/// entry; line charts get one row per entry with a marker at the value.
pub fn render_chart<V: Magnitude + Display>(config: &ChartConfig, entries: &[(GroupKey, V)]) -> String {
    let labels: Vec<String> = entries.iter().map(|(k, _)| k.to_string()).collect();
    let width = labels
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(config.x_label.chars().count()))
        .max()
        .unwrap_or(0);
    let max = entries
        .iter()
        .map(|(_, v)| v.magnitude())
        .fold(0.0_f64, f64::max);

    let mut out = format!("{}\n{:>width$} | {}\n", config.title, config.x_label, config.y_label);
    for (label, (_, value)) in labels.iter().zip(entries) {
        let len = scaled(value.magnitude(), max);
        let mark = match config.kind {
            ChartKind::Bar => "█".repeat(len),
            ChartKind::Count => "▒".repeat(len),
            ChartKind::Line => format!("{}●", " ".repeat(len.saturating_sub(1))),
        };
        out.push_str(&format!("{:>width$} | {} {}\n", label, mark, value));
    }
    out
}

pub fn render_profile(profile: &TableProfile) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Non-null", "Missing", "Kind"]);
    for column in &profile.columns {
        table.add_row(vec![
            Cell::new(&column.name),
            Cell::new(column.present).set_alignment(CellAlignment::Right),
            Cell::new(column.missing).set_alignment(CellAlignment::Right),
            Cell::new(column.kind),
        ]);
    }
    format!("{} ({} rows)\n{table}\n", profile.name.to_uppercase(), profile.rows)
}

#[derive(Serialize)]
struct RankedRow<'a, V> {
    key: String,
    value: &'a V,
}

/// Serialize `(key, value)` entries to CSV with a `key,value` header.
pub fn write_csv<V: Serialize>(entries: &[(GroupKey, V)], output: impl std::io::Write) -> Result<()> {
    let output_error = |e: csv::Error| crate::error::Error::Output(e.to_string());
    let mut writer = csv::Writer::from_writer(output);
    for (key, value) in entries {
        writer
            .serialize(RankedRow {
                key: key.to_string(),
                value,
            })
            .map_err(output_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// How the analysis is printed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub top: usize,
    pub csv: bool,
    pub charts: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            top: 10,
            csv: false,
            charts: true,
        }
    }
}

fn write_section<V>(
    out: &mut impl std::io::Write,
    options: &Options,
    title: &str,
    headers: [&str; 2],
    entries: &[(GroupKey, V)],
    chart: Option<ChartConfig>,
) -> Result<()>
where
    V: Display + Magnitude + Serialize,
{
    if options.csv {
        writeln!(out, "# {title}")?;
        write_csv(entries, &mut *out)?;
    } else {
        write!(out, "{}", render_table(title, headers, entries))?;
    }
    if let Some(config) = chart.filter(|_| options.charts) {
        write!(out, "{}", render_chart(&config, entries))?;
    }
    writeln!(out)?;
    Ok(())
}

fn bar<'a>(title: &'a str, x_label: &'a str, y_label: &'a str) -> Option<ChartConfig<'a>> {
    Some(ChartConfig {
        kind: ChartKind::Bar,
        title,
        x_label,
        y_label,
    })
}

/// Print every ranking of `analysis` in report order.
pub fn write_analysis(analysis: &Analysis, options: &Options, mut out: impl std::io::Write) -> Result<()> {
    let n = options.top;
    let out = &mut out;

    let inventory = [
        ("Beginning", &analysis.begin_on_hand),
        ("End", &analysis.end_on_hand),
    ];
    for (when, grouping) in inventory {
        write_section(
            out,
            options,
            &format!("Top {n} HIGH VALUE products at the {when} of the year"),
            ["Description", "On hand"],
            &top_n(grouping, n),
            None,
        )?;
        write_section(
            out,
            options,
            &format!("Top {n} LOW VALUE products at the {when} of the year"),
            ["Description", "On hand"],
            &bottom_n(grouping, n),
            None,
        )?;
    }

    let shift = compare_top(&analysis.begin_on_hand, &analysis.end_on_hand, n);
    if !options.csv {
        writeln!(out, "Change in the top {n} from beginning to end of year")?;
        writeln!(out, "  entered: {}", shift.entered.iter().join(", "))?;
        writeln!(out, "  dropped: {}", shift.dropped.iter().join(", "))?;
        writeln!(out)?;
    }

    write_section(
        out,
        options,
        &format!("Top {n} Fast Selling Products"),
        ["Brand / Description", "Sales quantity"],
        &top_n(&analysis.product_sales, n),
        None,
    )?;
    write_section(
        out,
        options,
        &format!("Top {n} Slow Selling Products"),
        ["Brand / Description", "Sales quantity"],
        &bottom_n(&analysis.product_sales, n),
        None,
    )?;
    write_section(
        out,
        options,
        "Sales transactions by month",
        ["TransactionMonth", "Count"],
        analysis.sales_by_month.entries(),
        Some(ChartConfig {
            kind: ChartKind::Count,
            title: "Transactions per month",
            x_label: "TransactionMonth",
            y_label: "count",
        }),
    )?;
    write_section(
        out,
        options,
        "Periodic Sales Revenue",
        ["SalesDate", "Revenue"],
        analysis.revenue_by_day.clone().by_key().entries(),
        Some(ChartConfig {
            kind: ChartKind::Line,
            title: "Periodic Sales Revenue",
            x_label: "Monthly Revenue in Days",
            y_label: "Sum of Revenue",
        }),
    )?;
    write_section(
        out,
        options,
        &format!("Sales Revenue by top {n} Vendors"),
        ["VendorName", "Revenue"],
        &top_n(&analysis.revenue_by_vendor, n),
        bar(&format!("Sales Revenue by top {n} Vendors"), "Vendor Name", "Sum of Revenue"),
    )?;
    write_section(
        out,
        options,
        &format!("Sales by top {n} Inventories"),
        ["InventoryId", "Sales quantity"],
        &top_n(&analysis.sales_by_inventory, n),
        bar(&format!("Sales by top {n} Inventories"), "Inventories", "Sales Flow"),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn vendors() -> Vec<(GroupKey, Decimal)> {
        vec![
            (GroupKey::text(&["DIAGEO NORTH AMERICA INC"]), dec!(100.00)),
            (GroupKey::text(&["JIM BEAM BRANDS"]), dec!(50.00)),
        ]
    }

    #[test]
    fn bar_lengths_are_scaled_to_largest() {
        let chart = render_chart(
            &ChartConfig {
                kind: ChartKind::Bar,
                title: "Sales Revenue by top 10 Vendors",
                x_label: "Vendor Name",
                y_label: "Sum of Revenue",
            },
            &vendors(),
        );
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Sales Revenue by top 10 Vendors");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2].matches('█').count(), CHART_WIDTH);
        assert_eq!(lines[3].matches('█').count(), CHART_WIDTH / 2);
        assert!(lines[3].ends_with("50.00"));
    }

    #[test]
    fn line_chart_has_one_marker_per_entry() {
        let entries = vec![
            (GroupKey::text(&["2016-01-01"]), 3u64),
            (GroupKey::text(&["2016-01-02"]), 0u64),
        ];
        let chart = render_chart(
            &ChartConfig {
                kind: ChartKind::Line,
                title: "Periodic Sales Revenue",
                x_label: "Day",
                y_label: "Sum of Revenue",
            },
            &entries,
        );
        assert_eq!(chart.matches('●').count(), 2);
    }

    #[test]
    fn empty_chart_only_has_headings() {
        let chart = render_chart::<u64>(
            &ChartConfig {
                kind: ChartKind::Count,
                title: "t",
                x_label: "x",
                y_label: "y",
            },
            &[],
        );
        assert_eq!(chart.lines().count(), 2);
    }

    #[test]
    fn table_lists_every_entry() {
        let text = render_table("Top vendors", ["Vendor", "Revenue"], &vendors());
        assert!(text.starts_with("Top vendors\n"));
        assert!(text.contains("JIM BEAM BRANDS"));
        assert!(text.contains("100.00"));
    }

    #[test]
    fn csv_output() {
        let mut output = Vec::<u8>::new();
        write_csv(&vendors(), &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "key,value\nDIAGEO NORTH AMERICA INC,100.00\nJIM BEAM BRANDS,50.00\n"
        );
    }
}
