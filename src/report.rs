//! Report

use std::{fmt::Write as _, io};

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{solution::Solution, topup::TopUpPolicy};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error writing the report
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Write the solutions for `balance` as a table followed by a summary.
///
/// An empty list is reported as impossible within the policy's limits.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_solutions(
    mut out: impl io::Write,
    balance: &Money<'_, Currency>,
    policy: &TopUpPolicy<'_>,
    solutions: &[Solution<'_>],
) -> Result<(), ReportError> {
    if solutions.is_empty() {
        writeln!(
            out,
            "\nNo combination spends {balance} exactly within {} top-ups of {}.\n",
            policy.max_top_ups(),
            policy.amount()
        )?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Top-ups", "Spend", "Items", "Count", "Distinct"]);

    let mut color_ops: SmallVec<[(usize, usize, Color); 8]> = SmallVec::new();

    for (idx, solution) in solutions.iter().enumerate() {
        let row = idx + 1; // header is row 0

        builder.push_record([
            format!("#{:<3}", idx + 1),
            solution.top_ups_needed().to_string(),
            solution.final_target_balance().to_string(),
            grouped_items(solution),
            solution.item_count().to_string(),
            solution.unique_items().to_string(),
        ]);

        let top_up_color = if solution.top_ups_needed() == 0 {
            Color::FG_GREEN
        } else {
            Color::FG_YELLOW
        };

        color_ops.push((row, 1, top_up_color));
    }

    write_table(&mut out, builder, solutions.len(), color_ops)?;
    write_summary(&mut out, balance, policy, solutions.len())?;

    Ok(())
}

/// One line per distinct item name, e.g. `3 x Espresso @ $2.50`.
fn grouped_items(solution: &Solution<'_>) -> String {
    let mut lines = String::new();

    for (name, count) in solution.quantities() {
        let price = solution
            .items()
            .iter()
            .find(|item| item.name() == name)
            .map(|item| item.price().to_string())
            .unwrap_or_default();

        if !lines.is_empty() {
            lines.push('\n');
        }

        _ = write!(lines, "{count} x {name} @ {price}");
    }

    if lines.is_empty() {
        lines.push_str("(nothing)");
    }

    lines
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    rows: usize,
    color_ops: SmallVec<[(usize, usize, Color); 8]>,
) -> Result<(), ReportError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();

    for row in 1..=rows {
        theme.insert_horizontal_line(row, separator);
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..3), Alignment::right());
    table.modify(Columns::new(4..6), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}")?;

    Ok(())
}

fn write_summary(
    out: &mut impl io::Write,
    balance: &Money<'_, Currency>,
    policy: &TopUpPolicy<'_>,
    found: usize,
) -> Result<(), ReportError> {
    let lines = [
        (" Balance:", format!("{balance}  ")),
        (
            " Top-up:",
            format!("{} (up to {})  ", policy.amount(), policy.max_top_ups()),
        ),
        (" \x1b[1mOptions:\x1b[0m", format!("\x1b[1m{found}\x1b[0m  ")),
    ];

    let label_width = lines
        .iter()
        .map(|(label, _)| visible_width(label))
        .max()
        .unwrap_or_default();

    let value_width = lines
        .iter()
        .map(|(_, value)| visible_width(value))
        .max()
        .unwrap_or_default();

    for (label, value) in &lines {
        write_summary_line(out, label, value, label_width, value_width)?;
    }

    writeln!(out)?;

    Ok(())
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            out.push_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            out.push_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        out.push_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReportError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )?;

    Ok(())
}
