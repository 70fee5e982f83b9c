//! Plain-text rendering of search results, saved shows and update reports.

use std::fmt::Write;

use serieswatch_core::{ShowRecord, ShowSummary, UpdateReport, SHOW_FIELDS};

pub const NO_DATA_MESSAGE: &str =
    "There is no saved data! Please save a show first before accessing!";

const TABLE_TITLE: &str = "TV Show Index";

/// Numbered list of search results: `1. Name, Year, Country`.
pub fn search_results(results: &[ShowSummary]) -> String {
    result_list(results, false)
}

/// Like [`search_results`], with each line ending in ` (id N)` so the ID can
/// be passed to `add`.
pub fn search_results_with_ids(results: &[ShowSummary]) -> String {
    result_list(results, true)
}

fn result_list(results: &[ShowSummary], with_ids: bool) -> String {
    let mut out = String::from("Showing the most relevant results.\n\n");

    for (i, show) in results.iter().enumerate() {
        let year = show
            .first_air_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .unwrap_or("-");
        let country = show.country().unwrap_or("-");
        let _ = write!(out, "{}. {}, {}, {}", i + 1, show.name, year, country);
        if with_ids {
            let _ = write!(out, " (id {})", show.id);
        }
        out.push('\n');
    }

    out
}

/// Saved shows as a bordered table titled "TV Show Index".
pub fn show_table(records: &[ShowRecord]) -> String {
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.season_count.to_string(),
                r.show_id.to_string(),
            ]
        })
        .collect();

    let mut widths = SHOW_FIELDS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };
    let total_width = separator.chars().count();

    let mut out = String::new();
    let _ = writeln!(out, "{:^total_width$}", TABLE_TITLE);
    let _ = writeln!(out, "{}", separator);
    let _ = writeln!(
        out,
        "| {:<w0$} | {:^w1$} | {:^w2$} |",
        SHOW_FIELDS[0],
        SHOW_FIELDS[1],
        SHOW_FIELDS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    );
    let _ = writeln!(out, "{}", separator);
    for [name, seasons, id] in &rows {
        let _ = writeln!(
            out,
            "| {:<w0$} | {:>w1$} | {:>w2$} |",
            name,
            seasons,
            id,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
    }
    if !rows.is_empty() {
        let _ = writeln!(out, "{}", separator);
    }

    out
}

/// Human summary of an update check.
pub fn update_summary(report: &UpdateReport) -> String {
    if report.no_data {
        return format!("{}\n", NO_DATA_MESSAGE);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Checked {} show(s) at {}.",
        report.checked,
        report.checked_at.format("%Y-%m-%d %H:%M UTC")
    );

    if report.deltas.is_empty() {
        let _ = writeln!(out, "No new seasons.");
    }
    for delta in &report.deltas {
        let _ = writeln!(
            out,
            "{} now has {} season(s).",
            delta.name, delta.new_season_count
        );
    }
    for failure in &report.failures {
        let _ = writeln!(out, "Could not check {}: {}", failure.name, failure.error);
    }
    if report.skipped_rows > 0 {
        let _ = writeln!(
            out,
            "{} malformed row(s) in the database were ignored.",
            report.skipped_rows
        );
    }

    out
}
