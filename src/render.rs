//! Report rendering collaborator.
//!
//! Produces the terminal table and the persisted SVG artifact of the same
//! fixed-order score table. Rendering never alters the numbers: the Report
//! fields are already rounded.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use svg::Document;
use svg::node::element::{Line, Rectangle, Text};

use crate::evaluation::report::{COLUMNS, Report};

const ROW_HEIGHT: i32 = 30;
const LABEL_WIDTH: i32 = 150;
const VALUE_WIDTH: i32 = 110;
const MARGIN: i32 = 10;

/// Format the report as an aligned plain-text table.
#[must_use]
pub fn format_table(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16}{:>12}{:>12}{:>12}",
        "", COLUMNS[0], COLUMNS[1], COLUMNS[2]
    );
    for (label, row) in report.rows() {
        let _ = writeln!(
            out,
            "{label:<16}{:>12.4}{:>12.4}{:>12.4}",
            row.precision, row.recall, row.f1
        );
    }
    out
}

/// Default artifact location: `<output_dir>/<hypothesis stem>.svg`.
#[must_use]
pub fn default_artifact_path(hypothesis_path: &Path, output_dir: &Path) -> PathBuf {
    let stem = hypothesis_path.file_stem().map_or_else(
        || "report".to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    );
    output_dir.join(format!("{stem}.svg"))
}

/// Render the score table as an SVG artifact at `path`.
///
/// Parent directories are created on demand. Identical reports always
/// produce identical files.
///
/// # Errors
/// Returns an error when the output directory or file cannot be written.
pub fn render_svg(report: &Report, path: &Path) -> Result<()> {
    let document = table_document(report);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }

    svg::save(path, &document)
        .with_context(|| format!("failed to write score table to {}", path.display()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn table_document(report: &Report) -> Document {
    let rows = report.rows();
    let width = MARGIN * 2 + LABEL_WIDTH + VALUE_WIDTH * COLUMNS.len() as i32;
    let height = MARGIN * 2 + ROW_HEIGHT * (rows.len() as i32 + 1);

    let mut document = Document::new()
        .set("viewBox", (0, 0, width, height))
        .set("width", width)
        .set("height", height)
        .add(
            Rectangle::new()
                .set("x", MARGIN)
                .set("y", MARGIN)
                .set("width", width - MARGIN * 2)
                .set("height", height - MARGIN * 2)
                .set("fill", "#ffffff")
                .set("stroke", "#333333"),
        );

    for (column, title) in COLUMNS.iter().enumerate() {
        document = document.add(cell_text(*title, value_center_x(column as i32), 0, true));
    }

    for (index, (label, row)) in rows.iter().enumerate() {
        let row_index = index as i32 + 1;
        document = document
            .add(label_text(label, row_index))
            .add(cell_text(
                &format!("{:.4}", row.precision),
                value_center_x(0),
                row_index,
                false,
            ))
            .add(cell_text(
                &format!("{:.4}", row.recall),
                value_center_x(1),
                row_index,
                false,
            ))
            .add(cell_text(
                &format!("{:.4}", row.f1),
                value_center_x(2),
                row_index,
                false,
            ));
    }

    document
        .add(
            Line::new()
                .set("x1", MARGIN)
                .set("y1", MARGIN + ROW_HEIGHT)
                .set("x2", width - MARGIN)
                .set("y2", MARGIN + ROW_HEIGHT)
                .set("stroke", "#333333"),
        )
        .add(
            Line::new()
                .set("x1", MARGIN + LABEL_WIDTH)
                .set("y1", MARGIN)
                .set("x2", MARGIN + LABEL_WIDTH)
                .set("y2", height - MARGIN)
                .set("stroke", "#333333"),
        )
}

fn value_center_x(column: i32) -> i32 {
    MARGIN + LABEL_WIDTH + column * VALUE_WIDTH + VALUE_WIDTH / 2
}

fn baseline_y(row: i32) -> i32 {
    MARGIN + row * ROW_HEIGHT + 20
}

fn cell_text(content: &str, center_x: i32, row: i32, bold: bool) -> Text {
    let mut text = Text::new(content)
        .set("x", center_x)
        .set("y", baseline_y(row))
        .set("font-family", "sans-serif")
        .set("font-size", 13)
        .set("text-anchor", "middle");
    if bold {
        text = text.set("font-weight", "bold");
    }
    text
}

fn label_text(content: &str, row: i32) -> Text {
    Text::new(content)
        .set("x", MARGIN + 8)
        .set("y", baseline_y(row))
        .set("font-family", "sans-serif")
        .set("font-size", 13)
        .set("font-weight", "bold")
        .set("text-anchor", "start")
}
