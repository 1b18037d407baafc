//! Tab-separated exchange format.
//!
//! One skill per line under the header
//! `name	base	good	average	bad	terrible	check_type`. Blank rating cells
//! mean "not applicable". Bad rows are reported and skipped, never fatal.

use std::path::Path;

use itertools::Itertools;
use serde::Serialize;

use super::entry::Entry;
use super::score::{Ratings, Score, decode, encode};
use crate::error::{Result, SbError};

/// Column names in file order.
pub const HEADER: [&str; 7] = ["name", "base", "good", "average", "bad", "terrible", "check_type"];

/// One parsed line of the exchange format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRow {
    pub name: String,
    pub ratings: Ratings,
    pub check_type: Option<String>,
}

impl TabularRow {
    #[must_use]
    pub fn score(&self) -> Score {
        decode(&self.ratings)
    }

    /// Non-empty classification, if any.
    #[must_use]
    pub fn classification(&self) -> Option<&str> {
        self.check_type.as_deref().filter(|value| !value.is_empty())
    }

    /// The row an entry exports to.
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            ratings: encode(&entry.score),
            check_type: entry.classification().map(str::to_string),
        }
    }
}

/// A row that was dropped while reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
    /// 1-based line number in the source file (header is line 1).
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for RowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Rows that parsed cleanly plus the warnings for those that did not.
#[derive(Debug, Clone, Default)]
pub struct TabularBatch {
    pub rows: Vec<TabularRow>,
    pub warnings: Vec<RowWarning>,
}

/// Read and parse a TSV file.
pub fn read(path: &Path) -> Result<TabularBatch> {
    if !path.is_file() {
        return Err(SbError::MissingInput(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    parse(&raw)
}

/// Parse TSV text.
pub fn parse(input: &str) -> Result<TabularBatch> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut records = split_records(input)
        .into_iter()
        .filter(|record| !record.is_blank());

    let header = records
        .next()
        .ok_or_else(|| SbError::InvalidTabular("input is empty (no header row)".to_string()))?;
    let columns = locate_columns(&header.cells)?;

    let mut batch = TabularBatch::default();
    for record in records {
        match parse_row(&record.cells, &columns) {
            Ok(row) => batch.rows.push(row),
            Err(message) => {
                tracing::warn!(line = record.line, "{message}");
                batch.warnings.push(RowWarning {
                    line: record.line,
                    message,
                });
            }
        }
    }
    Ok(batch)
}

/// Render entries as TSV, header included.
#[must_use]
pub fn render(entries: &[Entry]) -> String {
    let mut out = HEADER.join("\t");
    out.push('\n');
    for entry in entries {
        out.push_str(&render_row(&TabularRow::from_entry(entry)));
        out.push('\n');
    }
    out
}

fn render_row(row: &TabularRow) -> String {
    std::iter::once(quote_cell(&row.name))
        .chain(
            row.ratings
                .values()
                .iter()
                .map(|value| value.map(|v| v.to_string()).unwrap_or_default()),
        )
        .chain(std::iter::once(quote_cell(
            row.check_type.as_deref().unwrap_or_default(),
        )))
        .join("\t")
}

fn quote_cell(value: &str) -> String {
    if value.contains(['\t', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Index of each [`HEADER`] column in the file's header row.
fn locate_columns(header: &[String]) -> Result<[usize; 7]> {
    let mut columns = [0usize; 7];
    for (slot, name) in columns.iter_mut().zip(HEADER) {
        *slot = header
            .iter()
            .position(|cell| cell.trim() == name)
            .ok_or_else(|| SbError::InvalidTabular(format!("header is missing column '{name}'")))?;
    }
    Ok(columns)
}

fn parse_row(cells: &[String], columns: &[usize; 7]) -> std::result::Result<TabularRow, String> {
    let cell = |col: usize| cells.get(columns[col]).map_or("", |value| value.trim());

    let name = cell(0);
    if name.is_empty() {
        return Err("empty skill name".to_string());
    }

    let mut values = [None; 5];
    for (offset, value) in values.iter_mut().enumerate() {
        let raw = cell(offset + 1);
        if raw.is_empty() {
            continue;
        }
        *value = Some(raw.parse::<i64>().map_err(|_| {
            format!(
                "{name}: column '{}' value '{raw}' is not an integer",
                HEADER[offset + 1]
            )
        })?);
    }

    let check_type = Some(cell(6)).filter(|value| !value.is_empty());

    Ok(TabularRow {
        name: name.to_string(),
        ratings: Ratings::from_values(values),
        check_type: check_type.map(str::to_string),
    })
}

/// One record of the input and the line it starts on.
struct Record {
    line: usize,
    cells: Vec<String>,
}

impl Record {
    fn is_blank(&self) -> bool {
        matches!(self.cells.as_slice(), [only] if only.trim().is_empty())
    }
}

/// Split input into tab-separated records, honouring double-quoted cells.
///
/// A quoted cell may span lines; `\r\n` outside quotes ends a record like `\n`.
fn split_records(input: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = input.chars().peekable();
    let mut in_quotes = false;
    let mut at_start = true;
    let mut line = 1;
    let mut start_line = 1;

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if at_start => in_quotes = true,
            '\n' => {
                line += 1;
                if in_quotes {
                    cell.push('\n');
                } else {
                    cells.push(std::mem::take(&mut cell));
                    records.push(Record {
                        line: start_line,
                        cells: std::mem::take(&mut cells),
                    });
                    start_line = line;
                    at_start = true;
                    continue;
                }
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => continue,
            '\t' if !in_quotes => {
                cells.push(std::mem::take(&mut cell));
                at_start = true;
                continue;
            }
            _ => cell.push(ch),
        }
        at_start = false;
    }
    if !cell.is_empty() || !cells.is_empty() {
        cells.push(cell);
        records.push(Record {
            line: start_line,
            cells,
        });
    }
    records
}
