//! Flat `x,y,r` tables on disk (CSV or Excel), one row per circle.

mod delimited;
mod error;
mod sheet;

pub use error::TableError;

use crate::annot::{CircleId, CircleRecord};
use std::path::Path;

/// Required header names, in the column order used when writing.
pub const COLUMNS: [&str; 3] = ["x", "y", "r"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Excel,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx" | "xls") => Ok(Self::Excel),
            _ => Err(TableError::UnsupportedExtension {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Like [`Self::from_path`], but legacy `.xls` is refused: only xlsx can
    /// be written.
    pub fn for_saving(path: &Path) -> Result<Self, TableError> {
        let is_xls = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xls"));
        if is_xls {
            return Err(TableError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }
        Self::from_path(path)
    }
}

/// One parsed data row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    x: usize,
    y: usize,
    r: usize,
}

impl ColumnMap {
    fn locate<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        path: &Path,
    ) -> Result<Self, TableError> {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| *h == column)
                .ok_or_else(|| TableError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };
        Ok(Self {
            x: find("x")?,
            y: find("y")?,
            r: find("r")?,
        })
    }

    /// Build a row from a cell accessor; `row` is the 1-based row in the file.
    fn row(
        self,
        path: &Path,
        row: usize,
        cell: impl Fn(usize) -> Option<Result<f64, String>>,
    ) -> Result<TableRow, TableError> {
        let value = |idx: usize, column: &'static str| match cell(idx) {
            Some(Ok(v)) => Ok(v),
            Some(Err(text)) => Err(TableError::BadNumber {
                path: path.to_path_buf(),
                row,
                column,
                text,
            }),
            None => Err(TableError::BadNumber {
                path: path.to_path_buf(),
                row,
                column,
                text: String::new(),
            }),
        };
        // NaN and infinities parse as f64 but cannot place a circle.
        let coordinate = |idx: usize, column: &'static str| {
            let v = value(idx, column)?;
            if v.is_finite() {
                Ok(v)
            } else {
                Err(TableError::BadNumber {
                    path: path.to_path_buf(),
                    row,
                    column,
                    text: v.to_string(),
                })
            }
        };
        let parsed = TableRow {
            x: coordinate(self.x, "x")?,
            y: coordinate(self.y, "y")?,
            r: value(self.r, "r")?,
        };
        if !parsed.r.is_finite() || parsed.r < 0.0 {
            return Err(TableError::InvalidRadius {
                path: path.to_path_buf(),
                row,
                value: parsed.r,
            });
        }
        Ok(parsed)
    }
}

fn parse_number(text: &str) -> Result<f64, String> {
    text.trim().parse::<f64>().map_err(|_| text.to_string())
}

/// Read a table and turn its rows into records with ids `0..n` in row order.
pub fn load_table(path: &Path) -> Result<Vec<CircleRecord>, TableError> {
    let rows = match TableFormat::from_path(path)? {
        TableFormat::Csv => delimited::read_rows(path)?,
        TableFormat::Excel => sheet::read_rows(path)?,
    };
    log::info!("Loaded {} circles from {}", rows.len(), path.display());
    Ok(rows
        .into_iter()
        .zip(0_u64..)
        .map(|(row, id)| CircleRecord {
            id: CircleId(id),
            x: row.x,
            y: row.y,
            r: row.r,
        })
        .collect())
}

pub fn save_table<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a CircleRecord>,
) -> Result<usize, TableError> {
    let rows: Vec<TableRow> = records
        .into_iter()
        .map(|rec| TableRow {
            x: rec.x,
            y: rec.y,
            r: rec.r,
        })
        .collect();
    match TableFormat::for_saving(path)? {
        TableFormat::Csv => delimited::write_rows(path, &rows)?,
        TableFormat::Excel => sheet::write_rows(path, &rows)?,
    }
    log::info!("Saved {} circles to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// Load the file picked in a dialog. No selection is a silent cancel (`Ok(None)`).
pub fn load_selection(selection: Option<&Path>) -> Result<Option<Vec<CircleRecord>>, TableError> {
    selection.map(load_table).transpose()
}

/// Save to the file picked in a dialog. No selection is a silent cancel (`Ok(None)`).
pub fn save_selection<'a>(
    selection: Option<&Path>,
    records: impl IntoIterator<Item = &'a CircleRecord>,
) -> Result<Option<usize>, TableError> {
    selection.map(|path| save_table(path, records)).transpose()
}
