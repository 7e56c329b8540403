use std::path::PathBuf;

/// Everything that can go wrong reading or writing a circle table. Each
/// variant names the file involved so the message can be shown as-is.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("{}: unsupported file type (load .csv, .xlsx or .xls; save .csv or .xlsx)", .path.display())]
    UnsupportedExtension { path: PathBuf },
    #[error("{}: missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}: row {row}, column `{column}`: `{text}` is not a number", .path.display())]
    BadNumber {
        path: PathBuf,
        row: usize,
        column: &'static str,
        text: String,
    },
    #[error("{}: row {row}: radius {value} must be a non-negative number", .path.display())]
    InvalidRadius { path: PathBuf, row: usize, value: f64 },
    #[error("{}: the first sheet is empty", .path.display())]
    EmptySheet { path: PathBuf },
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{}: {source}", .path.display())]
    Excel {
        path: PathBuf,
        source: calamine::Error,
    },
    #[error("{}: {source}", .path.display())]
    XlsxWrite {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },
}
