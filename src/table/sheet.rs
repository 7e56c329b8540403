use super::{COLUMNS, ColumnMap, TableError, TableRow, parse_number};
use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;
use std::path::Path;

fn cell_number(cell: &Data) -> Result<f64, String> {
    match cell {
        Data::Float(v) => Ok(*v),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(v) => Ok(*v as f64),
        Data::String(s) => parse_number(s),
        other => Err(other.to_string()),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads the first worksheet; its first row is the header.
pub(super) fn read_rows(path: &Path) -> Result<Vec<TableRow>, TableError> {
    let excel_error = |source| TableError::Excel {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(excel_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::EmptySheet {
            path: path.to_path_buf(),
        })?
        .map_err(excel_error)?;

    let mut sheet_rows = range.rows();
    let Some(header) = sheet_rows.next() else {
        return Err(TableError::EmptySheet {
            path: path.to_path_buf(),
        });
    };
    let names: Vec<String> = header.iter().map(cell_text).collect();
    let columns = ColumnMap::locate(names.iter().map(String::as_str), path)?;

    let mut rows = Vec::new();
    for (idx, cells) in sheet_rows.enumerate() {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let row = idx + 2;
        rows.push(columns.row(path, row, |col| cells.get(col).map(cell_number))?);
    }
    Ok(rows)
}

pub(super) fn write_rows(path: &Path, rows: &[TableRow]) -> Result<(), TableError> {
    let xlsx_error = |source| TableError::XlsxWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in (0_u16..).zip(COLUMNS) {
        worksheet.write_string(0, col, name).map_err(xlsx_error)?;
    }
    for (row_idx, row) in (1_u32..).zip(rows) {
        for (col, value) in (0_u16..).zip([row.x, row.y, row.r]) {
            worksheet
                .write_number(row_idx, col, value)
                .map_err(xlsx_error)?;
        }
    }
    workbook.save(path).map_err(xlsx_error)
}
