use super::{COLUMNS, ColumnMap, TableError, TableRow, parse_number};
use std::path::Path;

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> TableError + '_ {
    move |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

pub(super) fn read_rows(path: &Path) -> Result<Vec<TableRow>, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error(path))?;
    let headers = rdr.headers().map_err(csv_error(path))?.clone();
    let columns = ColumnMap::locate(headers.iter(), path)?;

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_error(path))?;
        // Header is row 1.
        let row = idx + 2;
        rows.push(columns.row(path, row, |col| record.get(col).map(parse_number))?);
    }
    Ok(rows)
}

pub(super) fn write_rows(path: &Path, rows: &[TableRow]) -> Result<(), TableError> {
    let mut wtr = csv::Writer::from_path(path).map_err(csv_error(path))?;
    wtr.write_record(COLUMNS).map_err(csv_error(path))?;
    for row in rows {
        wtr.write_record([row.x.to_string(), row.y.to_string(), row.r.to_string()])
            .map_err(csv_error(path))?;
    }
    wtr.flush().map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}
