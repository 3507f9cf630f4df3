use std::path::Path;

use log::info;

use crate::{
    dataset::Dataset,
    error::{Error, Result},
    table::{Row, Table, Value},
};

/// Read one dataset from an already opened CSV reader, checking that the
/// header carries every column of the dataset's schema.
pub fn load<R>(dataset: Dataset, mut rdr: csv::Reader<R>) -> Result<Table>
where
    R: std::io::Read,
{
    let spec = dataset.spec();
    let io_error = |e: csv::Error| Error::Io {
        table: spec.name.to_string(),
        path: spec.file_name.to_string(),
        reason: e.to_string(),
    };

    let headers: Vec<String> = rdr
        .headers()
        .map_err(io_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if let Some(column) = spec.schema.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(Error::Schema {
            table: spec.name.to_string(),
            column: column.to_string(),
        });
    }

    let rows = rdr
        .into_records()
        .map(|record| {
            let record = record.map_err(io_error)?;
            Ok(Row {
                line: record.position().map_or(0, |p| p.line()),
                values: record.iter().map(Value::from).collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("loaded {} rows from {}", rows.len(), spec.file_name);
    Ok(Table::new(spec.name, headers, rows))
}

/// Open the dataset's file inside `dir` and load it.
pub fn load_path(dir: &Path, dataset: Dataset) -> Result<Table> {
    let spec = dataset.spec();
    let path = dir.join(spec.file_name);
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(|e| Error::Io {
            table: spec.name.to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    load(dataset, rdr)
}
