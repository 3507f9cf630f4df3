use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("failed to read table `{table}` from `{path}`, reason: `{reason}`")]
    Io {
        table: String,
        path: String,
        reason: String,
    },
    #[error("table `{table}` has no column `{column}`")]
    Schema { table: String, column: String },
    #[error("table `{table}`, column `{column}`, row {row}: cannot parse date from `{value}`")]
    DateParse {
        table: String,
        column: String,
        row: u64,
        value: String,
    },
    #[error("table `{table}`, column `{column}`, row {row}: `{value}` is not a number")]
    ValueParse {
        table: String,
        column: String,
        row: u64,
        value: String,
    },
    #[error("failed to write report, reason: `{0}`")]
    Output(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Output(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
