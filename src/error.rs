use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("table has no rows")]
    EmptyTable,

    #[error("growth range is undefined for an empty row set")]
    EmptyRange,

    #[error("marker scale is degenerate: max latest rate is {max_rate}")]
    DegenerateScale { max_rate: f64 },

    #[error("unknown category: `{0}`")]
    UnknownCategory(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
