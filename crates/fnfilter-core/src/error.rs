use arrow::datatypes::DataType;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUnit {
    Dataset,
    Record,
}

impl fmt::Display for DataUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataUnit::Dataset => write!(f, "a dataset"),
            DataUnit::Record => write!(f, "a record"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("unable to determine the output schema: {0}")]
    SchemaDerivation(#[source] anyhow::Error),

    #[error("unable to filter {unit}: {source}")]
    Transformation {
        unit: DataUnit,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("filter cannot handle the input schema: {0}")]
    Capability(String),

    #[error("unsupported type: {0:?}")]
    UnsupportedType(DataType),

    #[error("value for field {field} does not match type {expected:?}")]
    TypeMismatch { field: String, expected: DataType },

    #[error("no field with name {0}")]
    UnknownField(String),

    #[error("expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("record {index} out of bounds for dataset with {len} records")]
    RecordOutOfBounds { index: usize, len: usize },

    #[error("class index {0} out of bounds")]
    InvalidClassIndex(usize),

    #[error("no record has been yielded since the last removal")]
    NothingToRemove,
}

impl FilterError {
    /// The error raised by caller-supplied code, if this error wraps one.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            FilterError::SchemaDerivation(source) => Some(source),
            FilterError::Transformation { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type FilterResult<T> = Result<T, FilterError>;
