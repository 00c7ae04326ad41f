use thiserror::Error;

/// The external feature source could not be used.
/// Always recovered by falling back to synthetic generation.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Source contains no records")]
    Empty,

    #[error("Duplicate city '{0}'")]
    DuplicateCity(String),

    #[error("Invalid value for {field} in '{city}': {value}")]
    InvalidValue {
        city: String,
        field: &'static str,
        value: f64,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("Cannot train on an empty record set")]
    EmptyTrainingSet,

    #[error("Feature vector has {actual} columns, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Lookup failures surfaced by the query service.
#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    #[error("City not found")]
    NotFound { city: String },

    #[error("{message}")]
    Internal { city: String, message: String },
}

impl QueryError {
    pub fn city(&self) -> &str {
        match self {
            Self::NotFound { city } | Self::Internal { city, .. } => city,
        }
    }
}

/// Unrecoverable startup failures.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Model training failed: {0}")]
    Model(#[from] ModelError),

    #[error("Synthetic data generation failed: {0}")]
    DataSource(#[from] DataSourceError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
