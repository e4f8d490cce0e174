use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Which id space an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// matrix rows / labels
    Row,
    /// matrix columns / vocabulary terms
    Col,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "column"),
        }
    }
}

/// Errors raised while converting corpora and score matrices
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input does not have the `label -> documents -> tokens` shape
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("corpus has no labels")]
    EmptyCorpus,

    /// A coordinate id is outside the declared matrix shape
    #[error("{axis} id {id} is out of bounds for dimension {bound}")]
    ShapeMismatch { axis: Axis, id: u32, bound: usize },

    /// Raw CSR parts are inconsistent with each other
    #[error("malformed sparse matrix: {0}")]
    MalformedMatrix(String),

    /// Matrix id has no entry in the supplied mapping
    #[error("{axis} id {id} has no entry in the supplied mapping")]
    UnknownId { axis: Axis, id: u32 },

    /// More distinct keys than `u32` ids
    #[error("id space exhausted at {0} keys")]
    IdOverflow(usize),

    #[error("label {0:?} is not present in the label index")]
    UnknownLabel(String),

    #[error("value at ({row}, {col}) cannot be represented as f64")]
    ScoreConversion { row: u32, col: u32 },

    #[error("output format must be either of {{flat, grouped}}, got {0:?}")]
    InvalidOutputFormat(String),

    #[error("not implemented yet: {0}")]
    NotImplemented(&'static str),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Caused by the corpus or matrix handed in
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ConvertError::TypeMismatch { .. }
                | ConvertError::EmptyCorpus
                | ConvertError::ShapeMismatch { .. }
                | ConvertError::MalformedMatrix(_)
                | ConvertError::UnknownId { .. }
                | ConvertError::UnknownLabel(_)
                | ConvertError::IdOverflow(_)
                | ConvertError::ScoreConversion { .. }
                | ConvertError::Json(_)
        )
    }

    /// Caused by how the API was called (options, selectors)
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ConvertError::InvalidOutputFormat(_) | ConvertError::NotImplemented(_)
        )
    }
}
