use std::path::PathBuf;

use thiserror::Error;

/// Which regular expression failed to match a catalog type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionKind {
    Size,
    Decimal,
    Signedness,
}

impl std::fmt::Display for ExtractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionKind::Size => f.write_str("column size"),
            ExtractionKind::Decimal => f.write_str("decimal precision"),
            ExtractionKind::Signedness => f.write_str("integer signedness"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("Unknown database driver '{0}'. Must be either \"mysql\" or \"postgres\"")]
    UnsupportedDriver(String),

    #[error("Invalid level value '{0}'. Must be one of \"1\", \"2\", \"3\" or \"4\"")]
    InvalidLevel(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Could not query the catalog for {query}: {source}")]
    Catalog {
        query: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("data type '{0}' not found")]
    UnknownType(String),

    #[error("Could not extract {kind} from column type '{input}'")]
    Extraction { kind: ExtractionKind, input: String },

    #[error("Template rendering error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn catalog(query: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| GenError::Catalog { query, source }
    }

    /// Errors raised before any database or file work starts.
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            GenError::UnsupportedDriver(_) | GenError::InvalidLevel(_) | GenError::Config(_)
        )
    }
}

pub type GenResult<T> = Result<T, GenError>;
