//! CLI error envelope.

use projfilter_core::{CatalogError, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum CliError {
    Io { path: PathBuf, source: std::io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    Catalog(CatalogError),
    Logging(LoggingError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid catalog file `{}`: {source}", path.display())
            }
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Catalog(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}
