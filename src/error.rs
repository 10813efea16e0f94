use std::path::PathBuf;

/// Result type alias for the ingestion seam
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading an API description payload
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Decode { file: PathBuf, message: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Decode { file, message } => {
                write!(f, "invalid API description {}: {}", file.display(), message)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Decode { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
