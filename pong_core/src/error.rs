use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to produce a usable field layout.
#[derive(Debug)]
pub enum LayoutError {
    Io { path: PathBuf, source: io::Error },
    Parse(ron::error::SpannedError),
    Invalid(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Io { path, .. } => write!(f, "failed to read layout {}", path.display()),
            LayoutError::Parse(err) => write!(f, "failed to parse layout: {err}"),
            LayoutError::Invalid(reason) => write!(f, "invalid layout: {reason}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Io { source, .. } => Some(source),
            LayoutError::Parse(err) => Some(err),
            LayoutError::Invalid(_) => None,
        }
    }
}

impl From<ron::error::SpannedError> for LayoutError {
    fn from(err: ron::error::SpannedError) -> Self {
        LayoutError::Parse(err)
    }
}
