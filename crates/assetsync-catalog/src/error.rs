//! Errors that abort a sync run

use std::path::PathBuf;

use assetsync_core::FetchError;

/// Fatal errors: raised before any catalog is modified, or while
/// persisting the result. Per-asset fetch failures are never reported
/// through this type.
#[derive(Debug)]
pub enum CatalogError {
    /// An input catalog does not exist
    Missing(PathBuf),
    /// Reading or writing a catalog / asset directory failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A catalog is not valid JSON of the expected shape
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The HTTP client could not be built
    Transport(FetchError),
    /// The worker pool could not be started
    Pool(std::io::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(
                f,
                "{} not found; run from the folder that contains it",
                path.display()
            ),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "{}: invalid catalog: {source}", path.display())
            }
            Self::Transport(e) => write!(f, "HTTP client: {e}"),
            Self::Pool(e) => write!(f, "worker pool: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Missing(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Transport(e) => Some(e),
            Self::Pool(e) => Some(e),
        }
    }
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
