//! Error type for a single fetch attempt

/// Why one attempt at downloading an asset failed.
///
/// Every variant is retried by the [`Fetcher`](crate::Fetcher); once retries
/// are exhausted the `Display` form becomes the failure reason.
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure or non-2xx status (status is `None` for
    /// connection errors and timeouts)
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Response body below the minimum valid size
    TooSmall { len: u64 },
    /// Local write failure
    Io(std::io::Error),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::TooSmall { .. } => f.write_str("too small"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl FetchError {
    /// Create HTTP error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn display_http_with_status() {
        let err = FetchError::Http {
            status: Some(404),
            message: "not found".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 404: not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn display_http_without_status() {
        let err = FetchError::Http {
            status: None,
            message: "operation timed out".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: operation timed out");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_too_small_is_bare_reason() {
        let err = FetchError::TooSmall { len: 99 };
        assert_eq!(format!("{err}"), "too small");
    }

    #[test]
    fn display_io_error() {
        let err = FetchError::from(std::io::Error::new(ErrorKind::PermissionDenied, "denied"));
        assert!(format!("{err}").starts_with("IO error"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
