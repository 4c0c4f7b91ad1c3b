//! Download one URL to one destination path, with retry and validation

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http::Transport;
use crate::retry::retry_fixed;

/// A scheduled `(source URL, destination path)` pair.
///
/// The destination doubles as the cache key: two jobs with the same
/// destination are the same asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub url: String,
    pub dest: PathBuf,
}

impl Job {
    pub fn new(url: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dest: dest.into(),
        }
    }

    /// File name of the destination, for console output
    pub fn name(&self) -> Cow<'_, str> {
        self.dest
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.dest.to_string_lossy())
    }
}

/// Final result of fetching one job, after retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    Failure(String),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Retrying single-file downloader.
pub struct Fetcher<T> {
    transport: T,
    config: FetchConfig,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, config: FetchConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Download `url` into `dest`.
    ///
    /// Never panics or returns an error: network, status, size and write
    /// failures are retried and finally folded into [`FetchOutcome::Failure`].
    pub fn fetch(&self, url: &str, dest: &Path) -> FetchOutcome {
        let label = dest.display().to_string();
        let result = retry_fixed(
            &label,
            self.config.retries,
            self.config.retry_wait,
            || self.attempt(url, dest),
        );
        match result {
            Ok(len) => {
                log::trace!("{label}: {len} bytes from {url}");
                FetchOutcome::Success
            }
            Err(e) => FetchOutcome::Failure(e.to_string()),
        }
    }

    pub fn fetch_job(&self, job: &Job) -> FetchOutcome {
        self.fetch(&job.url, &job.dest)
    }

    fn attempt(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let body = self.transport.get(url)?;
        let len = body.len() as u64;
        if len < self.config.min_valid_bytes {
            return Err(FetchError::TooSmall { len });
        }
        write_atomic(dest, &body)?;
        Ok(len)
    }
}

/// Write `bytes` to a sibling tmp file, then rename onto `path`.
///
/// Readers never observe a partially written destination.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = tmp_path_for(path);
    if let Err(e) = fs::write(&tmp_path, bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, path)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A file at `path` of at least `min_valid_bytes` counts as a cached asset.
pub fn is_cached(path: &Path, min_valid_bytes: u64) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.len() >= min_valid_bytes)
        .unwrap_or(false)
}
