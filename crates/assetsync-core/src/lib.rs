//! Assetsync Core - concurrent, retrying asset fetch engine
//!
//! This crate provides the pieces shared by every asset batch:
//! an HTTP transport, a fixed-delay retry loop, the single-file
//! [`Fetcher`] and the bounded [`WorkerPool`] that drives it.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod logging;
pub mod pool;
pub mod progress;
pub mod retry;
pub mod work_queue;

// Re-exports for convenience
pub use config::{DEFAULT_USER_AGENT, FetchConfig};
pub use error::FetchError;
pub use fetcher::{FetchOutcome, Fetcher, Job, is_cached, write_atomic};
pub use http::{HttpTransport, SHARED_RUNTIME, Transport};
pub use logging::{IndicatifLogger, init_logging};
pub use pool::{BatchResult, NoProgress, ProgressObserver, WorkerPool};
pub use progress::{BatchProgress, ProgressContext, SharedProgress, fmt_num};
pub use work_queue::WorkQueue;
