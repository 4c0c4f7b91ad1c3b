//! Bounded worker pool running fetch jobs in parallel

use std::io;
use std::sync::mpsc;

use crate::fetcher::{FetchOutcome, Job};
use crate::work_queue::WorkQueue;
use crate::FetchConfig;

/// Receives per-job completion events from [`WorkerPool::run`].
///
/// Callbacks are delivered one at a time from the thread that called
/// `run`, never from inside a worker.
pub trait ProgressObserver: Send + Sync {
    /// Called after every completed job, success or failure
    fn on_progress(&self, completed: usize, total: usize);

    /// Called for each failed job; `ordinal` is 1 for the first failure
    /// of the batch
    fn on_failure(&self, _job: &Job, _reason: &str, _ordinal: usize) {}
}

/// Observer that ignores every event
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

/// Outcome counts of one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchResult {
    pub fn completed(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Runs jobs with at most `workers` fetches in flight.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    pub fn new(config: &FetchConfig) -> io::Result<Self> {
        Self::with_workers(config.workers)
    }

    pub fn with_workers(workers: usize) -> io::Result<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fetch-{i}"))
            .build()
            .map_err(io::Error::other)?;
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every job through `fetch` and return the outcome counts.
    ///
    /// Returns only after every job produced an outcome. Completion order
    /// is unspecified. An empty batch returns immediately without touching
    /// the pool or the observer.
    pub fn run<F>(&self, jobs: Vec<Job>, fetch: F, observer: &dyn ProgressObserver) -> BatchResult
    where
        F: Fn(&Job) -> FetchOutcome + Sync,
    {
        let mut result = BatchResult::default();
        let queue = WorkQueue::new(jobs);
        if queue.is_empty() {
            return result;
        }
        let total = queue.len();
        let (tx, rx) = mpsc::channel::<(&Job, FetchOutcome)>();

        self.pool.in_place_scope(|s| {
            for _ in 0..self.workers.min(total) {
                let tx = tx.clone();
                let queue = &queue;
                let fetch = &fetch;
                s.spawn(move |_| {
                    while let Some(job) = queue.claim() {
                        let outcome = fetch(job);
                        if tx.send((job, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            // Drains until every worker has hung up
            for (job, outcome) in rx {
                match outcome {
                    FetchOutcome::Success => result.succeeded += 1,
                    FetchOutcome::Failure(reason) => {
                        result.failed += 1;
                        log::debug!("{}: {reason}", job.dest.display());
                        observer.on_failure(job, &reason, result.failed);
                    }
                }
                observer.on_progress(result.completed(), total);
            }
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        progress: Mutex<Vec<(usize, usize)>>,
        failures: Mutex<Vec<(String, String, usize)>>,
    }

    impl ProgressObserver for Recorder {
        fn on_progress(&self, completed: usize, total: usize) {
            self.progress.lock().unwrap().push((completed, total));
        }

        fn on_failure(&self, job: &Job, reason: &str, ordinal: usize) {
            self.failures
                .lock()
                .unwrap()
                .push((job.name().into_owned(), reason.to_string(), ordinal));
        }
    }

    fn jobs(n: usize) -> Vec<Job> {
        (0..n)
            .map(|i| Job::new(format!("https://cdn/{i}.png"), format!("out/{i}.png")))
            .collect()
    }

    #[test]
    fn empty_batch_skips_observer() {
        let pool = WorkerPool::with_workers(4).unwrap();
        let recorder = Recorder::default();
        let result = pool.run(vec![], |_| panic!("fetch called"), &recorder);
        assert_eq!(result, BatchResult::default());
        assert!(recorder.progress.lock().unwrap().is_empty());
    }

    #[test]
    fn counts_successes_and_failures() {
        let pool = WorkerPool::with_workers(4).unwrap();
        let recorder = Recorder::default();
        let result = pool.run(
            jobs(20),
            |job| {
                if job.url.ends_with("3.png") {
                    FetchOutcome::Failure("HTTP 404: gone".to_string())
                } else {
                    FetchOutcome::Success
                }
            },
            &recorder,
        );

        // 3.png and 13.png
        assert_eq!(result, BatchResult { succeeded: 18, failed: 2 });

        let failures = recorder.failures.lock().unwrap();
        let mut ordinals: Vec<usize> = failures.iter().map(|f| f.2).collect();
        ordinals.sort_unstable();
        assert_eq!(ordinals, vec![1, 2]);
        assert!(failures.iter().all(|f| f.1 == "HTTP 404: gone"));
    }

    #[test]
    fn progress_is_incremental() {
        let pool = WorkerPool::with_workers(3).unwrap();
        let recorder = Recorder::default();
        pool.run(jobs(10), |_| FetchOutcome::Success, &recorder);

        let progress = recorder.progress.lock().unwrap();
        let expected: Vec<(usize, usize)> = (1..=10).map(|i| (i, 10)).collect();
        assert_eq!(*progress, expected);
    }

    #[test]
    fn in_flight_never_exceeds_workers() {
        let pool = WorkerPool::with_workers(3).unwrap();
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let result = pool.run(
            jobs(24),
            |_| {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(5));
                in_flight.fetch_sub(1, Ordering::SeqCst);
                FetchOutcome::Success
            },
            &NoProgress,
        );

        assert_eq!(result.completed(), 24);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn every_job_runs_exactly_once() {
        let pool = WorkerPool::with_workers(12).unwrap();
        let seen = Mutex::new(Vec::new());
        pool.run(
            jobs(100),
            |job| {
                seen.lock().unwrap().push(job.url.clone());
                FetchOutcome::Success
            },
            &NoProgress,
        );

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn zero_workers_is_clamped() {
        let pool = WorkerPool::with_workers(0).unwrap();
        assert_eq!(pool.workers(), 1);
    }
}
