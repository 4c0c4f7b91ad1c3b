//! Progress reporting for TTY and non-TTY environments.
//!
//! TTY mode: one indicatif bar per batch.
//! Non-TTY mode: log lines at every 10% step (no progress bars).

use std::io::IsTerminal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::fetcher::Job;
use crate::pool::ProgressObserver;

/// Failures named individually per batch; later ones are only counted.
pub const FAILURE_ECHO_LIMIT: usize = 10;

/// Batch bar: label, 50-cell bar, percent, done/total
fn batch_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "  {prefix:<6.bold} [{bar:50.green/dim}] {percent:>3}%  {human_pos}/{human_len} {elapsed:>4}",
    )
    .expect("invalid template")
    .progress_chars("█░")
}

/// Central progress context managing multi-progress bars.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Context that never draws; used for dry runs and tests.
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            is_tty: false,
        }
    }

    /// Create a bar for one batch of `total` jobs.
    ///
    /// Non-TTY: hidden (no-op).
    pub fn batch_bar(&self, label: &str, total: usize) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(batch_style());
        pb.set_prefix(label.to_string());
        pb
    }

    /// Print a line above managed progress bars (avoids interference).
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.is_tty {
            let _ = self.multi.println(msg);
        } else {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper for `ProgressContext`.
pub type SharedProgress = Arc<ProgressContext>;

/// Console observer for one batch.
///
/// Advances the batch bar, names the first [`FAILURE_ECHO_LIMIT`]
/// failures and, off a TTY, logs progress at every 10% step.
pub struct BatchProgress<'a> {
    ctx: &'a ProgressContext,
    label: String,
    bar: ProgressBar,
    logged_step: AtomicUsize,
}

impl<'a> BatchProgress<'a> {
    pub fn new(ctx: &'a ProgressContext, label: &str, total: usize) -> Self {
        Self {
            ctx,
            label: label.to_string(),
            bar: ctx.batch_bar(label, total),
            logged_step: AtomicUsize::new(0),
        }
    }

    pub fn finish(self) {
        self.bar.finish();
    }
}

impl ProgressObserver for BatchProgress<'_> {
    fn on_progress(&self, completed: usize, total: usize) {
        self.bar.set_position(completed as u64);
        if self.ctx.is_tty() {
            return;
        }
        let step = percent_step(completed, total, 10);
        if step > self.logged_step.swap(step, Ordering::Relaxed) {
            log::info!(
                "{}: {}% ({}/{})",
                self.label,
                step,
                fmt_num(completed),
                fmt_num(total)
            );
        }
    }

    fn on_failure(&self, job: &Job, reason: &str, ordinal: usize) {
        match failure_echo(ordinal) {
            FailureEcho::Named => self.ctx.println(format!("    ✗ {}: {reason}", job.name())),
            FailureEcho::Overflow => self
                .ctx
                .println(format!("    ✗ further {} failures counted only", self.label)),
            FailureEcho::Silent => {}
        }
    }
}

/// How the `ordinal`-th failure of a batch shows up on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureEcho {
    /// Printed with its reason
    Named,
    /// First one past the limit: a single "counted only" line
    Overflow,
    Silent,
}

pub fn failure_echo(ordinal: usize) -> FailureEcho {
    match ordinal {
        0..=FAILURE_ECHO_LIMIT => FailureEcho::Named,
        n if n == FAILURE_ECHO_LIMIT + 1 => FailureEcho::Overflow,
        _ => FailureEcho::Silent,
    }
}

/// Completed percentage rounded down to a multiple of `step`.
pub fn percent_step(completed: usize, total: usize, step: usize) -> usize {
    if total == 0 || step == 0 {
        return 0;
    }
    let pct = completed.min(total) * 100 / total;
    pct - pct % step
}

/// Format number with thousand separators.
pub fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
