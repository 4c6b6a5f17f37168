//! Deadline-bounded probe polling.
//!
//! [`Poller::run`] re-evaluates a [`Probe`] once per recheck interval until
//! one of three things happens first: the probe succeeds, the overall
//! deadline elapses, or the stop signal fires.
//!
//! ```text
//!              probe true (StopOnSuccess)
//!            ┌──────────────────────────────► Succeeded
//!            │  deadline, ≥1 success (LogAndContinue)
//!  Running ──┼──────────────────────────────► Succeeded
//!            │  deadline, no success
//!            ├──────────────────────────────► TimedOut
//!            │  probe error
//!            ├──────────────────────────────► ProbeFailed
//!            │  stop signal
//!            └──────────────────────────────► Cancelled
//! ```
//!
//! # Timing
//! The first probe runs one recheck interval after start, like a ticker.
//! The deadline is absolute from start.  When a tick and the deadline land
//! on the same instant the deadline wins, so overshoot past the deadline is
//! bounded by a single recheck interval (in practice, scheduler latency).
//! Durations too large to add to the start instant are treated as "never":
//! the timer is parked far in the future instead of overflowing.
//!
//! The probe is evaluated inline on the polling task, so the overshoot bound
//! only holds for probes whose [`Probe::check`] returns promptly.
//!
//! # Example
//! ```rust,ignore
//! let poller = Poller::new(PollConfig::default(), TracingLogger::shared("poll"));
//! let report = poller.run(&mut || service_is_up(), &ShutdownSignal::never()).await?;
//! ```

pub mod error;
pub mod probe;

pub use error::{PollError, ProbeError};
pub use probe::{FallibleProbe, Probe, RandomProbe};

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};

use crate::logging::Logger;
use crate::shutdown::ShutdownSignal;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default wait between probe evaluations.
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_millis(200);

/// Default overall deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(1_200);

// ── Policy & state ────────────────────────────────────────────────────────────

/// What a successful probe does to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessPolicy {
    /// Stop at the first success.
    #[default]
    StopOnSuccess,
    /// Record the success and keep probing until the deadline.
    LogAndContinue,
}

impl std::fmt::Display for SuccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuccessPolicy::StopOnSuccess => write!(f, "stop_on_success"),
            SuccessPolicy::LogAndContinue => write!(f, "log_and_continue"),
        }
    }
}

/// Lifecycle of one poll invocation.  Everything except `Running` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Running,
    Succeeded,
    TimedOut,
    ProbeFailed,
    Cancelled,
}

impl PollState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PollState::Running)
    }
}

// ── PollConfig ────────────────────────────────────────────────────────────────

/// Interval, deadline and success policy for one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub recheck_interval: Duration,
    pub deadline: Duration,
    pub policy: SuccessPolicy,
}

impl PollConfig {
    pub fn new(recheck_interval: Duration, deadline: Duration) -> Self {
        Self {
            recheck_interval,
            deadline,
            policy: SuccessPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SuccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reject configurations the loop cannot run.
    ///
    /// A zero interval would spin; a zero deadline can never be met.  An
    /// interval at or above the deadline is legal (the probe simply never
    /// runs) and only earns a warning from [`Poller::run`].
    pub fn validate(&self) -> Result<(), PollError> {
        if self.recheck_interval.is_zero() {
            return Err(PollError::InvalidConfig(
                "recheck interval must be greater than zero".to_string(),
            ));
        }
        if self.deadline.is_zero() {
            return Err(PollError::InvalidConfig(
                "deadline must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RECHECK_INTERVAL, DEFAULT_DEADLINE)
    }
}

// ── PollReport ────────────────────────────────────────────────────────────────

/// Summary of a poll that ended in [`PollState::Succeeded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub state: PollState,
    /// Number of times the probe was evaluated.
    pub attempts: u32,
    /// Number of evaluations that returned `true`.
    pub successes: u32,
    /// 1-based attempt number of the first success.
    pub first_success_attempt: Option<u32>,
    /// Time from start to the terminal transition.
    pub elapsed: Duration,
}

// ── Per-run record ────────────────────────────────────────────────────────────

/// Mutable state of one `run()` call.  Created on entry, dropped on return,
/// never shared.
struct PollRun {
    started: Instant,
    state: PollState,
    attempts: u32,
    successes: u32,
    first_success_attempt: Option<u32>,
}

impl PollRun {
    fn new(started: Instant) -> Self {
        Self {
            started,
            state: PollState::Running,
            attempts: 0,
            successes: 0,
            first_success_attempt: None,
        }
    }

    /// Count one more evaluation and return its 1-based number.
    fn next_attempt(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    fn record_success(&mut self) {
        self.successes = self.successes.saturating_add(1);
        self.first_success_attempt.get_or_insert(self.attempts);
    }

    fn finish(&mut self, state: PollState) -> PollReport {
        debug_assert_eq!(self.state, PollState::Running, "poll already finished");
        debug_assert!(state.is_terminal());
        self.state = state;
        PollReport {
            state,
            attempts: self.attempts,
            successes: self.successes,
            first_success_attempt: self.first_success_attempt,
            elapsed: self.started.elapsed(),
        }
    }
}

/// `start + after`, or a point roughly 30 years out when that overflows.
fn instant_after(start: Instant, after: Duration) -> Instant {
    start
        .checked_add(after)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

// ── Poller ────────────────────────────────────────────────────────────────────

/// Runs probes against a [`PollConfig`], reporting through an injected
/// [`Logger`].
pub struct Poller {
    config: PollConfig,
    logger: Arc<dyn Logger>,
}

impl Poller {
    pub fn new(config: PollConfig, logger: Arc<dyn Logger>) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll `probe` until success, deadline, probe failure or `signal`.
    ///
    /// `probe.check()` runs on this task between timer wakeups; a check that
    /// blocks delays both the deadline and the stop signal by as long as it
    /// blocks.
    ///
    /// # Errors
    /// * [`PollError::InvalidConfig`] before any probing if the config fails
    ///   [`PollConfig::validate`].
    /// * [`PollError::TimedOut`] when the deadline passes with no success.
    /// * [`PollError::ProbeFailed`] as soon as a probe returns an error.
    /// * [`PollError::Cancelled`] when `signal` fires first.
    pub async fn run<P>(&self, probe: &mut P, signal: &ShutdownSignal) -> Result<PollReport, PollError>
    where
        P: Probe + ?Sized,
    {
        self.config.validate()?;
        let PollConfig {
            recheck_interval,
            deadline,
            policy,
        } = self.config.clone();

        if recheck_interval >= deadline {
            self.logger.warn(&format!(
                "recheck interval {recheck_interval:?} is not shorter than deadline {deadline:?}; \
                 the probe will never run"
            ));
        }

        let started = Instant::now();
        let mut run = PollRun::new(started);
        let mut signal = signal.clone();

        let timeout = sleep_until(instant_after(started, deadline));
        tokio::pin!(timeout);

        let mut ticker = interval_at(instant_after(started, recheck_interval), recheck_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.logger.debug(&format!(
            "polling every {recheck_interval:?} for up to {deadline:?} ({policy})"
        ));

        loop {
            tokio::select! {
                biased;

                () = signal.wait() => {
                    let report = run.finish(PollState::Cancelled);
                    self.logger.warn(&format!(
                        "polling cancelled after {} attempt(s)",
                        report.attempts
                    ));
                    return Err(PollError::Cancelled { attempts: report.attempts });
                }

                () = &mut timeout => {
                    if run.successes > 0 {
                        let report = run.finish(PollState::Succeeded);
                        self.logger.info(&format!(
                            "deadline reached with {} success(es) in {} attempt(s)",
                            report.successes, report.attempts
                        ));
                        return Ok(report);
                    }
                    let report = run.finish(PollState::TimedOut);
                    self.logger.warn(&format!(
                        "timed out after {deadline:?} ({} attempt(s))",
                        report.attempts
                    ));
                    return Err(PollError::TimedOut { deadline, attempts: report.attempts });
                }

                _ = ticker.tick() => {
                    run.next_attempt();
                    match probe.check() {
                        Ok(true) => {
                            run.record_success();
                            match policy {
                                SuccessPolicy::StopOnSuccess => {
                                    let report = run.finish(PollState::Succeeded);
                                    self.logger.info(&format!(
                                        "probe succeeded on attempt {}",
                                        report.attempts
                                    ));
                                    return Ok(report);
                                }
                                SuccessPolicy::LogAndContinue => {
                                    self.logger.info(&format!(
                                        "probe succeeded on attempt {}, continuing until deadline",
                                        run.attempts
                                    ));
                                }
                            }
                        }
                        Ok(false) => {
                            self.logger.debug(&format!("attempt {}: not ready, continue", run.attempts));
                        }
                        Err(source) => {
                            let report = run.finish(PollState::ProbeFailed);
                            self.logger.error(&format!(
                                "probe failed on attempt {}: {source}",
                                report.attempts
                            ));
                            return Err(PollError::ProbeFailed { attempt: report.attempts, source });
                        }
                    }
                }
            }
        }
    }

    /// Run the loop on its own tokio task so the caller does not block.
    pub fn spawn<P>(self, mut probe: P, signal: ShutdownSignal) -> JoinHandle<Result<PollReport, PollError>>
    where
        P: Probe + 'static,
    {
        tokio::spawn(async move { self.run(&mut probe, &signal).await })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
