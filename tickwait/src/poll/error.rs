/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the poll loop.
//!
//! Every non-success terminal state of [`Poller::run`](super::Poller::run)
//! has its own variant so callers can tell "the condition never held" apart
//! from "the probe itself broke" and "somebody asked us to stop":
//!
//! | Variant | Terminal state | Retry? |
//! |---|---|---|
//! | `TimedOut` | `TimedOut` | caller may re-run the whole poll |
//! | `ProbeFailed` | `ProbeFailed` | no, fix the probe |
//! | `Cancelled` | `Cancelled` | no |
//! | `InvalidConfig` | never started | no |

use std::time::Duration;

use thiserror::Error;

/// Failure reported by a fallible probe.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProbeError {
    message: String,
}

impl ProbeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Top-level error returned by [`Poller::run`](super::Poller::run).
#[derive(Debug, Error)]
pub enum PollError {
    /// The deadline elapsed before any probe succeeded.
    #[error("timed out after {deadline:?} ({attempts} probe attempt(s), none succeeded)")]
    TimedOut { deadline: Duration, attempts: u32 },

    /// A fallible probe returned an error on attempt `attempt`.
    #[error("probe failed on attempt {attempt}: {source}")]
    ProbeFailed {
        attempt: u32,
        #[source]
        source: ProbeError,
    },

    /// The stop signal fired while polling.
    #[error("polling cancelled after {attempts} probe attempt(s)")]
    Cancelled { attempts: u32 },

    /// The poll configuration cannot be run.
    #[error("invalid poll configuration: {0}")]
    InvalidConfig(String),
}

impl PollError {
    /// `true` for [`PollError::TimedOut`], the only variant a caller would
    /// sensibly retry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PollError::TimedOut { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = PollError::TimedOut {
            deadline: Duration::from_millis(1200),
            attempts: 6,
        };
        assert_eq!(
            e.to_string(),
            "timed out after 1.2s (6 probe attempt(s), none succeeded)"
        );
        assert!(e.is_timeout());

        let e = PollError::ProbeFailed {
            attempt: 3,
            source: ProbeError::new("connection refused"),
        };
        assert_eq!(e.to_string(), "probe failed on attempt 3: connection refused");
        assert!(!e.is_timeout());
    }

    #[test]
    fn probe_failed_exposes_source() {
        use std::error::Error as _;
        let e = PollError::ProbeFailed {
            attempt: 1,
            source: ProbeError::new("boom"),
        };
        assert_eq!(e.source().map(|s| s.to_string()), Some("boom".to_string()));
    }
}
