/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Probes: the "has the awaited condition become true yet?" question.

use super::error::ProbeError;

/// A condition the poll loop re-evaluates on every tick.
///
/// Any `FnMut() -> bool` is an infallible probe.  Wrap a closure returning
/// `Result<bool, ProbeError>` in [`FallibleProbe`] when the check itself can
/// break.
pub trait Probe: Send {
    /// Evaluate the condition once.
    ///
    /// Called inline on the polling task, so it must not block: the deadline
    /// and the stop signal are only observed after it returns.  Do slow I/O
    /// elsewhere (e.g. `tokio::task::spawn_blocking` updating a shared flag)
    /// and have `check` read the latest result.
    fn check(&mut self) -> Result<bool, ProbeError>;
}

impl<F> Probe for F
where
    F: FnMut() -> bool + Send,
{
    fn check(&mut self) -> Result<bool, ProbeError> {
        Ok(self())
    }
}

/// Adapter for probes that can fail.
pub struct FallibleProbe<F>(pub F);

impl<F> Probe for FallibleProbe<F>
where
    F: FnMut() -> Result<bool, ProbeError> + Send,
{
    fn check(&mut self) -> Result<bool, ProbeError> {
        (self.0)()
    }
}

/// Succeeds with probability `1 / n` on each check.
///
/// Stand-in for a real readiness check in the `poll` command.
#[derive(Debug, Clone, Copy)]
pub struct RandomProbe {
    one_in: u32,
}

impl RandomProbe {
    /// `n == 0` is treated as `1` (always succeed).
    pub fn one_in(n: u32) -> Self {
        Self { one_in: n.max(1) }
    }

    pub fn odds(&self) -> u32 {
        self.one_in
    }
}

impl Probe for RandomProbe {
    fn check(&mut self) -> Result<bool, ProbeError> {
        Ok(rand::random::<u32>() % self.one_in == 0)
    }
}
