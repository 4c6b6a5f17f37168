/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Logger capability and process-wide subscriber setup.
//!
//! Components that report progress to a human (the poll loop, the server)
//! take an `Arc<dyn Logger>` at construction instead of reaching for a
//! global.  `main` hands out a [`TracingLogger`]; tests hand out a
//! [`MemoryLogger`] and inspect what was written.

use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

// ── Level ─────────────────────────────────────────────────────────────────────

/// Severity of a message written through a [`Logger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

// ── Logger trait ──────────────────────────────────────────────────────────────

/// Sink for human-readable messages.
///
/// Implementors only provide [`log`](Logger::log); the per-level helpers
/// forward to it.  Logging never fails from the caller's point of view.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

// ── TracingLogger ─────────────────────────────────────────────────────────────

/// Default logger: forwards every message to the `tracing` subscriber under
/// a fixed `component` field.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    /// Shared handle suitable for injection.
    pub fn shared(component: &'static str) -> Arc<dyn Logger> {
        Arc::new(Self::new(component))
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("tickwait")
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!(component = self.component, "{message}"),
            LogLevel::Info => info!(component = self.component, "{message}"),
            LogLevel::Warn => warn!(component = self.component, "{message}"),
            LogLevel::Error => error!(component = self.component, "{message}"),
        }
    }
}

// ── MemoryLogger ──────────────────────────────────────────────────────────────

/// Captures messages in memory, one `"[LEVEL] message"` line each.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, formatted `"[LEVEL] message"`.
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|(level, msg)| format!("[{level}] {msg}"))
            .collect()
    }

    /// Snapshot of the raw `(level, message)` pairs.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        match self.lines.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of messages logged at exactly `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries().iter().filter(|(l, _)| *l == level).count()
    }

    /// `true` if any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let mut guard = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((level, message.to_string()));
    }
}

// ── Subscriber setup ──────────────────────────────────────────────────────────

/// Install the global `tracing` subscriber.
///
/// Level is controlled by the `RUST_LOG` env-var (e.g. `RUST_LOG=debug`);
/// `default_filter` applies when it is unset or unparsable.  Calling this a
/// second time is a no-op.
pub fn init_subscriber(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_helpers_forward_to_log() {
        let logger = MemoryLogger::new();
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");

        assert_eq!(
            logger.lines(),
            vec!["[DEBUG] d", "[INFO] i", "[WARN] w", "[ERROR] e"]
        );
    }

    #[test]
    fn count_and_contains() {
        let logger = MemoryLogger::new();
        logger.info("probe succeeded on attempt 2");
        logger.info("continue");
        logger.warn("deadline elapsed");

        assert_eq!(logger.count(LogLevel::Info), 2);
        assert_eq!(logger.count(LogLevel::Error), 0);
        assert!(logger.contains("attempt 2"));
        assert!(!logger.contains("cancelled"));
    }

    #[test]
    fn usable_as_trait_object() {
        let mem = Arc::new(MemoryLogger::new());
        let shared: Arc<dyn Logger> = mem.clone();
        shared.info("through the trait");
        assert!(mem.contains("through the trait"));
    }

    #[test]
    fn tracing_logger_does_not_panic_without_subscriber() {
        let logger = TracingLogger::default();
        logger.info("no subscriber installed");
        logger.error("still fine");
    }

    #[test]
    fn init_subscriber_twice_is_harmless() {
        init_subscriber("warn");
        init_subscriber("debug");
    }
}
