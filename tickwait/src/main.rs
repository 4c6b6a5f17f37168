/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use tickwait::config::{AppConfig, ConfigManager};
use tickwait::data::InMemoryPersonStore;
use tickwait::distance::{EditDistance, EmptyInputPolicy};
use tickwait::logging::{init_subscriber, TracingLogger};
use tickwait::poll::{PollConfig, Poller, RandomProbe, SuccessPolicy};
use tickwait::server::Server;
use tickwait::shutdown::{Shutdown, ShutdownSignal};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Edit distance, probe polling and a minimal REST service.
///
/// Example:
///   tickwait distance kitten sitting
///   tickwait poll -i 200 -d 1200 -n 3
///   tickwait -c tickwait.yaml serve
#[derive(Debug, Parser)]
#[command(
    name = "tickwait",
    about = "Edit distance, probe polling and a minimal REST service",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the edit distance between two strings.
    Distance {
        a: String,
        b: String,

        /// Report 0 when either string is empty.
        #[arg(long = "zero-on-empty", default_value_t = false)]
        zero_on_empty: bool,
    },

    /// Poll a random probe until it succeeds or the deadline passes.
    Poll {
        /// Wait between probes, in milliseconds.
        #[arg(short = 'i', long = "interval-ms")]
        interval_ms: Option<u64>,

        /// Overall deadline, in milliseconds.
        #[arg(short = 'd', long = "deadline-ms")]
        deadline_ms: Option<u64>,

        /// The probe succeeds with probability 1/N.
        #[arg(short = 'n', long = "one-in", default_value_t = 3)]
        one_in: u32,

        /// Keep probing after a success until the deadline.
        #[arg(long = "log-and-continue", default_value_t = false)]
        log_and_continue: bool,
    },

    /// Serve the REST API until Ctrl-C.
    Serve {
        /// Override the configured listen address.
        #[arg(short = 'l', long = "listen")]
        listen: Option<String>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    init_subscriber("info");

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let outcome = match cli.command {
        Command::Distance {
            a,
            b,
            zero_on_empty,
        } => {
            let policy = if zero_on_empty {
                EmptyInputPolicy::ZeroOnEmpty
            } else {
                config.empty_input_policy
            };
            println!("{}", EditDistance::new(policy).distance_str(&a, &b));
            Ok(())
        }

        Command::Poll {
            interval_ms,
            deadline_ms,
            one_in,
            log_and_continue,
        } => {
            let poll = poll_config(&config, interval_ms, deadline_ms, log_and_continue);
            run_poll(poll, one_in).await
        }

        Command::Serve { listen } => {
            let addr = listen.unwrap_or_else(|| config.listen_address.clone());
            run_server(&addr, config).await
        }
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        process::exit(1);
    }
}

/// Load the configuration file if one was given; defaults otherwise.
fn load_config(path: Option<&std::path::Path>) -> AppConfig {
    let mut manager = ConfigManager::new();
    match path {
        Some(path) => {
            if let Err(e) = manager.load_from_file(path) {
                error!("Failed to load configuration: {:#}", e);
                process::exit(1);
            }
        }
        None => {
            warn!("No configuration file provided, using defaults");
        }
    }
    manager.into_config()
}

/// Command-line flags override the configured poll settings.
fn poll_config(
    config: &AppConfig,
    interval_ms: Option<u64>,
    deadline_ms: Option<u64>,
    log_and_continue: bool,
) -> PollConfig {
    let mut poll = config.poll.clone();
    if let Some(ms) = interval_ms {
        poll.recheck_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = deadline_ms {
        poll.deadline = Duration::from_millis(ms);
    }
    if log_and_continue {
        poll.policy = SuccessPolicy::LogAndContinue;
    }
    poll
}

/// Raise `shutdown` on Ctrl-C and hand back a waiter for it.
fn stop_on_ctrl_c(shutdown: Shutdown) -> ShutdownSignal {
    let signal = shutdown.signal();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping");
                shutdown.trigger();
            }
            Err(e) => warn!("Cannot listen for Ctrl-C: {}", e),
        }
    });
    signal
}

async fn run_poll(poll: PollConfig, one_in: u32) -> anyhow::Result<()> {
    info!(
        recheck_interval = ?poll.recheck_interval,
        deadline = ?poll.deadline,
        policy = %poll.policy,
        one_in,
        "Polling"
    );

    let signal = stop_on_ctrl_c(Shutdown::new());
    let poller = Poller::new(poll, TracingLogger::shared("poll"));
    let report = poller.run(&mut RandomProbe::one_in(one_in), &signal).await?;

    info!(
        attempts = report.attempts,
        successes = report.successes,
        elapsed = ?report.elapsed,
        "Condition met"
    );
    Ok(())
}

async fn run_server(addr: &str, config: AppConfig) -> anyhow::Result<()> {
    let store = Arc::new(InMemoryPersonStore::with_people(config.people));
    info!("Seeded {} person record(s)", store.len());

    let server = Server::bind(addr, store, TracingLogger::shared("rest")).await?;
    let signal = stop_on_ctrl_c(Shutdown::new());
    server.listen(signal).await?;
    Ok(())
}
