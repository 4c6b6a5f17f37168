/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Stop signal shared by the poll loop and the server.
//!
//! A [`Shutdown`] is the trigger side; any number of [`ShutdownSignal`]s
//! wait on it.  The signal is level-triggered: once triggered it stays
//! triggered, so a waiter that arrives late still returns immediately.

use tokio::sync::watch;

/// Trigger side of the stop signal.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Waiter side of the stop signal.  Cheap to clone.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// New waiter bound to this trigger.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Raise the signal.  Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// A signal that never fires, for callers with nothing to cancel.
    pub fn never() -> Self {
        // `wait` treats a closed channel as "never fires"
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the signal has been raised.
    ///
    /// If the trigger side is dropped without firing, this never resolves.
    pub async fn wait(&mut self) {
        let fired = self.rx.wait_for(|stopped| *stopped).await.map(|_| ());
        if fired.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
