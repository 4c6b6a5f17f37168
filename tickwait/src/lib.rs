/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! tickwait – edit distance and deadline-bounded probe polling
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── distance/   – Levenshtein distance, full table + rolling row
//! ├── poll/       – probe loop with interval, deadline and stop signal
//! ├── shutdown    – level-triggered stop signal
//! ├── logging/    – injected Logger capability, subscriber setup
//! ├── config/     – YAML application configuration
//! ├── data/       – person lookup by id
//! └── server/     – REST bootstrap (bind, serve, stop)
//! ```
//!
//! `distance` and `poll` are independent of each other and of the service
//! shell around them.

pub mod config;
pub mod data;
pub mod distance;
pub mod logging;
pub mod poll;
pub mod server;
pub mod shutdown;
