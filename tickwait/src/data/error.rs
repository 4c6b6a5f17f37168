/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use thiserror::Error;

/// Errors returned by [`PersonStore`](super::PersonStore) lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// No record matched the query.  Propagated as-is, never retried.
    #[error("person {id} not found")]
    NotFound { id: u64 },
}
