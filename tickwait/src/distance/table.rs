/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The dynamic-programming grid behind the edit distance, plus a
//! rolling-row variant that keeps only two rows alive.
//!
//! These are free of any policy: an empty input always costs the length of
//! the other input here.  The empty-input policy lives one level up in
//! [`EditDistance`](super::EditDistance).

// ── DistanceTable ─────────────────────────────────────────────────────────────

/// Full `(m + 1) × (n + 1)` edit-distance grid for one pair of sequences.
///
/// `get(i, j)` is the cost of turning the first `i` tokens of A into the
/// first `j` tokens of B.  The grid is stored row-major in a single `Vec` so
/// one allocation serves the whole computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    cells: Vec<usize>,
    rows: usize,
    cols: usize,
}

impl DistanceTable {
    /// Fill the grid for `a` → `b`.
    ///
    /// Base cases: `table[i][0] = i` (i deletions) and `table[0][j] = j`
    /// (j insertions).  Every other cell is either copied diagonally on a
    /// match or `1 + min(substitute, insert, delete)`.
    pub fn build<T: PartialEq>(a: &[T], b: &[T]) -> Self {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut cells = vec![0usize; rows * cols];

        for i in 0..rows {
            cells[i * cols] = i;
        }
        for j in 0..cols {
            cells[j] = j;
        }

        for i in 1..rows {
            for j in 1..cols {
                let diag = cells[(i - 1) * cols + (j - 1)];
                cells[i * cols + j] = if a[i - 1] == b[j - 1] {
                    diag
                } else {
                    let left = cells[i * cols + (j - 1)];
                    let up = cells[(i - 1) * cols + j];
                    1 + min3(diag, left, up)
                };
            }
        }

        Self { cells, rows, cols }
    }

    /// Cell `(i, j)`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        if i < self.rows && j < self.cols {
            Some(self.cells[i * self.cols + j])
        } else {
            None
        }
    }

    /// Number of rows, `|A| + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `|B| + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The bottom-right cell: the edit distance of the full sequences.
    pub fn distance(&self) -> usize {
        // rows and cols are both >= 1, so the grid is never empty
        self.cells[self.cells.len() - 1]
    }
}

// ── Rolling row ───────────────────────────────────────────────────────────────

/// Same result as [`DistanceTable::build`]`(a, b).distance()` using
/// `O(min(m, n))` memory.
///
/// The shorter sequence is laid along the row so the working buffer is as
/// small as possible.  Edit distance is symmetric, so swapping the inputs
/// does not change the answer.
pub fn rolling_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (i, lt) in long.iter().enumerate() {
        // `diag` holds table[i][j - 1] of the previous row as we sweep
        let mut diag = row[0];
        row[0] = i + 1;

        for (j, st) in short.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if lt == st {
                diag
            } else {
                1 + min3(diag, row[j], up)
            };
            diag = up;
        }
    }

    row[short.len()]
}

fn min3(a: usize, b: usize, c: usize) -> usize {
    a.min(b).min(c)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
