//! Levenshtein edit distance.
//!
//! The distance between two sequences is the minimum number of single-token
//! insertions, deletions and substitutions that turn one into the other.
//! Computation is the classic `O(m·n)` dynamic program; see [`table`] for
//! the grid itself and for the `O(min(m, n))` rolling-row variant.
//!
//! # Empty inputs
//!
//! | Policy | `("", "abc")` | `("abc", "")` | `("", "")` |
//! |---|---|---|---|
//! | [`EmptyInputPolicy::Standard`] (default) | 3 | 3 | 0 |
//! | [`EmptyInputPolicy::ZeroOnEmpty`] | 0 | 0 | 0 |
//!
//! `ZeroOnEmpty` exists for callers that depend on the legacy short-circuit
//! where an empty side means "nothing to compare".  It breaks the
//! `d(A, B) >= |len A - len B|` lower bound, so prefer `Standard`.

pub mod table;

use serde::Deserialize;
use tracing::trace;

pub use table::{rolling_distance, DistanceTable};

// ── Empty-input policy ────────────────────────────────────────────────────────

/// What the distance is when either input is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInputPolicy {
    /// The length of the other sequence (the textbook definition).
    #[default]
    Standard,
    /// Zero whenever either side is empty.
    ZeroOnEmpty,
}

impl std::fmt::Display for EmptyInputPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyInputPolicy::Standard => write!(f, "standard"),
            EmptyInputPolicy::ZeroOnEmpty => write!(f, "zero_on_empty"),
        }
    }
}

// ── EditDistance ──────────────────────────────────────────────────────────────

/// Edit-distance calculator bound to an [`EmptyInputPolicy`].
///
/// Stateless apart from the policy, so one instance can be shared freely
/// across threads; every call allocates its own table.
///
/// # Example
/// ```rust
/// use tickwait::distance::{EditDistance, EmptyInputPolicy};
///
/// let ed = EditDistance::default();
/// assert_eq!(ed.distance_str("kitten", "sitting"), 3);
///
/// let legacy = EditDistance::new(EmptyInputPolicy::ZeroOnEmpty);
/// assert_eq!(legacy.distance_str("", "abc"), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistance {
    policy: EmptyInputPolicy,
}

impl EditDistance {
    pub fn new(policy: EmptyInputPolicy) -> Self {
        Self { policy }
    }

    /// The policy this calculator applies to empty inputs.
    pub fn policy(&self) -> EmptyInputPolicy {
        self.policy
    }

    /// Edit distance between two token slices.
    pub fn distance<T: PartialEq>(&self, a: &[T], b: &[T]) -> usize {
        trace!(len_a = a.len(), len_b = b.len(), policy = %self.policy, "edit distance");

        if self.policy == EmptyInputPolicy::ZeroOnEmpty && (a.is_empty() || b.is_empty()) {
            return 0;
        }
        rolling_distance(a, b)
    }

    /// Edit distance between two strings, compared by Unicode scalar value
    /// rather than by byte.
    pub fn distance_str(&self, a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        self.distance(&a, &b)
    }
}

/// Edit distance between two token slices under the standard policy.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    EditDistance::default().distance(a, b)
}

/// Edit distance between two strings under the standard policy.
pub fn edit_distance_str(a: &str, b: &str) -> usize {
    EditDistance::default().distance_str(a, b)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_pairs() {
        assert_eq!(edit_distance_str("kitten", "sitting"), 3);
        assert_eq!(edit_distance_str("flaw", "lawn"), 2);
        assert_eq!(edit_distance_str("horse", "ros"), 3);
    }

    #[test]
    fn standard_policy_empty_inputs() {
        assert_eq!(edit_distance_str("", "abc"), 3);
        assert_eq!(edit_distance_str("abc", ""), 3);
        assert_eq!(edit_distance_str("", ""), 0);
    }

    #[test]
    fn zero_on_empty_policy_short_circuits() {
        let ed = EditDistance::new(EmptyInputPolicy::ZeroOnEmpty);
        assert_eq!(ed.distance_str("", "abc"), 0);
        assert_eq!(ed.distance_str("abc", ""), 0);
        assert_eq!(ed.distance_str("", ""), 0);
        // non-empty inputs are unaffected
        assert_eq!(ed.distance_str("kitten", "sitting"), 3);
    }

    #[test]
    fn multibyte_chars_count_once() {
        // 'é' is two bytes in UTF-8 but one edit
        assert_eq!(edit_distance_str("cafe", "café"), 1);
        assert_eq!(edit_distance_str("naïve", "naive"), 1);
    }

    #[test]
    fn policy_deserializes_from_snake_case() {
        let p: EmptyInputPolicy = serde_yaml::from_str("zero_on_empty").unwrap();
        assert_eq!(p, EmptyInputPolicy::ZeroOnEmpty);
        let p: EmptyInputPolicy = serde_yaml::from_str("standard").unwrap();
        assert_eq!(p, EmptyInputPolicy::Standard);
    }

    // ── Properties ────────────────────────────────────────────────────────────

    fn word() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-d]{0,12}").unwrap()
    }

    proptest! {
        #[test]
        fn symmetric(a in word(), b in word()) {
            prop_assert_eq!(edit_distance_str(&a, &b), edit_distance_str(&b, &a));
        }

        #[test]
        fn identity_is_zero(a in word()) {
            prop_assert_eq!(edit_distance_str(&a, &a), 0);
        }

        #[test]
        fn bounded_by_longer_and_by_length_gap(a in word(), b in word()) {
            let (la, lb) = (a.chars().count(), b.chars().count());
            let d = edit_distance_str(&a, &b);
            prop_assert!(d <= la.max(lb));
            prop_assert!(d >= la.abs_diff(lb));
        }

        #[test]
        fn rolling_row_equals_full_table(a in word(), b in word()) {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            prop_assert_eq!(rolling_distance(&a, &b), DistanceTable::build(&a, &b).distance());
        }
    }
}
