//! Clue revelation policy.
//!
//! Clues come out in a fixed canonical order, one per losing guess. The
//! definition is visible from session creation, so a full six-guess loss
//! walks the whole sequence.

use crate::word::ClueType;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Canonical reveal order: D, E, F, I, N, E2.
pub const REVEAL_ORDER: [ClueType; 6] = [
    ClueType::D,
    ClueType::E,
    ClueType::F,
    ClueType::I,
    ClueType::N,
    ClueType::E2,
];

/// Status a revealed clue carries after guesses are judged against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClueMark {
    /// No guess has been judged against this clue yet.
    Neutral,
    /// The winning guess was made while this clue was current.
    Correct,
    /// An incorrect guess was made while this clue was current.
    Incorrect,
    /// A close-but-wrong guess was made while this clue was current.
    Fuzzy,
}

/// Returns the next clue to reveal given the clues already out.
///
/// Walks the canonical order and returns the first clue not yet revealed,
/// or `None` once all six are visible (only reachable on the final guess).
#[instrument]
pub fn next_clue(revealed: &[ClueType]) -> Option<ClueType> {
    REVEAL_ORDER
        .iter()
        .copied()
        .find(|clue| !revealed.contains(clue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reveal_is_definition() {
        assert_eq!(next_clue(&[]), Some(ClueType::D));
    }

    #[test]
    fn test_walks_canonical_order() {
        let mut revealed = vec![ClueType::D];
        let expected = [ClueType::E, ClueType::F, ClueType::I, ClueType::N, ClueType::E2];

        for clue in expected {
            let next = next_clue(&revealed).expect("clue should remain");
            assert_eq!(next, clue);
            revealed.push(next);
        }
    }

    #[test]
    fn test_exhausted_returns_none() {
        assert_eq!(next_clue(&REVEAL_ORDER), None);
    }

    #[test]
    fn test_order_insensitive_to_revealed_ordering() {
        // The policy looks at membership, not the order clues were stored in.
        let revealed = vec![ClueType::F, ClueType::D, ClueType::E];
        assert_eq!(next_clue(&revealed), Some(ClueType::I));
    }
}
