//! Monotonic reveal invariant: clues only accumulate, in canonical order.

use super::Invariant;
use crate::clues::REVEAL_ORDER;
use crate::session::GameSession;
use crate::word::ClueType;

/// Invariant: revealed clues start at the definition and grow by at most one
/// per losing guess, without duplicates, following the canonical order.
///
/// The revealed list is reconstructed from the attempt history and compared
/// to the session's actual list.
pub struct MonotonicRevealInvariant;

impl Invariant<GameSession> for MonotonicRevealInvariant {
    fn holds(session: &GameSession) -> bool {
        let revealed = session.revealed_clues();

        if revealed.first() != Some(&ClueType::D) {
            return false;
        }

        // Reconstruct from history: one reveal per losing attempt, capped at
        // the full canonical sequence.
        let losing_attempts = session
            .attempts()
            .len()
            .saturating_sub(usize::from(session.is_won()));
        let expected_len = (1 + losing_attempts).min(REVEAL_ORDER.len());

        revealed.len() == expected_len && revealed == &REVEAL_ORDER[..expected_len]
    }

    fn description() -> &'static str {
        "Revealed clues accumulate in canonical order, one per losing guess"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Word;

    fn session() -> GameSession {
        let word = Word::new("w1", "echo", "a reflected sound").unwrap();
        GameSession::new("s1".to_string(), word).unwrap()
    }

    #[test]
    fn test_new_session_holds() {
        assert!(MonotonicRevealInvariant::holds(&session()));
    }

    #[test]
    fn test_holds_per_losing_guess() {
        let mut session = session();
        for guess in ["q1", "q2", "q3"] {
            session.process_guess(guess).unwrap();
            assert!(MonotonicRevealInvariant::holds(&session));
        }
    }

    #[test]
    fn test_holds_after_win_mid_game() {
        let mut session = session();
        session.process_guess("wrong").unwrap();
        session.process_guess("echo").unwrap();
        // Two attempts, one losing: definition plus one revealed clue.
        assert!(MonotonicRevealInvariant::holds(&session));
        assert_eq!(session.revealed_clues().len(), 2);
    }

    #[test]
    fn test_holds_after_full_loss() {
        let mut session = session();
        for guess in ["q1", "q2", "q3", "q4", "q5", "q6"] {
            session.process_guess(guess).unwrap();
        }
        assert!(MonotonicRevealInvariant::holds(&session));
        assert_eq!(session.revealed_clues().len(), REVEAL_ORDER.len());
    }
}
