//! Attempt bound invariant: at most six guesses, completion tracks them.

use super::Invariant;
use crate::session::{GameSession, MAX_ATTEMPTS};

/// Invariant: the attempt count never exceeds the maximum, and the session
/// is complete exactly when it was won or the last attempt was used.
pub struct AttemptBoundInvariant;

impl Invariant<GameSession> for AttemptBoundInvariant {
    fn holds(session: &GameSession) -> bool {
        let attempts = session.attempts().len();

        if attempts > MAX_ATTEMPTS {
            return false;
        }

        session.is_complete() == (session.is_won() || attempts == MAX_ATTEMPTS)
    }

    fn description() -> &'static str {
        "Attempt count is bounded and completion tracks win-or-exhaustion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Word;

    fn session() -> GameSession {
        let word = Word::new("w1", "test", "a trial").unwrap();
        GameSession::new("s1".to_string(), word).unwrap()
    }

    #[test]
    fn test_new_session_holds() {
        assert!(AttemptBoundInvariant::holds(&session()));
    }

    #[test]
    fn test_holds_after_win() {
        let mut session = session();
        session.process_guess("test").unwrap();
        assert!(AttemptBoundInvariant::holds(&session));
    }

    #[test]
    fn test_holds_after_exhaustion() {
        let mut session = session();
        for guess in ["q1", "q2", "q3", "q4", "q5", "q6"] {
            session.process_guess(guess).unwrap();
        }
        assert!(AttemptBoundInvariant::holds(&session));
    }
}
