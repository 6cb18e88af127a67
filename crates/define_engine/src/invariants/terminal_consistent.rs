//! Terminal consistency invariant: completion flags and end time agree.

use super::Invariant;
use crate::session::GameSession;

/// Invariant: the end time is present exactly when the session is complete,
/// never precedes the start time, and a session cannot be won while active.
pub struct TerminalConsistentInvariant;

impl Invariant<GameSession> for TerminalConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        if session.end_time().is_some() != session.is_complete() {
            return false;
        }

        if !session.is_complete() && session.is_won() {
            return false;
        }

        match session.end_time() {
            Some(end) => end >= session.start_time(),
            None => true,
        }
    }

    fn description() -> &'static str {
        "End time is set exactly at completion and won implies complete"
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
    fn test_active_session_holds() {
        let mut session = session();
        assert!(TerminalConsistentInvariant::holds(&session));
        session.process_guess("wrong").unwrap();
        assert!(TerminalConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_won_session_holds() {
        let mut session = session();
        session.process_guess("test").unwrap();
        assert!(TerminalConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_lost_session_holds() {
        let mut session = session();
        for guess in ["q1", "q2", "q3", "q4", "q5", "q6"] {
            session.process_guess(guess).unwrap();
        }
        assert!(TerminalConsistentInvariant::holds(&session));
    }
}
