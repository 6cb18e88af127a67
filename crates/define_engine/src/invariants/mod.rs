//! First-class invariants for DEFINE game sessions.
//!
//! Invariants are logical properties that must hold throughout a session's
//! life. They are testable independently and serve as documentation of the
//! guarantees the state machine provides; the state machine checks them in
//! debug builds after every transition.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples, enabling composition of
/// multiple invariants into a single verification step.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns `Ok(())` if all invariants hold, or `Err` with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

// Implement InvariantSet for 3-tuples
impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// Implement InvariantSet for 2-tuples
impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod attempt_bound;
pub mod monotonic_reveal;
pub mod terminal_consistent;

pub use attempt_bound::AttemptBoundInvariant;
pub use monotonic_reveal::MonotonicRevealInvariant;
pub use terminal_consistent::TerminalConsistentInvariant;

/// All session invariants as a composable set.
pub type SessionInvariants = (
    AttemptBoundInvariant,
    MonotonicRevealInvariant,
    TerminalConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameSession, Word};

    fn session() -> GameSession {
        let word = Word::new("w1", "lexicon", "the vocabulary of a language").unwrap();
        GameSession::new("s1".to_string(), word).unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_new_session() {
        let session = session();
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_across_guesses() {
        let mut session = session();
        for guess in ["lex", "lexical", "wrong", "lexicon"] {
            session.process_guess(guess).unwrap();
            assert!(SessionInvariants::check_all(&session).is_ok());
        }
    }

    #[test]
    fn test_invariant_set_holds_through_loss() {
        let mut session = session();
        for guess in ["a1", "b2", "c3", "d4", "e5", "f6"] {
            session.process_guess(guess).unwrap();
        }
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        let session = session();

        type TwoInvariants = (AttemptBoundInvariant, TerminalConsistentInvariant);
        assert!(TwoInvariants::check_all(&session).is_ok());
    }
}
