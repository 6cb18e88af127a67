//! Tests for the game orchestration service.

use define_engine::{ClueType, Word};
use define_server::{
    CompletedGame, GameService, MemorySessionStore, ServiceError, SessionStore, SinkError,
    StatsSink, WordSource, WordSourceError,
};
use std::sync::{Arc, Mutex};

/// Word source that always serves the same word.
struct FixedWordSource {
    word: Word,
}

impl FixedWordSource {
    fn new(word: Word) -> Self {
        Self { word }
    }
}

impl WordSource for FixedWordSource {
    fn next_word(&self) -> Result<Word, WordSourceError> {
        Ok(self.word.clone())
    }

    fn word_by_id(&self, word_id: &str) -> Result<Option<Word>, WordSourceError> {
        Ok((self.word.id() == word_id).then(|| self.word.clone()))
    }
}

/// Sink that remembers every recorded game.
#[derive(Default)]
struct RecordingSink {
    games: Mutex<Vec<CompletedGame>>,
}

impl RecordingSink {
    fn recorded(&self) -> Vec<CompletedGame> {
        self.games.lock().unwrap().clone()
    }
}

impl StatsSink for RecordingSink {
    fn record(&self, game: &CompletedGame) -> Result<(), SinkError> {
        self.games.lock().unwrap().push(game.clone());
        Ok(())
    }
}

/// Sink that always fails.
struct FailingSink;

impl StatsSink for FailingSink {
    fn record(&self, _game: &CompletedGame) -> Result<(), SinkError> {
        Err(SinkError::Db(define_server::DbError::new("sink down")))
    }
}

fn target_word() -> Word {
    Word::new("w1", "lexicon", "the vocabulary of a language")
        .unwrap()
        .with_etymology("from Greek lexikon")
        .with_sentence("Their lexicon grew with every trip.")
        .with_equivalents(vec!["vocabulary".to_string()])
}

fn service_with_sink(sink: Arc<dyn StatsSink>) -> (GameService, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let words = Arc::new(FixedWordSource::new(target_word()));
    let service = GameService::new(store.clone(), words, sink);
    (service, store)
}

#[test]
fn test_create_session_reveals_definition_only() {
    let (service, store) = service_with_sink(Arc::new(RecordingSink::default()));

    let view = service.create_session(None, None).expect("Create failed");
    assert_eq!(view.revealed.len(), 1);
    assert_eq!(view.revealed[0].clue, ClueType::D);
    assert_eq!(view.remaining_guesses, 6);
    assert!(!view.is_complete);
    assert!(view.revealed_word.is_none(), "Live session must hide the word");

    // The snapshot is persisted under the returned id.
    assert!(store.get(&view.session_id).unwrap().is_some());
}

#[test]
fn test_create_session_by_word_id() {
    let (service, _store) = service_with_sink(Arc::new(RecordingSink::default()));

    let view = service
        .create_session(Some("w1"), None)
        .expect("Create failed");
    assert!(!view.session_id.is_empty());

    let err = service.create_session(Some("nope"), None).unwrap_err();
    assert!(matches!(err, ServiceError::UnknownWord { .. }));
}

#[test]
fn test_guess_on_unknown_session() {
    let (service, _store) = service_with_sink(Arc::new(RecordingSink::default()));
    let err = service.process_guess("missing", "lexicon").unwrap_err();
    assert!(matches!(err, ServiceError::SessionNotFound { .. }));
}

#[test]
fn test_win_records_outcome_with_username() {
    let sink = Arc::new(RecordingSink::default());
    let (service, _store) = service_with_sink(sink.clone());

    let view = service
        .create_session(None, Some("alice".to_string()))
        .expect("Create failed");

    let guess = service
        .process_guess(&view.session_id, "wrong")
        .expect("Guess failed");
    assert!(!guess.outcome.is_correct);
    assert!(sink.recorded().is_empty(), "No record before completion");

    let guess = service
        .process_guess(&view.session_id, "LEXICON")
        .expect("Guess failed");
    assert!(guess.outcome.is_correct);
    assert!(guess.outcome.game_over);
    assert_eq!(guess.session.revealed_word.as_deref(), Some("lexicon"));

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].username.as_deref(), Some("alice"));
    assert_eq!(recorded[0].word_id, "w1");
    assert_eq!(recorded[0].attempts_used, 2);
    assert!(recorded[0].won);
}

#[test]
fn test_loss_records_outcome_once() {
    let sink = Arc::new(RecordingSink::default());
    let (service, _store) = service_with_sink(sink.clone());

    let view = service.create_session(None, None).expect("Create failed");
    for guess in ["q1", "q2", "q3", "q4", "q5", "q6"] {
        service
            .process_guess(&view.session_id, guess)
            .expect("Guess failed");
    }

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 1);
    assert!(!recorded[0].won);
    assert_eq!(recorded[0].attempts_used, 6);
}

#[test]
fn test_sink_failure_does_not_fail_the_guess() {
    let (service, _store) = service_with_sink(Arc::new(FailingSink));

    let view = service.create_session(None, None).expect("Create failed");
    let guess = service
        .process_guess(&view.session_id, "lexicon")
        .expect("Guess must succeed despite sink failure");
    assert!(guess.outcome.is_correct);
}

#[test]
fn test_guess_after_completion_is_conflict() {
    let (service, _store) = service_with_sink(Arc::new(RecordingSink::default()));

    let view = service.create_session(None, None).expect("Create failed");
    service
        .process_guess(&view.session_id, "lexicon")
        .expect("Guess failed");

    let err = service.process_guess(&view.session_id, "again").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Game(define_engine::GuessError::SessionAlreadyComplete)
    ));
}

#[test]
fn test_session_view_tracks_progress() {
    let (service, _store) = service_with_sink(Arc::new(RecordingSink::default()));

    let view = service.create_session(None, None).expect("Create failed");
    service
        .process_guess(&view.session_id, "lex")
        .expect("Guess failed");

    let fetched = service.session(&view.session_id).expect("Fetch failed");
    assert_eq!(fetched.attempts, vec!["lex".to_string()]);
    assert_eq!(fetched.revealed.len(), 2);
    assert_eq!(fetched.remaining_guesses, 5);

    let err = service.session("missing").unwrap_err();
    assert!(matches!(err, ServiceError::SessionNotFound { .. }));
}
