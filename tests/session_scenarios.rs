use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use quiz_practice::clock::Ticker;
use quiz_practice::*;

#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryResultStore>>);

impl ResultStore for SharedStore {
    fn append(&mut self, result: SessionResult) -> Result<()> {
        self.0.borrow_mut().append(result)
    }

    fn list(&self) -> Vec<SessionResult> {
        self.0.borrow().list()
    }
}

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap()
    }

    fn start_ticker(&self, _session: SessionId) -> Ticker {
        Ticker::detached()
    }
}

fn question(id: &str, unit: &str, difficulty: Difficulty) -> Question {
    Question {
        id: id.to_string(),
        prompt: format!("What is {id}?"),
        options: vec!["first".into(), "second".into(), "third".into()],
        correct_index: 1,
        explanation: format!("{id} is the second option"),
        difficulty,
        unit: unit.to_string(),
        topic: "Scenarios".to_string(),
    }
}

fn engine_with(questions: Vec<Question>) -> (SessionEngine, SharedStore) {
    let store = SharedStore::default();
    let engine = SessionEngine::new(
        Arc::new(Catalog::new(questions).unwrap()),
        Box::new(store.clone()),
        Box::new(FixedClock),
        EngineConfig::default(),
    )
    .with_seed(2026);
    (engine, store)
}

fn sample_result(score: u8, minute: u32) -> SessionResult {
    SessionResult {
        score_percent: score,
        total_questions: 4,
        correct_positions: vec![],
        incorrect_positions: vec![0, 1, 2, 3],
        time_spent_seconds: 60,
        completed_at: Utc.with_ymd_and_hms(2026, 10, 1, 12, minute, 0).unwrap(),
    }
}

#[test]
fn filtered_timed_session_uses_matching_questions() {
    let mut questions: Vec<Question> = (0..3)
        .map(|i| question(&format!("easy-{i}"), "Unit I", Difficulty::Easy))
        .collect();
    questions.push(question("hard-0", "Unit I", Difficulty::Hard));
    questions.push(question("other-0", "Unit II", Difficulty::Easy));
    let (mut engine, _) = engine_with(questions);

    engine
        .start(
            Mode::Timed,
            Filter::Only("Unit I".to_string()),
            Filter::Only(Difficulty::Easy),
        )
        .unwrap();

    let config = engine.config().unwrap();
    assert_eq!(config.question_set.len(), 3);
    assert_eq!(config.time_limit_seconds, 1800);
    let ids: HashSet<&str> = config.question_set.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, HashSet::from(["easy-0", "easy-1", "easy-2"]));
}

#[test]
fn five_question_submit_scores_sixty_percent() {
    let questions = (0..5)
        .map(|i| question(&format!("q{i}"), "Unit I", Difficulty::Medium))
        .collect();
    let (mut engine, store) = engine_with(questions);
    engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

    for position in 0..5 {
        engine.jump_to(position).unwrap();
        let answer = if position < 3 { 1 } else { 0 };
        engine.select_answer(answer).unwrap();
    }
    let result = engine.submit().unwrap().clone();

    assert_eq!(result.score_percent, 60);
    assert_eq!(result.correct_count(), 3);
    assert_eq!(result.incorrect_positions, vec![3, 4]);
    assert_eq!(store.list(), vec![result]);
}

#[test]
fn last_tick_auto_submits_without_explicit_submit() {
    let questions = (0..4)
        .map(|i| question(&format!("t{i}"), "Unit III", Difficulty::Easy))
        .collect();
    let (mut engine, store) = engine_with(questions);
    engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

    while engine.snapshot().remaining_seconds > 1 {
        engine.tick().unwrap();
    }
    assert_eq!(engine.phase(), PhaseKind::Running);
    assert!(store.list().is_empty());

    assert_eq!(engine.tick().unwrap(), TickOutcome::TimedOut);

    assert_eq!(engine.phase(), PhaseKind::Finished);
    let stored = store.list();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].time_spent_seconds, 1800);
    assert_eq!(stored[0].score_percent, 0);
}

#[test]
fn eleventh_result_evicts_the_oldest() {
    let mut store = MemoryResultStore::new();
    for minute in 0..10 {
        store.append(sample_result(10, minute)).unwrap();
    }
    let oldest = sample_result(10, 0);

    let newest = sample_result(90, 30);
    store.append(newest.clone()).unwrap();

    let listed = store.list();
    assert_eq!(listed.len(), 10);
    assert!(!listed.contains(&oldest));
    assert_eq!(listed[0], newest);
}

#[test]
fn finished_session_is_read_only_until_reset() {
    let questions = (0..2)
        .map(|i| question(&format!("r{i}"), "Unit IV", Difficulty::Hard))
        .collect();
    let (mut engine, store) = engine_with(questions);
    engine.start(Mode::Practice, Filter::All, Filter::All).unwrap();
    let feedback = engine.select_answer(1).unwrap().unwrap();
    assert!(feedback.is_correct);
    engine.submit().unwrap();

    assert!(matches!(
        engine.select_answer(0),
        Err(QuizError::InvalidTransition { phase: PhaseKind::Finished, .. })
    ));
    let review = engine.review().unwrap();
    assert_eq!(review.len(), 2);

    let mut engine = engine.reset();
    assert_eq!(engine.phase(), PhaseKind::Configuring);
    assert_eq!(engine.history().len(), 1);
    engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();
    engine.submit().unwrap();
    assert_eq!(store.list().len(), 2);
}
