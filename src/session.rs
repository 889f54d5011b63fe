//! The practice-test session engine.
//!
//! One engine drives one attempt: `Configuring -> Running -> Finished`.
//! The countdown timer lives inside the running phase, so leaving that
//! phase by any path (submit, timeout, reset, drop) cancels it.

use std::mem;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::clock::{Clock, Ticker};
use crate::error::{QuizError, Result};
use crate::selector::select_questions;
use crate::store::ResultStore;
use crate::summary::{review_items, rounded_percent, ReviewItem};
use crate::types::*;

/// Engine-wide limits, shared by every session it runs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub max_questions: usize,
    pub timed_limit_secs: u32,
    pub practice_limit_secs: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_questions: MAX_QUESTIONS,
            timed_limit_secs: TIMED_LIMIT_SECS,
            practice_limit_secs: PRACTICE_LIMIT_SECS,
        }
    }
}

impl EngineConfig {
    pub fn time_limit(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Timed => self.timed_limit_secs,
            // Practice is untimed in spirit but still auto-submits at the ceiling.
            Mode::Practice => self.practice_limit_secs,
        }
    }
}

#[derive(Debug)]
struct RunningSession {
    config: SessionConfig,
    current_index: usize,
    answers: Answers,
    remaining_seconds: u32,
    ticker: Ticker,
}

#[derive(Debug)]
struct FinishedSession {
    config: SessionConfig,
    current_index: usize,
    answers: Answers,
    remaining_seconds: u32,
    result: SessionResult,
}

#[derive(Debug)]
enum Phase {
    Configuring,
    Running(RunningSession),
    Finished(FinishedSession),
}

impl Phase {
    fn kind(&self) -> PhaseKind {
        match self {
            Phase::Configuring => PhaseKind::Configuring,
            Phase::Running(_) => PhaseKind::Running,
            Phase::Finished(_) => PhaseKind::Finished,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Submitted,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_seconds: u32 },
    TimedOut,
}

/// Everything the presentation layer needs to draw the current state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot<'a> {
    pub session_id: Option<SessionId>,
    pub phase: PhaseKind,
    pub mode: Option<Mode>,
    pub current_index: usize,
    pub question_set: &'a [Arc<Question>],
    pub answers: &'a Answers,
    pub remaining_seconds: u32,
    pub time_limit_seconds: u32,
    pub result: Option<&'a SessionResult>,
    pub feedback: Option<AnswerFeedback>,
}

impl SessionSnapshot<'_> {
    pub fn current_question(&self) -> Option<&Arc<Question>> {
        self.question_set.get(self.current_index)
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.answers.get(&self.current_index).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

static NO_ANSWERS: Answers = Answers::new();

pub struct SessionEngine {
    catalog: Arc<Catalog>,
    store: Box<dyn ResultStore>,
    clock: Box<dyn Clock>,
    rng: StdRng,
    settings: EngineConfig,
    next_session_id: SessionId,
    phase: Phase,
}

impl SessionEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Box<dyn ResultStore>,
        clock: Box<dyn Clock>,
        settings: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            clock,
            rng: StdRng::from_entropy(),
            settings,
            next_session_id: 1,
            phase: Phase::Configuring,
        }
    }

    /// Replaces the entropy-seeded shuffle source with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn phase(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    /// Past results from the store, newest first.
    pub fn history(&self) -> Vec<SessionResult> {
        self.store.list()
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        match &self.phase {
            Phase::Configuring => None,
            Phase::Running(s) => Some(&s.config),
            Phase::Finished(s) => Some(&s.config),
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.config().map(|c| c.id)
    }

    pub fn result(&self) -> Option<&SessionResult> {
        match &self.phase {
            Phase::Finished(s) => Some(&s.result),
            _ => None,
        }
    }

    /// Per-question breakdown, available once the session is finished.
    pub fn review(&self) -> Option<Vec<ReviewItem>> {
        match &self.phase {
            Phase::Finished(s) => Some(review_items(&s.config.question_set, &s.answers)),
            _ => None,
        }
    }

    /// Practice-mode feedback for the current question, if it was answered.
    pub fn current_feedback(&self) -> Option<AnswerFeedback> {
        let Phase::Running(session) = &self.phase else {
            return None;
        };
        if session.config.mode != Mode::Practice {
            return None;
        }
        let selected = *session.answers.get(&session.current_index)?;
        let question = &session.config.question_set[session.current_index];
        Some(AnswerFeedback::for_answer(session.current_index, question, selected))
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        let feedback = self.current_feedback();
        match &self.phase {
            Phase::Configuring => SessionSnapshot {
                session_id: None,
                phase: PhaseKind::Configuring,
                mode: None,
                current_index: 0,
                question_set: &[],
                answers: &NO_ANSWERS,
                remaining_seconds: 0,
                time_limit_seconds: 0,
                result: None,
                feedback,
            },
            Phase::Running(s) => SessionSnapshot {
                session_id: Some(s.config.id),
                phase: PhaseKind::Running,
                mode: Some(s.config.mode),
                current_index: s.current_index,
                question_set: &s.config.question_set,
                answers: &s.answers,
                remaining_seconds: s.remaining_seconds,
                time_limit_seconds: s.config.time_limit_seconds,
                result: None,
                feedback,
            },
            Phase::Finished(s) => SessionSnapshot {
                session_id: Some(s.config.id),
                phase: PhaseKind::Finished,
                mode: Some(s.config.mode),
                current_index: s.current_index,
                question_set: &s.config.question_set,
                answers: &s.answers,
                remaining_seconds: s.remaining_seconds,
                time_limit_seconds: s.config.time_limit_seconds,
                result: Some(&s.result),
                feedback,
            },
        }
    }

    /// Builds the working set and starts the countdown.
    pub fn start(
        &mut self,
        mode: Mode,
        unit_filter: UnitFilter,
        difficulty_filter: DifficultyFilter,
    ) -> Result<SessionId> {
        if !matches!(self.phase, Phase::Configuring) {
            return Err(rejected("start", self.phase.kind()));
        }

        let question_set = select_questions(
            self.catalog.questions(),
            &unit_filter,
            &difficulty_filter,
            self.settings.max_questions,
            &mut self.rng,
        );
        if question_set.is_empty() {
            warn!(unit = %unit_filter, difficulty = %difficulty_filter, "No questions match filters");
            return Err(QuizError::NoMatchingQuestions {
                unit: unit_filter.to_string(),
                difficulty: difficulty_filter.to_string(),
            });
        }

        let id = self.next_session_id;
        self.next_session_id += 1;
        let time_limit_seconds = self.settings.time_limit(mode);

        info!(
            session = id,
            mode = ?mode,
            unit = %unit_filter,
            difficulty = %difficulty_filter,
            questions = question_set.len(),
            time_limit_seconds,
            "Session started"
        );

        let ticker = self.clock.start_ticker(id);
        self.phase = Phase::Running(RunningSession {
            config: SessionConfig {
                id,
                mode,
                unit_filter,
                difficulty_filter,
                question_set,
                time_limit_seconds,
            },
            current_index: 0,
            answers: Answers::new(),
            remaining_seconds: time_limit_seconds,
            ticker,
        });

        Ok(id)
    }

    /// Records the option for the current question, replacing any earlier
    /// choice. Practice mode returns immediate feedback.
    pub fn select_answer(&mut self, option: usize) -> Result<Option<AnswerFeedback>> {
        let session = self.running_mut("select an answer")?;
        let position = session.current_index;
        let question = Arc::clone(&session.config.question_set[position]);

        if option >= question.options.len() {
            warn!(position, option, len = question.options.len(), "Rejected out-of-range option");
            return Err(QuizError::OptionOutOfRange {
                index: option,
                len: question.options.len(),
            });
        }

        session.answers.insert(position, option);
        debug!(
            session = session.config.id,
            position,
            option,
            answered = session.answers.len(),
            "Answer recorded"
        );

        Ok(match session.config.mode {
            Mode::Practice => Some(AnswerFeedback::for_answer(position, &question, option)),
            Mode::Timed => None,
        })
    }

    pub fn next(&mut self) -> Result<usize> {
        let session = self.running_mut("move to the next question")?;
        let last = session.config.question_set.len() - 1;
        session.current_index = (session.current_index + 1).min(last);
        Ok(session.current_index)
    }

    pub fn previous(&mut self) -> Result<usize> {
        let session = self.running_mut("move to the previous question")?;
        session.current_index = session.current_index.saturating_sub(1);
        Ok(session.current_index)
    }

    /// Moves to `position`, clamped to the question set.
    pub fn jump_to(&mut self, position: usize) -> Result<usize> {
        let session = self.running_mut("jump to a question")?;
        let last = session.config.question_set.len() - 1;
        session.current_index = position.min(last);
        Ok(session.current_index)
    }

    pub fn submit(&mut self) -> Result<&SessionResult> {
        self.running_mut("submit")?;
        Ok(self.finish(FinishReason::Submitted))
    }

    /// Advances the countdown by one second, auto-submitting at zero.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let session = self.running_mut("tick")?;
        session.remaining_seconds = session.remaining_seconds.saturating_sub(1);

        if session.remaining_seconds > 0 {
            return Ok(TickOutcome::Running {
                remaining_seconds: session.remaining_seconds,
            });
        }

        self.finish(FinishReason::TimedOut);
        Ok(TickOutcome::TimedOut)
    }

    /// Applies a tick only if it belongs to the running session.
    pub fn tick_for(&mut self, session: SessionId) -> Result<Option<TickOutcome>> {
        let current = matches!(&self.phase, Phase::Running(running) if running.config.id == session);
        if current {
            return self.tick().map(Some);
        }
        debug!(session, phase = %self.phase.kind(), "Ignoring stale tick");
        Ok(None)
    }

    /// Discards this engine and hands back a fresh one ready to configure.
    pub fn reset(self) -> SessionEngine {
        let SessionEngine {
            catalog,
            store,
            clock,
            rng,
            settings,
            next_session_id,
            phase,
        } = self;

        info!(phase = %phase.kind(), "Session reset");
        drop(phase);

        SessionEngine {
            catalog,
            store,
            clock,
            rng,
            settings,
            next_session_id,
            phase: Phase::Configuring,
        }
    }

    fn running_mut(&mut self, operation: &'static str) -> Result<&mut RunningSession> {
        let phase = self.phase.kind();
        match &mut self.phase {
            Phase::Running(session) => Ok(session),
            _ => Err(rejected(operation, phase)),
        }
    }

    /// Scores the running session and moves it to `Finished`. Callers have
    /// already checked that the session is running.
    fn finish(&mut self, reason: FinishReason) -> &SessionResult {
        let Phase::Running(running) = mem::replace(&mut self.phase, Phase::Configuring) else {
            unreachable!("finish called outside the running phase");
        };
        let RunningSession {
            config,
            current_index,
            answers,
            remaining_seconds,
            ticker,
        } = running;
        drop(ticker);

        let (correct_positions, incorrect_positions) = score_answers(&config.question_set, &answers);
        let total_questions = config.question_set.len();
        let result = SessionResult {
            score_percent: rounded_percent(correct_positions.len(), total_questions),
            total_questions,
            correct_positions,
            incorrect_positions,
            time_spent_seconds: config.time_limit_seconds - remaining_seconds,
            completed_at: self.clock.now(),
        };

        info!(
            session = config.id,
            reason = ?reason,
            score = result.score_percent,
            correct = result.correct_count(),
            total = total_questions,
            time_spent_seconds = result.time_spent_seconds,
            "Session finished"
        );

        if let Err(e) = self.store.append(result.clone()) {
            error!(session = config.id, "Failed to save result: {}", e);
        }

        self.phase = Phase::Finished(FinishedSession {
            config,
            current_index,
            answers,
            remaining_seconds,
            result,
        });

        match &self.phase {
            Phase::Finished(finished) => &finished.result,
            _ => unreachable!(),
        }
    }
}

/// Parses a 1-based question number typed by the user into a position.
pub fn parse_position(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number - 1),
        _ => Err(QuizError::InvalidInput(format!(
            "'{trimmed}' is not a question number"
        ))),
    }
}

fn rejected(operation: &'static str, phase: PhaseKind) -> QuizError {
    warn!(operation, phase = %phase, "Rejected operation");
    QuizError::InvalidTransition { operation, phase }
}

/// Splits positions into correct and incorrect. Unanswered counts as incorrect.
pub fn score_answers(questions: &[Arc<Question>], answers: &Answers) -> (Vec<usize>, Vec<usize>) {
    (0..questions.len()).partition(|position| {
        answers
            .get(position)
            .is_some_and(|&option| questions[*position].is_correct(option))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::store::MemoryResultStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store handle the test keeps a second reference to.
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

    struct FailingStore;

    impl ResultStore for FailingStore {
        fn append(&mut self, _result: SessionResult) -> Result<()> {
            Err(QuizError::Io(std::io::Error::other("disk full")))
        }

        fn list(&self) -> Vec<SessionResult> {
            Vec::new()
        }
    }

    fn question(id: &str, unit: &str, difficulty: Difficulty, correct: usize) -> Question {
        Question {
            id: id.into(),
            prompt: format!("Prompt {id}"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index: correct,
            explanation: format!("Because {id}"),
            difficulty,
            unit: unit.into(),
            topic: "Topic".into(),
        }
    }

    fn catalog_of(count: usize) -> Arc<Catalog> {
        let questions = (0..count)
            .map(|i| question(&format!("c{i}"), "Unit I", Difficulty::Easy, i % 4))
            .collect();
        Arc::new(Catalog::new(questions).unwrap())
    }

    fn engine(catalog: Arc<Catalog>) -> (SessionEngine, ManualClock, SharedStore) {
        let clock = ManualClock::new();
        let store = SharedStore::default();
        let engine = SessionEngine::new(
            catalog,
            Box::new(store.clone()),
            Box::new(clock.clone()),
            EngineConfig::default(),
        )
        .with_seed(42);
        (engine, clock, store)
    }

    fn correct_option_at(engine: &SessionEngine, position: usize) -> usize {
        engine.snapshot().question_set[position].correct_index
    }

    #[test]
    fn start_with_no_matches_is_rejected_without_state_change() {
        let (mut engine, clock, _) = engine(catalog_of(3));

        let err = engine
            .start(Mode::Timed, Filter::Only("Unit IX".into()), Filter::All)
            .unwrap_err();

        assert!(matches!(err, QuizError::NoMatchingQuestions { .. }));
        assert_eq!(engine.phase(), PhaseKind::Configuring);
        assert_eq!(clock.started_tickers(), 0);
    }

    #[test]
    fn start_initializes_running_state() {
        let (mut engine, clock, _) = engine(catalog_of(30));

        engine.start(Mode::Practice, Filter::All, Filter::All).unwrap();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.phase, PhaseKind::Running);
        assert_eq!(snapshot.question_set.len(), MAX_QUESTIONS);
        assert_eq!(snapshot.current_index, 0);
        assert!(snapshot.answers.is_empty());
        assert_eq!(snapshot.remaining_seconds, PRACTICE_LIMIT_SECS);
        assert_eq!(clock.active_tickers(), 1);
    }

    #[test]
    fn mutators_before_start_are_invalid_transitions() {
        let (mut engine, _, _) = engine(catalog_of(3));

        assert!(matches!(engine.next(), Err(QuizError::InvalidTransition { .. })));
        assert!(matches!(engine.select_answer(0), Err(QuizError::InvalidTransition { .. })));
        assert!(matches!(engine.tick(), Err(QuizError::InvalidTransition { .. })));
        assert!(matches!(engine.submit(), Err(QuizError::InvalidTransition { .. })));
    }

    #[test]
    fn second_start_is_rejected_while_running() {
        let (mut engine, clock, _) = engine(catalog_of(3));
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        let err = engine.start(Mode::Practice, Filter::All, Filter::All).unwrap_err();

        assert!(matches!(err, QuizError::InvalidTransition { operation: "start", .. }));
        assert_eq!(clock.active_tickers(), 1);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let (mut engine, _, _) = engine(catalog_of(3));
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        assert_eq!(engine.previous().unwrap(), 0);
        assert_eq!(engine.next().unwrap(), 1);
        assert_eq!(engine.next().unwrap(), 2);
        assert_eq!(engine.next().unwrap(), 2);
        assert_eq!(engine.jump_to(99).unwrap(), 2);
        assert_eq!(engine.jump_to(0).unwrap(), 0);
        assert_eq!(engine.previous().unwrap(), 0);
    }

    #[test]
    fn answers_overwrite_and_reject_out_of_range() {
        let (mut engine, _, _) = engine(catalog_of(3));
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        engine.select_answer(1).unwrap();
        engine.select_answer(3).unwrap();
        let err = engine.select_answer(4).unwrap_err();

        assert!(matches!(err, QuizError::OptionOutOfRange { index: 4, len: 4 }));
        assert_eq!(engine.snapshot().selected_option(), Some(3));
        assert_eq!(engine.snapshot().answered_count(), 1);
    }

    #[test]
    fn practice_mode_gives_immediate_feedback() {
        let (mut engine, _, _) = engine(catalog_of(3));
        engine.start(Mode::Practice, Filter::All, Filter::All).unwrap();
        let correct = correct_option_at(&engine, 0);

        let feedback = engine.select_answer(correct).unwrap().unwrap();
        assert!(feedback.is_correct);
        assert_eq!(feedback.correct_index, correct);
        assert_eq!(engine.snapshot().feedback, Some(feedback));

        let wrong = (correct + 1) % 4;
        let feedback = engine.select_answer(wrong).unwrap().unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.selected, wrong);
    }

    #[test]
    fn timed_mode_hides_feedback_until_finished() {
        let (mut engine, _, _) = engine(catalog_of(3));
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        assert_eq!(engine.select_answer(0).unwrap(), None);
        assert!(engine.snapshot().feedback.is_none());
        assert!(engine.review().is_none());

        engine.submit().unwrap();
        assert_eq!(engine.review().unwrap().len(), 3);
    }

    #[test]
    fn submit_scores_and_appends_once() {
        let (mut engine, clock, store) = engine(catalog_of(5));
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();
        for position in 0..3 {
            engine.jump_to(position).unwrap();
            let correct = correct_option_at(&engine, position);
            engine.select_answer(correct).unwrap();
        }
        for position in 3..5 {
            engine.jump_to(position).unwrap();
            let wrong = (correct_option_at(&engine, position) + 1) % 4;
            engine.select_answer(wrong).unwrap();
        }
        for _ in 0..42 {
            engine.tick().unwrap();
        }

        let result = engine.submit().unwrap().clone();

        assert_eq!(result.score_percent, 60);
        assert_eq!(result.correct_positions, vec![0, 1, 2]);
        assert_eq!(result.incorrect_positions, vec![3, 4]);
        assert_eq!(result.time_spent_seconds, 42);
        assert_eq!(result.completed_at, clock.now);
        assert_eq!(store.list(), vec![result]);
        assert_eq!(clock.active_tickers(), 0);
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        let (mut engine, _, _) = engine(catalog_of(3));
        engine.start(Mode::Practice, Filter::All, Filter::All).unwrap();
        let correct = correct_option_at(&engine, 0);
        engine.select_answer(correct).unwrap();

        let result = engine.submit().unwrap();

        assert_eq!(result.correct_count(), 1);
        assert_eq!(result.incorrect_positions, vec![1, 2]);
        assert_eq!(result.correct_count() + result.incorrect_count(), result.total_questions);
        assert_eq!(result.score_percent, 33);
    }

    #[test]
    fn countdown_auto_submits_at_zero() {
        let (mut engine, clock, store) = engine(catalog_of(3));
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        let mut last = TIMED_LIMIT_SECS;
        for _ in 0..TIMED_LIMIT_SECS - 1 {
            match engine.tick().unwrap() {
                TickOutcome::Running { remaining_seconds } => {
                    assert!(remaining_seconds < last);
                    last = remaining_seconds;
                }
                TickOutcome::TimedOut => panic!("finished early"),
            }
        }
        assert_eq!(engine.snapshot().remaining_seconds, 1);

        assert_eq!(engine.tick().unwrap(), TickOutcome::TimedOut);
        assert_eq!(engine.phase(), PhaseKind::Finished);
        assert_eq!(engine.snapshot().remaining_seconds, 0);
        assert_eq!(engine.result().unwrap().time_spent_seconds, TIMED_LIMIT_SECS);
        assert_eq!(store.list().len(), 1);
        assert_eq!(clock.active_tickers(), 0);
        assert!(matches!(engine.tick(), Err(QuizError::InvalidTransition { .. })));
    }

    #[test]
    fn practice_mode_still_auto_submits_at_ceiling() {
        let (mut engine, _, store) = engine(catalog_of(2));
        engine.start(Mode::Practice, Filter::All, Filter::All).unwrap();

        for _ in 0..PRACTICE_LIMIT_SECS {
            engine.tick().unwrap();
        }

        assert_eq!(engine.phase(), PhaseKind::Finished);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn finished_engine_rejects_every_mutator() {
        let (mut engine, _, store) = engine(catalog_of(4));
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();
        engine.next().unwrap();
        engine.select_answer(2).unwrap();
        let result = engine.submit().unwrap().clone();
        let answers = engine.snapshot().answers.clone();

        assert!(engine.select_answer(0).unwrap_err().is_rejected_intent());
        assert!(engine.next().is_err());
        assert!(engine.previous().is_err());
        assert!(engine.jump_to(0).is_err());
        assert!(engine.submit().is_err());
        assert!(engine.tick().is_err());
        assert!(engine.start(Mode::Timed, Filter::All, Filter::All).is_err());

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.current_index, 1);
        assert_eq!(snapshot.answers, &answers);
        assert_eq!(snapshot.result, Some(&result));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let (mut engine, _, _) = engine(catalog_of(3));
        let id = engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        assert_eq!(engine.tick_for(id + 1).unwrap(), None);
        assert_eq!(
            engine.tick_for(id).unwrap(),
            Some(TickOutcome::Running { remaining_seconds: TIMED_LIMIT_SECS - 1 })
        );

        engine.submit().unwrap();
        assert_eq!(engine.tick_for(id).unwrap(), None);
    }

    #[test]
    fn reset_cancels_timer_and_returns_fresh_engine() {
        let (mut engine, clock, store) = engine(catalog_of(3));
        let first = engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();
        assert_eq!(clock.active_tickers(), 1);

        let mut engine = engine.reset();

        assert_eq!(clock.active_tickers(), 0);
        assert_eq!(engine.phase(), PhaseKind::Configuring);
        assert!(store.list().is_empty());

        let second = engine.start(Mode::Practice, Filter::All, Filter::All).unwrap();
        assert!(second > first);
        assert_eq!(clock.active_tickers(), 1);
    }

    #[test]
    fn dropping_a_running_engine_cancels_its_timer() {
        let (mut engine, clock, _) = engine(catalog_of(3));
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        drop(engine);

        assert_eq!(clock.active_tickers(), 0);
    }

    #[test]
    fn store_failure_does_not_block_finishing() {
        let clock = ManualClock::new();
        let mut engine = SessionEngine::new(
            catalog_of(2),
            Box::new(FailingStore),
            Box::new(clock.clone()),
            EngineConfig::default(),
        );
        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        assert!(engine.submit().is_ok());
        assert_eq!(engine.phase(), PhaseKind::Finished);
        assert_eq!(clock.active_tickers(), 0);
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(parse_position("1").unwrap(), 0);
        assert_eq!(parse_position(" 12 ").unwrap(), 11);
        assert!(matches!(parse_position("0"), Err(QuizError::InvalidInput(_))));
        assert!(matches!(parse_position("2.5"), Err(QuizError::InvalidInput(_))));
        assert!(matches!(parse_position(""), Err(QuizError::InvalidInput(_))));
    }

    #[test]
    fn custom_limits_apply() {
        let clock = ManualClock::new();
        let settings = EngineConfig {
            max_questions: 2,
            timed_limit_secs: 5,
            practice_limit_secs: 10,
        };
        let mut engine = SessionEngine::new(
            catalog_of(6),
            Box::new(MemoryResultStore::new()),
            Box::new(clock),
            settings,
        );

        engine.start(Mode::Timed, Filter::All, Filter::All).unwrap();

        let config = engine.config().unwrap();
        assert_eq!(config.question_set.len(), 2);
        assert_eq!(config.time_limit_seconds, 5);
    }
}
