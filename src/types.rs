use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Upper bound on the number of questions in one session.
pub const MAX_QUESTIONS: usize = 20;
/// Number of results the history keeps.
pub const HISTORY_LIMIT: usize = 10;
pub const TIMED_LIMIT_SECS: u32 = 1800;
pub const PRACTICE_LIMIT_SECS: u32 = 3600;

pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuizError::InvalidInput(format!("unknown difficulty '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(alias = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(alias = "correctAnswer")]
    pub correct_index: usize,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub unit: String,
    pub topic: String,
}

impl Question {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }
}

/// A catalog filter: either everything or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        s.trim().parse().map(Filter::Only)
    }
}

pub type UnitFilter = Filter<String>;
pub type DifficultyFilter = Filter<Difficulty>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Practice,
    Timed,
}

impl Mode {
    /// Accepts any prefix of the mode name, with or without leading dashes.
    /// `test` also selects the timed mode.
    pub fn parse_arg(arg: &str) -> Option<Mode> {
        let arg = arg.trim_start_matches('-').to_lowercase();
        if arg.is_empty() {
            return None;
        }

        if "practice".starts_with(&arg) {
            Some(Mode::Practice)
        } else if "timed".starts_with(&arg) || arg == "test" {
            Some(Mode::Timed)
        } else {
            None
        }
    }

    pub fn toggled(self) -> Mode {
        match self {
            Mode::Practice => Mode::Timed,
            Mode::Timed => Mode::Practice,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Practice => f.write_str("Practice Mode"),
            Mode::Timed => f.write_str("Timed Test"),
        }
    }
}

impl FromStr for Mode {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::parse_arg(s).ok_or_else(|| QuizError::InvalidInput(format!("unknown mode '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Configuring,
    Running,
    Finished,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseKind::Configuring => "configuring",
            PhaseKind::Running => "running",
            PhaseKind::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Fixed parameters of one session, built by `start`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub id: SessionId,
    pub mode: Mode,
    pub unit_filter: UnitFilter,
    pub difficulty_filter: DifficultyFilter,
    pub question_set: Vec<Arc<Question>>,
    pub time_limit_seconds: u32,
}

/// Position in the working set mapped to the chosen option.
pub type Answers = BTreeMap<usize, usize>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    #[serde(rename = "scorePercent")]
    pub score_percent: u8,
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    #[serde(rename = "correctAnswers")]
    pub correct_positions: Vec<usize>,
    #[serde(rename = "wrongAnswers")]
    pub incorrect_positions: Vec<usize>,
    #[serde(rename = "timeSpentSeconds")]
    pub time_spent_seconds: u32,
    #[serde(rename = "completedAtISO8601")]
    pub completed_at: DateTime<Utc>,
}

impl SessionResult {
    pub fn correct_count(&self) -> usize {
        self.correct_positions.len()
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect_positions.len()
    }
}

/// Immediate answer check, only produced in practice mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub position: usize,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

impl AnswerFeedback {
    pub fn for_answer(position: usize, question: &Question, selected: usize) -> Self {
        Self {
            position,
            selected,
            correct_index: question.correct_index,
            is_correct: question.is_correct(selected),
            explanation: question.explanation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_accepts_prefixes() {
        for end in 1..="practice".len() {
            let prefix = &"practice"[..end];
            assert_eq!(Mode::parse_arg(prefix), Some(Mode::Practice), "prefix {prefix}");
        }
        for end in 1..="timed".len() {
            let prefix = &"timed"[..end];
            assert_eq!(Mode::parse_arg(prefix), Some(Mode::Timed), "prefix {prefix}");
        }
        assert_eq!(Mode::parse_arg("--pr"), Some(Mode::Practice));
        assert_eq!(Mode::parse_arg("T"), Some(Mode::Timed));
        assert_eq!(Mode::parse_arg("test"), Some(Mode::Timed));
        assert_eq!(Mode::parse_arg("quiz"), None);
        assert_eq!(Mode::parse_arg("--"), None);
        assert_eq!(Mode::parse_arg("practices"), None);
        assert!("exam".parse::<Mode>().is_err());
    }

    #[test]
    fn filters_parse_all_case_insensitively() {
        let unit: UnitFilter = "ALL".parse().unwrap();
        assert_eq!(unit, Filter::All);
        let unit: UnitFilter = "Unit II".parse().unwrap();
        assert_eq!(unit, Filter::Only("Unit II".to_string()));
        let difficulty: DifficultyFilter = "hard".parse().unwrap();
        assert_eq!(difficulty, Filter::Only(Difficulty::Hard));
        assert!("impossible".parse::<DifficultyFilter>().is_err());
    }

    #[test]
    fn unit_filter_matches_exact_tag() {
        let filter = Filter::Only("Unit I".to_string());
        assert!(filter.matches(&"Unit I".to_string()));
        assert!(!filter.matches(&"Unit II".to_string()));
        assert!(Filter::<String>::All.matches(&"anything".to_string()));
    }

    #[test]
    fn result_serializes_with_persisted_field_names() {
        let result = SessionResult {
            score_percent: 60,
            total_questions: 5,
            correct_positions: vec![0, 1, 2],
            incorrect_positions: vec![3, 4],
            time_spent_seconds: 95,
            completed_at: "2026-10-16T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["scorePercent"], 60);
        assert_eq!(json["wrongAnswers"], serde_json::json!([3, 4]));
        assert_eq!(json["completedAtISO8601"], "2026-10-16T12:00:00Z");
    }
}
