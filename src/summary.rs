//! Derived views over results: history totals, score bands, review rows and
//! clock formatting.

use std::sync::Arc;

use crate::types::{Answers, Question, SessionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score_percent: u8) -> Self {
        if score_percent >= 80 {
            ScoreBand::Good
        } else if score_percent >= 60 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistorySummary {
    pub tests_taken: usize,
    pub average_score: u8,
    pub best_score: Option<u8>,
    pub last_score: Option<u8>,
}

impl HistorySummary {
    /// `results` is expected newest first, as `ResultStore::list` returns it.
    pub fn from_results(results: &[SessionResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let total: usize = results.iter().map(|r| r.score_percent as usize).sum();
        Self {
            tests_taken: results.len(),
            average_score: rounded_percent(total, results.len() * 100),
            best_score: results.iter().map(|r| r.score_percent).max(),
            last_score: results.first().map(|r| r.score_percent),
        }
    }
}

/// `round(100 * part / whole)`, halves rounded up. Zero when `whole` is zero.
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Correct,
    Incorrect,
    Unanswered,
}

#[derive(Debug, Clone)]
pub struct ReviewItem {
    pub position: usize,
    pub question: Arc<Question>,
    pub selected: Option<usize>,
    pub status: AnswerStatus,
}

impl ReviewItem {
    pub fn selected_option(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.question.options.get(i))
            .map(String::as_str)
    }
}

pub fn review_items(questions: &[Arc<Question>], answers: &Answers) -> Vec<ReviewItem> {
    questions
        .iter()
        .enumerate()
        .map(|(position, question)| {
            let selected = answers.get(&position).copied();
            let status = match selected {
                Some(option) if question.is_correct(option) => AnswerStatus::Correct,
                Some(_) => AnswerStatus::Incorrect,
                None => AnswerStatus::Unanswered,
            };
            ReviewItem {
                position,
                question: Arc::clone(question),
                selected,
                status,
            }
        })
        .collect()
}

/// `MM:SS`; minutes keep counting past 59.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Percentage of the way through the set when looking at `current_index`.
pub fn progress_percent(current_index: usize, total: usize) -> u16 {
    if total == 0 {
        return 0;
    }
    (((current_index + 1).min(total) * 100) / total) as u16
}
