use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::types::{DifficultyFilter, Question, UnitFilter};

/// Builds the working set for one session: keep the questions matching both
/// filters, shuffle them, and take at most `limit`.
pub fn select_questions<R: Rng + ?Sized>(
    questions: &[Arc<Question>],
    unit: &UnitFilter,
    difficulty: &DifficultyFilter,
    limit: usize,
    rng: &mut R,
) -> Vec<Arc<Question>> {
    let mut filtered: Vec<Arc<Question>> = questions
        .iter()
        .filter(|q| unit.matches(&q.unit) && difficulty.matches(&q.difficulty))
        .cloned()
        .collect();

    let eligible = filtered.len();
    filtered.shuffle(rng);
    filtered.truncate(limit);

    debug!(
        unit = %unit,
        difficulty = %difficulty,
        eligible = eligible,
        selected = filtered.len(),
        "Built question set"
    );

    filtered
}
