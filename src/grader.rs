//! Grading of a completed review against the word bank.

use std::fmt;

use tracing::{debug, warn};

use crate::config::Scoring;
use crate::models::{Card, Direction};
use crate::storage::CardStore;

/// A prompt the learner got wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct Mistake {
    pub prompt: String,
    pub answer: String,
    /// Accepted answers from every matching card.
    pub expected: Vec<String>,
    /// Hint of the first matching card, shown only for back prompts.
    pub hint: Option<String>,
}

impl fmt::Display for Mistake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} you put {} -- correct answer:", self.prompt, self.answer)?;
        for expected in &self.expected {
            write!(f, " {}", expected)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " {}", hint)?;
        }
        Ok(())
    }
}

/// Outcome of grading one review.
#[derive(Debug, Default)]
pub struct GradeReport {
    pub graded: usize,
    pub correct: usize,
    pub mistakes: Vec<Mistake>,
}

impl GradeReport {
    pub fn report_lines(&self) -> Vec<String> {
        self.mistakes.iter().map(ToString::to_string).collect()
    }
}

/// Grade every answered record, updating scores in the store.
pub fn grade(records: &[Card], store: &mut CardStore, scoring: &Scoring) -> GradeReport {
    let mut report = GradeReport::default();

    for record in records {
        let direction = Direction::from_swap(record.swap_required);
        let prompt = direction.prompt(record).trim();
        let answer = direction.answer(record).trim();

        let candidates = store.candidates(direction, prompt);
        if candidates.is_empty() {
            warn!(prompt, "no word bank entry matches review prompt");
        }

        let correct = !answer.is_empty()
            && candidates.iter().any(|&idx| {
                store
                    .get(idx)
                    .is_some_and(|card| direction.scored_answer(card).contains(answer))
            });

        let delta = if correct {
            scoring.correct_bonus
        } else {
            -scoring.incorrect_penalty
        };
        for &idx in &candidates {
            if let Some(score) = store.adjust_score(idx, delta) {
                debug!(prompt, index = idx, score, "score updated");
            }
        }

        report.graded += 1;
        if correct {
            report.correct += 1;
            continue;
        }

        let expected = candidates
            .iter()
            .filter_map(|&idx| store.get(idx))
            .map(|card| direction.answer(card).to_string())
            .collect();
        let hint = match direction {
            Direction::BackToFront => candidates
                .first()
                .and_then(|&idx| store.get(idx))
                .and_then(Card::hint)
                .map(str::to_string),
            Direction::FrontToBack => None,
        };

        report.mistakes.push(Mistake {
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            expected,
            hint,
        });
    }

    report
}
