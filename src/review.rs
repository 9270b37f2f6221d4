//! Review selection: picks weak cards and splits them by quiz direction.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::config::SelectionTunables;
use crate::models::{Card, Direction, ReviewMode};
use crate::parser::format_prompt;

/// One generated review, cards already stripped of their hints.
#[derive(Debug, Default)]
pub struct Review {
    /// Low scorers, prompted with the back field.
    pub from_back: Vec<Card>,
    /// Higher scorers, prompted with the front field.
    pub from_front: Vec<Card>,
}

impl Review {
    pub fn len(&self) -> usize {
        self.from_back.len() + self.from_front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prompts in emission order: every back prompt, then every front prompt.
    pub fn prompts(&self) -> impl Iterator<Item = (Direction, &str)> {
        let back = self
            .from_back
            .iter()
            .map(|card| (Direction::BackToFront, Direction::BackToFront.prompt(card)));
        let front = self
            .from_front
            .iter()
            .map(|card| (Direction::FrontToBack, Direction::FrontToBack.prompt(card)));
        back.chain(front)
    }

    /// Review file lines, each with an empty answer slot.
    pub fn lines(&self) -> Vec<String> {
        self.prompts().map(|(_, prompt)| format_prompt(prompt)).collect()
    }
}

/// Build a review from a copy of the word bank.
pub fn select<R: Rng + ?Sized>(
    cards: &[Card],
    mode: ReviewMode,
    tunables: &SelectionTunables,
    rng: &mut R,
) -> Review {
    let mut ordered = cards.to_vec();
    match mode {
        ReviewMode::Random => ordered.shuffle(rng),
        ReviewMode::LowestFirst => ordered.sort_by(|a, b| a.score.total_cmp(&b.score)),
    }

    let mut review = Review::default();
    for mut card in ordered {
        if review.len() >= tunables.review_size {
            break;
        }
        if card.score >= tunables.review_threshold {
            continue;
        }

        let direction = if card.score < tunables.direction_threshold {
            Direction::BackToFront
        } else {
            Direction::FrontToBack
        };

        card.move_hint();
        if direction.prompt(&card).trim().is_empty() {
            warn!(front = %card.front, "card has nothing to prompt with, skipped");
            continue;
        }

        match direction {
            Direction::BackToFront => review.from_back.push(card),
            Direction::FrontToBack => review.from_front.push(card),
        }
    }

    review.from_back.shuffle(rng);
    review.from_front.shuffle(rng);

    review
}
