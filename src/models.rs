//! Data models for vocabulary cards and review directions.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lowest and highest mastery score a card can hold after grading.
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 1.0;

/// How the word bank is ordered before eligible cards are picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewMode {
    /// Uniform shuffle of the whole bank.
    #[default]
    Random,
    /// Weakest cards first.
    LowestFirst,
}

impl ReviewMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::LowestFirst => "lowest-first",
        }
    }
}

/// Which side of a card is shown and which side the learner must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Prompt is the back (Japanese) field, answer is the front.
    BackToFront,
    /// Prompt is the front (English) field, answer is the back.
    FrontToBack,
}

impl Direction {
    /// A record whose fields were swapped during parsing was prompted from the back.
    pub fn from_swap(swap_required: bool) -> Self {
        if swap_required {
            Self::BackToFront
        } else {
            Self::FrontToBack
        }
    }

    pub fn prompt<'a>(&self, card: &'a Card) -> &'a str {
        match self {
            Self::BackToFront => &card.back,
            Self::FrontToBack => &card.front,
        }
    }

    pub fn answer<'a>(&self, card: &'a Card) -> &'a str {
        match self {
            Self::BackToFront => &card.front,
            Self::FrontToBack => &card.back,
        }
    }

    /// The answer side a submission is scored against; hints never count.
    pub fn scored_answer<'a>(&self, card: &'a Card) -> &'a str {
        match self {
            Self::BackToFront => &card.front,
            Self::FrontToBack => card.back_without_hint(),
        }
    }
}

/// A single vocabulary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// English-like term.
    pub front: String,
    /// Japanese-like term, possibly carrying a parenthetical hint.
    pub back: String,
    pub score: f64,
    /// Whether the record's columns had to be swapped to reach front/back order.
    pub swap_required: bool,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>, score: f64) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            score,
            swap_required: false,
        }
    }

    /// The hint embedded in the back field: everything from its first `(`.
    pub fn hint(&self) -> Option<&str> {
        self.back.find('(').map(|start| &self.back[start..])
    }

    /// The back field without its hint.
    pub fn back_without_hint(&self) -> &str {
        match self.back.find('(') {
            Some(start) => self.back[..start].trim_end(),
            None => &self.back,
        }
    }

    /// Move the hint out of the back field and onto the end of the front field.
    pub fn move_hint(&mut self) {
        let Some(start) = self.back.find('(') else {
            return;
        };

        let hint = self.back.split_off(start);
        let kept = self.back.trim_end().len();
        self.back.truncate(kept);

        if !self.front.is_empty() {
            self.front.push(' ');
        }
        self.front.push_str(&hint);
    }

    /// Add `delta` to the score and clamp it into `[MIN_SCORE, MAX_SCORE]`.
    pub fn adjust_score(&mut self, delta: f64) -> f64 {
        self.score = (self.score + delta).clamp(MIN_SCORE, MAX_SCORE);
        self.score
    }
}
