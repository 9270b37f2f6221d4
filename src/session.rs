//! One run of the drill: load the word bank, act on it, save it back.

use rand::Rng;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::StoreError;
use crate::grader::{self, GradeReport};
use crate::models::ReviewMode;
use crate::review;
use crate::storage::{read_cards, CardStore, LineStore};

/// Owns the word bank for the lifetime of a run.
pub struct Session<B: LineStore> {
    config: Config,
    bank: B,
    store: CardStore,
}

impl<B: LineStore> Session<B> {
    pub fn open(config: Config, bank: B) -> Result<Self, StoreError> {
        let store = CardStore::load(&bank)?;
        if store.is_empty() {
            warn!("word bank is empty");
        }
        info!(cards = store.len(), "word bank loaded");
        Ok(Self {
            config,
            bank,
            store,
        })
    }

    /// Write a fresh review to `out`. Returns the number of prompts written.
    pub fn generate_review<R: Rng + ?Sized>(
        &self,
        mode: ReviewMode,
        rng: &mut R,
        out: &impl LineStore,
    ) -> Result<usize, StoreError> {
        let review = review::select(self.store.cards(), mode, &self.config.selection(), rng);
        if review.is_empty() {
            warn!("no cards below the review threshold");
        }
        out.write_lines(&review.lines())?;
        info!(
            mode = mode.name(),
            from_back = review.from_back.len(),
            from_front = review.from_front.len(),
            "review generated"
        );
        Ok(review.len())
    }

    /// Grade the answered review in `answers` and write mistakes to `report_out`.
    pub fn grade(
        &mut self,
        answers: &impl LineStore,
        report_out: &impl LineStore,
    ) -> Result<GradeReport, StoreError> {
        let records = read_cards(answers)?;
        let report = grader::grade(&records, &mut self.store, &self.config.scoring());
        report_out.write_lines(&report.report_lines())?;
        info!(
            graded = report.graded,
            correct = report.correct,
            "review graded"
        );
        Ok(report)
    }

    /// Persist the word bank. Called at the end of every run.
    pub fn close(self) -> Result<(), StoreError> {
        self.store.save(&self.bank)
    }
}
