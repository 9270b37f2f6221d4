//! Line-oriented persistence and the in-memory card store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{Card, Direction};
use crate::parser::{format_record, parse_record};

/// A source and sink of text records, one per line.
pub trait LineStore {
    fn read_lines(&self) -> Result<Vec<String>, StoreError>;
    fn write_lines(&self, lines: &[String]) -> Result<(), StoreError>;
}

impl<T: LineStore + ?Sized> LineStore for &T {
    fn read_lines(&self) -> Result<Vec<String>, StoreError> {
        (**self).read_lines()
    }

    fn write_lines(&self, lines: &[String]) -> Result<(), StoreError> {
        (**self).write_lines(lines)
    }
}

/// A plain text file on disk.
#[derive(Debug, Clone)]
pub struct TextFile {
    path: PathBuf,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn write_temp(&self, temp: &Path, lines: &[String]) -> io::Result<()> {
        let mut file = fs::File::create(temp)?;
        for line in lines {
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
        }
        file.sync_all()
    }
}

impl LineStore for TextFile {
    /// Missing or unreadable files read as empty.
    fn read_lines(&self) -> Result<Vec<String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "file not found, reading as empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                warn!(path = ?self.path, error = %err, "failed to read file, reading as empty");
                return Ok(Vec::new());
            }
        };

        Ok(content
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect())
    }

    /// Writes to a sibling temp file, then renames it over the destination.
    fn write_lines(&self, lines: &[String]) -> Result<(), StoreError> {
        let temp = self.temp_path();
        let result = self
            .write_temp(&temp, lines)
            .and_then(|()| fs::rename(&temp, &self.path));

        if let Err(source) = result {
            let _ = fs::remove_file(&temp);
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }
}

/// In-memory record source and sink.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryLines {
    lines: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl MemoryLines {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: std::cell::RefCell::new(lines.iter().map(|l| l.to_string()).collect()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

#[cfg(test)]
impl LineStore for MemoryLines {
    fn read_lines(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lines())
    }

    fn write_lines(&self, lines: &[String]) -> Result<(), StoreError> {
        *self.lines.borrow_mut() = lines.to_vec();
        Ok(())
    }
}

/// Parse every record line of a source. Lines of one character or less are skipped.
pub fn read_cards(source: &impl LineStore) -> Result<Vec<Card>, StoreError> {
    let mut cards = Vec::new();

    for (idx, line) in source.read_lines()?.iter().enumerate() {
        if line.chars().count() <= 1 {
            continue;
        }
        let card = parse_record(line).map_err(|source| StoreError::Parse {
            line: idx + 1,
            source,
        })?;
        cards.push(card);
    }

    Ok(cards)
}

/// The full word bank held for one session.
#[derive(Debug, Default)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Load the word bank from a source.
    pub fn load(source: &impl LineStore) -> Result<Self, StoreError> {
        let cards = read_cards(source)?;
        debug!(cards = cards.len(), "loaded word bank");
        Ok(Self::new(cards))
    }

    /// Write every card to the sink, replacing whatever it held.
    pub fn save(&self, sink: &impl LineStore) -> Result<(), StoreError> {
        let lines: Vec<String> = self.cards.iter().map(format_record).collect();
        sink.write_lines(&lines)?;
        debug!(cards = lines.len(), "saved word bank");
        Ok(())
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Indices of every card whose prompt side contains `prompt`, either as
    /// stored or with its hint moved the way reviews show it.
    pub fn candidates(&self, direction: Direction, prompt: &str) -> Vec<usize> {
        if prompt.is_empty() {
            return Vec::new();
        }

        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                if direction.prompt(card).contains(prompt) {
                    return true;
                }
                let mut shown = (*card).clone();
                shown.move_hint();
                direction.prompt(&shown).contains(prompt)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Apply a score change to one card, returning its clamped new score.
    pub fn adjust_score(&mut self, index: usize, delta: f64) -> Option<f64> {
        self.cards.get_mut(index).map(|card| card.adjust_score(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bank() -> CardStore {
        CardStore::new(vec![
            Card::new("dog", "犬", 0.5),
            Card::new("cat", "猫(animal)", 0.3),
            Card::new("puppy", "子犬", 0.1),
        ])
    }

    #[test]
    fn test_load_skips_short_lines() {
        let source = MemoryLines::new(&["dog=犬=0.5", "", "x", "猫=cat"]);
        let store = CardStore::load(&source).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.cards()[1].front, "cat");
    }

    #[test]
    fn test_load_fails_on_malformed_record() {
        let source = MemoryLines::new(&["dog=犬=0.5", "", "broken"]);
        let err = CardStore::load(&source).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_save_writes_every_card() {
        let sink = MemoryLines::default();
        bank().save(&sink).unwrap();
        assert_eq!(
            sink.lines(),
            vec!["dog=犬=0.5", "cat=猫(animal)=0.3", "puppy=子犬=0.1"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let source = MemoryLines::new(&["dog=犬=0.5", "dog=犬=0.2"]);
        let store = CardStore::load(&source).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_candidates_by_substring() {
        let store = bank();
        assert_eq!(store.candidates(Direction::BackToFront, "犬"), vec![0, 2]);
        assert_eq!(store.candidates(Direction::BackToFront, "猫"), vec![1]);
        assert_eq!(store.candidates(Direction::FrontToBack, "dog"), vec![0]);
    }

    #[test]
    fn test_candidates_match_moved_hint_prompt() {
        let store = bank();
        assert_eq!(
            store.candidates(Direction::FrontToBack, "cat (animal)"),
            vec![1]
        );
    }

    #[test]
    fn test_candidates_empty_prompt_matches_nothing() {
        assert!(bank().candidates(Direction::BackToFront, "").is_empty());
    }

    #[test]
    fn test_adjust_score_by_index() {
        let mut store = bank();
        assert_eq!(store.adjust_score(0, 0.7), Some(1.0));
        assert_eq!(store.adjust_score(2, -0.7), Some(0.0));
        assert_eq!(store.adjust_score(9, 0.1), None);
    }

    #[test]
    fn test_text_file_missing_reads_empty() {
        let dir = TempDir::new().unwrap();
        let file = TextFile::new(dir.path().join("WordBank.txt"));
        assert!(file.read_lines().unwrap().is_empty());
        assert!(CardStore::load(&file).unwrap().is_empty());
    }

    #[test]
    fn test_text_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let file = TextFile::new(dir.path().join("WordBank.txt"));

        bank().save(&file).unwrap();
        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "dog=犬=0.5\ncat=猫(animal)=0.3\npuppy=子犬=0.1\n");

        let reloaded = CardStore::load(&file).unwrap();
        assert_eq!(reloaded.cards(), bank().cards());
        assert!(!dir.path().join(".WordBank.txt.tmp").exists());
    }

    #[test]
    fn test_text_file_overwrites_and_strips_carriage_returns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Review.txt");
        fs::write(&path, "犬=dog\r\ncat=ねこ\r\n").unwrap();

        let file = TextFile::new(&path);
        assert_eq!(file.read_lines().unwrap(), vec!["犬=dog", "cat=ねこ"]);

        file.write_lines(&["tree=".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "tree=\n");
    }

    #[test]
    fn test_text_file_write_failure_is_io_error() {
        let dir = TempDir::new().unwrap();
        let file = TextFile::new(dir.path().join("missing").join("WordBank.txt"));
        let err = file.write_lines(&["dog=犬=0.5".to_string()]).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
