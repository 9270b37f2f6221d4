//! Parser and formatter for `=`-delimited word bank records.
//!
//! # Format
//! ```text
//! dog=犬=0.5
//! 猫(animal)=cat
//! 犬=
//! ```
//!
//! Column order is not significant: the Latin field always becomes the
//! front of the card and the other one the back.

use tracing::debug;

use crate::error::ParseError;
use crate::models::Card;

/// Field separator used by every file the drill reads or writes.
pub const DELIMITER: char = '=';

/// Parse one record into a card.
pub fn parse_record(line: &str) -> Result<Card, ParseError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() < 2 {
        return Err(ParseError::TooFewFields {
            found: fields.len(),
        });
    }

    let (first, second) = (fields[0], fields[1]);
    let swap_required = is_latin(second) || !is_latin(first);
    let (front, back) = if swap_required {
        (second, first)
    } else {
        (first, second)
    };

    let score = fields.get(2).and_then(|raw| parse_score(raw));
    if score.is_none() && fields.len() > 2 {
        debug!(record = line, "unreadable score, defaulting to 0");
    }

    Ok(Card {
        front: front.to_string(),
        back: back.to_string(),
        score: score.unwrap_or_default(),
        swap_required,
    })
}

/// Format a card as a word bank record.
pub fn format_record(card: &Card) -> String {
    format!(
        "{}{d}{}{d}{}",
        card.front,
        card.back,
        card.score,
        d = DELIMITER
    )
}

/// Format the review line for a prompt, leaving the answer slot empty.
pub fn format_prompt(prompt: &str) -> String {
    format!("{}{}", prompt, DELIMITER)
}

fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|score| score.is_finite())
}

/// A field is Latin when its first or second character is an ASCII letter,
/// so a leading `(` or `~` does not hide an English term.
fn is_latin(field: &str) -> bool {
    field.chars().take(2).any(|c| c.is_ascii_alphabetic())
}
