use crate::domain::document::CrosswordWord;
use crate::domain::model::{
    strip_whitespace, CrosswordLayout, CrosswordOrientation, PlacementResult, WordEntry,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
    pub number: usize,
    pub clue: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClueSheet {
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
    /// Word-soup clues, which have no direction.
    pub words: Vec<Clue>,
}

impl ClueSheet {
    pub fn for_crossword(words: &[CrosswordWord]) -> Self {
        let mut sheet = ClueSheet::default();
        for word in words {
            let clue = Clue {
                number: word.position,
                clue: word.clue.clone(),
                answer: word.word.clone(),
            };
            match word.orientation {
                CrosswordOrientation::Across => sheet.across.push(clue),
                CrosswordOrientation::Down => sheet.down.push(clue),
                CrosswordOrientation::None => {}
            }
        }
        sheet.across.sort_by_key(|c| c.number);
        sheet.down.sort_by_key(|c| c.number);
        sheet
    }

    pub fn for_soup(placements: &[PlacementResult]) -> Self {
        let mut words: Vec<Clue> = placements
            .iter()
            .map(|p| Clue {
                number: p.sequence_number,
                clue: p.word.clue.clone(),
                answer: p.word.word.clone(),
            })
            .collect();
        words.sort_by_key(|c| c.number);
        ClueSheet {
            words,
            ..ClueSheet::default()
        }
    }
}

fn match_key(text: &str) -> String {
    strip_whitespace(text).to_uppercase()
}

/// Joins layout entries back to the caller's word list.
///
/// The layout only knows the whitespace-free answer; the original spelling is
/// recovered by a case-insensitive match, falling back to the answer itself.
/// Entries without a solver-assigned position are numbered by layout order.
pub fn annotate_layout(layout: &CrosswordLayout, words: &[WordEntry]) -> Vec<CrosswordWord> {
    layout
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let key = match_key(&entry.answer);
            let original = words.iter().find(|w| match_key(&w.word) == key);

            let clue = if entry.clue.is_empty() {
                original.map(|w| w.clue.clone()).unwrap_or_default()
            } else {
                entry.clue.clone()
            };

            CrosswordWord {
                word: original
                    .map(|w| w.word.clone())
                    .unwrap_or_else(|| entry.answer.clone()),
                clean_answer: strip_whitespace(&entry.answer),
                clue,
                startx: entry.startx,
                starty: entry.starty,
                orientation: entry.orientation,
                position: entry.position.unwrap_or(index + 1),
            }
        })
        .collect()
}
