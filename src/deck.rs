use crate::error::{Error, Result};
use crate::models::{AskResult, Flashcard, Snapshot};
use indexmap::IndexMap;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Three views of the same cards: term -> definition, the inverse
/// definition -> term index, and term -> mistake count. They only change
/// together, so the two indices stay exact inverses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    term_to_definition: IndexMap<String, String>,
    definition_to_term: HashMap<String, String>,
    term_to_mistakes: HashMap<String, u32>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a deck seeded from a previously exported snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut deck = Self::new();
        deck.import_snapshot(snapshot)?;
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.term_to_definition.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_to_definition.is_empty()
    }

    pub fn lookup_by_term(&self, term: &str) -> Result<Flashcard> {
        self.term_to_definition
            .get(term)
            .map(|definition| Flashcard::new(term, definition.as_str()))
            .ok_or_else(|| Error::term_not_found(term))
    }

    pub fn lookup_by_definition(&self, definition: &str) -> Result<Flashcard> {
        self.definition_to_term
            .get(definition)
            .map(|term| Flashcard::new(term.as_str(), definition))
            .ok_or_else(|| Error::definition_not_found(definition))
    }

    /// Mistake count recorded for `term`.
    pub fn mistakes(&self, term: &str) -> Result<u32> {
        self.term_to_mistakes
            .get(term)
            .copied()
            .ok_or_else(|| Error::term_not_found(term))
    }

    /// Every card, in the order the terms were inserted.
    pub fn all_cards(&self) -> Vec<Flashcard> {
        self.term_to_definition
            .iter()
            .map(|(term, definition)| Flashcard::new(term.as_str(), definition.as_str()))
            .collect()
    }

    /// Draws one card uniformly at random.
    pub fn random_card<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Flashcard> {
        if self.is_empty() {
            return Err(Error::EmptyDeck);
        }
        let index = rng.gen_range(0..self.len());
        let (term, definition) = self
            .term_to_definition
            .get_index(index)
            .ok_or(Error::EmptyDeck)?;
        Ok(Flashcard::new(term.as_str(), definition.as_str()))
    }

    pub fn insert_card(&mut self, card: Flashcard) -> Result<()> {
        self.insert_with_mistakes(card, 0)
    }

    fn insert_with_mistakes(&mut self, card: Flashcard, mistakes: u32) -> Result<()> {
        if self.term_to_definition.contains_key(&card.term)
            || self.definition_to_term.contains_key(&card.definition)
        {
            return Err(Error::DuplicateKey {
                term: card.term,
                definition: card.definition,
            });
        }

        debug!(term = %card.term, definition = %card.definition, "inserting card");
        self.definition_to_term
            .insert(card.definition.clone(), card.term.clone());
        self.term_to_mistakes.insert(card.term.clone(), mistakes);
        self.term_to_definition.insert(card.term, card.definition);
        Ok(())
    }

    /// Removes the card with `card.term` from every index.
    ///
    /// The stored definition is the one dropped from the inverse index, so a
    /// stale `card.definition` cannot leave a dangling entry behind.
    pub fn remove_card(&mut self, card: &Flashcard) -> Result<()> {
        let definition = self
            .term_to_definition
            .shift_remove(&card.term)
            .ok_or_else(|| Error::term_not_found(&card.term))?;
        self.definition_to_term.remove(&definition);
        self.term_to_mistakes.remove(&card.term);
        debug!(term = %card.term, definition = %definition, "removed card");
        Ok(())
    }

    /// Merges `snapshot` into the deck and returns how many entries it held.
    ///
    /// Imported cards replace the current state wholesale. Cards that were
    /// already in the deck are then re-inserted with their old mistake counts,
    /// and any whose term or definition collides with the imported data are
    /// dropped without error.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> Result<usize> {
        let imported = snapshot.len();
        let mut term_to_definition = IndexMap::with_capacity(imported);
        let mut definition_to_term = HashMap::with_capacity(imported);
        let mut term_to_mistakes = HashMap::with_capacity(imported);

        for (term, (definition, mistakes)) in snapshot {
            if let Some(other) = definition_to_term.insert(definition.clone(), term.clone()) {
                return Err(Error::MalformedInput(format!(
                    "definition \"{definition}\" is used by both \"{other}\" and \"{term}\""
                )));
            }
            term_to_mistakes.insert(term.clone(), mistakes);
            term_to_definition.insert(term, definition);
        }

        let mut merged = Self {
            term_to_definition,
            definition_to_term,
            term_to_mistakes,
        };

        let mut kept = 0;
        for (term, definition) in &self.term_to_definition {
            let mistakes = self.term_to_mistakes.get(term).copied().unwrap_or(0);
            let card = Flashcard::new(term.as_str(), definition.as_str());
            if merged.insert_with_mistakes(card, mistakes).is_ok() {
                kept += 1;
            } else {
                debug!(term = %term, "dropping card shadowed by import");
            }
        }

        *self = merged;
        info!(imported, kept, total = self.len(), "imported snapshot");
        Ok(imported)
    }

    /// Exports every card with its mistake count, plus the deck size.
    pub fn export_snapshot(&self) -> (Snapshot, usize) {
        let snapshot: Snapshot = self
            .term_to_definition
            .iter()
            .map(|(term, definition)| {
                let mistakes = self.term_to_mistakes.get(term).copied().unwrap_or(0);
                (term.clone(), (definition.clone(), mistakes))
            })
            .collect();
        let count = snapshot.len();
        (snapshot, count)
    }

    /// Checks `answer` against `card` and records a mistake when it is wrong.
    pub fn ask(&mut self, card: &Flashcard, answer: &str) -> Result<AskResult> {
        if answer == card.definition {
            return Ok(AskResult {
                is_correct: true,
                matched: Some(answer.to_string()),
            });
        }

        let mistakes = self
            .term_to_mistakes
            .get_mut(&card.term)
            .ok_or_else(|| Error::term_not_found(&card.term))?;
        *mistakes += 1;
        debug!(term = %card.term, mistakes = *mistakes, "wrong answer");

        Ok(AskResult {
            is_correct: false,
            matched: self.definition_to_term.get(answer).cloned(),
        })
    }

    /// Terms with the highest mistake count, and that count.
    ///
    /// Returns no terms and `0` when nothing has been answered wrong yet.
    pub fn hardest_cards(&self) -> (Vec<String>, u32) {
        let max = self.term_to_mistakes.values().copied().max().unwrap_or(0);
        if max == 0 {
            return (Vec::new(), 0);
        }

        let terms = self
            .term_to_definition
            .keys()
            .filter(|term| self.term_to_mistakes.get(*term) == Some(&max))
            .cloned()
            .collect();
        (terms, max)
    }

    pub fn reset_stats(&mut self) {
        self.term_to_mistakes.values_mut().for_each(|m| *m = 0);
        info!(cards = self.len(), "reset card statistics");
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.all_cards() {
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}
