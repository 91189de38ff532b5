#[cfg(test)]
#[path = "study_session_test.rs"]
mod tests;

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::models::Flashcard;

/// Review state over a fixed collection: the current position, whether the
/// card shows its answer, and which cards were marked as mastered.
///
/// Navigation wraps in both directions and never terminates. Mastery is
/// keyed by card id, so it stays attached to the right card even if the
/// collection is reordered. An empty collection is allowed; navigation is
/// then a no-op and there is no current card.
pub struct StudySession {
    cards: Arc<Vec<Flashcard>>,
    current_index: usize,
    is_flipped: bool,
    mastered: HashSet<String>,
}

impl StudySession {
    pub fn new(cards: Arc<Vec<Flashcard>>) -> StudySession {
        return StudySession {
            cards,
            current_index: 0,
            is_flipped: false,
            mastered: HashSet::new(),
        };
    }

    pub fn len(&self) -> usize {
        return self.cards.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.cards.is_empty();
    }

    pub fn cards(&self) -> &[Flashcard] {
        return &self.cards;
    }

    pub fn current_index(&self) -> usize {
        return self.current_index;
    }

    pub fn current(&self) -> Option<&Flashcard> {
        return self.cards.get(self.current_index);
    }

    pub fn is_flipped(&self) -> bool {
        return self.is_flipped;
    }

    pub fn advance(&mut self) {
        if self.cards.is_empty() {
            return;
        }

        self.current_index = (self.current_index + 1) % self.cards.len();
        self.is_flipped = false;
    }

    pub fn retreat(&mut self) {
        if self.cards.is_empty() {
            return;
        }

        let len = self.cards.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.is_flipped = false;
    }

    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    pub fn toggle_mastered(&mut self) {
        let id = match self.current() {
            Some(card) => card.id.to_string(),
            None => return,
        };

        if !self.mastered.remove(&id) {
            self.mastered.insert(id);
        }
    }

    pub fn is_mastered(&self, card: &Flashcard) -> bool {
        return self.mastered.contains(&card.id);
    }

    pub fn is_current_mastered(&self) -> bool {
        return self
            .current()
            .map(|card| return self.is_mastered(card))
            .unwrap_or(false);
    }

    pub fn progress_percent(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }

        return (self.current_index + 1) as f64 * 100.0 / self.cards.len() as f64;
    }

    pub fn mastered_count(&self) -> usize {
        return self.mastered.len();
    }

    pub fn remaining_count(&self) -> usize {
        return self.cards.len() - self.mastered_count();
    }

    pub fn position(&self) -> String {
        if self.cards.is_empty() {
            return "0 / 0".to_string();
        }

        return format!("{} / {}", self.current_index + 1, self.cards.len());
    }
}
