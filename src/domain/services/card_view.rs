#[cfg(test)]
#[path = "card_view_test.rs"]
mod tests;

use crate::domain::models::Flashcard;

/// Text for one side of a card.
pub struct CardView<'a> {
    card: &'a Flashcard,
    flipped: bool,
    mastered: bool,
}

impl<'a> CardView<'a> {
    pub fn new(card: &'a Flashcard, flipped: bool, mastered: bool) -> CardView<'a> {
        return CardView {
            card,
            flipped,
            mastered,
        };
    }

    pub fn title(&self) -> String {
        let mut tags = vec![];
        if !self.card.category.is_empty() {
            tags.push(format!("[{}]", self.card.category));
        }
        tags.push(format!("[{}]", self.card.difficulty));
        if self.mastered {
            tags.push("[mastered]".to_string());
        }

        return tags.join(" ");
    }

    pub fn body(&self) -> String {
        if self.flipped {
            return format!("{}\n\nPress space to flip back", self.card.answer);
        }

        return format!("{}\n\nPress space to flip", self.card.prompt);
    }
}
