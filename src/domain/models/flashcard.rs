#[cfg(test)]
#[path = "flashcard_test.rs"]
mod tests;

use std::collections::HashSet;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::IntoEnumIterator;
use uuid::Uuid;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(text: &str) -> Option<Difficulty> {
        let lowered = text.trim().to_lowercase();
        return Difficulty::iter().find(|e| return e.to_string() == lowered);
    }
}

/// Difficulty comes straight from model output, so anything off the scale
/// falls back to medium rather than failing the whole batch.
impl From<Option<String>> for Difficulty {
    fn from(text: Option<String>) -> Difficulty {
        let text = text.unwrap_or_default();
        if let Some(difficulty) = Difficulty::parse(&text) {
            return difficulty;
        }

        tracing::warn!(difficulty = text, "unknown difficulty, using medium");
        return Difficulty::default();
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let val: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    return Ok(val.unwrap_or_default());
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    #[serde(default)]
    pub id: String,
    pub prompt: String,
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub mastered: bool,
    #[serde(default)]
    pub folder_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl Flashcard {
    #[cfg(test)]
    pub fn new(prompt: &str, answer: &str, category: &str, difficulty: Difficulty) -> Flashcard {
        return Flashcard {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            category: category.to_string(),
            difficulty,
            mastered: false,
            folder_id: "".to_string(),
            last_reviewed: None,
        };
    }
}

/// Gives every card in a generated batch a unique id. The service usually
/// omits ids, and mastery is tracked per id, so missing or repeated ids are
/// replaced with fresh ones.
pub fn assign_ids(mut cards: Vec<Flashcard>) -> Vec<Flashcard> {
    let mut seen: HashSet<String> = HashSet::new();
    for card in cards.iter_mut() {
        if card.id.is_empty() || seen.contains(&card.id) {
            card.id = Uuid::new_v4().to_string();
        }
        seen.insert(card.id.to_string());
    }

    return cards;
}

/// Grouping of flashcards. Nothing creates or lists folders yet; cards only
/// carry a `folder_id` that points at one.
#[allow(dead_code)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[allow(dead_code)]
impl Folder {
    pub fn new(name: &str) -> Folder {
        return Folder {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            color: None,
            created_at: Utc::now(),
        };
    }
}
