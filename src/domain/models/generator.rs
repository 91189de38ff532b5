use anyhow::Result;
use async_trait::async_trait;

use super::Document;
use super::Flashcard;
use super::Language;

/// Everything the generation service needs for one upload. The token is
/// copied out of the session at submission time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub document: Document,
    pub language: Language,
    pub num_flashcards: u8,
    pub token: String,
}

#[async_trait]
pub trait Generator {
    /// Uploads the document and returns the generated batch. Cards returned
    /// here always carry unique ids.
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Flashcard>>;
}

pub type GeneratorBox = Box<dyn Generator + Send + Sync>;
