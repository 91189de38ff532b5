#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::assign_ids;
use crate::domain::models::Flashcard;
use crate::domain::models::GenerationRequest;
use crate::domain::models::Generator;

/// The service answers with a bare array, though some deployments wrap it in
/// a `flashcards` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Cards(Vec<Flashcard>),
    Wrapped { flashcards: Vec<Flashcard> },
}

impl GenerationResponse {
    fn into_flashcards(self) -> Vec<Flashcard> {
        match self {
            GenerationResponse::Cards(cards) => return cards,
            GenerationResponse::Wrapped { flashcards } => return flashcards,
        }
    }
}

/// Client for the document to flashcard generation endpoint. Requests have no
/// timeout and are never retried.
pub struct HttpGenerator {
    url: String,
}

impl Default for HttpGenerator {
    fn default() -> HttpGenerator {
        return HttpGenerator::new(&Config::get(ConfigKey::ServiceURL));
    }
}

impl HttpGenerator {
    pub fn new(url: &str) -> HttpGenerator {
        return HttpGenerator {
            url: url.trim_end_matches('/').to_string(),
        };
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    #[allow(clippy::implicit_return)]
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Flashcard>> {
        let document = Part::bytes(request.document.bytes)
            .file_name(request.document.name)
            .mime_str(&request.document.mime)?;

        let form = Form::new()
            .part("document", document)
            .text("language", request.language.to_string())
            .text("num_flashcards", request.num_flashcards.to_string());

        let res = reqwest::Client::new()
            .post(format!("{url}/upload", url = self.url))
            .bearer_auth(&request.token)
            .multipart(form)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to upload document to generation service"
            );
            bail!("Upload failed with status {}", res.status().as_u16());
        }

        let body = res.json::<GenerationResponse>().await?;
        let cards = assign_ids(body.into_flashcards());
        tracing::debug!(count = cards.len(), "Generation response");

        return Ok(cards);
    }
}
