#[cfg(test)]
#[path = "uploader_test.rs"]
mod tests;

use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use super::export_as_json;
use super::ExportOutcome;
use crate::domain::models::Document;
use crate::domain::models::Flashcard;
use crate::domain::models::GenerationRequest;
use crate::domain::models::Generator;
use crate::domain::models::Language;
use crate::domain::models::Session;
use crate::domain::models::MAX_FILE_SIZE;
use crate::domain::models::MIME_PDF;
use crate::domain::models::MIME_TEXT;

pub const MIN_FLASHCARDS: u8 = 1;
pub const MAX_FLASHCARDS: u8 = 20;
pub const DEFAULT_FLASHCARDS: u8 = 5;

pub const ERROR_FILE_SIZE: &str = "File size must be less than 5MB";
pub const ERROR_FILE_TYPE: &str = "Please upload a PDF or text file.";
pub const ERROR_UPLOAD: &str = "Failed to upload document";

const PREVIEW_LENGTH: usize = 200;

pub fn validate(document: &Document) -> Result<()> {
    if document.size > MAX_FILE_SIZE {
        bail!(ERROR_FILE_SIZE);
    }

    if document.mime != MIME_PDF && document.mime != MIME_TEXT {
        bail!(ERROR_FILE_TYPE);
    }

    return Ok(());
}

/// First 200 characters of a plain text document, with `...` appended when
/// the text is longer. Other document types have no preview.
pub fn preview_text(document: &Document) -> String {
    if !document.is_text() {
        return "".to_string();
    }

    let text = String::from_utf8_lossy(&document.bytes);
    let mut preview = text.chars().take(PREVIEW_LENGTH).collect::<String>();
    if text.chars().count() > PREVIEW_LENGTH {
        preview += "...";
    }

    return preview;
}

/// Transient state of the upload form: the selected document, its preview,
/// the last error, the in-flight flag and the generation parameters. Also
/// keeps the most recently generated batch for exporting.
pub struct Uploader {
    document: Option<Document>,
    preview: String,
    error: String,
    uploading: bool,
    language: Language,
    num_flashcards: u8,
    flashcards: Arc<Vec<Flashcard>>,
}

impl Default for Uploader {
    fn default() -> Uploader {
        return Uploader::new(Language::default(), DEFAULT_FLASHCARDS);
    }
}

impl Uploader {
    pub fn new(language: Language, num_flashcards: u8) -> Uploader {
        return Uploader {
            document: None,
            preview: "".to_string(),
            error: "".to_string(),
            uploading: false,
            language,
            num_flashcards: num_flashcards.clamp(MIN_FLASHCARDS, MAX_FLASHCARDS),
            flashcards: Arc::new(vec![]),
        };
    }

    /// Validates and selects a document. A rejected document leaves the
    /// previous selection in place and sets the error message.
    pub fn select(&mut self, document: Document) -> Result<()> {
        if let Err(err) = validate(&document) {
            tracing::warn!(
                name = document.name,
                mime = document.mime,
                size = document.size,
                "rejected document"
            );
            self.error = err.to_string();
            return Err(err);
        }

        self.preview = preview_text(&document);
        self.error = "".to_string();
        self.document = Some(document);

        return Ok(());
    }

    /// Forgets the selected document and the generated batch. Language, card
    /// count and the in-flight flag are kept.
    pub fn clear(&mut self) {
        self.document = None;
        self.preview = "".to_string();
        self.error = "".to_string();
        self.flashcards = Arc::new(vec![]);
    }

    pub fn document(&self) -> Option<&Document> {
        return self.document.as_ref();
    }

    pub fn preview(&self) -> &str {
        return &self.preview;
    }

    pub fn error(&self) -> &str {
        return &self.error;
    }

    pub fn is_uploading(&self) -> bool {
        return self.uploading;
    }

    pub fn language(&self) -> Language {
        return self.language;
    }

    pub fn next_language(&mut self) {
        self.language = self.language.next();
    }

    pub fn num_flashcards(&self) -> u8 {
        return self.num_flashcards;
    }

    pub fn set_num_flashcards(&mut self, num: u8) {
        self.num_flashcards = num.clamp(MIN_FLASHCARDS, MAX_FLASHCARDS);
    }

    pub fn increment_num_flashcards(&mut self) {
        self.set_num_flashcards(self.num_flashcards.saturating_add(1));
    }

    pub fn decrement_num_flashcards(&mut self) {
        self.set_num_flashcards(self.num_flashcards.saturating_sub(1));
    }

    pub fn flashcards(&self) -> Arc<Vec<Flashcard>> {
        return self.flashcards.clone();
    }

    /// Marks a request as in flight and packages it for the generation
    /// service. Only one request may be in flight at a time.
    pub fn begin(&mut self, session: &Session) -> Result<GenerationRequest> {
        if self.uploading {
            bail!("A document is already being processed.");
        }

        let token = match session.token() {
            Some(token) => token.to_string(),
            None => bail!("You must be logged in to generate flashcards."),
        };

        let document = match &self.document {
            Some(document) => document.clone(),
            None => bail!("Select a document first."),
        };

        self.uploading = true;
        self.error = "".to_string();

        tracing::info!(
            name = document.name,
            language = self.language.to_string(),
            num_flashcards = self.num_flashcards,
            "submitting document"
        );

        return Ok(GenerationRequest {
            document,
            language: self.language,
            num_flashcards: self.num_flashcards,
            token,
        });
    }

    /// Settles the in-flight request. The flag is cleared on both paths. A
    /// failure keeps the previously generated batch and only exposes the
    /// generic error message, the cause goes to the log.
    pub fn finish(&mut self, result: Result<Vec<Flashcard>>) -> Result<Arc<Vec<Flashcard>>> {
        self.uploading = false;

        match result {
            Ok(cards) => {
                tracing::info!(count = cards.len(), "flashcards generated");
                self.flashcards = Arc::new(cards);
                return Ok(self.flashcards.clone());
            }
            Err(err) => {
                tracing::error!(error = ?err, "flashcard generation failed");
                self.error = ERROR_UPLOAD.to_string();
                bail!(ERROR_UPLOAD);
            }
        }
    }

    pub async fn generate(
        &mut self,
        generator: &(dyn Generator + Send + Sync),
        session: &Session,
    ) -> Result<Arc<Vec<Flashcard>>> {
        let request = self.begin(session)?;
        let result = generator.generate(request).await;

        return self.finish(result);
    }

    pub async fn export(&self, path: &Path) -> Result<ExportOutcome> {
        return export_as_json(&self.flashcards, path).await;
    }
}
