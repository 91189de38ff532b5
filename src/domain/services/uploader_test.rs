use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tempdir::TempDir;
use test_utils::flashcards_fixture;
use test_utils::text_document_fixture;

use super::preview_text;
use super::Uploader;
use super::ERROR_FILE_SIZE;
use super::ERROR_FILE_TYPE;
use super::ERROR_UPLOAD;
use crate::domain::models::assign_ids;
use crate::domain::models::Document;
use crate::domain::models::Flashcard;
use crate::domain::models::GenerationRequest;
use crate::domain::models::Generator;
use crate::domain::models::Language;
use crate::domain::models::Session;
use crate::domain::services::ExportOutcome;
use crate::infrastructure::generators::HttpGenerator;

struct FakeGenerator {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeGenerator {
    fn new(fail: bool) -> FakeGenerator {
        return FakeGenerator {
            fail,
            calls: AtomicUsize::new(0),
        };
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Flashcard>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("connection refused");
        }

        let cards: Vec<Flashcard> = serde_json::from_str(flashcards_fixture())?;
        return Ok(assign_ids(
            cards
                .into_iter()
                .take(request.num_flashcards as usize)
                .collect(),
        ));
    }
}

fn text_document() -> Document {
    return Document::new(
        "notes.txt",
        "text/plain",
        text_document_fixture().as_bytes().to_vec(),
    );
}

mod select {
    use super::*;

    #[test]
    fn it_accepts_text_and_pdf() -> Result<()> {
        let mut uploader = Uploader::default();
        uploader.select(Document::new("paper.pdf", "application/pdf", vec![1, 2, 3]))?;
        assert_eq!(uploader.document().unwrap().name, "paper.pdf");
        assert_eq!(uploader.preview(), "");

        uploader.select(text_document())?;
        assert_eq!(uploader.document().unwrap().name, "notes.txt");
        assert_eq!(uploader.error(), "");

        return Ok(());
    }

    #[test]
    fn it_rejects_oversized_files() {
        let mut uploader = Uploader::default();
        let document = Document::new("big.pdf", "application/pdf", vec![0; 6 * 1024 * 1024]);

        let res = uploader.select(document);

        assert!(res.is_err());
        assert_eq!(uploader.error(), ERROR_FILE_SIZE);
        assert!(uploader.document().is_none());
    }

    #[test]
    fn it_accepts_exactly_five_mebibytes() -> Result<()> {
        let mut uploader = Uploader::default();
        uploader.select(Document::new(
            "limit.pdf",
            "application/pdf",
            vec![0; 5 * 1024 * 1024],
        ))?;

        assert!(uploader.document().is_some());
        return Ok(());
    }

    #[test]
    fn it_rejects_other_mime_types() {
        let mut uploader = Uploader::default();

        let res = uploader.select(Document::new("cat.png", "image/png", vec![1]));

        assert!(res.is_err());
        assert_eq!(uploader.error(), ERROR_FILE_TYPE);
        assert_eq!(uploader.error(), "Please upload a PDF or text file.");
    }

    #[test]
    fn it_keeps_the_previous_selection_on_rejection() -> Result<()> {
        let mut uploader = Uploader::default();
        uploader.select(text_document())?;

        let _ = uploader.select(Document::new("cat.png", "image/png", vec![1]));

        assert_eq!(uploader.document().unwrap().name, "notes.txt");
        assert_eq!(uploader.error(), ERROR_FILE_TYPE);

        uploader.select(text_document())?;
        assert_eq!(uploader.error(), "");

        return Ok(());
    }
}

#[test]
fn it_clears_the_selection_and_batch() -> Result<()> {
    let mut uploader = Uploader::new(Language::French, 9);
    uploader.select(text_document())?;
    uploader.begin(&Session::authenticated("abc123"))?;
    uploader.finish(Ok(assign_ids(serde_json::from_str(flashcards_fixture())?)))?;

    uploader.clear();

    assert!(uploader.document().is_none());
    assert_eq!(uploader.preview(), "");
    assert_eq!(uploader.error(), "");
    assert!(uploader.flashcards().is_empty());
    assert_eq!(uploader.language(), Language::French);
    assert_eq!(uploader.num_flashcards(), 9);

    return Ok(());
}

mod preview {
    use super::*;

    #[test]
    fn it_truncates_long_text() {
        let preview = preview_text(&text_document());

        assert_eq!(preview.chars().count(), 203);
        assert!(preview.ends_with("..."));
        assert!(preview.starts_with("Photosynthesis is the process"));
    }

    #[test]
    fn it_keeps_short_text_intact() {
        let preview = preview_text(&Document::new("short.txt", "text/plain", b"Hi!".to_vec()));
        assert_eq!(preview, "Hi!");
    }

    #[test]
    fn it_counts_characters_not_bytes() {
        let text = "é".repeat(200);
        let preview = preview_text(&Document::new(
            "accents.txt",
            "text/plain",
            text.as_bytes().to_vec(),
        ));

        assert_eq!(preview, text);
    }

    #[test]
    fn it_has_no_preview_for_pdfs() {
        let preview = preview_text(&Document::new(
            "paper.pdf",
            "application/pdf",
            b"%PDF-1.4".to_vec(),
        ));
        assert_eq!(preview, "");
    }
}

mod parameters {
    use super::*;

    #[test]
    fn it_clamps_card_count() {
        let mut uploader = Uploader::new(Language::English, 50);
        assert_eq!(uploader.num_flashcards(), 20);

        uploader.increment_num_flashcards();
        assert_eq!(uploader.num_flashcards(), 20);

        uploader.set_num_flashcards(0);
        assert_eq!(uploader.num_flashcards(), 1);

        uploader.decrement_num_flashcards();
        assert_eq!(uploader.num_flashcards(), 1);
    }

    #[test]
    fn it_cycles_languages() {
        let mut uploader = Uploader::default();
        assert_eq!(uploader.language(), Language::English);

        uploader.next_language();
        assert_eq!(uploader.language(), Language::Spanish);

        let mut uploader = Uploader::new(Language::Italian, 5);
        uploader.next_language();
        assert_eq!(uploader.language(), Language::English);
    }
}

mod generate {
    use super::*;

    #[test]
    fn it_requires_a_session() -> Result<()> {
        let mut uploader = Uploader::default();
        uploader.select(text_document())?;

        let res = uploader.begin(&Session::default());

        assert!(res.is_err());
        assert!(!uploader.is_uploading());

        return Ok(());
    }

    #[test]
    fn it_requires_a_document() {
        let mut uploader = Uploader::default();

        let res = uploader.begin(&Session::authenticated("abc123"));

        assert!(res.is_err());
        assert!(!uploader.is_uploading());
    }

    #[test]
    fn it_allows_a_single_request_in_flight() -> Result<()> {
        let mut uploader = Uploader::new(Language::French, 3);
        uploader.select(text_document())?;
        let session = Session::authenticated("abc123");

        let request = uploader.begin(&session)?;
        assert!(uploader.is_uploading());
        assert_eq!(request.token, "abc123");
        assert_eq!(request.language, Language::French);
        assert_eq!(request.num_flashcards, 3);
        assert_eq!(request.document.name, "notes.txt");

        assert!(uploader.begin(&session).is_err());

        uploader.finish(Ok(vec![]))?;
        assert!(!uploader.is_uploading());
        assert!(uploader.begin(&session).is_ok());

        return Ok(());
    }

    #[tokio::test]
    async fn it_stores_generated_cards() -> Result<()> {
        let generator = FakeGenerator::new(false);
        let mut uploader = Uploader::default();
        uploader.select(text_document())?;

        let cards = uploader
            .generate(&generator, &Session::authenticated("abc123"))
            .await?;

        assert_eq!(cards.len(), 5);
        assert_eq!(uploader.flashcards().len(), 5);
        assert!(!uploader.is_uploading());
        assert_eq!(uploader.error(), "");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

        return Ok(());
    }

    #[tokio::test]
    async fn it_keeps_previous_cards_on_failure() -> Result<()> {
        let mut uploader = Uploader::new(Language::English, 2);
        uploader.select(text_document())?;
        let session = Session::authenticated("abc123");

        uploader.generate(&FakeGenerator::new(false), &session).await?;
        let before = uploader.flashcards();

        let res = uploader.generate(&FakeGenerator::new(true), &session).await;

        assert!(res.is_err());
        assert_eq!(res.unwrap_err().to_string(), ERROR_UPLOAD);
        assert_eq!(uploader.error(), ERROR_UPLOAD);
        assert!(!uploader.is_uploading());
        assert_eq!(uploader.flashcards(), before);

        return Ok(());
    }

    #[tokio::test]
    async fn it_never_calls_the_service_for_rejected_files() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .expect(0)
            .create_async()
            .await;

        let generator = HttpGenerator::new(&server.url());
        let mut uploader = Uploader::default();
        let oversized = Document::new("big.pdf", "application/pdf", vec![0; 6 * 1024 * 1024]);

        assert!(uploader.select(oversized).is_err());
        let res = uploader
            .generate(&generator, &Session::authenticated("abc123"))
            .await;

        assert!(res.is_err());
        assert_eq!(uploader.error(), ERROR_FILE_SIZE);
        mock.assert_async().await;

        return Ok(());
    }
}

mod export {
    use super::*;

    #[tokio::test]
    async fn it_warns_when_nothing_was_generated() -> Result<()> {
        let tmp_dir = TempDir::new("flashdeck")?;
        let uploader = Uploader::default();

        let res = uploader
            .export(&tmp_dir.path().join("flashcards.json"))
            .await?;

        assert_eq!(res, ExportOutcome::Empty);
        return Ok(());
    }

    #[tokio::test]
    async fn it_exports_the_last_batch() -> Result<()> {
        let tmp_dir = TempDir::new("flashdeck")?;
        let file_path = tmp_dir.path().join("flashcards.json");
        let mut uploader = Uploader::default();
        uploader.select(text_document())?;
        uploader
            .generate(&FakeGenerator::new(false), &Session::authenticated("abc123"))
            .await?;

        let res = uploader.export(&file_path).await?;

        assert_eq!(res, ExportOutcome::Written(file_path.clone()));
        let payload = tokio::fs::read_to_string(&file_path).await?;
        let parsed: Vec<Flashcard> = serde_json::from_str(&payload)?;
        assert_eq!(&parsed, uploader.flashcards().as_ref());

        return Ok(());
    }
}
