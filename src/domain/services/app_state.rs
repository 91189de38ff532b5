#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;

use super::ExportOutcome;
use super::SessionStore;
use super::StudySession;
use super::Uploader;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Document;
use crate::domain::models::Flashcard;
use crate::domain::models::GenerationRequest;
use crate::domain::models::Status;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Upload,
    Study,
}

pub struct AppState {
    pub session: SessionStore,
    pub uploader: Uploader,
    pub study: Option<StudySession>,
    pub screen: Screen,
    pub status: Option<Status>,
    pub export_path: PathBuf,
}

impl AppState {
    pub fn new(session: SessionStore, uploader: Uploader, export_path: PathBuf) -> AppState {
        let screen = if session.current_user().is_authenticated() {
            Screen::Upload
        } else {
            Screen::Login
        };

        return AppState {
            session,
            uploader,
            study: None,
            screen,
            status: None,
            export_path,
        };
    }

    pub async fn from_config() -> Result<AppState> {
        let session = SessionStore::from_config().await?;
        let uploader = Uploader::new(Config::language()?, Config::num_flashcards()?);
        let export_path = PathBuf::from(Config::get(ConfigKey::ExportPath));

        let mut app_state = AppState::new(session, uploader, export_path);

        let file = Config::get(ConfigKey::File);
        if !file.is_empty() {
            app_state.select_path(&file).await;
        }

        return Ok(app_state);
    }

    pub fn login(&mut self, token: &str) {
        self.session.login(token);
        self.screen = Screen::Upload;
        self.status = Some(Status::info("Logged in."));
    }

    /// Nothing studied or uploaded survives a logout.
    pub fn logout(&mut self) {
        self.session.logout();
        self.uploader.clear();
        self.study = None;
        self.screen = Screen::Login;
        self.status = Some(Status::info("Logged out."));
    }

    pub async fn select_path(&mut self, path: &str) {
        let document = match Document::from_path(Path::new(path.trim())).await {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(path, error = ?err, "failed to read document");
                self.status = Some(Status::error(&format!("Could not read {}", path.trim())));
                return;
            }
        };

        if self.uploader.select(document).is_ok() {
            self.status = None;
        }
    }

    /// Packages the selected document for the actions worker. Returns nothing
    /// when a request cannot be made right now, with the reason as status.
    pub fn submit(&mut self) -> Option<GenerationRequest> {
        match self.uploader.begin(self.session.current_user()) {
            Ok(request) => {
                self.status = None;
                return Some(request);
            }
            Err(err) => {
                self.status = Some(Status::warning(&err.to_string()));
                return None;
            }
        }
    }

    /// A new batch restarts the study session from the first card. A failed
    /// generation keeps whatever was being studied.
    pub fn handle_generation_result(&mut self, result: Result<Vec<Flashcard>>) {
        if !self.session.current_user().is_authenticated() {
            tracing::info!("dropping generation result that arrived after logout");
            let _ = self.uploader.finish(result);
            self.uploader.clear();
            return;
        }

        match self.uploader.finish(result) {
            Ok(cards) => {
                if cards.is_empty() {
                    self.study = None;
                    self.status = Some(Status::warning("The service returned no flashcards."));
                    return;
                }

                self.study = Some(StudySession::new(cards));
                self.screen = Screen::Study;
                self.status = Some(Status::info("Flashcards generated successfully!"));
            }
            Err(_) => {
                self.status = Some(Status::error("Failed to generate flashcards"));
            }
        }
    }

    pub async fn export(&mut self) {
        match self.uploader.export(&self.export_path).await {
            Ok(ExportOutcome::Written(path)) => {
                self.status = Some(Status::info(&format!(
                    "Flashcards saved to {}",
                    path.to_string_lossy()
                )));
            }
            Ok(ExportOutcome::Empty) => {
                self.status = Some(Status::warning("No flashcards to export"));
            }
            Err(err) => {
                tracing::error!(error = ?err, "export failed");
                self.status = Some(Status::error("Failed to export flashcards"));
            }
        }
    }

    pub fn open_study(&mut self) {
        if self.study.is_none() {
            let cards = self.uploader.flashcards();
            if cards.is_empty() {
                self.status = Some(Status::warning("Generate flashcards before studying."));
                return;
            }
            self.study = Some(StudySession::new(cards));
        }

        self.screen = Screen::Study;
    }

    pub fn open_upload(&mut self) {
        self.screen = Screen::Upload;
    }
}
