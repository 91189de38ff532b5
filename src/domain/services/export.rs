#[cfg(test)]
#[path = "export_test.rs"]
mod tests;

use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::Flashcard;

#[derive(Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// Nothing to export. No file is written.
    Empty,
}

/// Writes the collection as a pretty-printed JSON array.
pub async fn export_as_json(cards: &[Flashcard], path: &Path) -> Result<ExportOutcome> {
    if cards.is_empty() {
        tracing::warn!("no flashcards to export");
        return Ok(ExportOutcome::Empty);
    }

    let payload = serde_json::to_string_pretty(cards)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(path).await?;
    file.write_all(payload.as_bytes()).await?;
    file.flush().await?;

    tracing::info!(path = ?path, count = cards.len(), "exported flashcards");

    return Ok(ExportOutcome::Written(path.to_path_buf()));
}
