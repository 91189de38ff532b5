#[cfg(test)]
#[path = "document_test.rs"]
mod tests;

use std::path::Path;

use anyhow::Result;
use tokio::fs;

pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TEXT: &str = "text/plain";

pub fn mime_from_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| return e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => return MIME_PDF,
        "txt" => return MIME_TEXT,
        "md" => return "text/markdown",
        "json" => return "application/json",
        "png" => return "image/png",
        "jpg" | "jpeg" => return "image/jpeg",
        "docx" => {
            return "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => return "application/octet-stream",
    }
}

/// A locally selected file, ready to be validated and uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: &str, mime: &str, bytes: Vec<u8>) -> Document {
        return Document {
            name: name.to_string(),
            mime: mime.to_string(),
            size: bytes.len() as u64,
            bytes,
        };
    }

    /// Contents are only read for files within the upload limit. Larger files
    /// keep their reported size so validation can reject them.
    pub async fn from_path(path: &Path) -> Result<Document> {
        let name = path
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_else(|| return path.to_string_lossy().to_string());
        let mime = mime_from_path(path);

        let metadata = fs::metadata(path).await?;
        if metadata.len() > MAX_FILE_SIZE {
            return Ok(Document {
                name,
                mime: mime.to_string(),
                size: metadata.len(),
                bytes: vec![],
            });
        }

        let bytes = fs::read(path).await?;
        return Ok(Document::new(&name, mime, bytes));
    }

    pub fn is_text(&self) -> bool {
        return self.mime == MIME_TEXT;
    }
}
