use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{Docx, Paragraph, Run};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Lays translated text out as one paragraph per non-blank line.
pub fn compose_docx(text: &str) -> (Docx, usize) {
    let mut docx = Docx::new();
    let mut paragraphs = 0;
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
        paragraphs += 1;
    }
    (docx, paragraphs)
}

fn write_docx(docx: Docx, path: &Path) -> AppResult<()> {
    write_output_file(path, |file| docx.build().pack(file).map_err(|e| e.to_string()))
}

/// Creates `path` and fills it with `write`. A file left half-written by a
/// failed `write` is removed so it can never be downloaded.
fn write_output_file<F>(path: &Path, write: F) -> AppResult<()>
where
    F: FnOnce(&mut File) -> Result<(), String>,
{
    let mut file = File::create(path)
        .map_err(|e| AppError::build(format!("Failed to create {}: {}", path.display(), e)))?;

    if let Err(e) = write(&mut file) {
        drop(file);
        if let Err(remove_err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %remove_err, "Failed to remove partial document");
        }
        return Err(AppError::build(format!("Failed to write {}: {}", path.display(), e)));
    }
    Ok(())
}

/// Writes `text` as a new DOCX at `path`, replacing any existing file.
///
/// Returns the number of paragraphs written.
pub async fn build_document(text: String, path: PathBuf) -> AppResult<usize> {
    tokio::task::spawn_blocking(move || {
        let (docx, paragraphs) = compose_docx(&text);
        write_docx(docx, &path)?;
        info!(path = %path.display(), paragraphs, "Translated document written");
        Ok(paragraphs)
    })
    .await
    .map_err(|e| AppError::build(format!("document writer task failed: {}", e)))?
}
