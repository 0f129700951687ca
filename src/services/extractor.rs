use std::panic;
use std::path::Path;
use std::time::Instant;

use docx_rs::{read_docx, DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};
use lopdf::Document;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::DocumentKind;

#[derive(Debug)]
pub struct ExtractionResult {
    pub text: String,
    /// Pages for PDFs, paragraphs for DOCX.
    pub sections: usize,
    pub processing_time_ms: u64,
}

/// Turns the raw bytes of one document format into plain text.
pub trait TextExtractor: Send + Sync {
    fn kind(&self) -> DocumentKind;

    /// Returns the text and the number of sections it was assembled from.
    fn extract(&self, content: &[u8]) -> AppResult<(String, usize)>;
}

pub struct PdfExtractor;

pub struct DocxExtractor;

/// Extraction strategy for each document kind.
pub fn extractor_for(kind: DocumentKind) -> &'static dyn TextExtractor {
    match kind {
        DocumentKind::Pdf => &PdfExtractor,
        DocumentKind::Docx => &DocxExtractor,
    }
}

/// Extracts the text of a staged document.
///
/// An empty file, or a document whose text is only whitespace, fails with
/// [`AppError::NoExtractableText`]; parser failures (including panics inside
/// a parser) fail with [`AppError::ExtractionFailed`].
pub async fn extract_text(path: &Path, kind: DocumentKind) -> AppResult<ExtractionResult> {
    let start = Instant::now();

    let content = tokio::fs::read(path).await.map_err(|e| {
        AppError::extraction(kind, format!("Failed to read {}: {}", path.display(), e))
    })?;

    info!(
        "Starting {} text extraction for file: {} ({} bytes)",
        kind,
        path.display(),
        content.len()
    );

    if content.is_empty() {
        warn!(path = %path.display(), "Staged file is empty, nothing to extract");
        return Err(AppError::NoExtractableText);
    }

    let extractor = extractor_for(kind);
    let (text, sections) = tokio::task::spawn_blocking(move || extractor.extract(&content))
        .await
        .map_err(|e| {
            warn!(error = %e, "{} parser task failed", kind);
            AppError::extraction(kind, "the document parser crashed")
        })??;

    let text = text.trim().to_string();
    if text.is_empty() {
        warn!(path = %path.display(), sections, "Document parsed but contains no text");
        return Err(AppError::NoExtractableText);
    }

    let processing_time_ms = start.elapsed().as_millis() as u64;
    info!(
        "{} extraction completed in {}ms, extracted {} characters from {} sections",
        kind,
        processing_time_ms,
        text.len(),
        sections
    );

    Ok(ExtractionResult {
        text,
        sections,
        processing_time_ms,
    })
}

impl TextExtractor for PdfExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn extract(&self, content: &[u8]) -> AppResult<(String, usize)> {
        // pdf-extract panics on font data it does not support.
        let primary = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(content))
            .map_err(|_| "pdf-extract panicked".to_string())
            .and_then(|pages| pages.map_err(|e| e.to_string()));

        let primary_error = match primary {
            Ok(pages) if pages.iter().any(|page| !page.trim().is_empty()) => {
                let mut text = String::new();
                for page in &pages {
                    text.push_str(page);
                    text.push('\n');
                }
                debug!("PDF text extraction successful, {} pages, {} characters", pages.len(), text.len());
                return Ok((text, pages.len()));
            }
            Ok(pages) => {
                debug!("pdf-extract found no text in {} pages, trying lopdf", pages.len());
                None
            }
            Err(e) => {
                warn!("PDF text extraction failed: {}, trying lopdf", e);
                Some(e)
            }
        };

        match lopdf_page_text(content) {
            Ok(result) => Ok(result),
            Err(e) => match primary_error {
                Some(primary_error) => Err(AppError::extraction(
                    DocumentKind::Pdf,
                    format!("{} (fallback parser: {})", primary_error, e),
                )),
                // Parsed but empty; the caller reports it as no extractable text.
                None => Ok((String::new(), 0)),
            },
        }
    }
}

// lopdf substitutes this marker for text in fonts it cannot decode.
const LOPDF_UNDECODED: &str = "?Identity-H Unimplemented?";

fn lopdf_page_text(content: &[u8]) -> Result<(String, usize), lopdf::Error> {
    let document = Document::load_mem(content)?;
    let pages = document.get_pages();

    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = document.extract_text(&[*page_number])?;
        text.push_str(&page_text.replace(LOPDF_UNDECODED, ""));
        text.push('\n');
    }

    debug!("lopdf page extraction successful, {} pages, {} characters", pages.len(), text.len());
    Ok((text, pages.len()))
}

impl TextExtractor for DocxExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
    }

    fn extract(&self, content: &[u8]) -> AppResult<(String, usize)> {
        let docx = read_docx(content)
            .map_err(|e| AppError::extraction(DocumentKind::Docx, e.to_string()))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        debug!("DOCX extraction successful, {} paragraphs", paragraphs.len());
        Ok((paragraphs.join("\n"), paragraphs.len()))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

// Hyperlinks and tracked insertions wrap their own runs.
fn push_children_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, out),
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let InsertChild::Run(run) = child {
                        push_run_text(run, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
