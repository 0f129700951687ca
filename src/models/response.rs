use serde::Serialize;

use crate::models::{DocumentKind, TargetLanguage};

/// Result of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    pub output_file_name: String,
    pub language: TargetLanguage,
    pub source_kind: DocumentKind,
    pub extracted_chars: usize,
    pub translated_chars: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub services: ServiceStatus,
    pub directories: DirectoryStatus,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub translation_backend: &'static str,
    pub translation_backend_configured: bool,
    pub pdf_extractor: bool,
    pub docx_extractor: bool,
}

#[derive(Debug, Serialize)]
pub struct DirectoryStatus {
    pub uploads: String,
    pub uploads_present: bool,
    pub translations: String,
    pub translations_present: bool,
}
