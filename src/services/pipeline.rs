use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    DocumentKind, TargetLanguage, TranslationOutcome, UploadRequest, UploadedFile, ValidatedUpload,
};
use crate::services::document_builder::build_document;
use crate::services::extractor::extract_text;
use crate::services::openai::OpenAiBackend;
use crate::services::sanitize::staged_file_name;
use crate::services::storage::WorkDirs;
use crate::services::translator::{
    TranslationBackend, TranslationClient, TranslationSettings,
};

/// Where a request is in the upload-to-download flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Validated,
    Staged,
    Extracted,
    Translated,
    Built,
    Delivered,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Received => "received",
            PipelineStage::Validated => "validated",
            PipelineStage::Staged => "staged",
            PipelineStage::Extracted => "extracted",
            PipelineStage::Translated => "translated",
            PipelineStage::Built => "built",
            PipelineStage::Delivered => "delivered",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Checks an upload request without touching the filesystem.
pub fn validate_upload(request: UploadRequest) -> AppResult<ValidatedUpload> {
    let original_name = request.file_name.ok_or(AppError::MissingFile)?;
    if original_name.is_empty() {
        return Err(AppError::EmptyFilename);
    }

    let kind = DocumentKind::from_filename(&original_name).ok_or_else(|| {
        AppError::UnsupportedFileType {
            file_name: original_name.clone(),
        }
    })?;

    let language_key = request.language.unwrap_or_default();
    let language = TargetLanguage::from_key(&language_key)
        .ok_or(AppError::UnsupportedLanguage {
            language: language_key,
        })?;

    let name = staged_file_name(&original_name, kind);
    Ok(ValidatedUpload {
        file: UploadedFile::new(name, original_name, kind, request.content),
        language,
    })
}

/// Upload → extract → translate → build, with the working directories and
/// translation backend injected.
#[derive(Clone)]
pub struct TranslationPipeline {
    dirs: WorkDirs,
    translator: TranslationClient,
}

impl TranslationPipeline {
    pub fn new(dirs: WorkDirs, translator: TranslationClient) -> Self {
        Self { dirs, translator }
    }

    /// Pipeline backed by the OpenAI-compatible client described by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_backend(config, Arc::new(OpenAiBackend::from_config(config)))
    }

    pub fn with_backend(config: &Config, backend: Arc<dyn TranslationBackend>) -> Self {
        Self::new(
            WorkDirs::from_config(config),
            TranslationClient::new(backend, TranslationSettings::new(config.openai_model.clone())),
        )
    }

    pub fn dirs(&self) -> &WorkDirs {
        &self.dirs
    }

    pub fn translator(&self) -> &TranslationClient {
        &self.translator
    }

    /// Runs one request to completion.
    ///
    /// Validation happens before any filesystem access. Once the upload is
    /// staged, it is removed after extraction or on any failure.
    pub async fn run(&self, request_id: &str, request: UploadRequest) -> AppResult<TranslationOutcome> {
        let start = Instant::now();
        let mut stage = PipelineStage::Received;

        let result = self.run_stages(request_id, request, &mut stage).await;
        match &result {
            Ok(outcome) => info!(
                request_id = %request_id,
                output = %outcome.output_file_name,
                total_time_ms = start.elapsed().as_millis() as u64,
                "Translation pipeline completed"
            ),
            Err(e) => warn!(
                request_id = %request_id,
                failed_after = %stage,
                stage = %PipelineStage::Failed,
                error_code = e.error_code(),
                category = %e.category(),
                error = %e,
                "Translation pipeline failed"
            ),
        }

        result.map(|mut outcome| {
            outcome.processing_time_ms = start.elapsed().as_millis() as u64;
            outcome
        })
    }

    async fn run_stages(
        &self,
        request_id: &str,
        request: UploadRequest,
        stage: &mut PipelineStage,
    ) -> AppResult<TranslationOutcome> {
        let ValidatedUpload { file, language } = validate_upload(request)?;
        advance(request_id, stage, PipelineStage::Validated);

        self.dirs.ensure().await?;
        let staged = self.dirs.stage(&file).await?;
        advance(request_id, stage, PipelineStage::Staged);

        let extraction = extract_text(staged.path(), file.kind).await?;
        staged.discard().await;
        info!(
            request_id = %request_id,
            sections = extraction.sections,
            extraction_time_ms = extraction.processing_time_ms,
            "Source text extracted"
        );
        advance(request_id, stage, PipelineStage::Extracted);

        let translated = self.translator.translate(&extraction.text, language).await?;
        advance(request_id, stage, PipelineStage::Translated);

        let output_file_name = file.output_file_name();
        let output_path = self.dirs.output_path(&output_file_name);
        let translated_chars = translated.len();
        build_document(translated, output_path).await?;
        advance(request_id, stage, PipelineStage::Built);

        Ok(TranslationOutcome {
            output_file_name,
            language,
            source_kind: file.kind,
            extracted_chars: extraction.text.len(),
            translated_chars,
            processing_time_ms: 0,
        })
    }
}

fn advance(request_id: &str, stage: &mut PipelineStage, next: PipelineStage) {
    info!(request_id = %request_id, from = %stage, to = %next, "Pipeline stage");
    *stage = next;
}
