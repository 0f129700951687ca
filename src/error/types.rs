use std::fmt;

use thiserror::Error;

use crate::models::DocumentKind;

pub type AppResult<T> = Result<T, AppError>;

/// Coarse grouping of failures, one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Extraction,
    Translation,
    Build,
    Delivery,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Extraction => "extraction",
            ErrorCategory::Translation => "translation",
            ErrorCategory::Build => "build",
            ErrorCategory::Delivery => "delivery",
            ErrorCategory::Internal => "internal",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file selected. Please upload a document.")]
    MissingFile,

    #[error("No file selected. Please choose a file to upload.")]
    EmptyFilename,

    #[error("Invalid file type. Please upload a PDF or DOCX file.")]
    UnsupportedFileType { file_name: String },

    #[error("Invalid language selected. Please choose Kinyarwanda, French, Swahili, or Arabic.")]
    UnsupportedLanguage { language: String },

    #[error("File too large. The maximum upload size is {limit_mb}MB.")]
    FileTooLarge { limit_mb: usize },

    #[error("Invalid upload: {message}")]
    InvalidUpload { message: String },

    #[error("Error extracting text from {kind}: {message}")]
    ExtractionFailed { kind: DocumentKind, message: String },

    #[error("No text could be extracted from the document. The file may be empty or corrupted.")]
    NoExtractableText,

    #[error("No text to translate")]
    EmptyTranslationInput,

    #[error("Error during translation: {message}")]
    TranslationFailed { transient: bool, message: String },

    #[error("Error creating DOCX file: {message}")]
    BuildFailed { message: String },

    #[error("File not found.")]
    FileNotFound { file_name: String },

    #[error("No file to download.")]
    NothingToDownload,

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingFile => "MISSING_FILE",
            AppError::EmptyFilename => "EMPTY_FILENAME",
            AppError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            AppError::UnsupportedLanguage { .. } => "UNSUPPORTED_LANGUAGE",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::InvalidUpload { .. } => "INVALID_UPLOAD",
            AppError::ExtractionFailed { .. } => "EXTRACTION_FAILED",
            AppError::NoExtractableText => "NO_EXTRACTABLE_TEXT",
            AppError::EmptyTranslationInput => "EMPTY_TRANSLATION_INPUT",
            AppError::TranslationFailed { .. } => "TRANSLATION_FAILED",
            AppError::BuildFailed { .. } => "BUILD_FAILED",
            AppError::FileNotFound { .. } => "FILE_NOT_FOUND",
            AppError::NothingToDownload => "NOTHING_TO_DOWNLOAD",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::MissingFile
            | AppError::EmptyFilename
            | AppError::UnsupportedFileType { .. }
            | AppError::UnsupportedLanguage { .. }
            | AppError::FileTooLarge { .. }
            | AppError::InvalidUpload { .. } => ErrorCategory::Validation,
            AppError::ExtractionFailed { .. } | AppError::NoExtractableText => {
                ErrorCategory::Extraction
            }
            AppError::EmptyTranslationInput | AppError::TranslationFailed { .. } => {
                ErrorCategory::Translation
            }
            AppError::BuildFailed { .. } => ErrorCategory::Build,
            AppError::FileNotFound { .. } | AppError::NothingToDownload => ErrorCategory::Delivery,
            AppError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::TranslationFailed { transient: true, .. })
    }

    /// Text shown to the user in the flash message after redirecting to the form.
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Delivery => self.to_string(),
            _ if self.is_transient() => format!(
                "Error processing document: {} The translation service may be busy, please try again shortly.",
                self
            ),
            _ => format!("Error processing document: {}", self),
        }
    }
}

// Helper methods for creating specific errors
impl AppError {
    pub fn extraction(kind: DocumentKind, message: impl Into<String>) -> Self {
        AppError::ExtractionFailed {
            kind,
            message: message.into(),
        }
    }

    pub fn transient_translation(message: impl Into<String>) -> Self {
        AppError::TranslationFailed {
            transient: true,
            message: message.into(),
        }
    }

    pub fn permanent_translation(message: impl Into<String>) -> Self {
        AppError::TranslationFailed {
            transient: false,
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        AppError::BuildFailed {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failures_share_a_category_but_not_a_code() {
        let parse = AppError::extraction(DocumentKind::Pdf, "bad xref");
        let empty = AppError::NoExtractableText;

        assert_eq!(parse.category(), ErrorCategory::Extraction);
        assert_eq!(empty.category(), ErrorCategory::Extraction);
        assert_ne!(parse.error_code(), empty.error_code());
        assert_eq!(parse.to_string(), "Error extracting text from PDF: bad xref");
    }

    #[test]
    fn test_user_message_prefixes_pipeline_failures() {
        assert_eq!(
            AppError::UnsupportedFileType { file_name: "a.txt".into() }.user_message(),
            "Invalid file type. Please upload a PDF or DOCX file."
        );
        assert_eq!(
            AppError::build("disk full").user_message(),
            "Error processing document: Error creating DOCX file: disk full"
        );
        assert_eq!(
            AppError::FileNotFound { file_name: "x.docx".into() }.user_message(),
            "File not found."
        );
    }

    #[test]
    fn test_transient_translation_failures_ask_for_a_retry() {
        let transient = AppError::transient_translation("HTTP 503");
        let permanent = AppError::permanent_translation("HTTP 401");

        assert!(transient.is_transient());
        assert!(!permanent.is_transient());
        assert!(transient.user_message().contains("try again"));
        assert!(!permanent.user_message().contains("try again"));
        assert_eq!(transient.error_code(), permanent.error_code());
    }
}
