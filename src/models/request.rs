use bytes::Bytes;

use crate::models::{DocumentKind, TargetLanguage};

/// A translation request as it arrives from the upload form, before validation.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// `None` when the form carried no `file` part at all.
    pub file_name: Option<String>,
    pub content: Bytes,
    pub language: Option<String>,
}

impl UploadRequest {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>, language: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content: content.into(),
            language: Some(language.into()),
        }
    }
}

/// An upload that passed validation and is ready to be staged.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Sanitized name used on disk.
    pub name: String,
    pub original_name: String,
    pub kind: DocumentKind,
    pub size: usize,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(name: String, original_name: String, kind: DocumentKind, content: Bytes) -> Self {
        let size = content.len();
        Self {
            name,
            original_name,
            kind,
            size,
            content,
        }
    }

    /// `essay.pdf` becomes `essay_translated.docx`.
    pub fn output_file_name(&self) -> String {
        let base = self
            .name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name);
        format!("{}_translated.docx", base)
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub file: UploadedFile,
    pub language: TargetLanguage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let file = UploadedFile::new(
            "essay.pdf".to_string(),
            "essay.pdf".to_string(),
            DocumentKind::Pdf,
            Bytes::from_static(b"%PDF"),
        );
        assert_eq!(file.output_file_name(), "essay_translated.docx");
        assert_eq!(file.size, 4);

        let file = UploadedFile::new(
            "report.final.docx".to_string(),
            "report.final.docx".to_string(),
            DocumentKind::Docx,
            Bytes::new(),
        );
        assert_eq!(file.output_file_name(), "report.final_translated.docx");
    }
}
