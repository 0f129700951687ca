use std::fmt;

/// Document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the kind from the text after the last `.` of a filename.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        Self::from_extension(extension)
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        if extension.eq_ignore_ascii_case("pdf") {
            Some(DocumentKind::Pdf)
        } else if extension.eq_ignore_ascii_case("docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => f.write_str("PDF"),
            DocumentKind::Docx => f.write_str("DOCX"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("essay.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("ESSAY.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("notes.v2.Docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename(".pdf"), Some(DocumentKind::Pdf));
    }

    #[test]
    fn test_unsupported_filenames() {
        assert_eq!(DocumentKind::from_filename("essay"), None);
        assert_eq!(DocumentKind::from_filename("essay.doc"), None);
        assert_eq!(DocumentKind::from_filename("essay.pdf.txt"), None);
        assert_eq!(DocumentKind::from_filename(""), None);
    }
}
