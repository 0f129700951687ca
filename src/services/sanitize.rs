//! Filename sanitizing for anything that touches the working directories.

use crate::models::DocumentKind;

const FALLBACK_STEM: &str = "document";

/// Reduces a client-supplied filename to `[A-Za-z0-9_.-]`.
///
/// Path separators become whitespace, whitespace runs become a single `_`,
/// every other character outside the allowed set is dropped, and leading or
/// trailing `.`/`_` are stripped. The result never contains a path component
/// and may be empty.
pub fn secure_filename(name: &str) -> String {
    let spaced = name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Name under which an upload of `kind` is staged.
///
/// Falls back to `document.<ext>` when sanitizing leaves nothing usable or
/// strips the extension the upload was validated with.
pub fn staged_file_name(original: &str, kind: DocumentKind) -> String {
    let sanitized = secure_filename(original);
    if DocumentKind::from_filename(&sanitized) == Some(kind) {
        sanitized
    } else {
        format!("{}.{}", FALLBACK_STEM, kind.extension())
    }
}
