use std::fmt;

/// Languages the service can translate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    Kinyarwanda,
    French,
    Swahili,
    Arabic,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 4] = [
        TargetLanguage::Kinyarwanda,
        TargetLanguage::French,
        TargetLanguage::Swahili,
        TargetLanguage::Arabic,
    ];

    /// Resolves a form key, ignoring ASCII case. Surrounding whitespace is not trimmed.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.key().eq_ignore_ascii_case(key))
    }

    pub fn key(&self) -> &'static str {
        match self {
            TargetLanguage::Kinyarwanda => "kinyarwanda",
            TargetLanguage::French => "french",
            TargetLanguage::Swahili => "swahili",
            TargetLanguage::Arabic => "arabic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Kinyarwanda => "Kinyarwanda",
            TargetLanguage::French => "French",
            TargetLanguage::Swahili => "Swahili",
            TargetLanguage::Arabic => "Arabic",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_resolve_case_insensitively() {
        assert_eq!(TargetLanguage::from_key("french"), Some(TargetLanguage::French));
        assert_eq!(TargetLanguage::from_key("FRENCH"), Some(TargetLanguage::French));
        assert_eq!(TargetLanguage::from_key("KinyaRwanda"), Some(TargetLanguage::Kinyarwanda));
        assert_eq!(TargetLanguage::from_key("Arabic"), Some(TargetLanguage::Arabic));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert_eq!(TargetLanguage::from_key(""), None);
        assert_eq!(TargetLanguage::from_key("german"), None);
        assert_eq!(TargetLanguage::from_key(" french"), None);
    }

    #[test]
    fn test_every_language_round_trips_through_its_key() {
        for language in TargetLanguage::ALL {
            assert_eq!(TargetLanguage::from_key(language.key()), Some(language));
        }
    }
}
