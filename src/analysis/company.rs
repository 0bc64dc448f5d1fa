use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Author, Classification};
use crate::taxonomy::BIG_TECH_COMPANIES;

/// Whole-word alternation over the company catalog, compiled once at startup.
/// Word boundaries keep "ibm" from matching inside "ibmresearchlab" while
/// still matching "IBM Research" or "IBM,".
static COMPANY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let escaped: Vec<String> = BIG_TECH_COMPANIES
        .iter()
        .map(|name| regex::escape(name))
        .collect();
    let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
    Regex::new(&pattern)
        .unwrap_or_else(|e| panic!("failed to compile company catalog pattern: {}", e))
});

/// Classifies papers as big-tech-affiliated, academia-only, or lacking
/// institution data entirely.
#[derive(Debug, Clone, Copy)]
pub struct CompanyClassifier {
    pattern: &'static Regex,
}

impl CompanyClassifier {
    pub fn new() -> Self {
        Self {
            pattern: &COMPANY_PATTERN,
        }
    }

    /// Institution names for classification. An empty author list and an
    /// author with no affiliation data each contribute a `None` marker, so
    /// "no data" stays distinguishable from "known but academic".
    pub fn extract_institutions(&self, authors: &[Author]) -> Vec<Option<String>> {
        if authors.is_empty() {
            return vec![None];
        }

        let mut names = Vec::new();
        for author in authors {
            if author.institutions.is_empty() {
                names.push(None);
                continue;
            }
            for institution in &author.institutions {
                if let Some(name) = institution.name.as_deref() {
                    let name = name.trim();
                    if !name.is_empty() {
                        names.push(Some(name.to_lowercase()));
                    }
                }
            }
        }
        names
    }

    /// Three-way split over a paper's institution names. First catalog match
    /// wins; scanning stops there.
    pub fn classify(&self, institutions: &[Option<String>]) -> Classification {
        if institutions.is_empty() {
            return Classification::AllUnknown;
        }

        let mut saw_known_name = false;
        let mut saw_company = false;

        for name in institutions {
            let name = match name {
                Some(name) => name,
                None => continue,
            };
            saw_known_name = true;
            if self.pattern.is_match(name) {
                saw_company = true;
                break;
            }
        }

        if !saw_known_name {
            return Classification::AllUnknown;
        }

        if saw_company {
            Classification::HasBigTech
        } else {
            Classification::NoBigTech
        }
    }

    pub fn classify_authors(&self, authors: &[Author]) -> Classification {
        self.classify(&self.extract_institutions(authors))
    }
}

impl Default for CompanyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(String::from)).collect()
    }

    #[test]
    fn test_empty_input_is_all_unknown() {
        let classifier = CompanyClassifier::new();
        assert_eq!(classifier.classify(&[]), Classification::AllUnknown);
        assert_eq!(
            classifier.classify(&names(&[None, None])),
            Classification::AllUnknown
        );
    }

    #[test]
    fn test_academia_only() {
        let classifier = CompanyClassifier::new();
        assert_eq!(
            classifier.classify(&names(&[Some("Stanford University")])),
            Classification::NoBigTech
        );
    }

    #[test]
    fn test_any_company_match_wins() {
        let classifier = CompanyClassifier::new();
        assert_eq!(
            classifier.classify(&names(&[Some("Google Research"), Some("MIT")])),
            Classification::HasBigTech
        );
        assert_eq!(
            classifier.classify(&names(&[None, Some("Microsoft")])),
            Classification::HasBigTech
        );
    }

    #[test]
    fn test_whole_word_matching() {
        let classifier = CompanyClassifier::new();
        // "ibm" must not match as a substring of an unrelated token.
        assert_eq!(
            classifier.classify(&names(&[Some("Ibmresearchlab University")])),
            Classification::NoBigTech
        );
        assert_eq!(
            classifier.classify(&names(&[Some("IBM Research")])),
            Classification::HasBigTech
        );
        assert_eq!(
            classifier.classify(&names(&[Some("ibm,")])),
            Classification::HasBigTech
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let classifier = CompanyClassifier::new();
        assert_eq!(
            classifier.classify(&names(&[Some("NVIDIA Corporation")])),
            Classification::HasBigTech
        );
    }

    #[test]
    fn test_multi_word_alias() {
        let classifier = CompanyClassifier::new();
        assert_eq!(
            classifier.classify(&names(&[Some("hewlett packard enterprise labs")])),
            Classification::HasBigTech
        );
    }
}
