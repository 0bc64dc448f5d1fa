use tracing::debug;

use crate::models::{Continent, GroupedContinent};
use crate::taxonomy::countries;

/// Resolves raw country tokens (alpha-2 codes, full names, known aliases,
/// malformed strings) to continents. Resolution never fails hard: anything
/// the tables cannot place yields `None`, which callers report as Unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinentMapper;

impl ContinentMapper {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a token that is already (close to) an ISO alpha-2 code.
    /// Two-letter tokens are trusted as-is; there is no master-list check.
    pub fn normalize_alpha2(&self, token: Option<&str>) -> Option<String> {
        let token = token?.trim();

        if let Some(fixed) = countries::code_fix(token) {
            return Some(fixed.to_string());
        }

        if token.len() == 2 && token.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(token.to_ascii_uppercase());
        }

        None
    }

    /// Full-name lookup, retried once with periods and commas stripped.
    pub fn name_to_alpha2(&self, name: Option<&str>) -> Option<String> {
        let name = name?.trim();

        if let Some(fixed) = countries::code_fix(name) {
            return Some(fixed.to_string());
        }

        if let Some(code) = countries::name_to_alpha2(name) {
            return Some(code.to_string());
        }

        let cleaned: String = name.chars().filter(|c| *c != '.' && *c != ',').collect();
        match countries::name_to_alpha2(&cleaned) {
            Some(code) => Some(code.to_string()),
            None => {
                debug!("could not convert country name: {}", name);
                None
            }
        }
    }

    /// Code or name to alpha-2: code normalization first, then name lookup.
    pub fn country_to_alpha2(&self, token: Option<&str>) -> Option<String> {
        self.normalize_alpha2(token)
            .or_else(|| self.name_to_alpha2(token))
    }

    pub fn alpha2_to_continent(&self, code: Option<&str>) -> Option<Continent> {
        let code = code?;
        let continent = countries::alpha2_continent(code);
        if continent.is_none() {
            debug!("no continent for country code: {}", code);
        }
        continent
    }

    /// Country (code or name) straight to continent; `None` on any failure.
    pub fn country_to_continent(&self, token: Option<&str>) -> Option<Continent> {
        let code = self.country_to_alpha2(token)?;
        self.alpha2_to_continent(Some(&code))
    }

    /// Collapse into the four-bucket reporting taxonomy.
    pub fn group(&self, continent: Option<Continent>) -> GroupedContinent {
        GroupedContinent::from_resolved(continent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_letter_codes_pass_through_uppercased() {
        let mapper = ContinentMapper::new();
        assert_eq!(mapper.normalize_alpha2(Some("us")), Some("US".to_string()));
        assert_eq!(mapper.normalize_alpha2(Some("DE")), Some("DE".to_string()));
        assert_eq!(mapper.normalize_alpha2(Some(" fr ")), Some("FR".to_string()));
        // Idempotent: resolving an already-resolved code changes nothing.
        assert_eq!(mapper.normalize_alpha2(Some("US")), Some("US".to_string()));
        assert_eq!(mapper.normalize_alpha2(Some("u5")), None);
        assert_eq!(mapper.normalize_alpha2(None), None);
    }

    #[test]
    fn test_fixes_take_precedence() {
        let mapper = ContinentMapper::new();
        // "UK" is two alphabetic characters but must map to GB, not UK.
        assert_eq!(mapper.country_to_alpha2(Some("UK")), Some("GB".to_string()));
        assert_eq!(mapper.country_to_alpha2(Some("USA")), Some("US".to_string()));
        assert_eq!(
            mapper.country_to_alpha2(Some("South Korea")),
            Some("KR".to_string())
        );
    }

    #[test]
    fn test_name_lookup_with_punctuation_retry() {
        let mapper = ContinentMapper::new();
        assert_eq!(
            mapper.country_to_alpha2(Some("Germany")),
            Some("DE".to_string())
        );
        assert_eq!(
            mapper.country_to_alpha2(Some("United. States,")),
            Some("US".to_string())
        );
        assert_eq!(mapper.country_to_alpha2(Some("Nowhereland")), None);
    }

    #[test]
    fn test_country_to_continent() {
        let mapper = ContinentMapper::new();
        assert_eq!(
            mapper.country_to_continent(Some("US")),
            Some(Continent::NorthAmerica)
        );
        assert_eq!(
            mapper.country_to_continent(Some("Switzerland")),
            Some(Continent::Europe)
        );
        assert_eq!(mapper.country_to_continent(Some("???")), None);
        assert_eq!(mapper.country_to_continent(None), None);
    }

    #[test]
    fn test_grouping_is_total() {
        let mapper = ContinentMapper::new();
        let cases = [
            (Some(Continent::NorthAmerica), GroupedContinent::NorthAmerica),
            (Some(Continent::Europe), GroupedContinent::Europe),
            (Some(Continent::Asia), GroupedContinent::Asia),
            (Some(Continent::SouthAmerica), GroupedContinent::Others),
            (Some(Continent::Oceania), GroupedContinent::Others),
            (Some(Continent::Africa), GroupedContinent::Others),
            (Some(Continent::Unknown), GroupedContinent::Unknown),
            (None, GroupedContinent::Unknown),
        ];
        for (input, expected) in cases {
            assert_eq!(mapper.group(input), expected);
        }
    }
}
