use crate::models::{Author, Continent};
use crate::taxonomy::countries;

/// Outcome of the per-paper continent vote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredominanceResult {
    /// Every continent tied at the maximum vote count, in first-seen order.
    pub continents: Vec<Continent>,
    pub authors_without_institutions: usize,
    pub unresolved_countries: usize,
}

/// Majority vote over per-author unique countries.
///
/// Votes are counted per author, not per institution: an author affiliated
/// with two institutions in the same country votes once. Authors with no
/// institution data are counted separately and cast no vote. Unresolvable
/// country tokens vote for the Unknown bucket so that mostly-unknown papers
/// do not get a spurious winner from a single resolved author.
pub fn predominant_continent(authors: &[Author]) -> PredominanceResult {
    let mut result = PredominanceResult::default();
    // Ordered pairs, not a hash map: ties must come out in first-seen order.
    let mut votes: Vec<(Continent, u32)> = Vec::new();

    for author in authors {
        if author.institutions.is_empty() {
            result.authors_without_institutions += 1;
            continue;
        }

        let mut unique_countries: Vec<Option<&str>> = Vec::new();
        for institution in &author.institutions {
            let country = institution.country.as_deref();
            if !unique_countries.contains(&country) {
                unique_countries.push(country);
            }
        }

        for country in unique_countries {
            let continent = resolve_vote(country, &mut result.unresolved_countries);
            match votes.iter_mut().find(|(c, _)| *c == continent) {
                Some((_, count)) => *count += 1,
                None => votes.push((continent, 1)),
            }
        }
    }

    if votes.is_empty() {
        return result;
    }

    let max_count = votes.iter().map(|(_, count)| *count).max().unwrap_or(0);
    result.continents = votes
        .iter()
        .filter(|(_, count)| *count == max_count)
        .map(|(continent, _)| *continent)
        .collect();

    result
}

/// Strict resolution for vote counting: only bare alpha-2 codes are accepted;
/// anything else is one Unknown vote.
fn resolve_vote(country: Option<&str>, unresolved: &mut usize) -> Continent {
    let token = match country {
        Some(token) => token.trim(),
        None => {
            *unresolved += 1;
            return Continent::Unknown;
        }
    };

    if token.chars().count() != 2 {
        *unresolved += 1;
        return Continent::Unknown;
    }

    match countries::alpha2_continent(token.to_ascii_uppercase().as_str()) {
        Some(continent) => continent,
        None => {
            *unresolved += 1;
            Continent::Unknown
        }
    }
}
