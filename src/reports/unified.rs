//! Unified tabular datasets: papers, committee rosters and citation counts
//! flattened into per-row records.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::analysis::ContinentMapper;
use crate::error::Result;
use crate::ingest;
use crate::models::Continent;
use crate::reports::{write_rows, CsvReport};
use crate::taxonomy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaperRow {
    #[serde(rename = "Conference")]
    pub conference: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Predominant Continent")]
    pub predominant_continent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitteeRow {
    #[serde(rename = "Conference")]
    pub conference: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Institution")]
    pub institution: Option<String>,
    #[serde(rename = "Continent")]
    pub continent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitationRow {
    #[serde(rename = "Conference")]
    pub conference: String,
    #[serde(rename = "Continent")]
    pub continent: String,
    #[serde(rename = "Num_Papers")]
    pub num_papers: u64,
}

pub struct UnifiedCsvGenerator {
    mapper: ContinentMapper,
}

impl UnifiedCsvGenerator {
    pub fn new() -> Self {
        Self {
            mapper: ContinentMapper::new(),
        }
    }

    /// One row per paper across all processed conference files. The continent
    /// column holds the first element of the tie set, or stays empty.
    pub fn generate_papers_csv(&self, processed_dir: &Path, output: &Path) -> Result<CsvReport> {
        let mut rows = Vec::new();

        for stem in ingest::conference_stems(processed_dir, "_data.json")? {
            if taxonomy::is_duplicate_stem(&stem) {
                continue;
            }
            let path = processed_dir.join(format!("{}_data.json", stem));
            let years = match ingest::processed_by_year(&path) {
                Ok(years) => years,
                Err(e) => {
                    warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            for (year, papers) in years {
                for paper in papers {
                    rows.push(PaperRow {
                        conference: stem.clone(),
                        year: year.clone(),
                        title: paper.title,
                        predominant_continent: paper
                            .predominant_continent
                            .first()
                            .map(|c| c.code().to_string()),
                    });
                }
            }
        }

        write_rows(output, &rows)
    }

    /// One row per committee member per year. The member value is either an
    /// institution-to-country object or, in the degraded crawl format, a bare
    /// country string; both are accepted.
    pub fn generate_committee_csv(&self, committee_dir: &Path, output: &Path) -> Result<CsvReport> {
        let mut rows = Vec::new();

        for stem in ingest::conference_stems(committee_dir, "_committee.json")? {
            let path = committee_dir.join(format!("{}_committee.json", stem));
            let data = match ingest::load_json(&path) {
                Ok(data) => data,
                Err(e) => {
                    warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            let Value::Object(years) = data else {
                warn!("skipping {}: expected a year-to-members object", path.display());
                continue;
            };

            for (year, members) in years {
                let Value::Object(members) = members else {
                    continue;
                };

                for (member_name, affiliations) in members {
                    let mut institutions = Vec::new();
                    let mut countries = Vec::new();

                    match affiliations {
                        Value::Object(by_institution) => {
                            for (institution, country) in by_institution {
                                institutions.push(institution);
                                if let Value::String(country) = country {
                                    if !country.is_empty() {
                                        countries.push(country);
                                    }
                                }
                            }
                        }
                        Value::String(country) => countries.push(country),
                        _ => {}
                    }

                    let institution = {
                        let joined = institutions
                            .iter()
                            .filter(|name| !name.is_empty())
                            .cloned()
                            .collect::<Vec<_>>()
                            .join(";");
                        (!joined.is_empty()).then_some(joined)
                    };

                    let continents: BTreeSet<&'static str> = countries
                        .iter()
                        .filter_map(|country| {
                            self.mapper.country_to_continent(Some(country.as_str()))
                        })
                        .map(Continent::code)
                        .collect();
                    let continent = (!continents.is_empty())
                        .then(|| continents.into_iter().collect::<Vec<_>>().join(";"));

                    rows.push(CommitteeRow {
                        conference: stem.clone(),
                        year: year.clone(),
                        name: member_name,
                        institution,
                        continent,
                    });
                }
            }
        }

        write_rows(output, &rows)
    }

    /// Citation counts per conference and continent. Counts are raw citing-
    /// paper occurrences, with continents deduplicated within each citing
    /// paper; there is no predominance vote on the citation side.
    pub fn generate_citations_csv(&self, citations_dir: &Path, output: &Path) -> Result<CsvReport> {
        let intermediate_dir = citations_dir.join("IntermediateCitations");

        let mut stems = ingest::conference_stems(citations_dir, "_citations_data.json")?;
        if intermediate_dir.is_dir() {
            for stem in ingest::conference_stems(&intermediate_dir, "_citations_s2.json")? {
                if !stems.contains(&stem) {
                    stems.push(stem);
                }
            }
        }
        stems.sort();

        let mut rows = Vec::new();

        for stem in stems {
            let primary = citations_dir.join(format!("{}_citations_data.json", stem));
            let fallback = intermediate_dir.join(format!("{}_citations_s2.json", stem));
            let path = if primary.exists() { primary } else { fallback };

            let data = match ingest::load_json(&path) {
                Ok(data) => data,
                Err(e) => {
                    warn!("skipping citation file {}: {}", path.display(), e);
                    continue;
                }
            };

            let Value::Object(cited) = data else {
                warn!("skipping empty citation file: {}", path.display());
                continue;
            };
            if cited.is_empty() {
                warn!("skipping empty citation file: {}", path.display());
                continue;
            }

            // First-seen ordering keeps output rows stable run to run.
            let mut counts: Vec<(Continent, u64)> = Vec::new();
            for citing_list in cited.values() {
                let Value::Array(citations) = citing_list else {
                    continue;
                };
                for citation in citations {
                    for continent in self.citation_continents(citation) {
                        match counts.iter_mut().find(|(c, _)| *c == continent) {
                            Some((_, count)) => *count += 1,
                            None => counts.push((continent, 1)),
                        }
                    }
                }
            }

            for (continent, count) in counts {
                rows.push(CitationRow {
                    conference: stem.clone(),
                    continent: continent.code().to_string(),
                    num_papers: count,
                });
            }
        }

        write_rows(output, &rows)
    }

    /// Unique continents across one citing paper's authors.
    fn citation_continents(&self, citation: &Value) -> Vec<Continent> {
        let mut continents = Vec::new();

        let Some(authors) = citation.get("Authors").and_then(Value::as_array) else {
            return continents;
        };

        for author in authors {
            let institutions = ["Institutions", "Affiliations"]
                .iter()
                .filter_map(|key| author.get(*key).and_then(Value::as_array))
                .find(|list| !list.is_empty());
            let Some(institutions) = institutions else {
                continue;
            };

            for institution in institutions {
                // The country field name drifted across crawler versions.
                let country = ["Country", "country", "CountryCode"]
                    .iter()
                    .filter_map(|key| institution.get(*key).and_then(Value::as_str))
                    .find(|value| !value.is_empty());

                if let Some(continent) = self.mapper.country_to_continent(country) {
                    if !continents.contains(&continent) {
                        continents.push(continent);
                    }
                }
            }
        }

        continents
    }
}

impl Default for UnifiedCsvGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_citation_continents_deduplicates_and_checks_field_variants() {
        let generator = UnifiedCsvGenerator::new();
        let citation = json!({
            "Authors": [
                {"Institutions": [{"Country": "US"}, {"country": "CA"}]},
                {"Affiliations": [{"CountryCode": "DE"}]},
                {"Institutions": [{"Country": "Germany"}]},
                {"Institutions": "garbage"},
            ]
        });

        let continents = generator.citation_continents(&citation);
        assert_eq!(
            continents,
            vec![Continent::NorthAmerica, Continent::Europe]
        );
    }

    #[test]
    fn test_citation_without_authors_has_no_continents() {
        let generator = UnifiedCsvGenerator::new();
        assert!(generator
            .citation_continents(&json!({"Title": "untracked"}))
            .is_empty());
    }
}
