//! Big-tech participation statistics: per-conference-year classification
//! percentages, overall and by continent bucket.

use serde::{Deserialize, Serialize};

use crate::analysis::CompanyClassifier;
use crate::models::{BigTechStats, Classification, Continent, ProcessedPaper};
use crate::reports::round2;
use crate::taxonomy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BigTechRow {
    #[serde(rename = "Conference")]
    pub conference: String,
    #[serde(rename = "Year")]
    pub year: String,
    pub pct_has_big: f64,
    pub pct_no_big: f64,
    pub pct_all_none: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContinentShareRow {
    #[serde(rename = "Conference")]
    pub conference: String,
    #[serde(rename = "Year")]
    pub year: String,
    pub level_2: String,
    #[serde(rename = "X0")]
    pub x0: f64,
}

/// Continent buckets for the by-continent breakdown. Everything outside the
/// three well-sampled continents lands in "Other".
const CONTINENT_BUCKETS: [&str; 4] = ["NA", "EU", "AS", "Other"];

#[derive(Debug, Default, Clone, Copy)]
struct BucketCounts {
    has_big: usize,
    no_big: usize,
    total: usize,
}

pub struct BigTechAnalyzer {
    classifier: CompanyClassifier,
}

impl BigTechAnalyzer {
    pub fn new() -> Self {
        Self {
            classifier: CompanyClassifier::new(),
        }
    }

    /// Classification counts and percentages for one conference-year.
    pub fn analyze_year(&self, papers: &[ProcessedPaper]) -> BigTechStats {
        let mut stats = BigTechStats {
            total_papers: papers.len(),
            ..Default::default()
        };

        for paper in papers {
            match self.classifier.classify_authors(&paper.authors) {
                Classification::HasBigTech => stats.has_big_tech += 1,
                Classification::NoBigTech => stats.no_big_tech += 1,
                Classification::AllUnknown => stats.all_none += 1,
            }
        }

        if stats.total_papers > 0 {
            let total = stats.total_papers as f64;
            stats.pct_has_big = stats.has_big_tech as f64 / total * 100.0;
            stats.pct_no_big = stats.no_big_tech as f64 / total * 100.0;
            stats.pct_all_none = stats.all_none as f64 / total * 100.0;
        }

        stats
    }

    /// CSV rows for one conference; years without papers produce no row.
    pub fn analyze_conference(
        &self,
        conference: &str,
        years: &[(String, Vec<ProcessedPaper>)],
    ) -> Vec<BigTechRow> {
        let mut rows = Vec::new();

        for (year, papers) in years {
            if papers.is_empty() {
                continue;
            }
            let stats = self.analyze_year(papers);
            rows.push(BigTechRow {
                conference: conference.to_string(),
                year: year.clone(),
                pct_has_big: round2(stats.pct_has_big),
                pct_no_big: round2(stats.pct_no_big),
                pct_all_none: round2(stats.pct_all_none),
            });
        }

        rows
    }

    /// Big-tech share per continent bucket. The percentage base is the
    /// conference-year's continent-resolved paper count: papers without a
    /// predominant continent are excluded from the denominator here even
    /// though they count in the overall split. Buckets with no papers emit
    /// no row at all; the plotting stage reads absence as zero.
    pub fn analyze_by_continent(
        &self,
        conference: &str,
        years: &[(String, Vec<ProcessedPaper>)],
    ) -> Vec<ContinentShareRow> {
        let mut rows = Vec::new();

        for (year, papers) in years {
            let mut buckets = [BucketCounts::default(); CONTINENT_BUCKETS.len()];

            for paper in papers {
                let continent = match paper.predominant_continent.first() {
                    Some(continent) => *continent,
                    None => continue,
                };
                let bucket = match continent {
                    Continent::NorthAmerica => 0,
                    Continent::Europe => 1,
                    Continent::Asia => 2,
                    Continent::Unknown => continue,
                    _ => 3,
                };

                match self.classifier.classify_authors(&paper.authors) {
                    Classification::HasBigTech => buckets[bucket].has_big += 1,
                    Classification::NoBigTech => buckets[bucket].no_big += 1,
                    Classification::AllUnknown => {}
                }
                buckets[bucket].total += 1;
            }

            let total_resolved: usize = buckets.iter().map(|b| b.total).sum();
            if total_resolved == 0 {
                continue;
            }

            for (label, counts) in CONTINENT_BUCKETS.iter().zip(buckets) {
                if counts.total == 0 {
                    continue;
                }
                let pct_big = counts.has_big as f64 / total_resolved as f64 * 100.0;
                rows.push(ContinentShareRow {
                    conference: conference.to_string(),
                    year: year.clone(),
                    level_2: format!("pct_big_{}", label.to_lowercase()),
                    x0: round2(pct_big),
                });
            }
        }

        rows
    }

    /// Per-conference averages, formatted for the console.
    pub fn summary_report(rows: &[BigTechRow]) -> String {
        let mut by_conference: Vec<(&str, Vec<&BigTechRow>)> = Vec::new();
        for row in rows {
            match by_conference
                .iter_mut()
                .find(|(conference, _)| *conference == row.conference)
            {
                Some((_, rows)) => rows.push(row),
                None => by_conference.push((row.conference.as_str(), vec![row])),
            }
        }
        by_conference.sort_by_key(|(conference, _)| *conference);

        let mut lines = vec![
            "=".repeat(70),
            "BIG TECH COMPANY ANALYSIS SUMMARY".to_string(),
            "=".repeat(70),
            String::new(),
        ];

        for (conference, rows) in &by_conference {
            let count = rows.len() as f64;
            let avg_big: f64 = rows.iter().map(|r| r.pct_has_big).sum::<f64>() / count;
            let avg_academia: f64 = rows.iter().map(|r| r.pct_no_big).sum::<f64>() / count;
            lines.push(format!(
                "{:15}: {:5.1}% Big Tech, {:5.1}% Academia",
                taxonomy::display_name(conference),
                avg_big,
                avg_academia
            ));
        }

        lines.push(String::new());
        lines.push("-".repeat(70));
        lines.push(format!(
            "Total conferences analyzed: {}",
            by_conference.len()
        ));
        lines.push(format!("Total records: {}", rows.len()));
        lines.push("=".repeat(70));

        lines.join("\n")
    }
}

impl Default for BigTechAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Institution};

    fn author(affiliations: &[(&str, &str)]) -> Author {
        Author {
            institutions: affiliations
                .iter()
                .map(|(name, country)| Institution {
                    name: Some(name.to_string()),
                    country: Some(country.to_string()),
                })
                .collect(),
            extra: Default::default(),
        }
    }

    fn paper(authors: Vec<Author>, continents: Vec<Continent>) -> ProcessedPaper {
        ProcessedPaper {
            title: "A paper".to_string(),
            year: "2020".to_string(),
            predominant_continent: continents,
            authors,
        }
    }

    /// Four-paper scenario: one big-tech paper, one academic, one without
    /// institution data, one big-tech paper with a continent tie. The tie
    /// must not affect the paper's classification or its share of the total.
    fn scenario() -> Vec<(String, Vec<ProcessedPaper>)> {
        let papers = vec![
            paper(
                vec![author(&[("Google", "US")])],
                vec![Continent::NorthAmerica],
            ),
            paper(vec![author(&[("ETH Zurich", "CH")])], vec![Continent::Europe]),
            paper(
                vec![Author {
                    institutions: Vec::new(),
                    extra: Default::default(),
                }],
                Vec::new(),
            ),
            paper(
                vec![
                    author(&[("Amazon Web Services", "US")]),
                    author(&[("Tsinghua University", "CN")]),
                ],
                vec![Continent::NorthAmerica, Continent::Asia],
            ),
        ];
        vec![("2020".to_string(), papers)]
    }

    #[test]
    fn test_year_split_counts_every_paper() {
        let analyzer = BigTechAnalyzer::new();
        let years = scenario();
        let rows = analyzer.analyze_conference("nsdi", &years);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.year, "2020");
        assert_eq!(row.pct_has_big, 50.0);
        assert_eq!(row.pct_no_big, 25.0);
        assert_eq!(row.pct_all_none, 25.0);
    }

    #[test]
    fn test_empty_years_emit_no_rows() {
        let analyzer = BigTechAnalyzer::new();
        let years = vec![("2019".to_string(), Vec::new())];
        assert!(analyzer.analyze_conference("nsdi", &years).is_empty());
    }

    #[test]
    fn test_continent_breakdown_excludes_unresolved_papers() {
        let analyzer = BigTechAnalyzer::new();
        let years = scenario();
        let rows = analyzer.analyze_by_continent("nsdi", &years);

        // Three continent-resolved papers: Google (NA, big tech), ETH (EU,
        // academic), and the tied paper counted under its first continent
        // (NA, big tech). The no-data paper is not in the denominator.
        let labels: Vec<&str> = rows.iter().map(|r| r.level_2.as_str()).collect();
        assert_eq!(labels, vec!["pct_big_na", "pct_big_eu"]);

        let na = rows.iter().find(|r| r.level_2 == "pct_big_na").unwrap();
        assert_eq!(na.x0, 66.67);
        let eu = rows.iter().find(|r| r.level_2 == "pct_big_eu").unwrap();
        assert_eq!(eu.x0, 0.0);
    }

    #[test]
    fn test_summary_report_averages_per_conference() {
        let rows = vec![
            BigTechRow {
                conference: "nsdi".to_string(),
                year: "2019".to_string(),
                pct_has_big: 20.0,
                pct_no_big: 70.0,
                pct_all_none: 10.0,
            },
            BigTechRow {
                conference: "nsdi".to_string(),
                year: "2020".to_string(),
                pct_has_big: 40.0,
                pct_no_big: 50.0,
                pct_all_none: 10.0,
            },
        ];
        let report = BigTechAnalyzer::summary_report(&rows);
        assert!(report.contains("NSDI"));
        assert!(report.contains("30.0% Big Tech"));
        assert!(report.contains("Total records: 2"));
    }
}
