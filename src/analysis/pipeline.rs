use std::collections::BTreeMap;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::analysis::predominance::predominant_continent;
use crate::config::{self, PipelineConfig, EXTENDED_DATA_DIR};
use crate::error::{Error, Result};
use crate::ingest;
use crate::models::{Paper, ProcessedPaper, ProcessingStats};
use crate::reports::{self, UnifiedCsvGenerator};
use crate::reports::bigtech::{BigTechAnalyzer, BigTechRow, ContinentShareRow};
use crate::taxonomy;

/// Drives the full run: data reduction, unified CSV generation, big-tech
/// classification. Failures are contained per conference or per file; only a
/// whole stage failing propagates out.
pub struct AnalysisPipeline {
    config: PipelineConfig,
    analyzer: BigTechAnalyzer,
    generator: UnifiedCsvGenerator,
}

impl AnalysisPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            analyzer: BigTechAnalyzer::new(),
            generator: UnifiedCsvGenerator::new(),
        }
    }

    pub fn run(&self) -> Result<()> {
        config::setup_output_directories(&self.config.project_root)?;

        // Step 1: data reduction. A failure here aborts the run.
        print_step_header(1, 3, "DATA PROCESSING");
        let stats = self.process_all_conferences()?;
        println!("{}", processing_summary(&stats));

        if self.config.skip_reports {
            info!("Skipping report generation");
            return Ok(());
        }

        // Step 2: unified CSVs. Individual failures are warnings.
        print_step_header(2, 3, "CSV GENERATION");
        self.generate_unified_csvs();

        // Step 3: big-tech classification. A failure here aborts the run;
        // a failed CSV write afterwards does not.
        print_step_header(3, 3, "BIG TECH ANALYSIS");
        let (rows, continent_rows) = self.analyze_big_tech()?;

        let csv_dir = &self.config.csv_output_dir;
        match reports::write_rows(&csv_dir.join("big_tech_analysis.csv"), &rows) {
            Ok(report) => info!(
                "big tech analysis: {} records -> {}",
                report.rows,
                report.path.display()
            ),
            Err(e) => warn!("failed to write big tech analysis CSV: {}", e),
        }
        match reports::write_rows(
            &csv_dir.join("big_companies_by_continent_analysis.csv"),
            &continent_rows,
        ) {
            Ok(report) => info!(
                "big tech by continent: {} records -> {}",
                report.rows,
                report.path.display()
            ),
            Err(e) => warn!("failed to write big tech by continent CSV: {}", e),
        }

        println!("{}", BigTechAnalyzer::summary_report(&rows));
        Ok(())
    }

    /// Reduce every conference's extended crawl into processed files with a
    /// computed predominant continent. Per-conference failures are logged and
    /// the remaining conferences still run.
    pub fn process_all_conferences(&self) -> Result<BTreeMap<String, ProcessingStats>> {
        let extended_dir = self.config.dir(EXTENDED_DATA_DIR);
        let output_dir = self.config.processed_data_dir();

        if !extended_dir.is_dir() {
            return Err(Error::MissingDirectory(extended_dir));
        }
        std::fs::create_dir_all(&output_dir)?;

        let stems = ingest::conference_stems(&extended_dir, "_extended_data.json")?;
        if stems.is_empty() {
            warn!("no conferences found in {}", extended_dir.display());
            return Ok(BTreeMap::new());
        }
        info!("Found {} conferences to process", stems.len());

        let pb = ProgressBar::new(stems.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} conferences")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut all_stats = BTreeMap::new();
        for stem in stems {
            let input = extended_dir.join(format!("{}_extended_data.json", stem));
            let output = output_dir.join(format!("{}_data.json", stem));

            match self.process_conference(&stem, &input, &output) {
                Ok(stats) => {
                    all_stats.insert(stem, stats);
                }
                Err(e) => error!("Failed to process {}: {}", stem, e),
            }
            pb.inc(1);
        }
        pb.finish_with_message("Processed all conferences");

        Ok(all_stats)
    }

    fn process_conference(&self, stem: &str, input: &Path, output: &Path) -> Result<ProcessingStats> {
        info!("Processing conference: {}", stem);

        let years = ingest::papers_by_year(input)?;
        let mut total_stats = ProcessingStats::default();
        let mut processed = serde_json::Map::new();

        for (year, papers) in years {
            let mut year_papers = Vec::with_capacity(papers.len());
            for paper in &papers {
                let (processed_paper, stats) = self.process_paper(paper, &year);
                total_stats.absorb(&stats);
                year_papers.push(processed_paper);
            }
            processed.insert(year, serde_json::to_value(year_papers)?);
        }

        ingest::save_json(output, &Value::Object(processed))?;

        if total_stats.total_papers > 0 {
            let pct = total_stats.papers_with_continent as f64
                / total_stats.total_papers as f64
                * 100.0;
            info!(
                "  Total: {} papers, {:.1}% with continent data",
                total_stats.total_papers, pct
            );
        }

        Ok(total_stats)
    }

    fn process_paper(&self, paper: &Paper, year: &str) -> (ProcessedPaper, ProcessingStats) {
        let mut stats = ProcessingStats {
            total_papers: 1,
            ..Default::default()
        };

        let vote = predominant_continent(&paper.authors);

        if !paper.authors.is_empty() {
            let missing = vote.authors_without_institutions + vote.unresolved_countries;
            // A paper where half or more of the authors carry no usable
            // country signal is flagged as lacking sufficient data.
            if missing > 0 && missing * 2 >= paper.authors.len() {
                stats.papers_without_sufficient_data += 1;
            }
            stats.unknown_countries += vote.unresolved_countries;
        }

        if !vote.continents.is_empty() {
            stats.papers_with_continent = 1;
        }

        let processed = ProcessedPaper {
            title: paper.title.clone(),
            year: paper
                .year
                .as_ref()
                .map(|y| y.to_string())
                .unwrap_or_else(|| year.to_string()),
            predominant_continent: vote.continents,
            authors: paper.authors.clone(),
        };

        (processed, stats)
    }

    fn generate_unified_csvs(&self) {
        let processed_dir = self.config.processed_data_dir();
        let committee_dir = self.config.dir(config::COMMITTEE_DATA_DIR);
        let citations_dir = self.config.dir(config::CITATIONS_DATA_DIR);

        let outputs = [
            (
                "papers",
                self.generator
                    .generate_papers_csv(&processed_dir, &processed_dir.join("unifiedPaperData.csv")),
            ),
            (
                "committee",
                self.generator.generate_committee_csv(
                    &committee_dir,
                    &processed_dir.join("unifiedCommitteeData.csv"),
                ),
            ),
            (
                "citations",
                self.generator.generate_citations_csv(
                    &citations_dir,
                    &processed_dir.join("unifiedCitationsData.csv"),
                ),
            ),
        ];

        let mut generated = 0;
        for (name, result) in outputs {
            match result {
                Ok(report) => {
                    info!("{}: {} records -> {}", name, report.rows, report.path.display());
                    generated += 1;
                }
                Err(e) => warn!("failed to generate {} CSV: {}", name, e),
            }
        }
        info!("CSV generation complete: {}/3 successful", generated);
    }

    /// Classify every processed conference. Returns the overall rows and the
    /// by-continent rows in one pass over the files.
    fn analyze_big_tech(&self) -> Result<(Vec<BigTechRow>, Vec<ContinentShareRow>)> {
        let processed_dir = self.config.processed_data_dir();
        if !processed_dir.is_dir() {
            return Err(Error::MissingDirectory(processed_dir));
        }

        let stems = ingest::conference_stems(&processed_dir, "_data.json")?;
        info!("Analyzing {} conferences for big tech presence", stems.len());

        let mut rows = Vec::new();
        let mut continent_rows = Vec::new();

        for stem in stems {
            if taxonomy::is_duplicate_stem(&stem) {
                continue;
            }
            let path = processed_dir.join(format!("{}_data.json", stem));

            match ingest::processed_by_year(&path) {
                Ok(years) => {
                    rows.extend(self.analyzer.analyze_conference(&stem, &years));
                    continent_rows.extend(self.analyzer.analyze_by_continent(&stem, &years));
                    info!("  Analyzed: {} ({} years)", stem, years.len());
                }
                Err(e) => error!("  Failed to analyze {}: {}", stem, e),
            }
        }

        Ok((rows, continent_rows))
    }
}

/// Formatted summary of the data-reduction stage.
pub fn processing_summary(stats: &BTreeMap<String, ProcessingStats>) -> String {
    let mut lines = vec![
        "=".repeat(70),
        "DATA PROCESSING SUMMARY".to_string(),
        "=".repeat(70),
        String::new(),
    ];

    let mut totals = ProcessingStats::default();
    for (stem, conf_stats) in stats {
        totals.absorb(conf_stats);
        let pct = if conf_stats.total_papers > 0 {
            conf_stats.papers_with_continent as f64 / conf_stats.total_papers as f64 * 100.0
        } else {
            0.0
        };
        lines.push(format!(
            "{:15}: {:4} papers, {:5.1}% with continent",
            taxonomy::display_name(stem),
            conf_stats.total_papers,
            pct
        ));
    }

    let total_pct = if totals.total_papers > 0 {
        totals.papers_with_continent as f64 / totals.total_papers as f64 * 100.0
    } else {
        0.0
    };

    lines.push(String::new());
    lines.push("-".repeat(70));
    lines.push(format!(
        "{:15}: {:4} papers, {:5.1}% with continent",
        "TOTAL", totals.total_papers, total_pct
    ));
    lines.push("=".repeat(70));

    lines.join("\n")
}

fn print_step_header(step: usize, total: usize, description: &str) {
    println!("\nSTEP {}/{}: {}", step, total, description);
    println!("{}", "-".repeat(70));
}
