//! End-to-end pipeline test over a small fixture project tree.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use confgeo::{AnalysisPipeline, PipelineConfig};

fn fixture_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("confgeo_{}", name));
    if root.exists() {
        fs::remove_dir_all(&root).unwrap();
    }
    fs::create_dir_all(&root).unwrap();
    root
}

fn write_json(path: &Path, value: &serde_json::Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = fs::File::create(path).unwrap();
    serde_json::to_writer_pretty(file, value).unwrap();
}

fn author(name: &str, institution: &str, country: &str) -> serde_json::Value {
    json!({
        "Name": name,
        "Institutions": [{"Institution Name": institution, "Country": country}]
    })
}

fn seed_project(root: &Path) {
    let extended = json!({
        "2020": [
            {
                "Title": "Corporate Systems",
                "Year": "2020",
                "Authors and Institutions": [author("Ada", "Google", "US")]
            },
            {
                "Title": "Academic Systems",
                "Year": "2020",
                "Authors and Institutions": [author("Grace", "ETH Zurich", "CH")]
            },
            {
                "Title": "Mystery Systems",
                "Year": "2020",
                "Authors and Institutions": [{"Name": "Anon", "Institutions": []}]
            },
            {
                "Title": "Tied Systems",
                "Year": "2020",
                "Authors and Institutions": [
                    author("Lin", "Amazon Web Services", "US"),
                    author("Wei", "Tsinghua University", "CN")
                ]
            }
        ]
    });
    write_json(
        &root.join("CrawlerData/ExtendedCrawlerData/nsdi_extended_data.json"),
        &extended,
    );

    let committee = json!({
        "2020": {
            "Alice": {"MIT": "US", "EPFL": "CH"},
            "Bob": "Germany"
        }
    });
    write_json(&root.join("CommitteeData/nsdi_committee.json"), &committee);

    let citations = json!({
        "Corporate Systems": [
            {"Authors": [{"Institutions": [{"Country": "US"}, {"Country": "CA"}]}]},
            {"Authors": [{"Affiliations": [{"CountryCode": "JP"}]}]}
        ]
    });
    write_json(
        &root.join("CrawlerData/CitationsCrawlerData/nsdi_citations_data.json"),
        &citations,
    );
}

fn read_csv(path: &Path) -> Vec<std::collections::HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.deserialize().map(|row| row.unwrap()).collect()
}

#[test]
fn test_full_pipeline_run() {
    let root = fixture_root("pipeline_test");
    seed_project(&root);

    let config = PipelineConfig {
        project_root: root.clone(),
        csv_output_dir: root.join("outputs/csv"),
        skip_reports: false,
    };
    AnalysisPipeline::new(config).run().unwrap();

    // Processed file carries the computed predominant continents.
    let processed: serde_json::Value = serde_json::from_reader(
        fs::File::open(root.join("ProcessedData/nsdi_data.json")).unwrap(),
    )
    .unwrap();
    let papers = processed["2020"].as_array().unwrap();
    assert_eq!(papers.len(), 4);
    assert_eq!(papers[0]["Predominant Continent"], json!(["NA"]));
    assert_eq!(papers[1]["Predominant Continent"], json!(["EU"]));
    assert_eq!(papers[2]["Predominant Continent"], json!([]));
    assert_eq!(papers[3]["Predominant Continent"], json!(["NA", "AS"]));

    // Papers CSV: the first element of the tie set, or an empty cell.
    let paper_rows = read_csv(&root.join("ProcessedData/unifiedPaperData.csv"));
    assert_eq!(paper_rows.len(), 4);
    assert_eq!(paper_rows[0]["Predominant Continent"], "NA");
    assert_eq!(paper_rows[2]["Predominant Continent"], "");
    assert_eq!(paper_rows[3]["Predominant Continent"], "NA");

    // Committee CSV accepts both affiliation formats.
    let committee_rows = read_csv(&root.join("ProcessedData/unifiedCommitteeData.csv"));
    assert_eq!(committee_rows.len(), 2);
    assert_eq!(committee_rows[0]["Name"], "Alice");
    assert_eq!(committee_rows[0]["Institution"], "MIT;EPFL");
    assert_eq!(committee_rows[0]["Continent"], "EU;NA");
    assert_eq!(committee_rows[1]["Name"], "Bob");
    assert_eq!(committee_rows[1]["Institution"], "");
    assert_eq!(committee_rows[1]["Continent"], "EU");

    // Citations CSV counts citing papers per continent, deduplicated within
    // each citing paper.
    let citation_rows = read_csv(&root.join("ProcessedData/unifiedCitationsData.csv"));
    assert_eq!(citation_rows.len(), 2);
    assert_eq!(citation_rows[0]["Continent"], "NA");
    assert_eq!(citation_rows[0]["Num_Papers"], "1");
    assert_eq!(citation_rows[1]["Continent"], "AS");
    assert_eq!(citation_rows[1]["Num_Papers"], "1");

    // Big-tech split: the tied paper classifies from its institutions alone.
    let bigtech_rows = read_csv(&root.join("outputs/csv/big_tech_analysis.csv"));
    assert_eq!(bigtech_rows.len(), 1);
    assert_eq!(bigtech_rows[0]["Conference"], "nsdi");
    assert_eq!(bigtech_rows[0]["Year"], "2020");
    assert_eq!(bigtech_rows[0]["pct_has_big"], "50.0");
    assert_eq!(bigtech_rows[0]["pct_no_big"], "25.0");
    assert_eq!(bigtech_rows[0]["pct_all_none"], "25.0");

    // By-continent shares omit empty buckets instead of writing zero rows.
    let continent_rows =
        read_csv(&root.join("outputs/csv/big_companies_by_continent_analysis.csv"));
    let labels: Vec<&str> = continent_rows
        .iter()
        .map(|row| row["level_2"].as_str())
        .collect();
    assert_eq!(labels, vec!["pct_big_na", "pct_big_eu"]);

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_missing_extended_data_is_a_hard_failure() {
    let root = fixture_root("pipeline_missing_test");

    let config = PipelineConfig {
        project_root: root.clone(),
        csv_output_dir: root.join("outputs/csv"),
        skip_reports: false,
    };
    assert!(AnalysisPipeline::new(config).run().is_err());

    fs::remove_dir_all(&root).unwrap();
}
