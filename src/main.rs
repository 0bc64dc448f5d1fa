use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use confgeo::{AnalysisPipeline, Config, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "confgeo")]
#[command(version = "0.1.0")]
#[command(about = "Analyze geographic and corporate participation in systems conferences")]
struct Args {
    /// Project root containing CrawlerData, CommitteeData and ProcessedData
    #[arg(short, long)]
    project_root: Option<PathBuf>,

    /// Output directory for generated CSV files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Process crawler data but skip CSV report generation
    #[arg(long)]
    skip_reports: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("confgeo=info".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration; CLI flags override the environment
    let mut config = Config::from_env()?;
    if let Some(project_root) = args.project_root {
        config.project_root = project_root;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = Some(output_dir);
    }

    println!("{}", "=".repeat(70));
    println!("  CONFERENCE DATA ANALYSIS PIPELINE");
    println!("{}", "=".repeat(70));
    println!(
        "Execution started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("Working directory: {}", config.project_root.display());

    let mut pipeline_config = PipelineConfig::new(&config);
    pipeline_config.skip_reports = args.skip_reports;

    // A data-processing or classification failure propagates to a nonzero
    // exit; CSV write failures inside the run are logged and tolerated.
    let pipeline = AnalysisPipeline::new(pipeline_config);
    pipeline.run()?;

    tracing::info!("Pipeline completed successfully");
    Ok(())
}
