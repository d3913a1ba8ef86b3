//! tagnet CLI: co-occurrence graphs for keyword files and scraped expertise.
//!
//! Usage:
//!   tagnet keywords <INPUT> [--config FILE] [--top-n N] [--out-dir DIR]
//!   tagnet expertise [--config FILE] [--term T]... [--people-top-n N]

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tagnet::{Config, HttpFetcher, RunReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tagnet",
    version,
    about = "Tag co-occurrence graphs, rankings and plots"
)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by both datasets
#[derive(Args)]
struct CommonArgs {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of most frequent tags to keep
    #[arg(long)]
    top_n: Option<usize>,
    /// Directory for exports and plots
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Prefix of every output file name
    #[arg(long)]
    prefix: Option<String>,
    /// Write exports only, no plots
    #[arg(long)]
    no_render: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the keyword graph from a delimited file (ID, tags)
    Keywords {
        /// Input file with a header row
        input: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Scrape expertise profiles and build the expertise and people graphs
    Expertise {
        #[command(flatten)]
        common: CommonArgs,
        /// Search term (repeatable); replaces the configured terms
        #[arg(long = "term")]
        terms: Vec<String>,
        /// Number of people kept in the people graph
        #[arg(long)]
        people_top_n: Option<usize>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tagnet=debug" } else { "tagnet=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, base: Config, common: &CommonArgs) -> Result<Config, String> {
    let mut config = match path {
        Some(path) => Config::load(path, base).map_err(|e| e.to_string())?,
        None => base,
    };
    if let Some(n) = common.top_n {
        config.pipeline.top_n = n;
    }
    if let Some(ref dir) = common.out_dir {
        config.pipeline.output_dir = dir.clone();
    }
    if let Some(ref prefix) = common.prefix {
        config.pipeline.output_prefix = prefix.clone();
    }
    if common.no_render {
        config.render.enabled = false;
    }
    Ok(config)
}

fn print_report(report: &RunReport) {
    let analysis = &report.analysis;
    println!(
        "{}: {} entities, {} tags, {} edges; top {} kept ({} edges)",
        report.dataset,
        analysis.entities,
        analysis.graph.node_count(),
        analysis.graph.edge_count(),
        analysis.top_graph.node_count(),
        analysis.top_graph.edge_count(),
    );
    println!("{:<40}  {:>7}", "NAME", "COUNT");
    println!("{}", "-".repeat(49));
    for entry in analysis.top.iter().take(10) {
        println!("{:<40}  {:>7}", entry.name, entry.count);
    }
    for path in &report.artifacts {
        println!("wrote {}", path.display());
    }
}

fn cmd_keywords(input: &Path, common: &CommonArgs) -> i32 {
    let config = match load_config(common.config.as_deref(), Config::default(), common) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match tagnet::run_keywords(input, &config) {
        Ok(report) => {
            print_report(&report);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_expertise(common: &CommonArgs, terms: Vec<String>, people_top_n: Option<usize>) -> i32 {
    let mut config = match load_config(common.config.as_deref(), Config::expertise_defaults(), common) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if !terms.is_empty() {
        config.scrape.search_terms = terms;
    }
    if let Some(n) = people_top_n {
        config.scrape.people_top_n = n;
    }

    let fetcher = match HttpFetcher::new(Duration::from_secs(config.scrape.timeout_secs)) {
        Ok(f) => Arc::new(f),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    match rt.block_on(tagnet::run_expertise(fetcher, &config)) {
        Ok(report) => {
            let failed = report.scrape.outcomes.len() - report.scrape.profiles_ok();
            println!(
                "scraped {} profiles ({} skipped, {} search terms failed)",
                report.scrape.outcomes.len(),
                failed,
                report.scrape.failed_terms.len()
            );
            print_report(&report.expertise);
            print_report(&report.people);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Keywords { input, common } => cmd_keywords(&input, &common),
        Commands::Expertise {
            common,
            terms,
            people_top_n,
        } => cmd_expertise(&common, terms, people_top_n),
    };
    std::process::exit(code);
}
