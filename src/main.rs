use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use file_extract::{run_extraction, ExtensionSet, ExtractConfig, ExtractionReport};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("file-extract")
        .version("1.0")
        .about("Collects files matching a set of extensions from a directory tree into one flat folder")
        .arg(
            Arg::new("src")
                .long("src")
                .value_name("DIR")
                .help("Source directory to scan")
                .default_value("."),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("DIR")
                .help("Destination directory for the copies")
                .default_value("./output"),
        )
        .arg(
            Arg::new("exts")
                .long("exts")
                .value_name("EXT")
                .help("Extensions to collect, example: --exts pdf OR --exts pdf png jpg")
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the summary as JSON")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = matches.get_one::<String>("log-level").unwrap().clone();
    initialize_logging(&log_level)?;

    let config = create_extract_config(&matches);
    info!("Configuration: {:#?}", config);

    let report = run_extraction(&config).await?;

    if matches.get_flag("json") {
        print_json_report(&report)?;
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Pure function to create the run configuration from CLI arguments
fn create_extract_config(matches: &clap::ArgMatches) -> ExtractConfig {
    let source_root = matches.get_one::<String>("src").unwrap().clone();
    let dest_root = matches.get_one::<String>("out").unwrap().clone();
    let tokens: Vec<String> = matches
        .get_many::<String>("exts")
        .unwrap()
        .cloned()
        .collect();

    ExtractConfig::new(source_root, dest_root, ExtensionSet::normalize(tokens))
}

/// Initialize structured logging with tracing
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Print the human-readable run summary
fn print_report(report: &ExtractionReport) {
    println!("Copied the following files:");
    for file in &report.copied_files {
        println!("{}", file.source);
    }
    println!();
    println!("{} files have been copied.", report.copied_count());

    if !report.failures.is_empty() {
        error!("Copy errors encountered:");
        for failure in &report.failures {
            error!("  {}: {}", failure.source, failure.error);
        }
    }
}

/// Print the run summary as pretty JSON
fn print_json_report(report: &ExtractionReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
