//! Command-line interface for mongocompare
//!
//! # Usage Examples
//!
//! ```bash
//! # Compare a collection with its copy on another cluster
//! mongocompare \
//!   --source-uri mongodb://localhost:27017 \
//!   --source-database shop --source-coll-name orders \
//!   --target-uri mongodb://replica:27017 \
//!   --target-database shop --target-coll-name orders
//!
//! # Same run configured through the environment, with a JSON report
//! SOURCE_URI=mongodb://localhost:27017 SOURCE_DATABASE=shop SOURCE_COLLECTION=orders \
//! TARGET_URI=mongodb://replica:27017 TARGET_DATABASE=shop TARGET_COLLECTION=orders \
//!   mongocompare --output json --ignore-field updatedAt
//! ```
//!
//! ## Exit Status
//! - `0`: every check passed
//! - `1`, `2`, `4`, `8`, `16`: counts, indexes, sampled content, first ids and
//!   last ids failed, summed when several fail
//! - `32`: invalid arguments, or the comparison could not be made

use anyhow::Context;
use clap::Parser;
use mongocompare::{connect_collection, CollectionTarget, CompareOpts, OutputFormat};
use mongocompare_engine::{run_validation_with, CheckResult, ValidationReport, FATAL_EXIT_CODE};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let opts = match CompareOpts::try_parse() {
        Ok(opts) => opts,
        // --help and --version print to stdout and exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(FATAL_EXIT_CODE);
        }
    };

    match run(opts).await {
        Ok(report) => std::process::exit(report.exit_code()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(FATAL_EXIT_CODE);
        }
    }
}

async fn run(opts: CompareOpts) -> anyhow::Result<ValidationReport> {
    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = opts.validation_config();
    let source_target = CollectionTarget::from(&opts.source);
    let target_target = CollectionTarget::from(&opts.target);

    let source = connect_collection(&source_target)
        .await
        .with_context(|| format!("Failed to connect to source {}", source_target.namespace()))?;
    let target = connect_collection(&target_target)
        .await
        .with_context(|| format!("Failed to connect to target {}", target_target.namespace()))?;

    // Text diagnostics go out as each check finishes, so they survive a
    // later check aborting the run.
    let text = opts.output == OutputFormat::Text;
    let report = run_validation_with(&source, &target, &config, |result| {
        if text {
            print_diagnostics(result);
        }
    })
    .await
    .with_context(|| {
        format!(
            "Validation of {} against {} could not be completed",
            source_target.namespace(),
            target_target.namespace()
        )
    })?;

    match opts.output {
        OutputFormat::Text => println!("{}", report.summary()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }
    Ok(report)
}

fn print_diagnostics(result: &CheckResult) {
    if result.passed {
        return;
    }
    for diagnostic in &result.diagnostics {
        println!("{diagnostic}");
    }
}
