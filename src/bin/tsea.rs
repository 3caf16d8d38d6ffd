//! # tsea
//!
//! Command-line front end for the analysis catalogue.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;
use tsea::{init_logging, load_csv, Config};
use tsea_core::{Algorithm, DispatchRequest, Params};

#[derive(Parser)]
#[command(name = "tsea")]
#[command(about = "Time-series analysis catalogue", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every task and algorithm with its parameters
    List,

    /// Run one algorithm on a column of a CSV file
    Run {
        /// CSV file, timestamps in the first column
        input: PathBuf,

        task: String,

        algorithm: String,

        /// Column to analyse
        column: String,

        /// Parameters as key=value, declared defaults fill the rest
        params: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config);

    let dispatcher = tsea::dispatcher(&config).context("building the catalogue")?;

    match cli.command {
        Commands::List => {
            println!("{}", serde_json::to_string_pretty(&dispatcher.catalogue())?);
        }
        Commands::Run {
            input,
            task,
            algorithm,
            column,
            params,
        } => {
            let dataset = load_csv(&input)
                .with_context(|| format!("reading {}", input.display()))?;

            let (_, selected) = dispatcher.resolve(&task, &algorithm)?;
            let mut merged: Params = selected
                .descriptor()
                .parameters()
                .iter()
                .filter_map(|p| p.default_value().map(|v| (p.name().to_string(), v)))
                .collect();
            for pair in &params {
                let Some((key, value)) = pair.split_once('=') else {
                    bail!("expected key=value, got \"{}\"", pair);
                };
                merged.insert(key.trim(), value.trim());
            }
            debug!("running {}/{} on {}", task, algorithm, column);

            let request = DispatchRequest::new(task, algorithm, column).with_params(merged);
            match dispatcher.dispatch_shaped(&dataset, &request) {
                Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                Err(e) => bail!("{:?} error: {}", e.class(), e),
            }
        }
    }

    Ok(())
}
