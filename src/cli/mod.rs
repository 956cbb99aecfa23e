//! [Command-line interface](Cli) (CLI) of the main binary.

pub mod dataset;

use crate::config::Config;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Report, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// The command-line interface (CLI).
/// ---
/// The CLI is intended for parsing user input from the command-line in the main function. This is achieved with the `parse` function, which parses the command line arguments from [`std::env::args`](https://doc.rust-lang.org/std/env/fn.args.html).
/// ```no_run
/// use clap::Parser;
/// let args = flupred::Cli::parse();
/// ```
/// The command-line arguments from `std::env::args` are simply a vector of space separated strings. Here is a manual example of setting the command-line input:
/// ```rust
/// # use clap::Parser;
/// let input = ["flupred", "build", "--dataset-dir", "dataset/toy1", "--min-cluster-size", "3", "--output", "dashboard.html"];
/// let args = flupred::Cli::parse_from(input);
/// serde_json::to_string_pretty(&args)?;
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(name = "flupred", author, version)]
#[clap(about = "flupred visualizes influenza sequence evolution, forecasts and vaccine effectiveness.")]
pub struct Cli {
    #[clap(subcommand)]
    /// Pass CLI arguments to a particular [Command].
    #[clap(help = "Set the command.")]
    pub command: Command,

    /// Set the output [Verbosity] level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(hide_possible_values = false)]
    #[clap(global = true)]
    #[clap(help = "Set the output verbosity level.")]
    pub verbosity: Verbosity,
}

/// CLI [commands](#variants). Used to decide which runtime [Command](#variants) the CLI arguments should be passed to.
#[derive(Debug, Deserialize, Serialize, Subcommand)]
pub enum Command {
    /// Serve the dashboard over HTTP.
    /// ## Examples
    /// ```rust
    /// use flupred::{Cli, cli::Command};
    /// use clap::Parser;
    /// let args = Cli::parse_from(["flupred", "serve", "--address", "0.0.0.0:8080"]);
    /// assert!(matches!(args.command, Command::Serve(ref serve) if serve.address == "0.0.0.0:8080"));
    /// ```
    #[clap(about = "Serve the dashboard.")]
    Serve(ServeArgs),
    #[clap(about = "Build the dashboard page once and write it to a file.")]
    Build(BuildArgs),
    #[clap(about = "Print the dashboard summary counters.")]
    Summary(SummaryArgs),
    #[clap(about = "List or create datasets.")]
    Dataset(dataset::Args),
}

// ----------------------------------------------------------------------------
// Pipeline Arguments
// ----------------------------------------------------------------------------

/// The pipeline [`Config`], from the command line or a JSON file.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
pub struct PipelineArgs {
    /// JSON config file, replaces every other pipeline option.
    #[clap(short = 'c', long)]
    pub config_file: Option<PathBuf>,

    #[clap(flatten)]
    pub config: Config,
}

impl PipelineArgs {
    /// Returns the [`Config`] to run with, dataset directory resolved.
    ///
    /// ```rust
    /// use clap::Parser;
    /// use flupred::cli::PipelineArgs;
    /// let args = PipelineArgs::parse_from(["flupred", "--host-species", "IRD:Swine"]);
    /// assert_eq!(args.into_config()?.host_species, "IRD:Swine");
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn into_config(self) -> Result<Config, Report> {
        let config = match self.config_file {
            Some(path) => Config::read(path)?,
            None => self.config,
        };
        config.resolve()
    }
}

/// Arguments of the `serve` command.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
pub struct ServeArgs {
    /// Address to listen on.
    #[clap(short = 'a', long, default_value = "127.0.0.1:8000")]
    pub address: String,

    #[clap(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments of the `build` command.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
pub struct BuildArgs {
    /// Output HTML page.
    #[clap(short = 'o', long, default_value = "dashboard.html")]
    pub output: PathBuf,

    /// Also write the payload as JSON.
    #[clap(short = 'p', long)]
    pub payload: Option<PathBuf>,

    #[clap(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments of the `summary` command.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
pub struct SummaryArgs {
    #[clap(flatten)]
    pub pipeline: PipelineArgs,
}

// -----------------------------------------------------------------------------
// Verbosity
// -----------------------------------------------------------------------------

/// The output verbosity level.
#[derive(Clone, Debug, Default, Deserialize, Serialize, ValueEnum)]
pub enum Verbosity {
    #[default]
    Info,
    Warn,
    Debug,
    Error,
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        // Convert to lowercase for RUST_LOG env var compatibility
        let lowercase = format!("{:?}", self).to_lowercase();
        write!(f, "{lowercase}")
    }
}
