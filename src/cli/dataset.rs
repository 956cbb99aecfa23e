use crate::dataset::{ListArgs, ToyArgs};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// CLI arguments to list or create datasets.
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(about = "List or create datasets.")]
pub struct Args {
    /// Dataset command: List, Toy1
    #[clap(subcommand)]
    pub command: Command,
}

/// CLI dataset [commands](#variants). Used to decide which dataset method the CLI arguments should be passed to.
#[derive(Debug, Deserialize, Serialize, Subcommand)]
pub enum Command {
    /// Pass CLI arguments to the dataset [list](crate::dataset::Dataset::list) method.
    ///
    /// ```rust
    /// use clap::Parser;
    /// use flupred::{Cli, cli::Command, cli::dataset};
    /// let args = Cli::parse_from(["flupred", "dataset", "list", "--name", "toy1"]);
    /// assert!(matches!(args.command, Command::Dataset(dataset::Args { command: dataset::Command::List(_) })));
    /// ```
    #[clap(about = "List datasets.")]
    List(ListArgs),

    /// Pass CLI arguments to the [toy1](crate::dataset::toy1::create) writer.
    #[clap(about = "Write the toy1 dataset.")]
    Toy1(ToyArgs),
}
