#[cfg(feature = "cli")]
use clap::Parser;
use color_eyre::eyre::{Report, Result};
#[cfg(feature = "cli")]
use flupred::{
    cli::dataset::Command::{List, Toy1},
    cli::Command,
    dataset::{toy1, Dataset},
    page, server, utils, Cli,
};

#[tokio::main]
async fn main() -> Result<(), Report> {
    #[cfg(feature = "cli")]
    {
        // ------------------------------------------------------------------------
        // CLI Setup

        // Parse CLI parameters
        let args = Cli::parse();

        // initialize color_eyre crate for colorized logs
        color_eyre::install()?;

        // Set logging/verbosity level via RUST_LOG
        std::env::set_var("RUST_LOG", args.verbosity.to_string());

        // initialize env_logger crate for logging/verbosity level
        env_logger::init();

        // check which CLI command we're running
        match args.command {
            Command::Serve(args) => server::serve(args.pipeline.into_config()?, &args.address).await?,
            Command::Build(args) => {
                let payload = page::build(&args.pipeline.into_config()?).await?;
                let output = utils::create_parent_dir(&args.output)?;
                std::fs::write(&output, payload.render())?;
                log::info!("Wrote page: {output:?}");
                if let Some(path) = &args.payload {
                    let path = utils::create_parent_dir(path)?;
                    std::fs::write(&path, serde_json::to_string_pretty(&payload)?)?;
                    log::info!("Wrote payload: {path:?}");
                }
                payload.warnings.iter().for_each(|w| log::warn!("{w}"));
            }
            Command::Summary(args) => {
                let payload = page::build(&args.pipeline.into_config()?).await?;
                println!("{}", payload.summary.to_table());
            }
            Command::Dataset(args) => match args.command {
                // List known datasets as table
                List(args) => println!("{}", Dataset::list(&args)),
                // Write the toy dataset
                Toy1(args) => _ = toy1::create(&args.output_dir)?,
            },
        }
    }

    Ok(())
}
