//! `flupred` visualizes influenza sequence evolution and vaccine effectiveness.
//!
//! It loads sequence metadata with embedding coordinates, resamples it by quarter,
//! counts sequences per year, outlines forecasted strain clusters with convex hulls
//! and serves every chart as a JSON data block embedded in an HTML page.
//!
//! ```rust
//! # use tokio_test::{block_on, assert_ok};
//! use flupred::{config::Config, dataset::toy1, page};
//!
//! let dir = tempfile::tempdir()?;
//! toy1::create(&dir.path())?;
//! let config = Config::for_dataset(&dir.path())?;
//! # assert_ok!(block_on(async {
//! let html = page::build(&config).await?.render();
//! # Ok::<(), flupred::Error>(())
//! # }));
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```

pub mod aggregate;
pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod cluster;
pub mod config;
pub mod dataset;
pub mod effectiveness;
mod error;
pub mod forecast;
pub mod metadata;
pub mod page;
pub mod sequence;
pub mod server;
pub mod utils;
pub mod vaccine;

#[doc(inline)]
#[cfg(feature = "cli")]
pub use crate::cli::Cli;
#[doc(inline)]
pub use crate::error::{Error, Result};
