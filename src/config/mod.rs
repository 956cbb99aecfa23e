//! Pipeline [`Config`]: where the inputs live and how they are summarized.

use crate::cluster::DimensionPair;
use crate::dataset::{Attributes, Files, Source};
use crate::{forecast, metadata};
#[cfg(feature = "cli")]
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Host species counted in the sequences per year chart.
pub const HOST_SPECIES: &str = "IRD:Human";
/// Forecast clusters with fewer points than this get no hull.
pub const MIN_CLUSTER_SIZE: usize = 25;

/// Configuration of one dashboard pipeline.
///
/// ## Examples
///
/// ```rust
/// use flupred::config::Config;
/// let config = Config::default();
/// assert_eq!(config.host_species, "IRD:Human");
/// assert_eq!(config.min_cluster_size, 25);
/// assert_eq!(config.views.len(), 3);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
pub struct Config {
    /// Dataset directory with an attributes.json, its files replace the source options.
    #[cfg_attr(feature = "cli", clap(short = 'd', long))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_dir: Option<PathBuf>,

    /// Predicted sequences (fasta).
    #[cfg_attr(feature = "cli", clap(long, default_value_t = Config::default().sequences))]
    pub sequences: Source,

    /// Sequence metadata (tsv or csv).
    #[cfg_attr(feature = "cli", clap(long, default_value_t = Config::default().metadata))]
    pub metadata: Source,

    /// Metadata with embedding coordinates, if not in --metadata.
    #[cfg_attr(feature = "cli", clap(long))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeddings: Option<Source>,

    /// Forecasted coordinates with cluster labels (csv).
    #[cfg_attr(feature = "cli", clap(long, default_value_t = Config::default().forecasts))]
    pub forecasts: Source,

    /// Vaccine strain per season (yaml).
    #[cfg_attr(feature = "cli", clap(long, default_value_t = Config::default().vaccines))]
    pub vaccines: Source,

    /// Web page with the vaccine effectiveness table (html).
    #[cfg_attr(feature = "cli", clap(long, default_value_t = Config::default().effectiveness))]
    pub effectiveness: Source,

    /// Host species to count sequences of.
    #[cfg_attr(feature = "cli", clap(long, default_value_t = HOST_SPECIES.to_string()))]
    pub host_species: String,

    /// Minimum number of points for a forecast cluster to get a hull.
    #[cfg_attr(feature = "cli", clap(long, default_value_t = MIN_CLUSTER_SIZE))]
    pub min_cluster_size: usize,

    /// Embedding dimension pairs to plot, 0-indexed (ex. 0-1,1-2,0-2).
    #[cfg_attr(feature = "cli", clap(long, value_delimiter = ',', default_value = "0-1,1-2,0-2"))]
    pub views: Vec<DimensionPair>,

    #[cfg_attr(feature = "cli", clap(skip))]
    #[serde(default)]
    pub metadata_columns: metadata::Columns,

    #[cfg_attr(feature = "cli", clap(skip))]
    #[serde(default)]
    pub forecast_columns: forecast::Columns,
}

impl Default for Config {
    fn default() -> Self {
        Config::with_files(&Files::default())
    }
}

impl Config {
    /// Returns the default [`Config`] reading the given [`Files`].
    pub fn with_files(files: &Files) -> Self {
        Config {
            dataset_dir: None,
            sequences: Source::from(files.sequences.clone()),
            metadata: Source::from(files.metadata.clone()),
            embeddings: files.embeddings.clone().map(Source::from),
            forecasts: Source::from(files.forecasts.clone()),
            vaccines: Source::from(files.vaccines.clone()),
            effectiveness: Source::from(files.effectiveness.clone()),
            host_species: HOST_SPECIES.to_string(),
            min_cluster_size: MIN_CLUSTER_SIZE,
            views: DimensionPair::defaults(),
            metadata_columns: metadata::Columns::default(),
            forecast_columns: forecast::Columns::default(),
        }
    }

    /// Returns the default [`Config`] for a dataset directory.
    ///
    /// ```rust
    /// use flupred::{config::Config, dataset::toy1};
    /// let dir = tempfile::tempdir()?;
    /// toy1::create(&dir.path())?;
    /// let config = Config::for_dataset(&dir.path())?;
    /// assert_eq!(config.metadata.to_string(), dir.path().join("metadata.tsv").display().to_string());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn for_dataset<P>(dir: &P) -> Result<Self, Report>
    where
        P: AsRef<Path> + Debug,
    {
        let config = Config { dataset_dir: Some(dir.as_ref().into()), ..Default::default() };
        config.resolve()
    }

    /// Replace the sources with the files of [`dataset_dir`](Config::dataset_dir), if set.
    ///
    /// Relative file names are resolved against the dataset directory. The other
    /// options are kept.
    pub fn resolve(mut self) -> Result<Self, Report> {
        let Some(dir) = self.dataset_dir.clone() else {
            return Ok(self);
        };
        let path = dir.join("attributes.json");
        info!("Importing Attributes: {path:?}");
        let attributes = Attributes::read(&path)?;
        let files = Config::with_files(&attributes.files);

        self.sequences = files.sequences.resolve(&dir);
        self.metadata = files.metadata.resolve(&dir);
        self.embeddings = files.embeddings.map(|s| s.resolve(&dir));
        self.forecasts = files.forecasts.resolve(&dir);
        self.vaccines = files.vaccines.resolve(&dir);
        self.effectiveness = files.effectiveness.resolve(&dir);
        Ok(self)
    }

    /// Read a [`Config`] from a JSON file.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use flupred::config::Config;
    ///
    /// let config_out = Config { min_cluster_size: 10, ..Default::default() };
    /// let file       = tempfile::NamedTempFile::new()?;
    /// config_out.write(file.path())?;
    ///
    /// let config_in = Config::read(file.path())?;
    /// assert_eq!(config_in, config_out);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn read<R>(path: R) -> Result<Config, Report>
    where
        R: AsRef<Path> + Debug,
    {
        let file = std::fs::File::open(&path).wrap_err(eyre!("Failed to open Config file: {path:?}."))?;
        let reader = std::io::BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .wrap_err(eyre!("Failed to deserialize Config file: {path:?}."))?;
        Ok(config)
    }

    /// Write a [`Config`] to a JSON file.
    pub fn write<W>(&self, path: W) -> Result<(), Report>
    where
        W: AsRef<Path> + Debug,
    {
        let mut file = std::fs::File::create(&path).wrap_err(eyre!("Failed to create Config file: {path:?}"))?;
        let output =
            serde_json::to_string_pretty(self).wrap_err(eyre!("Failed to serialize Config: {self:?}"))?;
        file.write_all(format!("{}\n", output).as_bytes())
            .wrap_err(eyre!("Failed to write Config file: {path:?}"))?;
        Ok(())
    }
}
