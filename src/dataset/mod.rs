//! Data [`Source`]s, named dataset [`Attributes`] and loading a [`Dataset`].

mod attributes;
pub mod toy1;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use attributes::*;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::forecast::{self, ForecastPoint};
use crate::metadata::{self, Table};
use crate::sequence;
use crate::utils;
use crate::vaccine::Registry;
#[cfg(feature = "cli")]
use clap::Parser;
use color_eyre::eyre::Report;
use log::info;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::{EnumProperty, IntoEnumIterator};
use tabled::Table as TextTable;

// ----------------------------------------------------------------------------
// Source
// ----------------------------------------------------------------------------

/// Where a backing file lives: a local path or an `http(s)` URL.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl FromStr for Source {
    type Err = Infallible;

    /// ```rust
    /// use flupred::dataset::Source;
    /// use std::path::PathBuf;
    /// assert_eq!("data/metadata.tsv".parse(), Ok(Source::Path(PathBuf::from("data/metadata.tsv"))));
    /// assert!("https://example.org/metadata.csv".parse::<Source>()?.is_remote());
    /// # Ok::<(), std::convert::Infallible>(())
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(Source::from(s.to_string()))
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        match s.starts_with("http://") || s.starts_with("https://") {
            true => Source::Url(s),
            false => Source::Path(PathBuf::from(s)),
        }
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        source.to_string()
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

impl Source {
    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Url(_))
    }

    /// Resolve a relative path against `dir`, URLs and absolute paths are unchanged.
    ///
    /// ```rust
    /// use flupred::dataset::Source;
    /// let source: Source = "metadata.tsv".parse()?;
    /// assert_eq!(source.resolve(&"dataset/toy1").to_string(), "dataset/toy1/metadata.tsv");
    /// # Ok::<(), std::convert::Infallible>(())
    /// ```
    pub fn resolve<P>(&self, dir: &P) -> Source
    where
        P: AsRef<Path>,
    {
        match self {
            Source::Path(path) if path.is_relative() => Source::Path(dir.as_ref().join(path)),
            source => source.clone(),
        }
    }

    /// Column delimiter implied by the file extension.
    ///
    /// ```rust
    /// use flupred::dataset::Source;
    /// assert_eq!("metadata.tsv.zst".parse::<Source>().unwrap().delimiter()?, '\t');
    /// assert_eq!("https://example.org/data/forecast.csv".parse::<Source>().unwrap().delimiter()?, ',');
    /// # Ok::<(), flupred::Error>(())
    /// ```
    pub fn delimiter(&self) -> Result<char> {
        let delimiter = match self {
            Source::Path(path) => utils::get_delimiter(path),
            Source::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                utils::get_delimiter(&path)
            }
        };
        delimiter.map_err(|e| self.unavailable(e))
    }

    /// Read the whole source as text.
    ///
    /// Remote sources are fetched, local files ending in a compression extension are
    /// decompressed on the blocking thread pool. Any failure is
    /// [`DataUnavailable`](Error::DataUnavailable).
    ///
    /// ```rust
    /// # use tokio_test::{block_on, assert_ok};
    /// use flupred::dataset::Source;
    /// let source: Source = "does/not/exist.tsv".parse().unwrap();
    /// assert!(block_on(source.read_text()).is_err());
    /// ```
    pub async fn read_text(&self) -> Result<String> {
        info!("Reading: {self}");
        let text = match self {
            Source::Path(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || utils::read_text(&path))
                    .await
                    .map_err(Report::from)
                    .and_then(|text| text)
            }
            Source::Url(url) => utils::fetch_text(url).await,
        };
        text.map_err(|e| self.unavailable(e))
    }

    fn unavailable(&self, report: Report) -> Error {
        let reason = report.chain().map(|e| e.to_string()).collect::<Vec<_>>().join(": ");
        Error::unavailable(self, reason)
    }
}

// ----------------------------------------------------------------------------
// Dataset
// ----------------------------------------------------------------------------

/// Every input of the dashboard except the effectiveness table, loaded and parsed.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Dataset {
    pub sequences: Vec<sequence::Record>,
    /// Sequence metadata, counted per year.
    pub metadata: Table,
    /// Metadata with embedding coordinates, if kept in a separate table.
    pub embeddings: Option<Table>,
    pub forecasts: Vec<ForecastPoint>,
    pub vaccines: Registry,
}

impl Dataset {
    /// Load every source named by `config`, in order, stopping at the first failure.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use tokio_test::{block_on, assert_ok};
    /// use flupred::{config::Config, dataset::{toy1, Dataset}};
    ///
    /// let dir = tempfile::tempdir()?;
    /// toy1::create(&dir.path())?;
    /// let config = Config::for_dataset(&dir.path())?;
    /// # assert_ok!(block_on(async {
    /// let dataset = Dataset::load(&config).await?;
    /// assert_eq!(dataset.sequences.len(), toy1::SEQUENCES.matches('>').count());
    /// # Ok::<(), flupred::Error>(())
    /// # }));
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub async fn load(config: &Config) -> Result<Dataset> {
        let text = config.sequences.read_text().await?;
        let sequences = sequence::parse(&text, &config.sequences.to_string())?;

        let metadata = load_table(&config.metadata, &config.metadata_columns).await?;
        let embeddings = match &config.embeddings {
            Some(source) => Some(load_table(source, &config.metadata_columns).await?),
            None => None,
        };

        let text = config.forecasts.read_text().await?;
        let delimiter = config.forecasts.delimiter()?;
        let forecasts =
            forecast::parse(&text, delimiter, &config.forecast_columns, &config.forecasts.to_string())?;

        let text = config.vaccines.read_text().await?;
        let vaccines = Registry::parse(&text, &config.vaccines.to_string())?;

        Ok(Dataset { sequences, metadata, embeddings, forecasts, vaccines })
    }

    /// The table that holds embedding coordinates.
    pub fn coordinates(&self) -> &Table {
        self.embeddings.as_ref().unwrap_or(&self.metadata)
    }

    /// Returns a [`TextTable`] of the known datasets and their files.
    ///
    /// ```rust
    /// use flupred::dataset::{Dataset, ListArgs, Name};
    /// let table = Dataset::list(&ListArgs { name: Some(Name::Toy1) });
    /// assert!(table.to_string().contains("toy1"));
    /// assert!(!table.to_string().contains("custom"));
    /// ```
    pub fn list(args: &ListArgs) -> TextTable {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["Name", "Description", "Sequences", "Metadata", "Forecasts", "Vaccines", "Effectiveness"]);

        Name::iter()
            .filter(|name| args.name.map(|n| n == *name).unwrap_or(true))
            .filter(|name| name.get_str("implemented") == Some("true"))
            .for_each(|name| {
                let files = name.files();
                builder.push_record([
                    name.to_string(),
                    name.get_str("description").unwrap_or_default().to_string(),
                    files.sequences,
                    files.metadata,
                    files.forecasts,
                    files.vaccines,
                    files.effectiveness,
                ]);
            });

        builder.build()
    }
}

async fn load_table(source: &Source, columns: &metadata::Columns) -> Result<Table> {
    let text = source.read_text().await?;
    Table::parse(&text, source.delimiter()?, columns, &source.to_string())
}

// ----------------------------------------------------------------------------
// Arguments
// ----------------------------------------------------------------------------

/// Arguments for listing known datasets.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
pub struct ListArgs {
    /// Dataset [`Name`].
    #[cfg_attr(feature = "cli", clap(short = 'n', long))]
    pub name: Option<Name>,
}

/// Arguments for writing the toy dataset.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
pub struct ToyArgs {
    /// Output directory.
    #[cfg_attr(feature = "cli", clap(short = 'o', long, default_value = "dataset/toy1"))]
    pub output_dir: PathBuf,
}

impl Default for ToyArgs {
    fn default() -> Self {
        ToyArgs { output_dir: PathBuf::from("dataset/toy1") }
    }
}
