//! Metadata to identify a dataset ([`Name`]) and the files it is made of ([`Files`]).

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::io::Write;
use std::str::FromStr;
use strum::{EnumIter, EnumProperty};

/// Published seasonal vaccine effectiveness estimates.
pub const EFFECTIVENESS_URL: &str = "https://www.cdc.gov/flu/vaccines-work/past-seasons-estimates.html";

// ----------------------------------------------------------------------------
// Dataset Name
// ----------------------------------------------------------------------------

/// The name of a dataset.
#[derive(Clone, Copy, Debug, Default, Deserialize, EnumIter, EnumProperty, PartialEq, Serialize)]
pub enum Name {
    /// Small self-consistent dataset for testing.
    #[serde(rename = "toy1")]
    #[strum(props(implemented = "true", description = "Toy dataset for testing."))]
    Toy1,
    /// Files prepared by the user, in the default locations.
    #[default]
    #[serde(rename = "custom")]
    #[strum(props(implemented = "true", description = "User files under data/."))]
    Custom,
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Name::Toy1 => "toy1",
            Name::Custom => "custom",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Name {
    type Err = Report;

    fn from_str(name: &str) -> Result<Self, Report> {
        let name = match name {
            "toy1" => Name::Toy1,
            "custom" => Name::Custom,
            _ => Err(eyre!("Unknown dataset name: {name}")).suggestion("Please choose from: toy1, custom")?,
        };
        Ok(name)
    }
}

impl Name {
    /// Default [`Files`] of a named dataset.
    ///
    /// ```rust
    /// use flupred::dataset::Name;
    /// assert_eq!(Name::Toy1.files().metadata, "metadata.tsv");
    /// assert_eq!(Name::Custom.files().metadata, "data/metadata.tsv");
    /// ```
    pub fn files(&self) -> Files {
        match self {
            Name::Toy1 => Files {
                sequences: "predictions.fasta".to_string(),
                metadata: "metadata.tsv".to_string(),
                embeddings: None,
                forecasts: "forecast.csv".to_string(),
                vaccines: "vaccine_strains.yaml".to_string(),
                effectiveness: "effectiveness.html".to_string(),
            },
            Name::Custom => Files::default(),
        }
    }
}

// ----------------------------------------------------------------------------
// Dataset Files
// ----------------------------------------------------------------------------

/// Paths (relative to the dataset directory) or URLs of each input.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Files {
    pub sequences: String,
    pub metadata: String,
    /// Separate table with embedding coordinates, otherwise read from `metadata`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeddings: Option<String>,
    pub forecasts: String,
    pub vaccines: String,
    pub effectiveness: String,
}

impl Default for Files {
    fn default() -> Self {
        Files {
            sequences: "data/predictions.fasta".to_string(),
            metadata: "data/metadata.tsv".to_string(),
            embeddings: None,
            forecasts: "data/forecast.csv".to_string(),
            vaccines: "data/vaccine_strains.yaml".to_string(),
            effectiveness: EFFECTIVENESS_URL.to_string(),
        }
    }
}

// ----------------------------------------------------------------------------
// Dataset Attributes
// ----------------------------------------------------------------------------

/// [`Attributes`] of a dataset directory, stored as `attributes.json`.
///
/// ## Examples
///
/// ```rust
/// use flupred::dataset::{Attributes, Name};
/// let attributes = Attributes { name: Name::Toy1, files: Name::Toy1.files(), ..Default::default() };
/// assert!(attributes.version.starts_with("flupred"));
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Attributes {
    /// Dataset [`Name`].
    pub name: Name,
    /// CLI version used to create the dataset (ex. "flupred 0.1.0").
    pub version: String,
    /// Dataset [`Files`].
    pub files: Files,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    /// Returns new [`Attributes`] of a [`Custom`](Name::Custom) dataset.
    pub fn new() -> Self {
        Attributes {
            name: Name::default(),
            version: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            files: Files::default(),
        }
    }

    /// Read [`Attributes`] from a JSON file.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use flupred::dataset::Attributes;
    ///
    /// let attr_out = Attributes::new();
    /// let file     = tempfile::NamedTempFile::new()?;
    /// attr_out.write(file.path())?;
    ///
    /// let attr_in = Attributes::read(file.path())?;
    /// assert_eq!(attr_in, attr_out);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn read<R>(path: R) -> Result<Attributes, Report>
    where
        R: AsRef<std::path::Path> + Debug,
    {
        let file = std::fs::File::open(&path)
            .wrap_err(eyre!("Failed to open Attributes file: {path:?}."))?;
        let reader = std::io::BufReader::new(file);
        let attributes = serde_json::from_reader(reader)
            .wrap_err(eyre!("Failed to deserialize Attributes file: {path:?}."))?;
        Ok(attributes)
    }

    /// Write [`Attributes`] to a JSON file.
    pub fn write<W>(&self, path: W) -> Result<(), Report>
    where
        W: AsRef<std::path::Path> + Debug,
    {
        let mut file = std::fs::File::create(&path)
            .wrap_err(eyre!("Failed to create Attributes file: {path:?}"))?;
        let output = serde_json::to_string_pretty(self)
            .wrap_err(eyre!("Failed to serialize Attributes: {self:?}"))?;
        file.write_all(format!("{}\n", output).as_bytes())
            .wrap_err(eyre!("Failed to write Attributes file: {path:?}"))?;
        Ok(())
    }
}
