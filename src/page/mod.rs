//! Build the dashboard page: run the whole pipeline and render its fragments.

use crate::aggregate::{count_per_year, resample_quarterly};
use crate::chart::{self, Chart, Fragment};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::effectiveness;
use crate::error::Result;
use crate::sequence;
use crate::vaccine;
use indoc::indoc;
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// HTML page, `{{name}}` placeholders are replaced by [`PagePayload::render`].
pub const TEMPLATE: &str = indoc! {r#"
    <!DOCTYPE html>
    <html lang="en">
    <head>
      <meta charset="utf-8">
      <title>Flu Forecaster</title>
    </head>
    <body>
      <h1>Flu Forecaster</h1>
      <section id="summary">
        <p>{{n_seqs}} predicted sequences, the longest with {{max_seq_len}} symbols.</p>
        <p>{{total}} {{host_species}} sequences collected from {{min_year}} to {{max_year}}.</p>
      </section>
      <section id="warnings">
    {{warnings}}
      </section>
      <section id="charts">
    {{charts}}
      </section>
    {{scripts}}
    </body>
    </html>
"#};

// ----------------------------------------------------------------------------
// Payload
// ----------------------------------------------------------------------------

/// Counters shown above the charts.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Summary {
    /// Number of predicted sequences.
    pub n_seqs: usize,
    /// Length of the longest predicted sequence.
    pub max_seq_len: usize,
    pub host_species: String,
    /// Sequences of the host species.
    pub total: usize,
    pub min_year: i32,
    pub max_year: i32,
    pub n_quarters: usize,
    pub n_forecast_points: usize,
    pub n_vaccine_strains: usize,
}

impl Summary {
    /// Returns a two column [`tabled::Table`] of the counters.
    pub fn to_table(&self) -> tabled::Table {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["Statistic", "Value"]);
        [
            ("Predicted sequences", self.n_seqs.to_string()),
            ("Longest sequence", self.max_seq_len.to_string()),
            ("Host species", self.host_species.clone()),
            ("Host sequences", self.total.to_string()),
            ("First year", self.min_year.to_string()),
            ("Last year", self.max_year.to_string()),
            ("Quarters", self.n_quarters.to_string()),
            ("Forecast points", self.n_forecast_points.to_string()),
            ("Vaccine strains", self.n_vaccine_strains.to_string()),
        ]
        .into_iter()
        .for_each(|(name, value)| builder.push_record([name.to_string(), value]));
        builder.build()
    }
}

/// Everything the page needs: chart fragments, counters and non-fatal warnings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PagePayload {
    pub summary: Summary,
    /// Coordinate views first, then the line charts.
    pub fragments: Vec<Fragment>,
    /// Problems that left a chart or part of a chart out.
    pub warnings: Vec<String>,
}

impl PagePayload {
    pub fn fragment(&self, id: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.id == id)
    }

    /// Substitute the payload into [`TEMPLATE`].
    ///
    /// ```rust
    /// use flupred::page::PagePayload;
    /// let html = PagePayload::default().render();
    /// assert!(html.starts_with("<!DOCTYPE html>"));
    /// assert!(!html.contains("{{"));
    /// ```
    pub fn render(&self) -> String {
        let s = &self.summary;
        let warnings = self.warnings.iter().map(|w| format!("    <p class=\"warning\">{}</p>", escape(w))).join("\n");
        let charts = self.fragments.iter().map(|f| format!("    {}", f.div)).join("\n");
        let scripts = self.fragments.iter().map(|f| f.script.as_str()).join("\n");

        TEMPLATE
            .replace("{{n_seqs}}", &s.n_seqs.to_string())
            .replace("{{max_seq_len}}", &s.max_seq_len.to_string())
            .replace("{{total}}", &s.total.to_string())
            .replace("{{host_species}}", &escape(&s.host_species))
            .replace("{{min_year}}", &s.min_year.to_string())
            .replace("{{max_year}}", &s.max_year.to_string())
            .replace("{{warnings}}", &warnings)
            .replace("{{charts}}", &charts)
            .replace("{{scripts}}", &scripts)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

// ----------------------------------------------------------------------------
// Build
// ----------------------------------------------------------------------------

/// Build the page payload.
///
/// Loads every input named by `config`, aggregates it and assembles the charts.
/// Failing to load the sequences, metadata, forecasts or vaccine registry aborts with
/// [`DataUnavailable`](crate::Error::DataUnavailable); no sequences of the configured
/// host species aborts with [`EmptyDataset`](crate::Error::EmptyDataset). A missing
/// effectiveness table, a degenerate cluster or an unknown vaccine strain only adds a
/// warning.
///
/// ## Examples
///
/// ```rust
/// # use tokio_test::{block_on, assert_ok};
/// use flupred::{config::Config, dataset::toy1, page};
///
/// let dir = tempfile::tempdir()?;
/// toy1::create(&dir.path())?;
/// let config = Config { min_cluster_size: 3, ..Config::for_dataset(&dir.path())? };
/// # assert_ok!(block_on(async {
/// let payload = page::build(&config).await?;
/// assert_eq!(payload.summary.total, 11);
/// assert!(payload.fragment("vaccine-effectiveness").is_some());
/// # Ok::<(), flupred::Error>(())
/// # }));
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub async fn build(config: &Config) -> Result<PagePayload> {
    info!("Loading dataset.");
    let dataset = Dataset::load(config).await?;

    let counts = count_per_year(&dataset.metadata, &config.host_species);
    let years = counts.summary()?;

    let coordinates = dataset.coordinates();
    let buckets = resample_quarterly(coordinates);
    let dims = coordinates.max_dimension().map(|d| d + 1).unwrap_or_default();
    let vaccines = vaccine::locate(&dataset.vaccines, coordinates, dims);

    let mut warnings = Vec::new();
    dataset
        .vaccines
        .by_strain()
        .keys()
        .filter(|strain| !vaccines.iter().any(|v| &v.strain_name == *strain))
        .for_each(|strain| warnings.push(format!("Vaccine strain {strain} was not found in the metadata.")));

    info!("Assembling charts.");
    let views =
        chart::coordinate_views(&buckets, &vaccines, &dataset.forecasts, &config.views, config.min_cluster_size);
    let mut fragments = Vec::new();
    for view in views {
        view.skipped.iter().for_each(|skipped| {
            warnings.push(format!("{}: no outline for cluster {}, {}.", view.title, skipped.label, skipped.reason))
        });
        fragments.push(Fragment::embed(&view.id.clone(), &Chart::Scatter(view))?);
    }

    let per_year = chart::sequences_per_year(&counts);
    fragments.push(Fragment::embed(&per_year.id.clone(), &Chart::Line(per_year))?);

    match effectiveness::load(&config.effectiveness).await {
        Ok(rows) => {
            let chart = chart::vaccine_effectiveness(&rows);
            fragments.push(Fragment::embed(&chart.id.clone(), &Chart::Line(chart))?);
        }
        Err(e) => {
            warn!("{e}, the vaccine effectiveness chart is left out.");
            warnings.push(format!("Vaccine effectiveness is unavailable: {e}"));
        }
    }

    let summary = Summary {
        n_seqs: dataset.sequences.len(),
        max_seq_len: sequence::lengths(&dataset.sequences).keys().max().copied().unwrap_or_default(),
        host_species: config.host_species.clone(),
        total: years.total,
        min_year: years.min_year,
        max_year: years.max_year,
        n_quarters: buckets.len(),
        n_forecast_points: dataset.forecasts.len(),
        n_vaccine_strains: vaccines.len(),
    };
    info!("Built page with {} charts and {} warnings.", fragments.len(), warnings.len());

    Ok(PagePayload { summary, fragments, warnings })
}
