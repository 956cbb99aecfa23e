//! Chart data for the dashboard and its embeddable fragments.
//!
//! Charts are plain data. Rendering is left to the client, which reads the JSON
//! blocks written by [`Fragment::embed`].

use crate::aggregate::{QuarterlyBucket, YearlyCounts};
use crate::cluster::{build_hulls, DimensionPair, SkippedCluster};
use crate::effectiveness;
use crate::error::{Error, Result};
use crate::forecast::ForecastPoint;
use crate::vaccine::VaccineStrain;
use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


/// Fraction of the data span added on each side of an axis.
pub const PADDING: f64 = 0.05;

// ----------------------------------------------------------------------------
// Axis Range
// ----------------------------------------------------------------------------

/// A shared axis extent. Views that plot the same dimension carry the same `id`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AxisRange {
    pub id: String,
    pub label: String,
    pub start: f64,
    pub end: f64,
}

impl AxisRange {
    /// Range id of embedding dimension `dim`.
    ///
    /// ```rust
    /// assert_eq!(flupred::chart::AxisRange::dimension_id(1), "dim1");
    /// ```
    pub fn dimension_id(dim: usize) -> String {
        format!("dim{dim}")
    }

    /// Extent covering `values` with [`PADDING`] on both sides.
    ///
    /// ```rust
    /// use flupred::chart::AxisRange;
    /// let range = AxisRange::covering("dim0", "Dimension 1", [0.0, 10.0]);
    /// assert_eq!((range.start, range.end), (-0.5, 10.5));
    /// ```
    pub fn covering<I>(id: &str, label: &str, values: I) -> AxisRange
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| (min.min(v), max.max(v)));

        let (start, end) = if min > max {
            (-1.0, 1.0)
        } else {
            let span = max - min;
            let pad = if span > 0.0 { span * PADDING } else { 0.5 };
            (min - pad, max + pad)
        };
        AxisRange { id: id.to_string(), label: label.to_string(), start, end }
    }
}

/// Axis label of embedding dimension `dim`, counted from 1.
///
/// ```rust
/// assert_eq!(flupred::chart::dimension_label(0), "Dimension 1");
/// ```
pub fn dimension_label(dim: usize) -> String {
    format!("Dimension {}", dim + 1)
}

// ----------------------------------------------------------------------------
// Coordinate Views
// ----------------------------------------------------------------------------

/// Average embedding position of one quarter.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct QuarterPoint {
    pub quarter: String,
    pub date: Option<NaiveDate>,
    pub year: i32,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub color: String,
}

/// Embedding position of a vaccine strain.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VaccinePoint {
    pub strain_name: String,
    pub years_deployed: Vec<i32>,
    pub x: f64,
    pub y: f64,
}

/// Outline of a forecast cluster.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HullOutline {
    pub label: String,
    pub color: Option<String>,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// One scatter view of the embedding, projected onto a [`DimensionPair`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CoordinateView {
    pub id: String,
    pub title: String,
    pub pair: DimensionPair,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub quarters: Vec<QuarterPoint>,
    pub vaccines: Vec<VaccinePoint>,
    pub hulls: Vec<HullOutline>,
    /// Forecast clusters without an outline in this view.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<SkippedCluster>,
}

/// Build the linked coordinate views, one per dimension pair.
///
/// Each view plots the quarterly averages, the vaccine strains and the outline of
/// every forecast cluster with at least `min_points` members. Axis ranges belong to
/// a dimension, not a view: every view showing dimension `N` on either axis uses the
/// `dimN` range, which covers all values plotted for that dimension.
///
/// ## Examples
///
/// ```rust
/// use flupred::chart::coordinate_views;
/// use flupred::cluster::DimensionPair;
///
/// let views = coordinate_views(&[], &[], &[], &DimensionPair::defaults(), 25);
/// let ids = views.iter().map(|v| (v.x_range.id.as_str(), v.y_range.id.as_str())).collect::<Vec<_>>();
/// assert_eq!(ids, [("dim0", "dim1"), ("dim1", "dim2"), ("dim0", "dim2")]);
/// ```
pub fn coordinate_views(
    buckets: &[QuarterlyBucket],
    vaccines: &[VaccineStrain],
    forecasts: &[ForecastPoint],
    pairs: &[DimensionPair],
    min_points: usize,
) -> Vec<CoordinateView> {
    let views = pairs
        .iter()
        .map(|pair| {
            let (cx, cy) = (pair.x(), pair.y());
            let quarters = buckets
                .iter()
                .filter_map(|b| {
                    Some(QuarterPoint {
                        quarter: b.quarter.to_string(),
                        date: b.quarter.end(),
                        year: b.quarter.year,
                        count: b.count,
                        x: b.coord(cx)?,
                        y: b.coord(cy)?,
                        color: b.color.clone(),
                    })
                })
                .collect();
            let vaccines = vaccines
                .iter()
                .filter_map(|v| {
                    Some(VaccinePoint {
                        strain_name: v.strain_name.clone(),
                        years_deployed: v.years_deployed.clone(),
                        x: v.coord(cx)?,
                        y: v.coord(cy)?,
                    })
                })
                .collect();
            let set = build_hulls(forecasts, *pair, min_points);
            let hulls = set
                .hulls
                .into_iter()
                .map(|h| HullOutline { label: h.label, color: h.display, xs: h.xs, ys: h.ys })
                .collect();

            CoordinateView {
                id: format!("coords-{cx}-{cy}"),
                title: format!("{} vs. {}", dimension_label(cy), dimension_label(cx)),
                pair: *pair,
                // placeholders until every view has been collected
                x_range: AxisRange::covering(&AxisRange::dimension_id(cx), &dimension_label(cx), []),
                y_range: AxisRange::covering(&AxisRange::dimension_id(cy), &dimension_label(cy), []),
                quarters,
                vaccines,
                hulls,
                skipped: set.skipped,
            }
        })
        .collect_vec();

    // gather the plotted values of each dimension across views
    let mut values: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for view in &views {
        let xs = view.quarters.iter().map(|q| q.x).chain(view.vaccines.iter().map(|v| v.x));
        let ys = view.quarters.iter().map(|q| q.y).chain(view.vaccines.iter().map(|v| v.y));
        values.entry(view.pair.x()).or_default().extend(xs.chain(view.hulls.iter().flat_map(|h| h.xs.clone())));
        values.entry(view.pair.y()).or_default().extend(ys.chain(view.hulls.iter().flat_map(|h| h.ys.clone())));
    }
    let ranges: BTreeMap<usize, AxisRange> = values
        .into_iter()
        .map(|(dim, values)| {
            (dim, AxisRange::covering(&AxisRange::dimension_id(dim), &dimension_label(dim), values))
        })
        .collect();

    views
        .into_iter()
        .map(|mut view| {
            if let Some(range) = ranges.get(&view.pair.x()) {
                view.x_range = range.clone();
            }
            if let Some(range) = ranges.get(&view.pair.y()) {
                view.y_range = range.clone();
            }
            view
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Line Charts
// ----------------------------------------------------------------------------

/// A single series line chart.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LineChart {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    /// Missing values leave a gap in the line.
    pub y: Vec<Option<f64>>,
    /// Hover text, one per point.
    pub labels: Vec<String>,
    /// Fixed y extent, otherwise fitted by the renderer.
    pub y_range: Option<(f64, f64)>,
}

/// Number of sequences collected per year.
///
/// ```rust
/// use flupred::aggregate::YearlyCounts;
/// use flupred::chart::sequences_per_year;
///
/// let counts = YearlyCounts { host_species: "IRD:Human".into(), counts: [(2018, 2), (2019, 1)].into() };
/// let chart = sequences_per_year(&counts);
/// assert_eq!(chart.x, [2018.0, 2019.0]);
/// assert_eq!(chart.y, [Some(2.0), Some(1.0)]);
/// ```
pub fn sequences_per_year(counts: &YearlyCounts) -> LineChart {
    LineChart {
        id: "sequences-per-year".to_string(),
        title: "Number of Sequences per Year".to_string(),
        x_label: "Year".to_string(),
        y_label: "Number of Sequences".to_string(),
        x: counts.counts.keys().map(|year| *year as f64).collect(),
        y: counts.counts.values().map(|n| Some(*n as f64)).collect(),
        labels: counts.counts.iter().map(|(year, n)| format!("{year}: {n} sequences")).collect(),
        y_range: None,
    }
}

/// Overall vaccine effectiveness by season start year, on a 0 to 100 axis.
///
/// Rows without a readable season are left out; rows without an estimate leave a gap.
pub fn vaccine_effectiveness(rows: &[effectiveness::Row]) -> LineChart {
    let rows = rows
        .iter()
        .filter_map(|row| row.season_start.map(|year| (year, row)))
        .sorted_by_key(|(year, _)| *year)
        .collect_vec();

    LineChart {
        id: "vaccine-effectiveness".to_string(),
        title: "Vaccine Effectiveness".to_string(),
        x_label: "Season Start".to_string(),
        y_label: "Overall Effectiveness (%)".to_string(),
        x: rows.iter().map(|(year, _)| *year as f64).collect(),
        y: rows.iter().map(|(_, row)| row.overall_ve).collect(),
        labels: rows.iter().map(|(_, row)| format!("{} ({}): CI {}", row.season, row.reference, row.ci)).collect(),
        y_range: Some((0.0, 100.0)),
    }
}

// ----------------------------------------------------------------------------
// Fragment
// ----------------------------------------------------------------------------

/// Any chart the page can embed.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Chart {
    Scatter(CoordinateView),
    Line(LineChart),
}

/// A chart ready to drop into HTML: a placeholder element and a JSON data block.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Fragment {
    pub id: String,
    pub div: String,
    pub script: String,
}

impl Fragment {
    /// Serialize `chart` into an embeddable [`Fragment`].
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use flupred::aggregate::YearlyCounts;
    /// use flupred::chart::{sequences_per_year, Chart, Fragment};
    ///
    /// let chart = Chart::Line(sequences_per_year(&YearlyCounts::default()));
    /// let fragment = Fragment::embed("per-year", &chart)?;
    /// assert_eq!(fragment.div, r#"<div id="per-year" class="chart"></div>"#);
    /// assert!(fragment.script.starts_with(r#"<script type="application/json" data-chart="per-year">{"kind":"line""#));
    /// # Ok::<(), flupred::Error>(())
    /// ```
    pub fn embed(id: &str, chart: &Chart) -> Result<Fragment> {
        let json = serde_json::to_string(chart)
            .map_err(|e| Error::Serialize { id: id.to_string(), reason: e.to_string() })?;
        // keep the block from closing the script element early
        let json = json.replace("</", "<\\/");
        Ok(Fragment {
            id: id.to_string(),
            div: format!(r#"<div id="{id}" class="chart"></div>"#),
            script: format!(r#"<script type="application/json" data-chart="{id}">{json}</script>"#),
        })
    }
}
