//! Forecasted embedding coordinates and their cluster labels.

use crate::error::{Error, Result};
use crate::metadata::{coord_column, is_missing, COORD_PREFIX};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Columns of the forecast table with a fixed meaning.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Columns {
    /// Categorical cluster assignment.
    pub label: String,
    /// Optional display color of the cluster.
    pub display: Option<String>,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            label: "matplotlib_colors".to_string(),
            display: Some("hexdecimal_colors".to_string()),
        }
    }
}

/// One simulated future sequence, projected into the embedding.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Coordinates by embedding dimension.
    pub coords: BTreeMap<usize, f64>,
    /// Cluster assignment, not derived from the coordinates.
    pub label: String,
    /// How the renderer should color the cluster, if the table says.
    pub display: Option<String>,
}

impl ForecastPoint {
    pub fn coord(&self, dim: usize) -> Option<f64> {
        self.coords.get(&dim).copied()
    }
}

/// Parse a forecast coordinate table.
///
/// Every `coordsN` column becomes dimension `N`; any other column except the label and
/// display columns is ignored. Rows without a label are [`DataUnavailable`](Error::DataUnavailable).
///
/// ## Examples
///
/// ```rust
/// use flupred::forecast::{parse, Columns};
///
/// let text = "\
/// ,coords0,coords1,coords2,matplotlib_colors,hexdecimal_colors
/// 0,0.1,0.2,0.3,C0,#1f77b4
/// 1,0.4,0.5,,C1,#ff7f0e
/// ";
/// let points = parse(text, ',', &Columns::default(), "forecast.csv")?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[1].label, "C1");
/// assert_eq!(points[1].display.as_deref(), Some("#ff7f0e"));
/// assert_eq!(points[1].coord(1), Some(0.5));
/// assert_eq!(points[1].coord(2), None);
/// # Ok::<(), flupred::Error>(())
/// ```
pub fn parse(text: &str, delimiter: char, columns: &Columns, source_name: &str) -> Result<Vec<ForecastPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::unavailable(source_name, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let label_i = headers.iter().position(|h| *h == columns.label).ok_or_else(|| {
        Error::unavailable(source_name, format!("missing column {:?}", columns.label))
    })?;
    let display_i =
        columns.display.as_ref().and_then(|display| headers.iter().position(|h| h == display));

    // (column index, dimension)
    let dims: Vec<(usize, usize)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let dim = h.strip_prefix(COORD_PREFIX)?.parse::<usize>().ok()?;
            (coord_column(dim) == *h).then_some((i, dim))
        })
        .collect();

    let mut points = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::unavailable(source_name, e))?;
        let label = record.get(label_i).map(str::trim).unwrap_or_default();
        if is_missing(label) {
            return Err(Error::unavailable(source_name, format!("row {}: missing cluster label", line + 1)));
        }

        let mut coords = BTreeMap::new();
        for (i, dim) in &dims {
            let cell = record.get(*i).map(str::trim).unwrap_or_default();
            if is_missing(cell) {
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| {
                Error::unavailable(source_name, format!("row {}: {:?} is not a number", line + 1, cell))
            })?;
            if !value.is_nan() {
                coords.insert(*dim, value);
            }
        }

        let display = display_i
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|c| !is_missing(c))
            .map(String::from);

        points.push(ForecastPoint { coords, label: label.to_string(), display });
    }

    debug!("{source_name}: parsed {} forecast points", points.len());
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::{Report, Result};

    #[test]
    fn custom_columns_without_display() -> Result<(), Report> {
        let text = "coords0\tcoords1\tcluster\tcoordsx\n1.5\tNaN\tA\t9\n";
        let columns = Columns { label: "cluster".to_string(), display: None };
        let points = parse(text, '\t', &columns, "forecast.tsv")?;
        assert_eq!(points[0].coords.len(), 1);
        assert_eq!(points[0].coord(0), Some(1.5));
        assert_eq!(points[0].display, None);
        Ok(())
    }

    #[test]
    fn missing_label_is_unavailable() {
        let text = "coords0,coords1,matplotlib_colors\n0.1,0.2,\n";
        let result = parse(text, ',', &Columns::default(), "forecast.csv");
        assert!(matches!(result, Err(Error::DataUnavailable { .. })));

        let text = "coords0,coords1\n0.1,0.2\n";
        assert!(parse(text, ',', &Columns::default(), "forecast.csv").is_err());
    }

    #[test]
    fn na_coordinates_are_missing() -> Result<(), Report> {
        let text = "coords0,coords1,matplotlib_colors,hexdecimal_colors\n\
                    NA,0.2,C0,#1f77b4\n\
                    0.3,N/A,C0,NA\n\
                    0.5,0.6,C1,#ff7f0e\n";
        let points = parse(text, ',', &Columns::default(), "forecast.csv")?;
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].coord(0), None);
        assert_eq!(points[0].coord(1), Some(0.2));
        assert_eq!(points[1].coord(1), None);
        assert_eq!(points[1].display, None);
        assert_eq!(points[2].coord(0), Some(0.5));
        Ok(())
    }

    #[test]
    fn na_label_is_unavailable() {
        let text = "coords0,coords1,matplotlib_colors\n0.1,0.2,NA\n";
        let result = parse(text, ',', &Columns::default(), "forecast.csv");
        assert!(matches!(result, Err(Error::DataUnavailable { .. })));
    }
}
