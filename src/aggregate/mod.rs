//! Temporal aggregation of metadata: quarterly means and yearly counts.

pub mod palette;

use crate::error::{Error, Result};
use crate::metadata::{coord_column, Row, Table};
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[cfg(test)]
mod tests;

// ----------------------------------------------------------------------------
// Quarter
// ----------------------------------------------------------------------------

/// A calendar quarter.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Quarter {
    pub year: i32,
    /// 1 to 4.
    pub quarter: u32,
}

impl Display for Quarter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

impl Quarter {
    /// Returns the [`Quarter`] a date falls in.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use flupred::aggregate::Quarter;
    /// let date = NaiveDate::from_ymd_opt(2020, 5, 17).unwrap();
    /// assert_eq!(Quarter::from_date(&date), Quarter { year: 2020, quarter: 2 });
    /// ```
    pub fn from_date(date: &NaiveDate) -> Self {
        Quarter { year: date.year(), quarter: date.month0() / 3 + 1 }
    }

    /// Last day of the quarter, the label used for resampled time series.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use flupred::aggregate::Quarter;
    /// assert_eq!(Quarter { year: 2020, quarter: 1 }.end(), NaiveDate::from_ymd_opt(2020, 3, 31));
    /// assert_eq!(Quarter { year: 2020, quarter: 4 }.end(), NaiveDate::from_ymd_opt(2020, 12, 31));
    /// ```
    pub fn end(&self) -> Option<NaiveDate> {
        let (year, month) = match self.quarter {
            4 => (self.year + 1, 1),
            q => (self.year, q * 3 + 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.pred_opt())
    }
}

// ----------------------------------------------------------------------------
// Quarterly Bucket
// ----------------------------------------------------------------------------

/// Mean of the numeric metadata columns for the rows collected in one [`Quarter`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct QuarterlyBucket {
    pub quarter: Quarter,
    /// Number of rows in the quarter.
    pub count: usize,
    /// Column means, a column with no values in this quarter is absent.
    pub means: BTreeMap<String, f64>,
    /// Position in the sorted sequence of quarters (0 is the earliest).
    pub rank: usize,
    /// Palette color assigned by rank.
    pub color: String,
}

impl QuarterlyBucket {
    /// Mean embedding coordinate for dimension `dim`.
    pub fn coord(&self, dim: usize) -> Option<f64> {
        self.means.get(&coord_column(dim)).copied()
    }
}

/// Resample metadata rows to calendar quarters.
///
/// Every numeric column is averaged over the rows of each quarter, skipping missing
/// values. Quarters without rows are omitted. Buckets are sorted by quarter and colored
/// along the [`inferno`](palette::inferno) ramp, so the earliest quarter is the darkest.
///
/// ## Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use flupred::aggregate::resample_quarterly;
/// use flupred::metadata::{Row, Table};
///
/// let row = |y, m, d, v| {
///     let mut row = Row::new(NaiveDate::from_ymd_opt(y, m, d).unwrap());
///     row.values.insert("coords0".to_string(), v);
///     row
/// };
/// let table = Table {
///     numeric_columns: vec!["coords0".to_string()],
///     rows: vec![row(2020, 1, 5, 1.0), row(2020, 2, 20, 2.0), row(2020, 4, 1, 3.5)],
/// };
///
/// let buckets = resample_quarterly(&table);
/// assert_eq!(buckets.len(), 2);
/// assert_eq!(buckets[0].coord(0), Some(1.5));
/// assert_eq!(buckets[1].coord(0), Some(3.5));
/// ```
pub fn resample_quarterly(table: &Table) -> Vec<QuarterlyBucket> {
    let groups = table.rows.iter().into_group_map_by(|row| Quarter::from_date(&row.collection_date));
    let colors = palette::inferno(groups.len());

    let buckets: Vec<QuarterlyBucket> = groups
        .into_iter()
        .sorted_by_key(|(quarter, _)| *quarter)
        .zip(colors)
        .enumerate()
        .map(|(rank, ((quarter, rows), color))| {
            let means = table
                .numeric_columns
                .iter()
                .filter_map(|column| {
                    let values = rows.iter().filter_map(|row| row.values.get(column)).collect_vec();
                    match values.is_empty() {
                        true => None,
                        false => {
                            let mean = values.iter().copied().sum::<f64>() / values.len() as f64;
                            Some((column.clone(), mean))
                        }
                    }
                })
                .collect();
            QuarterlyBucket { quarter, count: rows.len(), means, rank, color }
        })
        .collect();

    debug!("Resampled {} rows into {} quarters", table.rows.len(), buckets.len());
    buckets
}

// ----------------------------------------------------------------------------
// Yearly Counts
// ----------------------------------------------------------------------------

/// Keep only the rows whose host species is exactly `host_species`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use flupred::aggregate::filter_host;
/// use flupred::metadata::Row;
///
/// let mut human = Row::new(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
/// human.host_species = Some("Human".to_string());
/// let swine = Row::new(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
/// let rows = [human, swine];
///
/// let once = filter_host(&rows, "Human");
/// let twice = filter_host(once.iter().copied(), "Human");
/// assert_eq!(once.len(), 1);
/// assert_eq!(once, twice);
/// ```
pub fn filter_host<'r, I>(rows: I, host_species: &str) -> Vec<&'r Row>
where
    I: IntoIterator<Item = &'r Row>,
{
    rows.into_iter().filter(|row| row.host_species.as_deref() == Some(host_species)).collect()
}

/// Number of rows per collection year for one host species.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct YearlyCounts {
    pub host_species: String,
    pub counts: BTreeMap<i32, usize>,
}

/// Summary of a [`YearlyCounts`], for page counters.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct YearSummary {
    pub total: usize,
    pub min_year: i32,
    pub max_year: i32,
}

impl YearlyCounts {
    /// Total number of rows that passed the host filter.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Earliest year, [`EmptyDataset`](Error::EmptyDataset) if no rows passed the filter.
    pub fn min_year(&self) -> Result<i32> {
        self.counts.keys().next().copied().ok_or_else(|| self.empty())
    }

    /// Latest year, [`EmptyDataset`](Error::EmptyDataset) if no rows passed the filter.
    pub fn max_year(&self) -> Result<i32> {
        self.counts.keys().next_back().copied().ok_or_else(|| self.empty())
    }

    /// Total, minimum year and maximum year together.
    pub fn summary(&self) -> Result<YearSummary> {
        Ok(YearSummary { total: self.total(), min_year: self.min_year()?, max_year: self.max_year()? })
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn empty(&self) -> Error {
        Error::EmptyDataset(format!("no rows with host species {:?}", self.host_species))
    }
}

/// Count rows per collection year, after filtering to one host species.
///
/// ## Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use flupred::aggregate::count_per_year;
/// use flupred::metadata::{Row, Table};
///
/// let row = |year| {
///     let mut row = Row::new(NaiveDate::from_ymd_opt(year, 6, 1).unwrap());
///     row.host_species = Some("Human".to_string());
///     row
/// };
/// let table = Table { numeric_columns: Vec::new(), rows: vec![row(2018), row(2018), row(2019)] };
///
/// let counts = count_per_year(&table, "Human");
/// assert_eq!(counts.counts.get(&2018), Some(&2));
/// assert_eq!(counts.counts.get(&2019), Some(&1));
///
/// let summary = counts.summary()?;
/// assert_eq!((summary.total, summary.min_year, summary.max_year), (3, 2018, 2019));
///
/// assert!(count_per_year(&table, "Swine").summary().is_err());
/// # Ok::<(), flupred::Error>(())
/// ```
pub fn count_per_year(table: &Table, host_species: &str) -> YearlyCounts {
    let counts = filter_host(&table.rows, host_species).into_iter().counts_by(|row| row.year());
    YearlyCounts { host_species: host_species.to_string(), counts: counts.into_iter().collect() }
}
