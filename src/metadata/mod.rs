//! Sequence metadata: one [`Row`] per sequence, with collection dates and embedding coordinates.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// Prefix of the embedding coordinate columns (`coords0`, `coords1`, ...).
pub const COORD_PREFIX: &str = "coords";

/// Returns the name of the column that holds embedding dimension `dim`.
///
/// ```rust
/// assert_eq!(flupred::metadata::coord_column(2), "coords2");
/// ```
pub fn coord_column(dim: usize) -> String {
    format!("{COORD_PREFIX}{dim}")
}

/// Cell values read as missing, on top of the empty cell.
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A",
    "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if a (trimmed) cell holds no value.
///
/// ```rust
/// use flupred::metadata::is_missing;
/// assert!(is_missing(""));
/// assert!(is_missing("NA"));
/// assert!(is_missing("#N/A"));
/// assert!(!is_missing("0.5"));
/// assert!(!is_missing("Namibia"));
/// ```
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_VALUES.contains(&cell)
}

/// Strips the subtype suffix from a strain name.
///
/// ```rust
/// use flupred::metadata::normalize_strain;
/// assert_eq!(normalize_strain("A/Brisbane/10/2007(H3N2)"), "A/Brisbane/10/2007");
/// assert_eq!(normalize_strain("A/Perth/16/2009"), "A/Perth/16/2009");
/// ```
pub fn normalize_strain(strain: &str) -> String {
    strain.split('(').next().unwrap_or_default().trim().to_string()
}

/// Parses a collection date.
///
/// Full dates (`2017-05-31`, `2017/05/31`, `05/31/2017`, `2017-05-31 00:00:00`) are
/// read as is, partial dates fall on the first day of the month or year.
///
/// ```rust
/// use chrono::NaiveDate;
/// use flupred::metadata::parse_date;
/// assert_eq!(parse_date("2017-05-31"), Some(NaiveDate::from_ymd_opt(2017, 5, 31).unwrap()));
/// assert_eq!(parse_date("05/31/2017"), Some(NaiveDate::from_ymd_opt(2017, 5, 31).unwrap()));
/// assert_eq!(parse_date("2009-04"),    Some(NaiveDate::from_ymd_opt(2009, 4, 1).unwrap()));
/// assert_eq!(parse_date("2009"),       Some(NaiveDate::from_ymd_opt(2009, 1, 1).unwrap()));
/// assert_eq!(parse_date("unknown"),    None);
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if value.len() == 4 {
        return value.parse::<i32>().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}

// ----------------------------------------------------------------------------
// Columns
// ----------------------------------------------------------------------------

/// Names of the columns with a fixed meaning.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Columns {
    pub name: String,
    pub date: String,
    pub host: String,
    pub strain: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            name: "Name".to_string(),
            date: "Collection Date".to_string(),
            host: "Host Species".to_string(),
            strain: "Strain Name".to_string(),
        }
    }
}

impl Columns {
    fn is_reserved(&self, header: &str) -> bool {
        header.is_empty()
            || header == self.name
            || header == self.date
            || header == self.host
            || header == self.strain
    }
}

// ----------------------------------------------------------------------------
// Row
// ----------------------------------------------------------------------------

/// One sequence's metadata.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Row {
    pub name: Option<String>,
    pub collection_date: NaiveDate,
    pub host_species: Option<String>,
    /// Strain name as written in the table.
    pub strain_name: Option<String>,
    /// Numeric columns, absent when the cell was empty.
    pub values: BTreeMap<String, f64>,
    /// Remaining non-numeric columns (country, clade, ...).
    pub labels: BTreeMap<String, String>,
}

impl Row {
    /// Returns a row with just a collection date.
    pub fn new(collection_date: NaiveDate) -> Self {
        Row {
            name: None,
            collection_date,
            host_species: None,
            strain_name: None,
            values: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Embedding coordinate for dimension `dim`.
    pub fn coord(&self, dim: usize) -> Option<f64> {
        self.values.get(&coord_column(dim)).copied()
    }

    /// Year of the collection date.
    pub fn year(&self) -> i32 {
        self.collection_date.year()
    }

    /// Strain name without its subtype suffix.
    pub fn normalized_strain(&self) -> Option<String> {
        self.strain_name.as_deref().map(normalize_strain)
    }
}

// ----------------------------------------------------------------------------
// Table
// ----------------------------------------------------------------------------

/// Parsed metadata [`Row`]s and the names of their numeric columns.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Table {
    /// Columns whose non-empty cells all parse as numbers, in file order.
    pub numeric_columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Parse a delimited metadata table.
    ///
    /// A column with an empty header (ex. a pandas index) is ignored. Rows with an
    /// empty collection date are skipped; any other unreadable date makes the whole
    /// table [`DataUnavailable`](Error::DataUnavailable).
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use flupred::metadata::{Columns, Table};
    ///
    /// let text = "\
    /// Name\tCollection Date\tHost Species\tStrain Name\tCountry\tcoords0\tcoords1
    /// s1\t2017-01-15\tIRD:Human\tA/Perth/16/2009(H3N2)\tAustralia\t0.5\t1.0
    /// s2\t2017-04-02\tIRD:Swine\tA/swine/Iowa/1/2017(H3N2)\tUSA\t1.5\t
    /// ";
    /// let table = Table::parse(text, '\t', &Columns::default(), "metadata.tsv")?;
    /// assert_eq!(table.numeric_columns, ["coords0", "coords1"]);
    /// assert_eq!(table.rows[0].coord(1), Some(1.0));
    /// assert_eq!(table.rows[1].coord(1), None);
    /// assert_eq!(table.rows[1].labels["Country"], "USA");
    /// # Ok::<(), flupred::Error>(())
    /// ```
    pub fn parse(text: &str, delimiter: char, columns: &Columns, source_name: &str) -> Result<Table> {
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

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::unavailable(source_name, e))?;

        let position = |header: &str| headers.iter().position(|h| h == header);
        let date_i = position(&columns.date).ok_or_else(|| {
            Error::unavailable(source_name, format!("missing column {:?}", columns.date))
        })?;
        let name_i = position(&columns.name);
        let host_i = position(&columns.host);
        let strain_i = position(&columns.strain);

        // classify the remaining columns as numeric or label
        let numeric: Vec<bool> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                if columns.is_reserved(header) {
                    return false;
                }
                let cells = records.iter().filter_map(|r| r.get(i)).map(str::trim);
                let mut present = cells.filter(|c| !is_missing(c)).peekable();
                present.peek().is_some() && present.all(|c| c.parse::<f64>().is_ok())
            })
            .collect();

        let numeric_columns =
            headers.iter().zip(&numeric).filter(|(_, n)| **n).map(|(h, _)| h.clone()).collect();

        let optional = |record: &csv::StringRecord, i: Option<usize>| {
            i.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|c| !is_missing(c))
                .map(String::from)
        };

        let mut rows = Vec::with_capacity(records.len());
        for (line, record) in records.iter().enumerate() {
            let date = record.get(date_i).map(str::trim).unwrap_or_default();
            if is_missing(date) {
                debug!("{source_name}: skipping row {} with no collection date", line + 1);
                continue;
            }
            let collection_date = parse_date(date).ok_or_else(|| {
                Error::unavailable(
                    source_name,
                    format!("row {}: unreadable collection date {date:?}", line + 1),
                )
            })?;

            let mut row = Row::new(collection_date);
            row.name = optional(record, name_i);
            row.host_species = optional(record, host_i);
            row.strain_name = optional(record, strain_i);

            for (i, header) in headers.iter().enumerate() {
                if columns.is_reserved(header) {
                    continue;
                }
                let cell = record.get(i).map(str::trim).unwrap_or_default();
                if is_missing(cell) {
                    continue;
                }
                if numeric[i] {
                    if let Ok(value) = cell.parse::<f64>() {
                        if !value.is_nan() {
                            row.values.insert(header.clone(), value);
                        }
                    }
                } else {
                    row.labels.insert(header.clone(), cell.to_string());
                }
            }
            rows.push(row);
        }

        debug!("{source_name}: parsed {} metadata rows", rows.len());
        Ok(Table { numeric_columns, rows })
    }

    /// Highest embedding dimension `N` with a `coordsN` column, if any.
    pub fn max_dimension(&self) -> Option<usize> {
        self.numeric_columns
            .iter()
            .filter_map(|c| c.strip_prefix(COORD_PREFIX))
            .filter_map(|d| d.parse::<usize>().ok())
            .max()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
