//! Published vaccine effectiveness estimates, scraped from the first table of a web page.

use crate::dataset::Source;
use crate::error::{Error, Result};
use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Column layout every scraped row is re-mapped onto, in page order.
pub const HEADERS: &[&str] = &["season", "reference", "study_sites", "num_patients", "overall_ve", "CI"];

/// One season's effectiveness estimate.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Row {
    pub season: String,
    pub reference: String,
    pub study_sites: String,
    pub num_patients: Option<u64>,
    /// Overall effectiveness in percent.
    pub overall_ve: Option<f64>,
    /// Confidence interval as published.
    #[serde(rename = "CI")]
    pub ci: String,
    /// First year of the season (`2004-05` starts in 2004).
    pub season_start: Option<i32>,
}

impl Row {
    /// Map the cells of one table row onto the fixed [`HEADERS`] by position.
    ///
    /// ```rust
    /// use flupred::effectiveness::Row;
    /// let cells = ["2014-15", "Zimmerman 2016", "5", "9,311", "19%", "(10, 27)"].map(String::from);
    /// let row = Row::from_cells(&cells)?;
    /// assert_eq!(row.season_start, Some(2014));
    /// assert_eq!(row.num_patients, Some(9311));
    /// assert_eq!(row.overall_ve, Some(19.0));
    /// # Ok::<(), flupred::Error>(())
    /// ```
    pub fn from_cells(cells: &[String]) -> Result<Row> {
        if cells.len() < HEADERS.len() {
            return Err(Error::unavailable(
                "effectiveness table",
                format!("expected {} columns, found {}: {cells:?}", HEADERS.len(), cells.len()),
            ));
        }
        let season = cells[0].clone();
        let season_start = season.split('-').next().and_then(|s| s.trim().parse::<i32>().ok());
        Ok(Row {
            season_start,
            season,
            reference: cells[1].clone(),
            study_sites: cells[2].clone(),
            num_patients: cells[3].replace(',', "").trim().parse::<u64>().ok(),
            overall_ve: leading_number(&cells[4]),
            ci: cells[5].clone(),
        })
    }
}

/// Parse the first `<table>` of an HTML page into effectiveness [`Row`]s.
///
/// Cells spanning several rows or columns (`rowspan`, `colspan`) are repeated into
/// every position they cover. The first table row is the header and is dropped;
/// columns are re-mapped by position so a renamed header does not break parsing.
/// Rows still too short after expansion are skipped with a warning. Fails with
/// [`DataUnavailable`](Error::DataUnavailable) when the page has no table or no
/// usable rows.
///
/// ## Examples
///
/// ```rust
/// use flupred::effectiveness::parse_html;
/// let html = r#"<html><body><table>
///   <tr><th>Influenza Season</th><th>Reference</th><th>Study Site(s)</th><th>No. of Patients</th><th>Adjusted Overall VE (%)</th><th>95% CI</th></tr>
///   <tr><td>2004-05</td><td><a href="x">Belongia 2009</a></td><td>WI</td><td>762</td><td>10</td><td>-36, 40</td></tr>
/// </table></body></html>"#;
/// let rows = parse_html(html, "cdc")?;
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].reference, "Belongia 2009");
/// # Ok::<(), flupred::Error>(())
/// ```
pub fn parse_html(html: &str, source_name: &str) -> Result<Vec<Row>> {
    let re_table = regex(r"(?is)<table\b[^>]*>(.*?)</table\s*>")?;
    let re_row = regex(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>")?;
    let re_cell = regex(r"(?is)<t[hd]\b([^>]*)>(.*?)</t[hd]\s*>")?;
    let re_span = regex(r#"(?i)\b(rowspan|colspan)\s*=\s*["']?\s*(\d+)"#)?;
    let re_tag = regex(r"(?s)<[^>]*>")?;
    let re_space = regex(r"\s+")?;

    let table = re_table
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::unavailable(source_name, "no table found"))?
        .as_str();

    let cells = |row: &str| -> Vec<Cell> {
        re_cell
            .captures_iter(row)
            .map(|c| {
                let attributes = c.get(1).map(|m| m.as_str()).unwrap_or_default();
                let mut cell = Cell { text: String::new(), rows: 1, cols: 1 };
                for span in re_span.captures_iter(attributes) {
                    let n = span[2].parse::<usize>().unwrap_or(1).max(1);
                    match span[1].to_ascii_lowercase().as_str() {
                        "rowspan" => cell.rows = n,
                        _ => cell.cols = n,
                    }
                }
                let content = c.get(2).map(|m| m.as_str()).unwrap_or_default();
                let text = decode_entities(&re_tag.replace_all(content, " "));
                cell.text = re_space.replace_all(&text, " ").trim().to_string();
                cell
            })
            .collect()
    };

    let grid = expand_spans(
        re_row.captures_iter(table).filter_map(|c| c.get(1)).map(|row| cells(row.as_str())),
    );

    let mut rows = Vec::new();
    let data = grid
        .into_iter()
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        // header
        .skip(1);
    for (i, cells) in data.enumerate() {
        match Row::from_cells(&cells) {
            Ok(row) => rows.push(row),
            Err(e) => warn!("{source_name}: skipping table row {}: {e}", i + 1),
        }
    }

    if rows.is_empty() {
        return Err(Error::unavailable(source_name, "table has no rows"));
    }
    Ok(rows)
}

/// A table cell and the number of rows and columns it covers.
#[derive(Clone, Debug)]
struct Cell {
    text: String,
    rows: usize,
    cols: usize,
}

/// Lay out table rows on a grid, repeating spanning cells into every slot they cover.
fn expand_spans<I>(rows: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = Vec<Cell>>,
{
    // per column: (text, rows still covered below the current one)
    let mut pending: Vec<Option<(String, usize)>> = Vec::new();
    let mut grid = Vec::new();

    for cells in rows {
        let mut out = Vec::new();
        for cell in cells {
            take_pending(&mut out, &mut pending);
            for _ in 0..cell.cols {
                let col = out.len();
                if pending.len() <= col {
                    pending.resize(col + 1, None);
                }
                pending[col] = (cell.rows > 1).then(|| (cell.text.clone(), cell.rows - 1));
                out.push(cell.text.clone());
            }
        }
        take_pending(&mut out, &mut pending);
        grid.push(out);
    }

    grid
}

/// Fill `out` from the cells of earlier rows that still cover its next columns.
fn take_pending(out: &mut Vec<String>, pending: &mut [Option<(String, usize)>]) {
    while let Some(slot) = pending.get_mut(out.len()) {
        let Some((text, remaining)) = slot.as_mut() else { break };
        out.push(text.clone());
        *remaining -= 1;
        if *remaining == 0 {
            *slot = None;
        }
    }
}

/// Fetch and parse the effectiveness table from `source`.
pub async fn load(source: &Source) -> Result<Vec<Row>> {
    let html = source.read_text().await?;
    let rows = parse_html(&html, &source.to_string())?;
    info!("Parsed {} effectiveness estimates.", rows.len());
    Ok(rows)
}

fn regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::unavailable("effectiveness parser", e))
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&ndash;", "-")
        .replace("&#8211;", "-")
        .replace("&minus;", "-")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// The first number in a cell (`"19%"`, `"-7 (-26, 10)"`), if any.
fn leading_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    let end = cell
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(cell.len());
    cell[..end].parse::<f64>().ok()
}
