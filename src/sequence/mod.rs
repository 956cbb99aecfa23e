//! Sequence [`Record`]s read from fasta files.

use crate::error::{Error, Result};
use crate::utils;
use log::debug;
use noodles::fasta;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::io::BufReader;
use std::path::Path;

mod encoding;
#[cfg(test)]
mod tests;

#[doc(inline)]
pub use encoding::Encoder;

/// Symbol appended by [`right_pad`] to even out sequence lengths.
pub const PAD: char = '*';

// ----------------------------------------------------------------------------
// Record
// ----------------------------------------------------------------------------

/// A sequence identifier and its raw symbols (nucleotide or amino acid).
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Record {
    pub id: String,
    pub sequence: String,
}

impl Record {
    /// Create a new, empty [`Record`].
    pub fn new() -> Self {
        Record { id: String::new(), sequence: String::new() }
    }

    /// Create a [`Record`] from a [`noodles`] [`fasta::Record`].
    ///
    /// ```rust
    /// use noodles::fasta;
    /// use flupred::sequence::Record;
    ///
    /// let definition = fasta::record::Definition::new("A/Perth/16/2009", None);
    /// let sequence   = fasta::record::Sequence::from(b"MKTIIALSYI".to_vec());
    /// let record     = Record::from_noodles(fasta::Record::new(definition, sequence));
    /// assert_eq!(record.id, "A/Perth/16/2009");
    /// assert_eq!(record.sequence, "MKTIIALSYI");
    /// ```
    pub fn from_noodles(record: fasta::Record) -> Self {
        let id = record.name().to_string();
        let sequence = record.sequence().as_ref().iter().map(|b| *b as char).collect();
        Record { id, sequence }
    }

    /// Number of symbols in the sequence.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Parse sequence [`Record`]s from fasta text.
///
/// ```rust
/// use flupred::sequence;
/// let records = sequence::parse(">seq1\nMKT\nIIA\n>seq2\nMKAIL\n", "predictions.fasta")?;
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].sequence, "MKTIIA");
/// # Ok::<(), flupred::Error>(())
/// ```
pub fn parse(text: &str, source_name: &str) -> Result<Vec<Record>> {
    let mut reader = fasta::Reader::new(BufReader::new(text.as_bytes()));
    let records = reader
        .records()
        .map(|result| result.map(Record::from_noodles).map_err(|e| Error::unavailable(source_name, e)))
        .collect::<Result<Vec<_>>>()?;
    debug!("{source_name}: parsed {} sequences", records.len());
    Ok(records)
}

/// Read all sequence [`Record`]s from a fasta file, which may be compressed.
///
/// ## Examples
///
/// ```rust
/// use flupred::sequence;
///
/// let dir  = tempfile::tempdir()?;
/// let path = dir.path().join("predictions.fasta");
/// std::fs::write(&path, ">seq1\nMKT\n>seq2\nMKAIL\n")?;
///
/// let records = sequence::read(&path)?;
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].sequence, "MKAIL");
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn read<P>(path: &P) -> Result<Vec<Record>>
where
    P: AsRef<Path> + Debug,
{
    let source_name = path.as_ref().display().to_string();
    let text = utils::read_text(path).map_err(|e| Error::unavailable(&source_name, e.root_cause()))?;
    parse(&text, &source_name)
}

/// Returns the set of symbols used across all records.
///
/// ```rust
/// use flupred::sequence::{alphabet, Record};
/// let records = [
///     Record { id: "a".into(), sequence: "ACGT".into() },
///     Record { id: "b".into(), sequence: "ACN-".into() },
/// ];
/// assert_eq!(alphabet(&records).into_iter().collect::<String>(), "-ACGNT");
/// ```
pub fn alphabet(records: &[Record]) -> BTreeSet<char> {
    records.iter().flat_map(|r| r.sequence.chars()).collect()
}

/// Returns a histogram of sequence lengths (length -> number of records).
///
/// ```rust
/// use flupred::sequence::{lengths, Record};
/// let records = [
///     Record { id: "a".into(), sequence: "ACGT".into() },
///     Record { id: "b".into(), sequence: "ACG".into() },
///     Record { id: "c".into(), sequence: "TTTT".into() },
/// ];
/// let histogram = lengths(&records);
/// assert_eq!(histogram.get(&4), Some(&2));
/// assert_eq!(histogram.keys().max(), Some(&4));
/// ```
pub fn lengths(records: &[Record]) -> BTreeMap<usize, usize> {
    records.iter().fold(BTreeMap::new(), |mut histogram, r| {
        *histogram.entry(r.len()).or_insert(0) += 1;
        histogram
    })
}

/// Pad every sequence with [`PAD`] up to the length of the longest one.
///
/// ```rust
/// use flupred::sequence::{right_pad, Record};
/// let records = [
///     Record { id: "a".into(), sequence: "MKT".into() },
///     Record { id: "b".into(), sequence: "MKTIIA".into() },
/// ];
/// let padded = right_pad(&records);
/// assert_eq!(padded[0].sequence, "MKT***");
/// assert_eq!(padded[1].sequence, "MKTIIA");
/// ```
pub fn right_pad(records: &[Record]) -> Vec<Record> {
    let max_len = records.iter().map(Record::len).max().unwrap_or_default();
    records
        .iter()
        .map(|r| {
            let mut record = r.clone();
            record.sequence.extend(std::iter::repeat(PAD).take(max_len - r.len()));
            record
        })
        .collect()
}

/// Central interval holding `percentage` percent of `values`.
///
/// Bounds are the `(100 - percentage) / 2` and `100 - (100 - percentage) / 2`
/// percentiles, linearly interpolated between the sorted values. Returns `None`
/// for no values, a NaN value, or a percentage outside `0..=100`.
///
/// ```rust
/// use flupred::sequence::density_interval;
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(density_interval(50.0, &values), Some((2.0, 4.0)));
/// assert_eq!(density_interval(100.0, &values), Some((1.0, 5.0)));
/// assert_eq!(density_interval(50.0, &[]), None);
/// ```
pub fn density_interval(percentage: f64, values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() || !(0.0..=100.0).contains(&percentage) || values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let low = (100.0 - percentage) / 2.0;
    let high = 100.0 - low;
    Some((percentile(&sorted, low), percentile(&sorted, high)))
}

/// Percentile `p` (0 to 100) of non-empty sorted values.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let (lo, hi) = (rank.floor() as usize, rank.ceil() as usize);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}
