//! One-of-K encoding of aligned sequences.

use crate::sequence::{alphabet, right_pad, Record, PAD};
use serde::{Deserialize, Serialize};

/// Encodes sequences position by position, one block of `alphabet.len()` flags per symbol.
///
/// ## Examples
///
/// ```rust
/// use flupred::sequence::{Encoder, Record};
/// let records = [
///     Record { id: "a".into(), sequence: "AC".into() },
///     Record { id: "b".into(), sequence: "CGT".into() },
/// ];
/// let encoder = Encoder::fit(&records);
/// assert_eq!(encoder.alphabet, ['*', 'A', 'C', 'G', 'T']);
/// assert_eq!(encoder.length, 3);
///
/// let encoded = encoder.encode(&records);
/// assert_eq!(encoded[0], [0, 1, 0, 0, 0,  0, 0, 1, 0, 0,  1, 0, 0, 0, 0]);
/// assert_eq!(encoder.decode(&encoded), ["AC*", "CGT"]);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Encoder {
    /// Sorted symbols, including [`PAD`] when the fitted sequences differ in length.
    pub alphabet: Vec<char>,
    /// Number of positions encoded.
    pub length: usize,
}

impl Encoder {
    /// Learn the alphabet and length from right-padded `records`.
    pub fn fit(records: &[Record]) -> Self {
        let padded = right_pad(records);
        Encoder {
            alphabet: alphabet(&padded).into_iter().collect(),
            length: padded.first().map(Record::len).unwrap_or_default(),
        }
    }

    /// Width of one encoded sequence.
    pub fn width(&self) -> usize {
        self.length * self.alphabet.len()
    }

    /// Encode each sequence into [`width`](Encoder::width) flags.
    ///
    /// Short sequences are padded with [`PAD`], positions past `length` are ignored
    /// and symbols outside the alphabet leave their block empty.
    pub fn encode(&self, records: &[Record]) -> Vec<Vec<u8>> {
        let k = self.alphabet.len();
        records
            .iter()
            .map(|record| {
                let mut flags = vec![0; self.width()];
                let symbols = record.sequence.chars().chain(std::iter::repeat(PAD));
                for (position, symbol) in symbols.take(self.length).enumerate() {
                    if let Ok(i) = self.alphabet.binary_search(&symbol) {
                        flags[position * k + i] = 1;
                    }
                }
                flags
            })
            .collect()
    }

    /// Decode rows of flags (or scores) back to sequences.
    ///
    /// Each block decodes to its highest scoring symbol, the first one on ties.
    pub fn decode<T>(&self, rows: &[Vec<T>]) -> Vec<String>
    where
        T: Copy + Into<f64>,
    {
        let k = self.alphabet.len();
        if k == 0 {
            return vec![String::new(); rows.len()];
        }
        rows.iter()
            .map(|row| {
                row.chunks_exact(k)
                    .take(self.length)
                    .map(|block| {
                        let best = block.iter().enumerate().fold(0, |best, (i, score)| {
                            match (*score).into() > block[best].into() {
                                true => i,
                                false => best,
                            }
                        });
                        self.alphabet[best]
                    })
                    .collect()
            })
            .collect()
    }
}
