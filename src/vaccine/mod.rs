//! Vaccine strain registry and the embedding coordinates of each strain.

use crate::error::{Error, Result};
use crate::metadata::{normalize_strain, Table};
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Season year mapped to the strain deployed in that season.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    pub by_year: BTreeMap<i32, String>,
}

impl Registry {
    /// Parse a YAML mapping of year to strain name.
    ///
    /// ```rust
    /// use flupred::vaccine::Registry;
    /// let registry = Registry::parse("2009: A/Brisbane/10/2007\n2010: A/Perth/16/2009\n", "vaccines.yaml")?;
    /// assert_eq!(registry.by_year[&2010], "A/Perth/16/2009");
    /// assert!(Registry::parse("- not\n- a mapping\n", "vaccines.yaml").is_err());
    /// # Ok::<(), flupred::Error>(())
    /// ```
    pub fn parse(text: &str, source_name: &str) -> Result<Registry> {
        serde_yaml::from_str(text).map_err(|e| Error::unavailable(source_name, e))
    }

    /// Strain name mapped to every year it was deployed, in chronological order.
    ///
    /// ```rust
    /// use flupred::vaccine::Registry;
    /// let registry = Registry::parse("2011: A/Perth/16/2009\n2010: A/Perth/16/2009\n2013: A/Victoria/361/2011\n", "vaccines.yaml")?;
    /// assert_eq!(registry.by_strain()["A/Perth/16/2009"], [2010, 2011]);
    /// # Ok::<(), flupred::Error>(())
    /// ```
    pub fn by_strain(&self) -> BTreeMap<String, Vec<i32>> {
        self.by_year.iter().map(|(year, strain)| (normalize_strain(strain), *year)).into_group_map().into_iter().collect()
    }
}

/// A vaccine strain positioned in the embedding.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VaccineStrain {
    pub strain_name: String,
    pub years_deployed: Vec<i32>,
    pub coords: BTreeMap<usize, f64>,
}

impl VaccineStrain {
    pub fn coord(&self, dim: usize) -> Option<f64> {
        self.coords.get(&dim).copied()
    }
}

/// Place each registry strain using the first metadata row with the same strain name.
///
/// Strains with no matching row are left out with a warning. The result is ordered by
/// first deployment year. `dims` is the number of embedding dimensions to copy.
pub fn locate(registry: &Registry, table: &Table, dims: usize) -> Vec<VaccineStrain> {
    registry
        .by_strain()
        .into_iter()
        .filter_map(|(strain_name, years_deployed)| {
            let row = table.rows.iter().find(|row| row.normalized_strain().as_deref() == Some(strain_name.as_str()));
            match row {
                Some(row) => {
                    let coords = (0..dims).filter_map(|dim| row.coord(dim).map(|c| (dim, c))).collect();
                    Some(VaccineStrain { strain_name, years_deployed, coords })
                }
                None => {
                    warn!("Vaccine strain {strain_name:?} was not found in the metadata.");
                    None
                }
            }
        })
        .sorted_by_key(|strain| strain.years_deployed.first().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Row;
    use chrono::NaiveDate;
    use color_eyre::eyre::{Report, Result};

    fn row(strain: &str, x: f64) -> Row {
        let mut row = Row::new(NaiveDate::from_ymd_opt(2012, 1, 1).unwrap());
        row.strain_name = Some(strain.to_string());
        row.values.insert("coords0".to_string(), x);
        row.values.insert("coords1".to_string(), -x);
        row
    }

    #[test]
    fn locate_reused_and_missing_strains() -> Result<(), Report> {
        let registry = Registry::parse(
            "2014: A/Texas/50/2012\n2013: A/Victoria/361/2011\n2015: A/Texas/50/2012\n2016: A/Switzerland/9715293/2013\n",
            "vaccines.yaml",
        )?;
        let table = Table {
            numeric_columns: vec!["coords0".into(), "coords1".into()],
            rows: vec![
                row("A/Texas/50/2012(H3N2)", 2.0),
                row("A/Victoria/361/2011(H3N2)", 1.0),
                // duplicate, first occurrence wins
                row("A/Texas/50/2012(H3N2)", 9.0),
            ],
        };

        let strains = locate(&registry, &table, 3);
        assert_eq!(strains.len(), 2);
        assert_eq!(strains[0].strain_name, "A/Victoria/361/2011");
        assert_eq!(strains[1].years_deployed, [2014, 2015]);
        assert_eq!(strains[1].coord(0), Some(2.0));
        assert_eq!(strains[1].coord(1), Some(-2.0));
        assert_eq!(strains[1].coord(2), None);
        Ok(())
    }
}
