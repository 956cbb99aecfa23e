use crate::aggregate::{count_per_year, filter_host, palette, resample_quarterly, Quarter};
use crate::metadata::{Row, Table};
use crate::Error;
use chrono::NaiveDate;
use color_eyre::eyre::{eyre, Report, Result};
use std::collections::BTreeSet;

fn row(date: &str, host: &str, values: &[(&str, f64)]) -> Result<Row, Report> {
    let mut row = Row::new(NaiveDate::parse_from_str(date, "%Y-%m-%d")?);
    row.host_species = Some(host.to_string());
    row.values = values.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    Ok(row)
}

fn table(rows: Vec<Row>) -> Table {
    Table { numeric_columns: vec!["coords0".to_string(), "coords1".to_string()], rows }
}

#[test]
fn quarterly_two_quarters() -> Result<(), Report> {
    let table = table(vec![
        row("2020-01-10", "Human", &[("coords0", 1.0)])?,
        row("2020-03-31", "Human", &[("coords0", 2.0)])?,
        row("2020-06-30", "Human", &[("coords0", 3.0), ("coords1", 4.0)])?,
    ]);
    let buckets = resample_quarterly(&table);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].quarter, Quarter { year: 2020, quarter: 1 });
    assert_eq!(buckets[0].coord(0), Some(1.5));
    assert_eq!(buckets[0].coord(1), None);
    assert_eq!(buckets[0].count, 2);
    assert_eq!(buckets[1].coord(0), Some(3.0));
    assert_eq!(buckets[1].coord(1), Some(4.0));

    // distinct colors, earliest is darkest
    assert_ne!(buckets[0].color, buckets[1].color);
    let dark = palette::luminance(&buckets[0].color).ok_or_else(|| eyre!("bad color"))?;
    let light = palette::luminance(&buckets[1].color).ok_or_else(|| eyre!("bad color"))?;
    assert!(dark < light);
    Ok(())
}

#[test]
fn quarterly_omits_empty_quarters() -> Result<(), Report> {
    let table = table(vec![
        row("2019-02-01", "Human", &[("coords0", 1.0)])?,
        row("2020-11-01", "Human", &[("coords0", 2.0)])?,
        row("2019-02-15", "Human", &[("coords0", 3.0)])?,
    ]);
    let buckets = resample_quarterly(&table);
    let distinct: BTreeSet<_> = table.rows.iter().map(|r| Quarter::from_date(&r.collection_date)).collect();

    assert!(buckets.len() <= distinct.len());
    assert_eq!(buckets.iter().map(|b| b.quarter.to_string()).collect::<Vec<_>>(), ["2019Q1", "2020Q4"]);
    assert_eq!(buckets.iter().map(|b| b.rank).collect::<Vec<_>>(), [0, 1]);
    assert_eq!(buckets[0].coord(0), Some(2.0));
    Ok(())
}

#[test]
fn quarterly_mean_matches_rows() -> Result<(), Report> {
    let values = [0.25, 1.75, -3.0, 8.5, 2.0];
    let rows = values
        .iter()
        .enumerate()
        .map(|(i, v)| row(&format!("2018-0{}-01", i + 1), "Human", &[("coords1", *v)]))
        .collect::<Result<Vec<_>, Report>>()?;
    let buckets = resample_quarterly(&table(rows));

    // Jan, Feb, Mar in Q1; Apr, May in Q2
    assert_eq!(buckets[0].coord(1), Some((0.25 + 1.75 - 3.0) / 3.0));
    assert_eq!(buckets[1].coord(1), Some((8.5 + 2.0) / 2.0));
    Ok(())
}

#[test]
fn quarterly_empty_table() {
    assert!(resample_quarterly(&Table::default()).is_empty());
}

#[test]
fn yearly_counts_human() -> Result<(), Report> {
    let table = table(vec![
        row("2018-01-01", "Human", &[])?,
        row("2018-12-31", "Human", &[])?,
        row("2019-07-04", "Human", &[])?,
        row("2019-07-04", "Swine", &[])?,
    ]);
    let counts = count_per_year(&table, "Human");
    assert_eq!(counts.counts.into_iter().collect::<Vec<_>>(), [(2018, 2), (2019, 1)]);

    let summary = count_per_year(&table, "Human").summary()?;
    assert_eq!(summary.total, 3);
    assert_eq!(summary.min_year, 2018);
    assert_eq!(summary.max_year, 2019);
    Ok(())
}

#[test]
fn yearly_counts_empty_filter() -> Result<(), Report> {
    let table = table(vec![row("2018-01-01", "IRD:Swine", &[])?]);
    let counts = count_per_year(&table, "IRD:Human");

    assert!(counts.is_empty());
    assert_eq!(counts.total(), 0);
    assert!(matches!(counts.min_year(), Err(Error::EmptyDataset(_))));
    assert!(matches!(counts.max_year(), Err(Error::EmptyDataset(_))));
    Ok(())
}

#[test]
fn host_filter_idempotent() -> Result<(), Report> {
    let rows = vec![
        row("2018-01-01", "Human", &[])?,
        row("2018-01-01", "human", &[])?,
        row("2019-01-01", "Human", &[])?,
        Row::new(NaiveDate::parse_from_str("2019-01-01", "%Y-%m-%d")?),
    ];
    let once = filter_host(&rows, "Human");
    let twice = filter_host(once.iter().copied(), "Human");
    assert_eq!(once.len(), 2);
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn luminance_rejects_non_hex() {
    assert_eq!(palette::luminance("#aébcd"), None);
    assert_eq!(palette::luminance("#12345g"), None);
    assert_eq!(palette::luminance("#ffffff"), Some(1.0));
}
