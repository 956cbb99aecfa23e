use crate::metadata::{normalize_strain, Columns, Table};
use crate::Error;
use chrono::NaiveDate;
use color_eyre::eyre::{Report, Result};

const EMBEDDINGS: &str = "\
,Collection Date,Strain Name,coords0,coords1,coords2,Clade
0,2012-03-01,A/Victoria/361/2011(H3N2),0.1,0.2,0.3,3C
1,2012-03-15 00:00:00,A/Texas/50/2012(H3N2),0.4,NaN,0.6,3C.1
2,,A/Unknown/1/2012(H3N2),0.7,0.8,0.9,3C
";

#[test]
fn parse_embeddings_with_index_column() -> Result<(), Report> {
    let table = Table::parse(EMBEDDINGS, ',', &Columns::default(), "embeddings.csv")?;

    assert_eq!(table.numeric_columns, ["coords0", "coords1", "coords2"]);
    // the row with no date is skipped
    assert_eq!(table.len(), 2);
    assert_eq!(table.max_dimension(), Some(2));

    let row = &table.rows[1];
    assert_eq!(row.collection_date, NaiveDate::from_ymd_opt(2012, 3, 15).unwrap());
    assert_eq!(row.coord(0), Some(0.4));
    assert_eq!(row.coord(1), None);
    assert_eq!(row.host_species, None);
    assert_eq!(row.normalized_strain().as_deref(), Some("A/Texas/50/2012"));
    assert_eq!(row.labels.get("Clade").map(String::as_str), Some("3C.1"));
    assert!(!row.labels.contains_key(""));
    Ok(())
}

#[test]
fn parse_missing_date_column() {
    let text = "Name,Strain Name\ns1,A/Perth/16/2009\n";
    let result = Table::parse(text, ',', &Columns::default(), "metadata.csv");
    assert!(matches!(result, Err(Error::DataUnavailable { .. })));
}

#[test]
fn parse_bad_date() {
    let text = "Name,Collection Date\ns1,yesterday\n";
    let result = Table::parse(text, ',', &Columns::default(), "metadata.csv");
    assert!(matches!(result, Err(Error::DataUnavailable { .. })));
}

#[test]
fn parse_ragged_rows() {
    let text = "Name,Collection Date\ns1,2010-01-01,extra\n";
    let result = Table::parse(text, ',', &Columns::default(), "metadata.csv");
    assert!(matches!(result, Err(Error::DataUnavailable { .. })));
}

#[test]
fn parse_custom_columns() -> Result<(), Report> {
    let columns = Columns {
        name: "accession".into(),
        date: "date".into(),
        host: "host".into(),
        strain: "strain".into(),
    };
    let text = "accession\tdate\thost\tstrain\tyear\nKX1\t2015-10-01\tHuman\tA/HK/4801/2014\t2015\n";
    let table = Table::parse(text, '\t', &columns, "metadata.tsv")?;

    assert_eq!(table.rows[0].name.as_deref(), Some("KX1"));
    assert_eq!(table.rows[0].host_species.as_deref(), Some("Human"));
    assert_eq!(table.rows[0].values.get("year"), Some(&2015.0));
    Ok(())
}

#[test]
fn strain_names() {
    assert_eq!(normalize_strain("A/Hong Kong/4801/2014 (H3N2)"), "A/Hong Kong/4801/2014");
    assert_eq!(normalize_strain(""), "");
}

#[test]
fn parse_na_markers_as_missing() -> Result<(), Report> {
    let text = "\
Name\tCollection Date\tHost Species\tcoords0\tcoords1\tCountry
s1\t2015-01-12\tIRD:Human\t0.5\t1.0\tNA
s2\t2015-02-20\tNA\tNA\t2.0\tUSA
s3\tN/A\tIRD:Human\t0.7\t3.0\tPeru
s4\t2015-03-01\tIRD:Human\t#N/A\tnull\tN/A
";
    let table = Table::parse(text, '\t', &Columns::default(), "metadata.tsv")?;

    assert_eq!(table.numeric_columns, ["coords0", "coords1"]);
    // the row with a missing date is skipped
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows[0].coord(0), Some(0.5));
    assert!(!table.rows[0].labels.contains_key("Country"));
    assert_eq!(table.rows[1].coord(0), None);
    assert_eq!(table.rows[1].coord(1), Some(2.0));
    assert_eq!(table.rows[1].host_species, None);
    assert_eq!(table.rows[2].coord(0), None);
    assert_eq!(table.rows[2].coord(1), None);
    assert!(table.rows[2].labels.is_empty());
    Ok(())
}
