use crate::effectiveness::*;
use crate::Error;
use color_eyre::eyre::{Report, Result};

const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<h1>Seasonal Flu Vaccine Effectiveness Studies</h1>
<TABLE class="table">
  <thead>
    <tr><th>Influenza Season</th><th>Reference</th><th>Study Site(s)</th><th>No. of Patients</th><th>Adjusted Overall VE (%)</th><th>95% CI</th></tr>
  </thead>
  <tbody>
    <tr><td>2004-05</td><td><a href="/a">Belongia 2009</a></td><td>WI</td><td>762</td><td>10</td><td>-36, 40</td></tr>
    <tr><td>2005-06</td><td>Belongia 2009</td><td>WI</td><td>346</td><td>21</td><td>-52, 59</td></tr>
    <tr><td>2014-15</td><td>Zimmerman&nbsp;2016</td><td>CA, MI, PA,
      TX, WA, WI</td><td>9,311</td><td>19</td><td>10, 27</td></tr>
    <tr><td>2009-10*</td><td>Griffin 2011</td><td>*</td><td>6,757</td><td>*</td><td>*</td></tr>
  </tbody>
</TABLE>
<table><tr><td>second table</td></tr></table>
</body></html>"#;

#[test]
fn parse_first_table() -> Result<(), Report> {
    let rows = parse_html(PAGE, "cdc")?;
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].season, "2004-05");
    assert_eq!(rows[0].season_start, Some(2004));
    assert_eq!(rows[0].reference, "Belongia 2009");
    assert_eq!(rows[0].ci, "-36, 40");

    assert_eq!(rows[2].reference, "Zimmerman 2016");
    assert_eq!(rows[2].study_sites, "CA, MI, PA, TX, WA, WI");
    assert_eq!(rows[2].num_patients, Some(9311));
    assert_eq!(rows[2].overall_ve, Some(19.0));

    // unpublished estimate
    assert_eq!(rows[3].overall_ve, None);
    Ok(())
}

#[test]
fn renamed_header_is_remapped() -> Result<(), Report> {
    let html = "<table>\
        <tr><td>Season</td><td>Ref</td><td>Sites</td><td>N</td><td>VE</td><td>Interval</td></tr>\
        <tr><td>2017-18</td><td>Rolfes 2019</td><td>US</td><td>8,436</td><td>38%</td><td>31, 43</td></tr>\
        </table>";
    let rows = parse_html(html, "cdc")?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].overall_ve, Some(38.0));
    assert_eq!(rows[0].num_patients, Some(8436));
    Ok(())
}

#[test]
fn missing_table_is_unavailable() {
    let result = parse_html("<html><body><p>Service Unavailable</p></body></html>", "cdc");
    assert!(matches!(result, Err(Error::DataUnavailable { source_name, .. }) if source_name == "cdc"));
}

#[test]
fn spanning_cells_are_repeated() -> Result<(), Report> {
    let html = r#"<table>
        <tr><th>Influenza Season</th><th>Reference</th><th>Study Site(s)</th><th>No. of Patients</th><th>Adjusted Overall VE (%)</th><th>95% CI</th></tr>
        <tr><td rowspan="2">2009-10</td><td>Griffin 2011</td><td>MI, WI</td><td>6,757</td><td>56</td><td>23, 75</td></tr>
        <tr><td>Treanor 2011</td><td>MI, WI</td><td>1,011</td><td>62</td><td>19, 84</td></tr>
        <tr><td>2010-11</td><td>Treanor 2012</td><td colspan=2>not reported</td><td>60</td><td>53, 66</td></tr>
    </table>"#;
    let rows = parse_html(html, "cdc")?;
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[1].season, "2009-10");
    assert_eq!(rows[1].season_start, Some(2009));
    assert_eq!(rows[1].reference, "Treanor 2011");
    assert_eq!(rows[1].overall_ve, Some(62.0));

    assert_eq!(rows[2].study_sites, "not reported");
    assert_eq!(rows[2].num_patients, None);
    assert_eq!(rows[2].overall_ve, Some(60.0));
    assert_eq!(rows[2].ci, "53, 66");
    Ok(())
}

#[test]
fn short_row_is_skipped() -> Result<(), Report> {
    let html = "<table>\
        <tr><th>Season</th></tr>\
        <tr><td>2004-05</td><td>footnote</td></tr>\
        <tr><td>2017-18</td><td>Rolfes 2019</td><td>US</td><td>8,436</td><td>38</td><td>31, 43</td></tr>\
        </table>";
    let rows = parse_html(html, "cdc")?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].season, "2017-18");
    Ok(())
}

#[test]
fn short_rows_are_unavailable() {
    let html = "<table><tr><th>a</th><th>b</th></tr><tr><td>2004-05</td><td>x</td></tr></table>";
    let result = parse_html(html, "cdc");
    assert!(matches!(result, Err(Error::DataUnavailable { source_name, .. }) if source_name == "cdc"));
}

#[test]
fn header_only_table_is_unavailable() {
    let html = "<table><tr><th>Season</th></tr></table>";
    assert!(parse_html(html, "cdc").is_err());
}
