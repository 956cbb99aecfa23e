//! Create test dataset Toy1.
//!
//! Thirteen sequences collected from 2015 to 2018 in a three dimensional embedding,
//! three forecast clusters (the last one collinear), four vaccine strains of which
//! one is missing from the metadata, and a small effectiveness table.

use crate::dataset::{Attributes, Name};
use color_eyre::eyre::{Report, Result, WrapErr};
use log::info;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

pub const SEQUENCES: &str = ">prediction_0
MKTIIALSYIFCLALG
>prediction_1
MKTIIALSYILCLVFA
>prediction_2
MKTIIALSHIFCLALGQ
";

pub const METADATA: &str = "\
Name\tCollection Date\tHost Species\tStrain Name\tCountry\tcoords0\tcoords1\tcoords2
s01\t2015-01-12\tIRD:Human\tA/Switzerland/9715293/2013(H3N2)\tSwitzerland\t-1.20\t0.40\t0.10
s02\t2015-02-20\tIRD:Human\tA/Texas/50/2012(H3N2)\tUSA\t-1.10\t0.55\t0.05
s03\t2015-05-03\tIRD:Human\tA/Brisbane/1/2015(H3N2)\tAustralia\t-0.90\t0.35\t0.20
s04\t2015-11-15\tIRD:Swine\tA/swine/Iowa/A01/2015(H3N2)\tUSA\t-0.40\t1.10\t-0.30
s05\t2016-01-08\tIRD:Human\tA/Hong Kong/4801/2014(H3N2)\tChina\t-0.60\t0.20\t0.30
s06\t2016-03-22\tIRD:Human\tA/Michigan/15/2016(H3N2)\tUSA\t-0.45\t0.10\t0.45
s07\t2016-08-30\tIRD:Human\tA/Perth/20/2016(H3N2)\tAustralia\t-0.20\t-0.05\t0.50
s08\t2017-01-17\tIRD:Human\tA/Texas/12/2017(H3N2)\tUSA\t0.10\t-0.20\t0.60
s09\t2017-02-02\tIRD:Human\tA/Kenya/3/2017(H3N2)\tKenya\t0.25\t-0.10\t0.55
s10\t2017-10-09\tIRD:Human\tA/Ohio/21/2017(H3N2)\tUSA\t0.40\t-0.35\t0.70
s11\t2018-01-25\tIRD:Human\tA/Japan/9/2018(H3N2)\tJapan\t0.65\t-0.40\t0.85
s12\t2018-02-14\tIRD:Human\tA/Chile/4/2018(H3N2)\tChile\t0.80\t-0.55\t0.90
s13\t2018-04-03\t\tA/Peru/7/2018(H3N2)\tPeru\t0.95\t-0.50\t1.00
";

pub const FORECASTS: &str = "\
,coords0,coords1,coords2,matplotlib_colors,hexdecimal_colors
0,1.0,-0.9,1.0,C0,#1f77b4
1,1.4,-0.9,1.1,C0,#1f77b4
2,1.4,-0.6,1.3,C0,#1f77b4
3,1.0,-0.6,1.2,C0,#1f77b4
4,1.2,-0.75,1.15,C0,#1f77b4
5,1.6,-1.2,1.4,C1,#ff7f0e
6,1.9,-1.1,1.55,C1,#ff7f0e
7,1.8,-0.9,1.65,C1,#ff7f0e
8,1.5,-1.0,1.7,C1,#ff7f0e
9,2.0,-1.5,1.75,C2,#2ca02c
10,2.25,-1.75,2.0,C2,#2ca02c
11,2.5,-2.0,2.25,C2,#2ca02c
";

pub const VACCINES: &str = "\
2015: A/Texas/50/2012
2016: A/Switzerland/9715293/2013
2017: A/Hong Kong/4801/2014
2018: A/Hong Kong/4801/2014
2019: A/Singapore/INFIMH-16-0019/2016
";

pub const EFFECTIVENESS: &str = r#"<!DOCTYPE html>
<html>
<body>
<table>
  <tr><th>Influenza Season</th><th>Reference</th><th>Study Site(s)</th><th>No. of Patients</th><th>Adjusted Overall VE (%)</th><th>95% CI</th></tr>
  <tr><td>2015-16</td><td>Jackson 2017</td><td>MI, PA, TX, WA, WI</td><td>6,879</td><td>48</td><td>41, 55</td></tr>
  <tr><td>2016-17</td><td>Flannery 2019</td><td>MI, PA, TX, WA, WI</td><td>7,410</td><td>40</td><td>32, 46</td></tr>
  <tr><td>2017-18</td><td>Rolfes 2019</td><td>MI, PA, TX, WA, WI</td><td>8,436</td><td>38</td><td>31, 43</td></tr>
</table>
</body>
</html>
"#;

/// Write every Toy1 file and its `attributes.json` to `output_dir`.
///
/// ```rust
/// use flupred::dataset::{toy1, Attributes, Name};
/// let dir = tempfile::tempdir()?;
/// let attributes = toy1::create(&dir.path())?;
/// assert_eq!(attributes.name, Name::Toy1);
/// assert_eq!(Attributes::read(dir.path().join("attributes.json"))?, attributes);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn create<P>(output_dir: &P) -> Result<Attributes, Report>
where
    P: AsRef<Path> + Debug,
{
    let output_dir: PathBuf = output_dir.as_ref().into();
    std::fs::create_dir_all(&output_dir)
        .wrap_err(format!("Failed to create directory: {output_dir:?}"))?;

    let attributes = Attributes { name: Name::Toy1, files: Name::Toy1.files(), ..Default::default() };
    let files = &attributes.files;
    for (file_name, content) in [
        (&files.sequences, SEQUENCES),
        (&files.metadata, METADATA),
        (&files.forecasts, FORECASTS),
        (&files.vaccines, VACCINES),
        (&files.effectiveness, EFFECTIVENESS),
    ] {
        let path = output_dir.join(file_name);
        info!("Writing: {path:?}");
        std::fs::write(&path, content).wrap_err(format!("Failed to write: {path:?}"))?;
    }

    let path = output_dir.join("attributes.json");
    info!("Writing attributes: {path:?}");
    attributes.write(&path)?;

    Ok(attributes)
}
