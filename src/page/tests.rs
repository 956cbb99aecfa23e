use crate::config::Config;
use crate::dataset::{toy1, Source};
use crate::page::build;
use crate::Error;
use color_eyre::eyre::{Report, Result};
use tempfile::TempDir;

fn toy_config() -> Result<(TempDir, Config), Report> {
    let dir = tempfile::tempdir()?;
    toy1::create(&dir.path())?;
    let config = Config { min_cluster_size: 3, ..Config::for_dataset(&dir.path())? };
    Ok((dir, config))
}

#[tokio::test]
async fn build_toy1() -> Result<(), Report> {
    let (_dir, config) = toy_config()?;
    let payload = build(&config).await?;

    let s = &payload.summary;
    assert_eq!((s.n_seqs, s.max_seq_len), (3, 17));
    assert_eq!((s.total, s.min_year, s.max_year), (11, 2015, 2018));
    assert_eq!(s.n_quarters, 9);
    assert_eq!(s.n_forecast_points, 12);
    assert_eq!(s.n_vaccine_strains, 3);

    let ids = payload.fragments.iter().map(|f| f.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["coords-0-1", "coords-1-2", "coords-0-2", "sequences-per-year", "vaccine-effectiveness"]);

    // C2 is collinear in every view, and one vaccine strain is unknown
    assert_eq!(payload.warnings.len(), 4);
    assert_eq!(payload.warnings.iter().filter(|w| w.contains("cluster C2")).count(), 3);
    assert!(payload.warnings.iter().any(|w| w.contains("A/Singapore/INFIMH-16-0019/2016")));
    Ok(())
}

#[tokio::test]
async fn default_threshold_draws_no_hulls() -> Result<(), Report> {
    let (_dir, config) = toy_config()?;
    let config = Config { min_cluster_size: 25, ..config };
    let payload = build(&config).await?;

    // every cluster is below the threshold, so none is degenerate either
    assert_eq!(payload.warnings.len(), 1);
    let fragment = payload.fragment("coords-0-1").expect("view 0-1");
    assert!(fragment.script.contains(r#""hulls":[]"#));
    Ok(())
}

#[tokio::test]
async fn missing_effectiveness_degrades() -> Result<(), Report> {
    let (dir, mut config) = toy_config()?;
    config.effectiveness = Source::Path(dir.path().join("missing.html"));

    let payload = build(&config).await?;
    assert!(payload.fragment("vaccine-effectiveness").is_none());
    assert!(payload.fragment("sequences-per-year").is_some());
    assert!(payload.warnings.iter().any(|w| w.starts_with("Vaccine effectiveness is unavailable")));
    Ok(())
}

#[tokio::test]
async fn missing_metadata_aborts() -> Result<(), Report> {
    let (dir, mut config) = toy_config()?;
    config.metadata = Source::Path(dir.path().join("missing.tsv"));
    assert!(matches!(build(&config).await, Err(Error::DataUnavailable { .. })));
    Ok(())
}

#[tokio::test]
async fn unknown_host_aborts() -> Result<(), Report> {
    let (_dir, config) = toy_config()?;
    let config = Config { host_species: "Human".to_string(), ..config };
    assert!(matches!(build(&config).await, Err(Error::EmptyDataset(_))));
    Ok(())
}

#[tokio::test]
async fn render_fills_every_placeholder() -> Result<(), Report> {
    let (_dir, config) = toy_config()?;
    let payload = build(&config).await?;
    let html = payload.render();

    assert!(!html.contains("{{"));
    assert!(html.contains("11 IRD:Human sequences collected from 2015 to 2018."));
    for fragment in &payload.fragments {
        assert!(html.contains(&fragment.div));
        assert!(html.contains(&fragment.script));
    }
    Ok(())
}
