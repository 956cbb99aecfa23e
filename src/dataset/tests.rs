use crate::config::Config;
use crate::dataset::{toy1, Dataset, ListArgs, Source};
use crate::Error;
use color_eyre::eyre::{Report, Result};

#[tokio::test]
async fn load_toy1() -> Result<(), Report> {
    let dir = tempfile::tempdir()?;
    toy1::create(&dir.path())?;
    let config = Config::for_dataset(&dir.path())?;

    let dataset = Dataset::load(&config).await?;
    assert_eq!(dataset.sequences.len(), 3);
    assert_eq!(dataset.metadata.len(), 13);
    assert_eq!(dataset.metadata.max_dimension(), Some(2));
    assert!(dataset.embeddings.is_none());
    assert_eq!(dataset.coordinates(), &dataset.metadata);
    assert_eq!(dataset.forecasts.len(), 12);
    assert_eq!(dataset.vaccines.by_year.len(), 5);
    Ok(())
}

#[tokio::test]
async fn separate_embeddings_table() -> Result<(), Report> {
    let dir = tempfile::tempdir()?;
    toy1::create(&dir.path())?;
    let embeddings = dir.path().join("embeddings.csv");
    std::fs::write(&embeddings, ",Collection Date,Strain Name,coords0,coords1\n0,2016-01-01,A/Texas/50/2012,1.0,2.0\n")?;

    let mut config = Config::for_dataset(&dir.path())?;
    config.embeddings = Some(Source::Path(embeddings));

    let dataset = Dataset::load(&config).await?;
    assert_eq!(dataset.coordinates().len(), 1);
    assert_eq!(dataset.coordinates().max_dimension(), Some(1));
    Ok(())
}

#[tokio::test]
async fn missing_file_is_unavailable() -> Result<(), Report> {
    let dir = tempfile::tempdir()?;
    toy1::create(&dir.path())?;
    let mut config = Config::for_dataset(&dir.path())?;
    config.forecasts = Source::Path(dir.path().join("missing.csv"));

    let result = Dataset::load(&config).await;
    match result {
        Err(Error::DataUnavailable { source_name, .. }) => assert!(source_name.ends_with("missing.csv")),
        other => panic!("expected DataUnavailable, found {other:?}"),
    }
    Ok(())
}

#[test]
fn unknown_extension_is_unavailable() {
    let source: Source = "data/forecast.parquet".parse().unwrap();
    assert!(matches!(source.delimiter(), Err(Error::DataUnavailable { .. })));
}

#[test]
fn list_all() {
    let table = Dataset::list(&ListArgs::default()).to_string();
    assert!(table.contains("toy1"));
    assert!(table.contains("custom"));
    assert!(table.contains("metadata.tsv"));
}

#[tokio::test]
async fn concurrent_local_reads() -> Result<(), Report> {
    let dir = tempfile::tempdir()?;
    toy1::create(&dir.path())?;
    let metadata = Source::Path(dir.path().join("metadata.tsv"));
    let missing = Source::Path(dir.path().join("missing.tsv"));

    let (text, error) = tokio::join!(metadata.read_text(), missing.read_text());
    assert_eq!(text?, toy1::METADATA);
    assert!(matches!(error, Err(Error::DataUnavailable { .. })));
    Ok(())
}
