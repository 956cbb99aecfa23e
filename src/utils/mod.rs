//! File and network helpers shared by the loaders.

use color_eyre::eyre::{eyre, ContextCompat, Report, Result, WrapErr};
use color_eyre::Help;
use std::convert::AsRef;
use std::fmt::Debug;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use zstd::stream::read::Decoder;

pub enum Decompress {
    Zst,
}

impl FromStr for Decompress {
    type Err = Report;
    fn from_str(s: &str) -> Result<Self, Report> {
        match s {
            "zst" => Ok(Decompress::Zst),
            _ext => Err(eyre!("Decompression for {_ext:?} is not implemented yet.")),
        }
    }
}

/// Returns true if the file extension names a supported compression.
///
/// ```rust
/// use flupred::utils::is_compressed;
/// assert!(is_compressed(&"metadata.tsv.zst"));
/// assert!(!is_compressed(&"metadata.tsv"));
/// ```
pub fn is_compressed<P>(path: &P) -> bool
where
    P: AsRef<Path> + Debug,
{
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| Decompress::from_str(ext).is_ok())
        .unwrap_or(false)
}

/// Read a text file, decompressing it in memory if the extension is a known compression.
///
/// ## Examples
///
/// ```rust
/// use flupred::utils::read_text;
/// let dir  = tempfile::tempdir()?;
/// let path = dir.path().join("strains.txt");
/// std::fs::write(&path, "A/Perth/16/2009")?;
/// assert_eq!(read_text(&path)?, "A/Perth/16/2009");
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn read_text<P>(path: &P) -> Result<String, Report>
where
    P: AsRef<Path> + Debug,
{
    if !is_compressed(path) {
        return std::fs::read_to_string(path).wrap_err(format!("Failed to read: {path:?}"));
    }

    let ext = path
        .as_ref()
        .extension()
        .wrap_err(format!("Failed to get file extension: {path:?}"))?
        .to_str()
        .wrap_err(format!("Failed to convert file extension to str: {path:?}"))?;

    let mut buffer = String::new();
    match Decompress::from_str(ext)? {
        Decompress::Zst => {
            let reader = std::fs::File::open(path).wrap_err(format!("Failed to open: {path:?}"))?;
            let mut decoder =
                Decoder::new(reader).wrap_err(format!("Failed to decode: {path:?}"))?;
            decoder
                .read_to_string(&mut buffer)
                .wrap_err(format!("Failed to decompress: {path:?}"))?;
        }
    }

    Ok(buffer)
}

/// Fetch the body of a URL as text.
///
/// ## Examples
///
/// ```no_run
/// # use tokio_test::{block_on, assert_ok};
/// use flupred::utils::fetch_text;
/// let url = flupred::dataset::EFFECTIVENESS_URL;
/// # assert_ok!(block_on(async {
/// let text = fetch_text(url).await?;
/// # Ok::<(), color_eyre::eyre::Report>(())
/// # }));
/// ```
#[cfg(feature = "download")]
pub async fn fetch_text(url: &str) -> Result<String, Report> {
    let response = reqwest::get(url).await.wrap_err(format!("Failed to request: {url:?}"))?;
    if response.status() != 200 {
        Err(eyre!("Failed to download: {url:?}")
            .suggestion(format!("Status code: {}", response.status())))?;
    }
    let text = response.text().await.wrap_err(format!("Failed to read response: {url:?}"))?;
    Ok(text)
}

/// Without the `download` feature every remote fetch fails.
#[cfg(not(feature = "download"))]
pub async fn fetch_text(url: &str) -> Result<String, Report> {
    Err(eyre!("Cannot fetch {url:?}, remote downloads are disabled.")
        .suggestion("Rebuild with the 'download' feature."))
}

/// Get delimiter based on file extension.
///
/// ## Arguments
///
/// - `path` - File path, a compression extension (ex. `.zst`) is looked through.
///
/// ## Examples
///
/// - `.tsv` => `\t`
/// - `.txt` => `\t`
/// - `.csv` => `,`
///
/// Note that `.txt` is assumed to be tab-delimited!
///
/// ```rust
/// use flupred::utils::get_delimiter;
///
/// assert_eq!(get_delimiter(&"file.tsv")?, '\t');
/// assert_eq!(get_delimiter(&"file.csv")?, ',');
/// assert_eq!(get_delimiter(&"file.txt")?, '\t');
/// assert_eq!(get_delimiter(&"file.tsv.zst")?, '\t');
/// assert!(get_delimiter(&"file").is_err());
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn get_delimiter<P>(path: &P) -> Result<char, Report>
where
    P: AsRef<Path> + Debug,
{
    let path = match is_compressed(path) {
        true => path.as_ref().with_extension(""),
        false => path.as_ref().to_path_buf(),
    };
    let ext = path
        .extension()
        .wrap_err(format!("Failed to get file extension: {path:?}"))?
        .to_str()
        .wrap_err(format!("Failed to convert file extension to str: {path:?}"))?;
    // convert extension to the expected delimiter
    match ext {
        "tsv" | "txt" => Ok('\t'),
        "csv" => Ok(','),
        _ext => {
            Err(eyre!("Unknown file extension: {_ext:?}").suggestion("Options: tsv, csv, or txt"))
        }
    }
}

/// Create the parent directory of a file path, if it doesn't exist yet.
pub fn create_parent_dir<P>(path: &P) -> Result<PathBuf, Report>
where
    P: AsRef<Path> + Debug,
{
    let path: PathBuf = path.as_ref().into();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .wrap_err(format!("Failed to create directory: {parent:?}"))?;
        }
    }
    Ok(path)
}
