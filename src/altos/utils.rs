//! Utility functions for local file handling

use crate::altos::error::{AltosError, Result};
use flate2::read::MultiGzDecoder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

const GZ_MARKER: &str = ".gz";

/// Path a gzip file decompresses to: the same directory, with the last `.gz`
/// removed from the file name (`data.csv.gz` -> `data.csv`).
pub fn deflated_path(download_path: &Path) -> Result<PathBuf> {
    let file_name = download_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            AltosError::InvalidInput(format!("no usable file name in {:?}", download_path))
        })?;

    let idx = file_name.rfind(GZ_MARKER).ok_or_else(|| {
        AltosError::InvalidInput(format!("{:?} is not a .gz file", download_path))
    })?;

    let stripped = format!("{}{}", &file_name[..idx], &file_name[idx + GZ_MARKER.len()..]);
    if stripped.is_empty() {
        return Err(AltosError::InvalidInput(format!(
            "{:?} has nothing left once .gz is removed",
            download_path
        )));
    }

    Ok(download_path.with_file_name(stripped))
}

/// Decompress a downloaded gzip file next to itself.
///
/// Output is decoded into a temporary file in the same directory and only
/// renamed over the target once decoding succeeds, so a corrupt download never
/// clobbers a previous good output. The compressed file is left in place.
pub fn deflate_downloaded_file(download_path: impl AsRef<Path>) -> Result<PathBuf> {
    let download_path = download_path.as_ref();
    let output_path = deflated_path(download_path)?;
    info!("Decompressing {:?} to {:?}", download_path, output_path);

    let compressed =
        fs::File::open(download_path).map_err(|e| AltosError::io(download_path, e))?;
    let mut decoder = MultiGzDecoder::new(io::BufReader::new(compressed));

    let parent = match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut staging =
        NamedTempFile::new_in(parent).map_err(|e| AltosError::io(parent, e))?;
    // Concatenated gzip members decode as one stream; bad data surfaces as io errors
    let written =
        io::copy(&mut decoder, &mut staging).map_err(|e| AltosError::io(download_path, e))?;

    staging
        .persist(&output_path)
        .map_err(|e| AltosError::io(&output_path, e.error))?;

    info!("Decompressed {} bytes", written);
    Ok(output_path)
}

/// [`deflate_downloaded_file`] on tokio's blocking pool
pub async fn deflate_in_background(download_path: PathBuf) -> Result<PathBuf> {
    let task_path = download_path.clone();
    tokio::task::spawn_blocking(move || deflate_downloaded_file(task_path))
        .await
        .map_err(|e| AltosError::io(download_path, e.into()))?
}

/// Stream an HTTP response body into `path`, truncating any existing file.
///
/// Returns the number of bytes written.
pub async fn write_response_to_file(mut response: reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| AltosError::io(path, e))?;

    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| AltosError::io(path, e))?;
        written += chunk.len() as u64;
        debug!("Wrote {} bytes to {:?}", written, path);
    }
    file.flush().await.map_err(|e| AltosError::io(path, e))?;

    Ok(written)
}
