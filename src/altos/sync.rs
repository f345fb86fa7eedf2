//! Snapshot sync - resolve, download and decompress one weekly file

use crate::altos::client::AltosClient;
use crate::altos::dates::{date_of_last_friday, normalize_date};
use crate::altos::error::{AltosError, Result};
use crate::altos::utils::deflate_in_background;
use crate::snapshot_file_name;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Download the snapshot for `date` (the newest listed one when `None`) into
/// `dir` as `altos-rental-<date>.csv.gz` and decompress it next to itself.
///
/// `dir` is created if missing. The `.gz` is kept unless `remove_compressed`.
/// Returns the path of the decompressed file.
pub async fn sync_snapshot(
    client: &AltosClient,
    date: Option<&str>,
    dir: &Path,
    remove_compressed: bool,
) -> Result<PathBuf> {
    info!("=== Altos Snapshot Sync ===");

    // Step 1: Resolve the snapshot date
    let date = match date {
        Some(date) => normalize_date(date)?,
        None => {
            let latest = client.latest_file_date().await?;
            let expected = date_of_last_friday(None);
            if latest != expected {
                warn!("Latest file is dated {}, expected {}", latest, expected);
            }
            latest
        }
    };
    info!("Step 1/3: Snapshot date {}", date);

    // Step 2: Download
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AltosError::io(dir, e))?;
    let gz_path = dir.join(snapshot_file_name(&date));
    let url = client.file_url_for_date(&date)?;
    info!("Step 2/3: Downloading...");
    client.download_file(&url, &gz_path, true).await?;
    info!("✓ Download complete");

    // Step 3: Decompress
    info!("Step 3/3: Decompressing...");
    let csv_path = deflate_in_background(gz_path.clone()).await?;
    if remove_compressed {
        tokio::fs::remove_file(&gz_path)
            .await
            .map_err(|e| AltosError::io(&gz_path, e))?;
    }
    info!("✓ Snapshot ready at {:?}", csv_path);

    Ok(csv_path)
}
