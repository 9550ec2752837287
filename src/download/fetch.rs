//! Single material downloading.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::naming;
use crate::output::create_download_bar;
use crate::portal::{Material, PortalClient};

/// Minimum file size to show a progress bar (5 MB).
const PROGRESS_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Fallback extension when neither headers nor URL reveal one. Course
/// materials are overwhelmingly PDFs.
const DEFAULT_EXTENSION: &str = "pdf";

/// A completed download.
#[derive(Debug)]
pub struct FetchedFile {
    pub path: PathBuf,
    pub extension: String,
    pub bytes: u64,
}

/// Downloads one material into `target_dir`.
///
/// The filename is the sanitized material title plus a resolved
/// extension. The body streams into a `.part` file that is renamed once
/// complete, so an interrupted download never leaves a partial file
/// under its final name. Collisions get a `_2`, `_3`, ... suffix.
pub async fn fetch_material(
    client: &PortalClient,
    config: &Config,
    material: &Material,
    target_dir: &Path,
) -> Result<FetchedFile> {
    let response = client.fetch_material(&material.url).await?;

    let disposition = header_value(&response, CONTENT_DISPOSITION);
    let content_type = header_value(&response, CONTENT_TYPE);
    let content_length = response.content_length();

    let extension = resolve_extension(
        disposition.as_deref(),
        &material.url,
        content_type.as_deref(),
    );
    let stem = naming::sanitize_component(&material.title);
    let stem = naming::strip_matching_extension(&stem, &extension).to_string();

    tokio::fs::create_dir_all(target_dir).await?;

    let part_path = target_dir.join(format!("{}.part", stem));
    let bytes = match stream_to_file(
        response,
        &part_path,
        content_length,
        config.options.show_downloads,
    )
    .await
    {
        Ok(bytes) => bytes,
        Err(err) => {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(err);
        }
    };

    let final_path = naming::unique_path(&target_dir.join(format!("{}.{}", stem, extension)));
    if let Err(err) = tokio::fs::rename(&part_path, &final_path).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(err.into());
    }

    Ok(FetchedFile {
        path: final_path,
        extension,
        bytes,
    })
}

/// Resolution order: Content-Disposition filename, then URL path, then
/// Content-Type mapping, then the PDF fallback.
fn resolve_extension(disposition: Option<&str>, url: &str, content_type: Option<&str>) -> String {
    let resolved = disposition
        .and_then(naming::extension_from_disposition)
        .or_else(|| naming::extension_from_url(url))
        .or_else(|| content_type.and_then(naming::extension_from_content_type))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    naming::normalize_extension(&resolved)
}

async fn stream_to_file(
    response: Response,
    path: &Path,
    content_length: Option<u64>,
    show_progress: bool,
) -> Result<u64> {
    let with_bar =
        show_progress && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false);
    let progress = if with_bar {
        Some(create_download_bar(content_length.unwrap_or(0)))
    } else {
        None
    };

    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(ref bar) = progress {
            bar.set_position(downloaded);
        }
    }

    file.flush().await?;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    Ok(downloaded)
}

fn header_value(response: &Response, name: HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
