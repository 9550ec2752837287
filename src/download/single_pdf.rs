//! Merged-PDF download mode.

use std::path::Path;

use tempfile::TempDir;

use crate::config::Config;
use crate::download::fetch::fetch_material;
use crate::download::state::DownloadState;
use crate::error::{Error, Result};
use crate::fs::paths;
use crate::material::unit_batches;
use crate::pdf::{merge_files, MergeInput};
use crate::portal::{CourseContent, PortalClient};

/// Downloads matching materials unit by unit into a temporary staging
/// area and writes one merged `Unit_<n>.pdf` per unit.
///
/// Only PDFs can be merged; other file types are skipped with a warning.
/// A unit whose merge fails is dropped whole (merges happen in memory,
/// so nothing half-written reaches the output directory) and remaining
/// units still get processed.
pub async fn download_unit_pdfs(
    client: &PortalClient,
    config: &Config,
    content: &CourseContent,
    state: &mut DownloadState,
) -> Result<()> {
    let root = paths::output_root(config, &content.course);
    state.output_root = Some(root.clone());

    let staging = TempDir::new()?;

    for batch in unit_batches(content, config.options.material_kind)? {
        let unit_dir = staging.path().join(format!("unit_{}", batch.unit_number));
        let mut staged: Vec<MergeInput> = Vec::new();

        for entry in &batch.entries {
            state.record_matched();
            match fetch_material(client, config, entry.material, &unit_dir).await {
                Ok(fetched) if fetched.extension == "pdf" => {
                    state.record_saved(fetched.bytes);
                    staged.push(MergeInput {
                        title: entry.material.title.clone(),
                        path: fetched.path,
                    });
                }
                Ok(fetched) => {
                    state.record_skipped();
                    tracing::warn!(
                        "Skipping '{}' ({}): .{} files cannot be merged, use folder mode to keep them",
                        entry.material.title,
                        entry.location(),
                        fetched.extension
                    );
                }
                Err(err) => {
                    state.record_failed();
                    tracing::warn!(
                        "Failed to download '{}' ({}): {}",
                        entry.material.title,
                        entry.location(),
                        err
                    );
                }
            }
        }

        if staged.is_empty() {
            if !batch.entries.is_empty() {
                state.record_unit_skipped();
                tracing::info!("No PDF files to merge for unit {}", batch.unit_number);
            }
            continue;
        }

        let merged = match merge_files(&staged) {
            Ok(bytes) => bytes,
            Err(err) => {
                state.record_unit_skipped();
                tracing::warn!("Skipping unit {}: {}", batch.unit_number, err);
                continue;
            }
        };

        let output_path = paths::unit_pdf_path(&root, batch.unit_number);
        if let Err(err) = write_unit_pdf(&output_path, &merged).await {
            state.record_unit_skipped();
            tracing::warn!("Failed to write {}: {}", output_path.display(), err);
            continue;
        }

        state.record_unit_merged();
        if config.options.show_downloads {
            tracing::info!(
                "Merged {} files into {}",
                staged.len(),
                output_path.display()
            );
        }
    }

    if state.matched == 0 {
        return Err(Error::NoMaterials(format!(
            "no {} materials in course '{}'",
            config.options.material_kind, content.course.title
        )));
    }

    Ok(())
}

async fn write_unit_pdf(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
