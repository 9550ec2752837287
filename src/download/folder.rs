//! Folder-tree download mode.

use crate::config::Config;
use crate::download::fetch::fetch_material;
use crate::download::state::DownloadState;
use crate::error::{Error, Result};
use crate::fs::paths;
use crate::material::traverse;
use crate::portal::{CourseContent, PortalClient};

/// Downloads every matching material into `Unit <n>/<topic>/`
/// directories under the output root.
///
/// Individual download failures are logged and skipped; the run only
/// fails when the course matched nothing at all, in which case no
/// directory is created either.
pub async fn download_folder_tree(
    client: &PortalClient,
    config: &Config,
    content: &CourseContent,
    state: &mut DownloadState,
) -> Result<()> {
    let root = paths::output_root(config, &content.course);
    state.output_root = Some(root.clone());

    for entry in traverse(content, config.options.material_kind)? {
        state.record_matched();
        let target_dir = paths::topic_dir(&root, entry.unit_number, entry.topic_title);

        match fetch_material(client, config, entry.material, &target_dir).await {
            Ok(fetched) => {
                state.record_saved(fetched.bytes);
                if config.options.show_downloads {
                    tracing::info!("Downloaded: {}", fetched.path.display());
                }
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

    if state.matched == 0 {
        return Err(Error::NoMaterials(format!(
            "no {} materials in course '{}'",
            config.options.material_kind, content.course.title
        )));
    }

    Ok(())
}
