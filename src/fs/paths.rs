//! Path and directory management.
//!
//! Folder mode writes `<root>/Unit <n>/<topic>/<file>`; merged mode
//! writes `<root>/Unit_<n>.pdf`. The root is the `--output` argument or
//! a directory named after the course.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::fs::naming::sanitize_component;
use crate::portal::Course;

/// The directory a run writes into. Nothing is created here; directories
/// come into existence lazily, so a run that matches no materials leaves
/// no trace on disk.
pub fn output_root(config: &Config, course: &Course) -> PathBuf {
    match &config.options.output {
        Some(path) => path.clone(),
        None => PathBuf::from(sanitize_component(&course.title)),
    }
}

/// Directory for one unit in folder mode, e.g. `Unit 2`.
pub fn unit_dir(root: &Path, unit_number: u32) -> PathBuf {
    root.join(format!("Unit {}", unit_number))
}

/// Directory for one topic in folder mode.
pub fn topic_dir(root: &Path, unit_number: u32, topic_title: &str) -> PathBuf {
    unit_dir(root, unit_number).join(sanitize_component(topic_title))
}

/// Output file for one merged unit, e.g. `Unit_2.pdf`.
pub fn unit_pdf_path(root: &Path, unit_number: u32) -> PathBuf {
    root.join(format!("Unit_{}.pdf", unit_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, OptionsConfig, OutputMode};
    use crate::portal::MaterialKind;

    fn make_test_config(output: Option<PathBuf>) -> Config {
        Config {
            credentials: Credentials {
                username: "user".to_string(),
                password: "pass".to_string(),
            },
            options: OptionsConfig {
                course: "Data Structures".to_string(),
                semester: 3,
                mode: OutputMode::Folder,
                output,
                material_kind: MaterialKind::Slides,
                show_downloads: false,
            },
        }
    }

    fn make_course(title: &str) -> Course {
        Course {
            id: "c1".to_string(),
            code: "UE22CS252B".to_string(),
            title: title.to_string(),
            semester: 3,
        }
    }

    #[test]
    fn test_output_root_prefers_override() {
        let config = make_test_config(Some(PathBuf::from("/tmp/dl")));
        let root = output_root(&config, &make_course("Data Structures"));
        assert_eq!(root, PathBuf::from("/tmp/dl"));
    }

    #[test]
    fn test_output_root_derived_from_course_title() {
        let config = make_test_config(None);
        let root = output_root(&config, &make_course("Networks: Layer 2"));
        assert_eq!(root, PathBuf::from("Networks_ Layer 2"));
    }

    #[test]
    fn test_folder_layout() {
        let root = Path::new("out");
        assert_eq!(unit_dir(root, 3), PathBuf::from("out/Unit 3"));
        assert_eq!(
            topic_dir(root, 1, "Graphs: BFS/DFS"),
            PathBuf::from("out/Unit 1/Graphs_ BFS_DFS")
        );
        assert_eq!(unit_pdf_path(root, 2), PathBuf::from("out/Unit_2.pdf"));
    }

}
