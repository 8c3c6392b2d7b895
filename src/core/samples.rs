// src/core/samples.rs

use std::path::Path;
use tracing::{info, warn};

use crate::core::models::SelectedFile;

/// Scans a directory for bundled sample images, sorted by file name.
///
/// The samples mirror the sample data a prediction service ships next to its
/// model. A missing or unreadable directory is not fatal: the user can still
/// type a path, so this degrades to an empty list with a logged warning.
pub fn discover_samples(dir: &Path) -> Vec<SelectedFile> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "samples directory is not readable");
            return Vec::new();
        }
    };

    let mut samples: Vec<SelectedFile> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .map(SelectedFile::from_path)
        .filter(SelectedFile::looks_like_image)
        .collect();
    samples.sort_by(|a, b| a.name.cmp(&b.name));

    info!(dir = %dir.display(), count = samples.len(), "discovered sample images");
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_files_are_listed_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zebra.png"), b"z").unwrap();
        std::fs::write(dir.path().join("ant.jpg"), b"a").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"n").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let samples = discover_samples(dir.path());

        let names: Vec<&str> = samples.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ant.jpg", "zebra.png"]);
    }

    #[test]
    fn missing_directory_yields_an_empty_list() {
        assert!(discover_samples(Path::new("/no/such/place")).is_empty());
    }
}
