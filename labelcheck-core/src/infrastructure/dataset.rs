// labelcheck-core/src/infrastructure/dataset.rs

// A dataset is a directory tree where each leaf folder holds one label:
//
//   dataset/
//     stones-throw/
//       application.json
//       label.ocr.json

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use crate::infrastructure::error::InfrastructureError;

pub const APPLICATION_FILE: &str = "application.json";
pub const TRANSCRIPT_SUFFIX: &str = ".ocr.json";
pub const ROOT_ITEM_NAME: &str = "(root)";

/// One (application, transcript) pair found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    pub name: String,
    pub application: PathBuf,
    pub transcript: PathBuf,
}

#[derive(Default)]
struct Folder {
    application: Option<PathBuf>,
    transcripts: Vec<PathBuf>,
}

/// Finds every complete item under `root`, sorted by folder path.
/// Incomplete folders are reported and skipped.
#[instrument(skip(root), fields(root = %root.display()))]
pub fn discover_dataset(root: &Path) -> Result<Vec<DatasetEntry>, InfrastructureError> {
    if !root.is_dir() {
        return Err(InfrastructureError::DatasetError(format!(
            "'{}' is not a directory",
            root.display()
        )));
    }

    // 1. Group interesting files by their folder
    let mut folders: BTreeMap<PathBuf, Folder> = BTreeMap::new();
    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
            continue;
        };
        let file_name = file_name.to_string_lossy();

        if file_name == APPLICATION_FILE {
            folders.entry(parent.to_path_buf()).or_default().application = Some(path.to_path_buf());
        } else if file_name.ends_with(TRANSCRIPT_SUFFIX) {
            folders
                .entry(parent.to_path_buf())
                .or_default()
                .transcripts
                .push(path.to_path_buf());
        }
    }

    // 2. Keep complete folders only
    let mut entries = Vec::with_capacity(folders.len());
    for (dir, folder) in folders {
        let name = item_name(root, &dir);
        let transcript = pick_transcript(folder.transcripts);

        match (folder.application, transcript) {
            (Some(application), Some(transcript)) => entries.push(DatasetEntry {
                name,
                application,
                transcript,
            }),
            (None, _) => warn!(item = %name, "Skipping folder without {}", APPLICATION_FILE),
            (_, None) => warn!(item = %name, "Skipping folder without a *{} transcript", TRANSCRIPT_SUFFIX),
        }
    }

    info!(items = entries.len(), "Dataset discovered");
    Ok(entries)
}

/// Prefers a transcript whose name mentions "label"; otherwise the first by name.
fn pick_transcript(mut candidates: Vec<PathBuf>) -> Option<PathBuf> {
    candidates.sort();
    let preferred = candidates.iter().position(|p| {
        p.file_name()
            .is_some_and(|n| n.to_string_lossy().to_lowercase().contains("label"))
    });
    match preferred {
        Some(i) => Some(candidates.swap_remove(i)),
        None => candidates.into_iter().next(),
    }
}

fn item_name(root: &Path, dir: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        _ => ROOT_ITEM_NAME.to_string(),
    }
}
