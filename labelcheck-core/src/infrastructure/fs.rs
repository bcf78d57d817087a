// labelcheck-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Writes `content` so that readers only ever see the old file or the new one.
///
/// The bytes go to a sibling temporary file that is then renamed over `path`.
/// Missing parent directories are created first.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    // Same directory as the target, so the rename never crosses filesystems.
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file.flush()?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Pretty JSON (2-space indent, trailing newline) written atomically.
pub fn write_json<P: AsRef<Path>, T: Serialize>(
    path: P,
    value: &T,
) -> Result<(), InfrastructureError> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    atomic_write(path, body)
}

/// Reads and parses a JSON collaborator file, keeping the path in the error.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| InfrastructureError::JsonError {
        path: path.display().to_string(),
        source,
    })
}
