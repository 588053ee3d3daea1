use std::path::Path;

use tracing::debug;

/// Clear an output directory before generation.
///
/// With a prefix, only regular files whose name starts with it are removed.
/// Without one, the whole directory is removed and recreated. A missing
/// directory is created. Returns the number of files removed in prefix mode.
pub fn clear_directory(dir: &Path, prefix: Option<&str>) -> std::io::Result<usize> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        return Ok(0);
    }

    let Some(prefix) = prefix.filter(|prefix| !prefix.is_empty()) else {
        std::fs::remove_dir_all(dir)?;
        std::fs::create_dir_all(dir)?;
        debug!(dir = %dir.display(), "directory recreated");
        return Ok(0);
    };

    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(prefix) {
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    debug!(dir = %dir.display(), prefix, removed, "directory cleared");
    Ok(removed)
}
