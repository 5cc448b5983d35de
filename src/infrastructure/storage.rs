use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::domain::story::StoryDocument;

/// Read every `.txt` user story under `dir`, sorted by file name.
pub fn read_story_files(dir: &Path) -> Result<Vec<StoryDocument>> {
    if !dir.exists() {
        return Err(AppError::NotFound(format!(
            "Stories directory {} does not exist",
            dir.display()
        )));
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", dir.display(), e)))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("txt"))
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(AppError::NotFound(format!(
            "No .txt files found in {}",
            dir.display()
        )));
    }

    let mut stories = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let content = read_text_lossy(&path)?;
        stories.push(StoryDocument::new(name, content));
    }

    Ok(stories)
}

/// Read a text file tolerating non-UTF-8 input: UTF-8 first (BOM stripped),
/// Windows-1252 as the fallback.
fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;

    let bytes = bytes
        .strip_prefix("\u{feff}".as_bytes())
        .unwrap_or(&bytes[..]);

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            Ok(decoded.into_owned())
        }
    }
}
