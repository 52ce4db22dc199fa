use std::{fs, io::Write, path::Path};

use chrono::{DateTime, TimeZone};
use log::{debug, error, trace};
use tempfile::NamedTempFile;

use crate::{Result, SzError};

/// Date layout used by the original pt-BR locale rendering, e.g. `19/10/2026, 14:03:22`
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

// Helper method for parsing tags
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Renders a creation timestamp with the given strftime layout
pub fn format_date<Tz: TimeZone>(when: &DateTime<Tz>, layout: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    when.format(layout).to_string()
}

/// First non-empty line of the content, cut at `max_chars` characters
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim();

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Writes `contents` to `path` through a temporary file in the same directory
/// followed by a rename, so readers never observe a half-written file.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    if !dir.exists() {
        debug!("Creating parent directory: {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| {
            error!("Failed to create directory {}: {}", dir.display(), e);
            SzError::Io(e)
        })?;
    }

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        error!("Failed to create temporary file: {}", e);
        SzError::Io(e)
    })?;

    trace!("Writing {} bytes to temporary file", contents.len());
    temp_file.write_all(contents.as_bytes())?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        error!("Failed to persist file {}: {}", path.display(), e.error);
        SzError::Io(e.error)
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}
