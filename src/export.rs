//! Exporters for extraction runs.
//!
//! Three independent serializers over the same ordered record sequence:
//! tabular CSV, a structured JSON document, and a numbered text listing.
//! None of them re-sorts; all refuse an empty run before touching the
//! destination path, so a failed export never creates or clobbers a file.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::errors::ExtractError;
use crate::models::ExtractionRun;

fn ensure_songs(run: &ExtractionRun) -> Result<(), ExtractError> {
    if run.songs.is_empty() {
        return Err(ExtractError::Export("no songs to export".to_string()));
    }
    Ok(())
}

/// Write one CSV row per record with a header row of
/// `title,artist,duration,video_id,video_description,created_time`.
/// Quoting and escaping follow the CSV convention.
pub fn export_csv(run: &ExtractionRun, path: &Path) -> Result<(), ExtractError> {
    ensure_songs(run)?;
    let mut writer = csv::Writer::from_path(path)?;
    for song in &run.songs {
        writer.serialize(song)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the whole run (handle, requested cap, songs, completion timestamp)
/// as one pretty-printed JSON document.
pub fn export_json(run: &ExtractionRun, path: &Path) -> Result<(), ExtractError> {
    ensure_songs(run)?;
    let document = serde_json::to_string_pretty(run)?;
    fs::write(path, document)?;
    Ok(())
}

/// Write one numbered line per record: `N. <title> - <artist> (<duration>s)`.
pub fn export_listing(run: &ExtractionRun, path: &Path) -> Result<(), ExtractError> {
    ensure_songs(run)?;
    let mut listing = String::new();
    for (i, song) in run.songs.iter().enumerate() {
        let _ = writeln!(
            listing,
            "{}. {} - {} ({}s)",
            i + 1,
            song.title,
            song.artist,
            song.duration
        );
    }
    fs::write(path, listing)?;
    Ok(())
}
