//! Core data models for the extraction pipeline.
//!
//! This module contains the struct definitions shared by the source
//! providers, the result store, and the exporters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Profile Handle
// ============================================================================

/// Canonical profile handle, stripped of any `@` marker or URL wrapper.
///
/// Only `normalize::normalize` produces these; once produced the handle is
/// immutable. Serializes as a plain string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileHandle(String);

impl ProfileHandle {
    pub(crate) fn new(handle: String) -> Self {
        ProfileHandle(handle)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Source Models
// ============================================================================

/// Music metadata attached to a video, as a source provider reports it.
#[derive(Clone, Debug)]
pub struct MusicInfo {
    pub title: String,
    pub author: String,
    pub duration: u32, // seconds
}

/// One raw video from a source provider. Videos without music (or with an
/// empty music title) yield no song record.
#[derive(Clone, Debug)]
pub struct VideoClip {
    pub id: String,
    pub description: String,
    pub music: Option<MusicInfo>,
    pub created_time: DateTime<Utc>,
}

// ============================================================================
// Extraction Results
// ============================================================================

/// One piece of song metadata attributed to a video.
///
/// `(title, artist)` is the deduplication key: only the first-seen record
/// for a given pair is retained. Field names match the CSV header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    pub duration: u32,
    pub video_id: String,
    pub video_description: String,
    pub created_time: DateTime<Utc>,
}

/// How a generation pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Reached the requested record count or the source ran dry.
    Complete,
    /// Candidate attempt budget ran out first; the collected records are
    /// still valid, the caller should surface a warning.
    Exhausted,
}

/// Aggregate result of one extraction invocation.
///
/// `songs` preserves discovery order; exporters serialize it verbatim and
/// never re-sort. The only timestamp embedded in exports is `completed_at`,
/// recorded once here, so repeated exports of the same run are
/// byte-identical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRun {
    pub handle: ProfileHandle,
    pub max_items: usize,
    pub songs: Vec<SongRecord>,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_handle_display() {
        let handle = ProfileHandle::new("dance_star".to_string());
        assert_eq!(handle.to_string(), "dance_star");
        assert_eq!(handle.as_str(), "dance_star");
    }

    #[test]
    fn test_profile_handle_serializes_as_plain_string() {
        let handle = ProfileHandle::new("dance_star".to_string());
        assert_eq!(
            serde_json::to_string(&handle).unwrap(),
            "\"dance_star\""
        );
    }
}
