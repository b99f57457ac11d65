//! Source providers and the song collection loop.
//!
//! `SourceProvider` is the seam between the pipeline and whatever produces
//! video data. The only implementation here is `SimulatedSource`: no real
//! TikTok client is integrated, so candidate videos are synthesized from
//! fixed reference lists. A real data source slots in behind the same trait
//! without touching the store or the exporters.

use chrono::{Duration, Utc};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::ExtractError;
use crate::models::{
    GenerationStatus, MusicInfo, ProfileHandle, SongRecord, VideoClip,
};

// ============================================================================
// Limits
// ============================================================================

/// Candidate attempts allowed per requested record before giving up.
/// Prevents an endless loop when the reference lists are small relative to
/// the requested count.
pub const ATTEMPT_BUDGET_FACTOR: usize = 4;

/// Upper bound on `max_items`; larger requests are clamped.
pub const MAX_ITEMS_CEILING: usize = 500;

/// Descriptions longer than this are truncated with a `...` suffix.
const DESCRIPTION_MAX_CHARS: usize = 100;

// ============================================================================
// Reference Lists
// ============================================================================

const SONG_TITLES: &[&str] = &[
    "Midnight Drive",
    "Neon Skyline",
    "Paper Hearts",
    "Golden Hour",
    "Static Bloom",
    "Afterglow",
    "Velvet Rain",
    "Slow Motion",
    "Wildfire",
    "Glass City",
    "Echo Chamber",
    "Daydream Loop",
    "Low Tide",
    "Satellite",
    "Fever Line",
    "Northern Light",
    "Open Window",
    "Last Summer",
];

const ARTIST_NAMES: &[&str] = &[
    "Nova Reyes",
    "The Paper Suns",
    "Carmen Vale",
    "DJ Halcyon",
    "Iris Monroe",
    "Cold Harbor",
    "Felix Arden",
    "Luna Park",
    "The Late Shift",
    "Maya Solis",
    "Indigo Fields",
    "Ray Calder",
];

// ============================================================================
// Source Provider
// ============================================================================

/// Capability interface over a video data source.
pub trait SourceProvider {
    /// Fetch the next candidate video for a profile, or `None` when the
    /// source has no more items.
    fn next_video(&mut self, handle: &ProfileHandle) -> Result<Option<VideoClip>, ExtractError>;
}

/// Synthetic data source combining the reference lists with randomized
/// duration, description, and timestamp values. Deterministic in shape,
/// non-deterministic in content; never runs dry.
pub struct SimulatedSource {
    rng: SmallRng,
    seq: u64,
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            seq: 0,
        }
    }

    /// Seeded constructor for reproducible tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seq: 0,
        }
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceProvider for SimulatedSource {
    fn next_video(&mut self, handle: &ProfileHandle) -> Result<Option<VideoClip>, ExtractError> {
        self.seq += 1;
        let title = SONG_TITLES[self.rng.gen_range(0..SONG_TITLES.len())];
        let artist = ARTIST_NAMES[self.rng.gen_range(0..ARTIST_NAMES.len())];

        let clip = VideoClip {
            // Sequential suffix keeps ids unique per originating video.
            id: format!("video_{}", self.seq),
            description: format!("@{} clip {} with {}", handle, self.seq, title),
            music: Some(MusicInfo {
                title: title.to_string(),
                author: artist.to_string(),
                duration: self.rng.gen_range(15..=180),
            }),
            created_time: Utc::now() - Duration::minutes(self.rng.gen_range(0..525_600)),
        };
        Ok(Some(clip))
    }
}

// ============================================================================
// Collection Loop
// ============================================================================

/// Records plus how the generation pass ended.
pub struct Extraction {
    pub records: Vec<SongRecord>,
    pub status: GenerationStatus,
}

/// Convert a raw clip into a song record, or `None` when the clip carries no
/// usable music metadata.
fn song_from_clip(clip: VideoClip) -> Option<SongRecord> {
    let music = clip.music?;
    if music.title.is_empty() {
        return None;
    }
    Some(SongRecord {
        title: music.title,
        artist: music.author,
        duration: music.duration,
        video_id: clip.id,
        video_description: truncate_description(&clip.description),
        created_time: clip.created_time,
    })
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        let cut: String = description.chars().take(DESCRIPTION_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        description.to_string()
    }
}

/// Pull candidates from a provider, deduplicating by `(title, artist)` as
/// records are produced. First-seen wins; discovery order is preserved.
///
/// Stops once `max_items` records are kept, the source runs dry, or the
/// attempt budget (`ATTEMPT_BUDGET_FACTOR * max_items`) is exhausted. The
/// cancellation flag is checked between candidates. `on_progress` receives
/// the kept count after each new record.
pub fn collect_songs(
    provider: &mut dyn SourceProvider,
    handle: &ProfileHandle,
    max_items: usize,
    cancel: &AtomicBool,
    mut on_progress: impl FnMut(usize),
) -> Result<Extraction, ExtractError> {
    let max_items = max_items.clamp(1, MAX_ITEMS_CEILING);
    let budget = max_items * ATTEMPT_BUDGET_FACTOR;

    let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
    let mut records: Vec<SongRecord> = Vec::new();
    let mut attempts = 0usize;

    while records.len() < max_items && attempts < budget {
        if cancel.load(Ordering::Relaxed) {
            return Err(ExtractError::Cancelled);
        }
        let Some(clip) = provider.next_video(handle)? else {
            break;
        };
        attempts += 1;

        if let Some(record) = song_from_clip(clip) {
            let key = (record.title.clone(), record.artist.clone());
            if seen.insert(key) {
                records.push(record);
                on_progress(records.len());
            }
        }
    }

    let status = if records.len() < max_items && attempts >= budget {
        GenerationStatus::Exhausted
    } else {
        GenerationStatus::Complete
    };

    Ok(Extraction { records, status })
}

// ============================================================================
// TESTS
// ============================================================================
