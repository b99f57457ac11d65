use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tiktok_song_extract::export::{export_csv, export_json, export_listing};
use tiktok_song_extract::models::GenerationStatus;
use tiktok_song_extract::normalize::normalize;
use tiktok_song_extract::progress::{create_progress_bar, format_duration};
use tiktok_song_extract::source::{SimulatedSource, MAX_ITEMS_CEILING};
use tiktok_song_extract::store::ResultStore;
use tiktok_song_extract::worker::{spawn_extraction, ExtractEvent};

#[derive(Parser)]
#[command(name = "tiktok-song-extract")]
#[command(about = "Extract song metadata from a TikTok profile's videos")]
struct Args {
    /// Profile reference: handle, @handle, or profile URL
    profile: String,

    /// Maximum number of videos to consider
    #[arg(default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..=MAX_ITEMS_CEILING as u64))]
    max_items: u64,

    /// Write the songs as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the run as a JSON document to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write a numbered text listing to this path
    #[arg(long)]
    txt: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let max_items = args.max_items as usize;

    let handle = normalize(&args.profile)?;
    println!("Extracting songs from @{handle}...");

    let start = Instant::now();
    let store = Arc::new(ResultStore::new());
    let job = spawn_extraction(
        Arc::clone(&store),
        Box::new(SimulatedSource::new()),
        handle,
        max_items,
    )?;

    let pb = create_progress_bar(max_items as u64, "Extracting");
    let mut status = GenerationStatus::Complete;
    for event in job.events.iter() {
        match event {
            ExtractEvent::Progress(n) => pb.set_position(n as u64),
            ExtractEvent::Finished {
                count,
                status: final_status,
            } => {
                pb.finish_with_message(format!("Extracted {count} unique songs"));
                status = final_status;
                break;
            }
            ExtractEvent::Failed(msg) => {
                pb.abandon();
                bail!("extraction failed: {msg}");
            }
        }
    }
    job.join();

    if status == GenerationStatus::Exhausted {
        eprintln!("warning: candidate budget exhausted before reaching {max_items} songs");
    }

    let run = store.get().context("extraction produced no result")?;

    println!("\nFound {} unique songs:", run.songs.len());
    println!("{:-<50}", "");
    for (i, song) in run.songs.iter().enumerate() {
        println!("{}. {} - {} ({}s)", i + 1, song.title, song.artist, song.duration);
    }

    if let Some(path) = &args.csv {
        export_csv(&run, path)?;
        println!("Songs exported to {}", path.display());
    }
    if let Some(path) = &args.json {
        export_json(&run, path)?;
        println!("Songs exported to {}", path.display());
    }
    if let Some(path) = &args.txt {
        export_listing(&run, path)?;
        println!("Songs exported to {}", path.display());
    }

    println!("\nDone in {}", format_duration(start.elapsed()));
    Ok(())
}
