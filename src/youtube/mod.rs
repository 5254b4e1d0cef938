mod error;
mod player;

pub use error::YoutubeError;
pub use player::{CaptionTrack, PlayerCaptions};

#[allow(unused_imports)]
use log::{debug, error, info, warn};
use reqwest::Client;

use crate::transcript::Transcript;

pub const WATCH_URL: &str = "https://www.youtube.com/watch";

/// Outcome of a transcript fetch as the scraper sees it. Every failure kind
/// collapses into `Unavailable`: the show is simply left out of the store.
#[derive(Debug)]
pub enum Fetched {
    Transcript(Transcript),
    Unavailable,
}

pub async fn fetch(cli: &Client, id: &str, language: &str) -> Fetched {
    match fetch_transcript(cli, id, language).await {
        Ok(t) => Fetched::Transcript(t),
        Err(e) => {
            debug!("no transcript for {}: {}", id, e);
            Fetched::Unavailable
        }
    }
}

/// Fetch the transcript of one video in the given language: resolve the
/// watch page, pick a caption track and download it as json3.
pub async fn fetch_transcript(
    cli: &Client,
    id: &str,
    language: &str,
) -> Result<Transcript, YoutubeError> {
    debug!("fetching watch page for {}", id);
    let html = cli
        .get(WATCH_URL)
        .query(&[("v", id)])
        .send()
        .await?
        .text()
        .await?;
    let captions = PlayerCaptions::from_watch_html(&html)?;
    let track = captions.select(language)?;
    debug!("downloading track {} for {}", track.language_code, id);
    let raw = cli.get(track.json3_url()).send().await?.text().await?;
    player::parse_json3(&raw)
}
