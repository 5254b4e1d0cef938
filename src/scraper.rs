use indicatif::{ProgressBar, ProgressStyle};
#[allow(unused_imports)]
use log::{debug, error, info, warn};
use reqwest::Client;

use tv_transcripts::config::CONFIG;
use tv_transcripts::shows::ShowList;
use tv_transcripts::store::TranscriptStore;
use tv_transcripts::youtube::{self, Fetched};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let shows = ShowList::load(&CONFIG.scrape.shows_file)?;
    let total = shows.data.len();
    info!("starting download of {} transcripts", total);

    let cli = Client::new();
    let mut store = TranscriptStore::new();
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("Video {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for show in &shows.data {
        progress.inc(1);
        match &show.youtube_id {
            Some(id) => match youtube::fetch(&cli, id, &CONFIG.scrape.language).await {
                Fetched::Transcript(t) => {
                    debug!("got transcript for {} ({} segments)", id, t.len());
                    store.insert(id.clone(), t);
                }
                Fetched::Unavailable => {}
            },
            None => debug!("show record without youtube_id, skipping"),
        }
        tokio::time::sleep(CONFIG.scrape.throttle).await;
    }
    progress.finish_and_clear();

    store.save(&CONFIG.store.path)?;
    info!("saved {} transcripts to {}", store.len(), CONFIG.store.path);
    Ok(())
}
