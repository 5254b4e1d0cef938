use std::env::args;

#[allow(unused_imports)]
use log::{debug, error, info, warn};

use tv_transcripts::config::CONFIG;
use tv_transcripts::search::{search_all, search_one};
use tv_transcripts::store::TranscriptStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let args: Vec<String> = args().skip(1).collect();
    let store = TranscriptStore::load(&CONFIG.store.path)?;
    debug!("loaded {} transcripts from {}", store.len(), CONFIG.store.path);

    match args.as_slice() {
        [query] => match search_all(&store, query) {
            Ok(hits) => {
                let plural = if hits.len() > 1 { "s" } else { "" };
                println!("Found {} result{} for: \"{}\"", hits.len(), plural, query);
                for hit in hits {
                    println!(
                        "{} @ {:02}:{:02}",
                        hit.id,
                        hit.start.as_secs() / 60,
                        hit.start.as_secs() % 60
                    );
                }
            }
            Err(e) => println!("{}", e),
        },
        [id, pattern] => match search_one(&store, id, pattern) {
            Ok(matches) => {
                for m in matches {
                    println!(
                        "{:02}:{:02} ...{}...",
                        m.start.as_secs() / 60,
                        m.start.as_secs() % 60,
                        m.hint
                    );
                }
            }
            Err(e) => println!("{}", e),
        },
        _ => eprintln!("usage: tvt_search <query> | tvt_search <video id> <pattern>"),
    }
    Ok(())
}
