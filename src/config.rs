use std::time::Duration;

use lazy_static::lazy_static;

#[derive(Debug)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub store: StoreConfig,
}

#[derive(Debug)]
pub struct ScrapeConfig {
    pub shows_file: String,
    pub language: String,
    pub throttle: Duration,
}

#[derive(Debug)]
pub struct StoreConfig {
    pub path: String,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or(default.to_owned())
}

impl Config {
    fn from_env() -> Self {
        Self {
            scrape: ScrapeConfig {
                shows_file: var_or("TVT_SHOWS_FILE", "./tv_shows.json"),
                language: var_or("TVT_LANGUAGE", "en"),
                throttle: Duration::from_millis(
                    std::env::var("TVT_THROTTLE_MS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(1000),
                ),
            },
            store: StoreConfig {
                path: var_or("TVT_OUTPUT_FILE", "./transcripts.json"),
            },
        }
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}
