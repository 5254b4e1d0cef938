use std::fmt::Display;

#[derive(Debug)]
pub enum YoutubeError {
    RequestError(reqwest::Error),
    JsonError(serde_json::Error),
    CaptionsUnavailable,
    NoTranscript(String),
}

impl From<reqwest::Error> for YoutubeError {
    fn from(e: reqwest::Error) -> Self {
        YoutubeError::RequestError(e)
    }
}

impl From<serde_json::Error> for YoutubeError {
    fn from(e: serde_json::Error) -> Self {
        YoutubeError::JsonError(e)
    }
}

impl Display for YoutubeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YoutubeError::RequestError(e) => write!(f, "Request error: {}", e),
            YoutubeError::JsonError(e) => write!(f, "Json error: {}", e),
            YoutubeError::CaptionsUnavailable => write!(f, "no caption data on the watch page"),
            YoutubeError::NoTranscript(lang) => write!(f, "no transcript in language {}", lang),
        }
    }
}

impl std::error::Error for YoutubeError {}
