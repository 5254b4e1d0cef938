use std::fmt::Display;
use std::fs::read_to_string;

use serde::Deserialize;

/// Input show list, `{"data": [{"youtube_id": "...", ...}, ...]}`.
/// A missing `data` key means zero shows to process.
#[derive(Deserialize, Debug)]
pub struct ShowList {
    #[serde(default)]
    pub data: Vec<Show>,
}

#[derive(Deserialize, Debug)]
pub struct Show {
    pub youtube_id: Option<String>,
    #[serde(flatten)]
    pub remaining: serde_json::Value,
}

impl ShowList {
    pub fn load(path: &str) -> Result<Self, ShowsError> {
        let raw = read_to_string(path).map_err(ShowsError::IOError)?;
        serde_json::from_str(&raw).map_err(ShowsError::JsonError)
    }
}

#[derive(Debug)]
pub enum ShowsError {
    IOError(std::io::Error),
    JsonError(serde_json::Error),
}

impl Display for ShowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShowsError::IOError(e) => write!(f, "IO error: {}", e),
            ShowsError::JsonError(e) => write!(f, "Json error: {}", e),
        }
    }
}

impl std::error::Error for ShowsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_list() {
        let list: ShowList = serde_json::from_str(
            r#"{"data": [{"youtube_id": "abc", "title": "Some Show", "season": 2}, {"title": "no id"}]}"#,
        )
        .unwrap();
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[0].youtube_id.as_deref(), Some("abc"));
        assert_eq!(list.data[0].remaining["title"], "Some Show");
        assert!(list.data[1].youtube_id.is_none());
    }

    #[test]
    fn missing_data_key_means_empty() {
        let list: ShowList = serde_json::from_str(r#"{"version": 3}"#).unwrap();
        assert!(list.data.is_empty());
    }
}
