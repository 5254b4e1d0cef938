use std::time::Duration;

use serde::Deserialize;

use super::error::YoutubeError;
use crate::transcript::{Segment, Transcript};

// "captions": {
//   "playerCaptionsTracklistRenderer": {
//     "captionTracks": [
//       {
//         "baseUrl": "https://www.youtube.com/api/timedtext?v=...",
//         "name": { "simpleText": "English" },
//         "vssId": ".en",
//         "languageCode": "en",
//         "kind": "asr",
//         "isTranslatable": true
//       }
//     ],
//     ...
//   }
// },
// "videoDetails": { ... }

/// Caption metadata embedded in the watch page player response.
#[derive(Deserialize, Debug)]
pub struct PlayerCaptions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: TracklistRenderer,
}

#[derive(Deserialize, Debug)]
struct TracklistRenderer {
    #[serde(rename = "captionTracks", default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Deserialize, Debug)]
pub struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "languageCode")]
    pub language_code: String,
    pub kind: Option<String>,
    #[serde(flatten)]
    pub remaining: serde_json::Value,
}

impl PlayerCaptions {
    /// Slice the `"captions":` object out of the watch page html. The stream
    /// deserializer stops at the end of the object, whatever follows.
    pub fn from_watch_html(html: &str) -> Result<Self, YoutubeError> {
        let (_, rest) = html
            .split_once("\"captions\":")
            .ok_or(YoutubeError::CaptionsUnavailable)?;
        match serde_json::Deserializer::from_str(rest)
            .into_iter::<PlayerCaptions>()
            .next()
        {
            Some(Ok(captions)) => Ok(captions),
            Some(Err(e)) => Err(YoutubeError::JsonError(e)),
            None => Err(YoutubeError::CaptionsUnavailable),
        }
    }

    /// Track for the target language. Manually created tracks win over
    /// auto-generated ones.
    pub fn select(&self, language: &str) -> Result<&CaptionTrack, YoutubeError> {
        let tracks = &self.renderer.caption_tracks;
        tracks
            .iter()
            .find(|t| t.language_code == language && !t.is_generated())
            .or_else(|| tracks.iter().find(|t| t.language_code == language))
            .ok_or_else(|| YoutubeError::NoTranscript(language.to_owned()))
    }
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    pub fn json3_url(&self) -> String {
        if self.base_url.contains('?') {
            format!("{}&fmt=json3", self.base_url)
        } else {
            format!("{}?fmt=json3", self.base_url)
        }
    }
}

#[derive(Deserialize, Debug)]
struct RawTranscript {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Deserialize, Debug)]
struct RawEvent {
    #[serde(rename = "tStartMs")]
    start_ms: Option<u64>,
    #[serde(rename = "dDurationMs")]
    duration_ms: Option<u64>,
    #[serde(default)]
    segs: Vec<RawSeg>,
}

#[derive(Deserialize, Debug)]
struct RawSeg {
    #[serde(default)]
    utf8: String,
}

/// Convert a json3 timedtext document into segments. Events carrying no
/// text (window definitions, bare newlines) are dropped.
pub fn parse_json3(raw: &str) -> Result<Transcript, YoutubeError> {
    let raw: RawTranscript = serde_json::from_str(raw)?;
    let mut transcript = Vec::with_capacity(raw.events.len());
    for event in raw.events {
        let text = event
            .segs
            .iter()
            .map(|s| s.utf8.as_str())
            .collect::<String>();
        if text.trim().is_empty() {
            continue;
        }
        transcript.push(Segment {
            text,
            start: Duration::from_millis(event.start_ms.unwrap_or(0)),
            duration: Duration::from_millis(event.duration_ms.unwrap_or(0)),
        });
    }
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_HTML: &str = concat!(
        r#"<html><script>var ytInitialPlayerResponse = {"#,
        r#""captions":{"playerCaptionsTracklistRenderer":{"captionTracks":["#,
        r#"{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","languageCode":"en","kind":"asr","vssId":"a.en"},"#,
        r#"{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en&manual","languageCode":"en","vssId":".en"},"#,
        r#"{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=it","languageCode":"it","vssId":".it"}"#,
        r#"]}},"videoDetails":{"videoId":"abc"}};</script></html>"#,
    );

    #[test]
    fn extracts_captions_from_watch_page() {
        let captions = PlayerCaptions::from_watch_html(WATCH_HTML).unwrap();
        assert_eq!(captions.renderer.caption_tracks.len(), 3);
    }

    #[test]
    fn manual_track_wins_over_generated() {
        let captions = PlayerCaptions::from_watch_html(WATCH_HTML).unwrap();
        let track = captions.select("en").unwrap();
        assert!(!track.is_generated());
        assert!(track.base_url.ends_with("manual"));
        assert!(track.json3_url().ends_with("&fmt=json3"));
    }

    #[test]
    fn generated_track_is_a_fallback() {
        let captions = PlayerCaptions::from_watch_html(
            r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"u","languageCode":"en","kind":"asr"}]}},"videoDetails":{}}"#,
        )
        .unwrap();
        assert!(captions.select("en").unwrap().is_generated());
        assert!(matches!(
            captions.select("fr"),
            Err(YoutubeError::NoTranscript(_))
        ));
    }

    #[test]
    fn page_without_captions() {
        assert!(matches!(
            PlayerCaptions::from_watch_html("<html>nothing here</html>"),
            Err(YoutubeError::CaptionsUnavailable)
        ));
    }

    #[test]
    fn json3_conversion_drops_textless_events() {
        let transcript = parse_json3(
            r#"{"events":[
                {"tStartMs":0,"dDurationMs":0,"id":1},
                {"tStartMs":0,"dDurationMs":1000,"segs":[{"utf8":"hi"}]},
                {"tStartMs":1200,"dDurationMs":800,"segs":[{"utf8":"\n"}]},
                {"tStartMs":2000,"dDurationMs":1500,"segs":[{"utf8":"two "},{"utf8":"parts"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].text, "hi");
        assert_eq!(transcript[0].start, Duration::from_secs(0));
        assert_eq!(transcript[0].duration, Duration::from_secs(1));
        assert_eq!(transcript[1].text, "two parts");
        assert_eq!(transcript[1].start, Duration::from_millis(2000));
    }
}
