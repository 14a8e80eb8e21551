//! Video search results mapped into playable tracks
//!
//! The search provider itself lives outside this crate; [`VideoSearch`] is
//! the seam it plugs into.

use chrono::Utc;
use lounge_core::prelude::*;
use lounge_core::Track;
use serde::{Deserialize, Serialize};

/// One hit from the video platform's search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSearchResult {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
}

/// Text query to video references
#[trait_variant::make(VideoSearch: Send)]
pub trait LocalVideoSearch {
    async fn search(&self, query: &str) -> Result<Vec<VideoSearchResult>>;
}

/// Build a queueable track from a search hit.
///
/// Duration stays `0` (unknown) until the embedded player reports it. The id
/// carries a timestamp so the same video can sit in the queue twice as
/// distinct entries.
pub fn track_from_search_result(result: &VideoSearchResult) -> Track {
    let id = format!("yt-{}-{}", result.id, Utc::now().timestamp_millis());
    Track::new(
        id,
        decode_html_entities(&result.title),
        decode_html_entities(&result.channel),
    )
    .with_youtube_id(result.id.clone())
    .with_cover_url(result.thumbnail.clone())
}

/// Run a search and map every hit; a blank query never reaches the provider
pub async fn search_tracks<S: LocalVideoSearch>(provider: &S, query: &str) -> Result<Vec<Track>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let results = provider.search(query).await.map_err(|e| {
        warn!("Video search for {:?} failed: {}", query, e);
        e
    })?;
    debug!("Video search for {:?} returned {} results", query, results.len());

    Ok(results.iter().map(track_from_search_result).collect())
}

/// Decode the HTML entities search APIs leave in titles (`&amp;`, `&#39;`, ...)
pub fn decode_html_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let decoded = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSearch(Vec<VideoSearchResult>);

    impl LocalVideoSearch for FixedSearch {
        async fn search(&self, _query: &str) -> Result<Vec<VideoSearchResult>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSearch;

    impl LocalVideoSearch for FailingSearch {
        async fn search(&self, _query: &str) -> Result<Vec<VideoSearchResult>> {
            Err(Error::search("quota exceeded"))
        }
    }

    /// Panics if the provider is consulted
    struct UnreachableSearch;

    impl LocalVideoSearch for UnreachableSearch {
        async fn search(&self, query: &str) -> Result<Vec<VideoSearchResult>> {
            panic!("provider called with {:?}", query)
        }
    }

    fn hit() -> VideoSearchResult {
        VideoSearchResult {
            id: "dQw4w9WgXcQ".into(),
            title: "Lofi &amp; Chill &#39;24".into(),
            channel: "Beats &quot;Co&quot;".into(),
            thumbnail: "https://img.example/dQw.jpg".into(),
        }
    }

    #[test]
    fn test_track_from_search_result() {
        let track = track_from_search_result(&hit());

        assert!(track.id.starts_with("yt-dQw4w9WgXcQ-"));
        assert_eq!(track.name, "Lofi & Chill '24");
        assert_eq!(track.artist, "Beats \"Co\"");
        assert_eq!(track.youtube_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(track.audio_url, None);
        assert_eq!(track.duration, 0);
        assert!(track.is_live());
        assert_eq!(track.cover_url.as_deref(), Some("https://img.example/dQw.jpg"));
    }

    #[test]
    fn test_decode_leaves_unknown_sequences() {
        assert_eq!(decode_html_entities("R&B &unknown; &#x41;"), "R&B &unknown; A");
        assert_eq!(decode_html_entities("no entities"), "no entities");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
    }

    #[tokio::test]
    async fn test_search_tracks_maps_results() {
        let tracks = search_tracks(&FixedSearch(vec![hit(), hit()]), "lofi")
            .await
            .unwrap();
        assert_eq!(tracks.len(), 2);
        assert!(tracks.iter().all(|t| t.youtube_id.is_some()));
    }

    #[tokio::test]
    async fn test_blank_query_skips_provider() {
        let tracks = search_tracks(&UnreachableSearch, "   ").await.unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_search_error_propagates() {
        let err = search_tracks(&FailingSearch, "lofi").await.unwrap_err();
        assert!(matches!(err, Error::Search { .. }));
    }
}
