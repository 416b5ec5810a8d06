//! The article record returned to callers.

use std::fmt;

use serde::Serialize;

/// A retrieved article with similarity metadata.
///
/// Owned by the store's response; read-only to callers. `distance` is the
/// similarity distance (ascending = more similar), derived from the cosine
/// score reported by the vector store.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub text: String,
    pub views: i64,
    pub lang: String,
    pub distance: f32,
}

impl Article {
    /// Maps a `(score, payload)` search hit into an article.
    ///
    /// Missing payload fields default to empty/zero rather than failing the
    /// whole result set.
    pub(crate) fn from_payload(score: f32, payload: &serde_json::Value) -> Self {
        let text = payload
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let title = payload
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let url = payload
            .get("url")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let views = payload.get("views").and_then(|v| v.as_i64()).unwrap_or(0);
        let lang = payload
            .get("lang")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Self {
            title,
            url,
            text,
            views,
            lang,
            // Qdrant reports cosine similarity; callers see distance.
            distance: 1.0 - score,
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}) views={} distance={:.4}\n{}",
            self.lang, self.title, self.url, self.views, self.distance, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_mapping() {
        let payload = json!({
            "text": "Paris is the capital of France.",
            "title": "Paris",
            "url": "https://en.wikipedia.org/wiki/Paris",
            "views": 3000,
            "lang": "en",
        });
        let a = Article::from_payload(0.9, &payload);
        assert_eq!(a.title, "Paris");
        assert_eq!(a.views, 3000);
        assert!((a.distance - 0.1).abs() < 1e-6);
    }

    #[test]
    fn missing_fields_default() {
        let a = Article::from_payload(0.5, &json!({"title": "Orphan"}));
        assert_eq!(a.title, "Orphan");
        assert_eq!(a.text, "");
        assert_eq!(a.views, 0);
    }

    #[test]
    fn display_carries_metadata_and_text() {
        let a = Article {
            title: "Paris".into(),
            url: "https://en.wikipedia.org/wiki/Paris".into(),
            text: "Paris is the capital of France.".into(),
            views: 3000,
            lang: "en".into(),
            distance: 0.1234,
        };
        let s = a.to_string();
        assert!(s.contains("Paris"));
        assert!(s.contains("views=3000"));
        assert!(s.contains("capital of France"));
    }
}
