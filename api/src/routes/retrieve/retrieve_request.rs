use serde::Deserialize;

/// Request payload for /retrieve.
#[derive(Debug, Deserialize)]
pub struct RetrieveRequest {
    /// Natural language question.
    pub query: String,
    /// Answer language; defaults to "english" when omitted.
    #[serde(default)]
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_is_optional() {
        let req: RetrieveRequest = serde_json::from_str(r#"{"query": "q"}"#).unwrap();
        assert!(req.language.is_none());

        let req: RetrieveRequest =
            serde_json::from_str(r#"{"query": "q", "language": "french"}"#).unwrap();
        assert_eq!(req.language.as_deref(), Some("french"));
    }
}
