use serde::{Deserialize, Serialize};

/// Coarse payload classification.
///
/// Only `Text` payloads are fed to the text matcher. An HTML page where a
/// raw license file was expected means the URL guess was wrong, so markup
/// is a soft failure just like a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Markup,
    Binary,
}

impl ContentKind {
    /// Classifies a downloaded payload.
    pub fn classify(bytes: &[u8]) -> Self {
        if bytes.contains(&0) {
            return ContentKind::Binary;
        }
        let Ok(text) = std::str::from_utf8(bytes) else {
            return ContentKind::Binary;
        };
        let head: String = text
            .trim_start()
            .chars()
            .take(512)
            .collect::<String>()
            .to_lowercase();
        if head.starts_with("<!doctype html")
            || head.starts_with("<html")
            || head.contains("<html")
        {
            return ContentKind::Markup;
        }
        ContentKind::Text
    }
}

/// The outcome of one blocking fetch.
///
/// Failure is data, not an error: a failed or misclassified download makes
/// the scanner advance to the next candidate and shows up in the
/// provenance trail of the final result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalOutcome {
    pub url: String,
    pub succeeded: bool,
    pub status: Option<u16>,
    pub content: Option<String>,
    pub content_kind: ContentKind,
}

impl RetrievalOutcome {
    pub fn success(url: impl Into<String>, status: u16, content: String) -> Self {
        let content_kind = ContentKind::classify(content.as_bytes());
        Self {
            url: url.into(),
            succeeded: true,
            status: Some(status),
            content: Some(content),
            content_kind,
        }
    }

    pub fn failure(url: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            url: url.into(),
            succeeded: false,
            status,
            content: None,
            content_kind: ContentKind::Binary,
        }
    }

    /// True when the payload is usable license-text input: the download
    /// succeeded and classified as plain text.
    pub fn is_text(&self) -> bool {
        self.succeeded && self.content_kind == ContentKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain_text() {
        assert_eq!(
            ContentKind::classify(b"MIT License\n\nPermission is hereby granted..."),
            ContentKind::Text
        );
    }

    #[test]
    fn test_classify_html() {
        assert_eq!(
            ContentKind::classify(b"<!DOCTYPE html><html><body>404</body></html>"),
            ContentKind::Markup
        );
        assert_eq!(
            ContentKind::classify(b"\n  <html lang=\"en\">"),
            ContentKind::Markup
        );
    }

    #[test]
    fn test_classify_binary() {
        assert_eq!(ContentKind::classify(b"PK\x03\x04\x00\x00"), ContentKind::Binary);
        assert_eq!(ContentKind::classify(&[0xff, 0xfe, 0x80]), ContentKind::Binary);
    }

    #[test]
    fn test_outcome_is_text() {
        let ok = RetrievalOutcome::success("https://x/LICENSE", 200, "MIT".to_string());
        assert!(ok.is_text());
        let html = RetrievalOutcome::success(
            "https://x/LICENSE",
            200,
            "<html><body>hi</body></html>".to_string(),
        );
        assert!(!html.is_text());
        let failed = RetrievalOutcome::failure("https://x/LICENSE", Some(404));
        assert!(!failed.is_text());
    }
}
