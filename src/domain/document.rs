/// A retrieved reel page, as handed from a fetcher to the extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Html(String),
    Json(serde_json::Value),
}

impl Document {
    /// Parses a response body as JSON when it looks like JSON, else keeps it as HTML.
    pub fn from_body(body: String) -> Self {
        let trimmed = body.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(value) = serde_json::from_str(trimmed) {
                return Document::Json(value);
            }
        }
        Document::Html(body)
    }
}
