use crate::resolution::domain::{Ecosystem, IdentifierKind};

/// One resolution request as handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Raw identifier: purl, URL, `name@version` token, file path or
    /// license text.
    pub identifier: String,
    /// Explicit ecosystem, overriding shape detection.
    pub ecosystem: Option<Ecosystem>,
    /// Explicit identifier kind for shapes that cannot be detected
    /// (license text, file paths).
    pub kind_hint: Option<IdentifierKind>,
}

impl ResolveRequest {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ecosystem: None,
            kind_hint: None,
        }
    }

    pub fn with_ecosystem(mut self, ecosystem: Ecosystem) -> Self {
        self.ecosystem = Some(ecosystem);
        self
    }

    /// Treat the identifier as raw license text.
    pub fn as_text(mut self) -> Self {
        self.kind_hint = Some(IdentifierKind::Text);
        self
    }

    /// Treat the identifier as a path to a license file.
    pub fn as_file(mut self) -> Self {
        self.kind_hint = Some(IdentifierKind::File);
        self
    }
}
