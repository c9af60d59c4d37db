use serde::Deserialize;

/// How [`JsonReader`](crate::JsonReader) treats `//` and `/* */` comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentHandling {
    /// Comments are a syntax error (RFC 8259).
    #[default]
    Disallow,
    /// Comments are consumed like whitespace.
    Skip,
    /// Comments are surfaced as [`TokenKind::Comment`](crate::TokenKind::Comment) tokens.
    Allow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub comments: CommentHandling,
    /// Accept a single `,` before `]` or `}`.
    pub allow_trailing_commas: bool,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comments(mut self, comments: CommentHandling) -> Self {
        self.comments = comments;
        self
    }

    pub fn allow_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Number of spaces per nesting level; `None` writes compact JSON.
    pub indent: Option<usize>,
}

impl WriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { indent: Some(2) }
    }

    pub fn indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }
}
