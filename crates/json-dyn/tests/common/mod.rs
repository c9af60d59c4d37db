#![allow(dead_code)]

use json_dyn_token::{ReaderError, TokenCursor, TokenKind};

/// A cursor over a fixed token list, for shapes a validating reader never
/// produces.
pub struct ScriptedCursor {
    tokens: Vec<(TokenKind, Option<String>)>,
    pos: Option<usize>,
}

impl ScriptedCursor {
    pub fn new(tokens: Vec<(TokenKind, Option<&str>)>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(kind, text)| (kind, text.map(str::to_string)))
                .collect(),
            pos: None,
        }
    }

    fn current(&self) -> Option<&(TokenKind, Option<String>)> {
        self.tokens.get(self.pos?)
    }
}

impl TokenCursor for ScriptedCursor {
    fn token_kind(&self) -> TokenKind {
        self.current().map_or(TokenKind::None, |(kind, _)| *kind)
    }

    fn advance(&mut self) -> Result<bool, ReaderError> {
        let next = self.pos.map_or(0, |p| p + 1);
        self.pos = Some(next.min(self.tokens.len()));
        Ok(next < self.tokens.len())
    }

    fn offset(&self) -> usize {
        self.pos.unwrap_or(0)
    }

    fn get_str(&self) -> Option<&str> {
        match self.current()? {
            (TokenKind::String | TokenKind::PropertyName | TokenKind::Comment, Some(text)) => {
                Some(text)
            }
            _ => None,
        }
    }

    fn number_text(&self) -> Option<&str> {
        match self.current()? {
            (TokenKind::Number, Some(text)) => Some(text),
            _ => None,
        }
    }
}

pub fn read_fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}
