use std::fmt;

/// Kind of the token a [`TokenCursor`](crate::TokenCursor) is positioned on.
///
/// `None` is reported both before the first `advance` and once the input is
/// exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    #[default]
    None,
    Null,
    True,
    False,
    Number,
    String,
    StartArray,
    EndArray,
    StartObject,
    EndObject,
    PropertyName,
    Comment,
}

impl TokenKind {
    /// `true` for `[` and `{`.
    pub fn is_container_start(self) -> bool {
        matches!(self, TokenKind::StartArray | TokenKind::StartObject)
    }

    /// `true` for `]` and `}`.
    pub fn is_container_end(self) -> bool {
        matches!(self, TokenKind::EndArray | TokenKind::EndObject)
    }

    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Number
                | TokenKind::String
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::None => "None",
            TokenKind::Null => "Null",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::StartArray => "StartArray",
            TokenKind::EndArray => "EndArray",
            TokenKind::StartObject => "StartObject",
            TokenKind::EndObject => "EndObject",
            TokenKind::PropertyName => "PropertyName",
            TokenKind::Comment => "Comment",
        };
        f.write_str(name)
    }
}
