//! Parsing of the `x-generator-opt` extension keyword.
//!
//! A schema node may carry a generation directive in its extension field: a
//! space-tokenized string whose first token selects the directive kind.
//!
//! ```text
//! const
//! incremental
//! sum <childArraySize> [..extra tokens..]
//! val "<targetKey>" <total>
//! ```
//!
//! Tokens are positionally significant; the only escaping is the literal
//! quote characters surrounding a `val` target key. The second token of a
//! `sum` directive doubles as the size carrier when the directive sits on an
//! array-typed schema node.

use crate::domain::error::GenerationError;

/// Name of the schema extension field holding a directive string
pub const EXTENSION_KEYWORD: &str = "x-generator-opt";

/// The closed set of directive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// A statically assigned value, filled in after placement
    Const,
    /// A counter shared by every element of the enclosing array
    Incremental,
    /// Array-size carrier on arrays; distribution-group marker on scalars
    Sum,
    /// Declares a total to distribute across matching sibling properties
    Val,
}

impl DirectiveKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "const" => Some(Self::Const),
            "incremental" => Some(Self::Incremental),
            "sum" => Some(Self::Sum),
            "val" => Some(Self::Val),
            _ => None,
        }
    }
}

/// A parsed generation directive: the kind plus the full token sequence.
/// Consumers re-index into `tokens` for kind-specific arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub tokens: Vec<String>,
}

impl Directive {
    /// Parse the extension field's raw string. Absence of the field is not
    /// an error and yields `Ok(None)`; an unknown kind is a parse error.
    pub fn parse(raw: Option<&str>) -> Result<Option<Directive>, GenerationError> {
        let raw = match raw {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let tokens: Vec<String> = raw.split_whitespace().map(str::to_owned).collect();
        let first = tokens.first().ok_or(GenerationError::EmptyDirective)?;
        let kind = DirectiveKind::from_token(first).ok_or_else(|| {
            GenerationError::UnknownDirective {
                kind: first.clone(),
            }
        })?;

        Ok(Some(Directive { kind, tokens }))
    }

    /// The array size carried in the second token, if it parses as one.
    pub fn size_argument(&self) -> Option<usize> {
        self.tokens.get(1).and_then(|t| t.parse().ok())
    }

    /// The distribution-group key named by the third token, quote-stripped.
    /// `val` declarations match sibling directives on this token.
    pub fn group_key(&self) -> Option<&str> {
        self.tokens.get(2).map(|t| strip_quotes(t))
    }
}

/// Strip one leading and one trailing quote character, if present.
pub fn strip_quotes(token: &str) -> &str {
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}
