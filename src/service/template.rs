//! Template parser for aliases.
//!
//! Parses template strings like `<slug>-<hex>` into an ordered list of parts.
//! Only the `<...>` tokens matter; text between them is ignored.

use std::fmt;
use std::str::FromStr;

use crate::error::{AliasError, AliasResult};

/// A generated segment of an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePart {
    /// Dictionary words.
    Slug,
    /// Random hex characters.
    Hex,
}

impl TemplatePart {
    /// Every allowed part.
    pub const ALL: [Self; 2] = [Self::Slug, Self::Hex];

    /// Token name as written in a template.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slug => "slug",
            Self::Hex => "hex",
        }
    }
}

impl fmt::Display for TemplatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplatePart {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| AliasError::InvalidTemplatePart(s.to_string()))
    }
}

/// Parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    parts: Vec<TemplatePart>,
}

impl TemplateSpec {
    /// Parse a template string.
    ///
    /// Fails on the first token outside the allowed set, naming it.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::InvalidTemplatePart`] for an unknown token.
    pub fn parse(template: &str) -> AliasResult<Self> {
        tokens(template)
            .map(str::parse::<TemplatePart>)
            .collect::<AliasResult<Vec<_>>>()
            .map(|parts| Self { parts })
    }

    /// Parts in order of appearance.
    #[must_use]
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Whether the template names no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Iterate over the text of every `<...>` token, left to right.
///
/// A token runs from a `<` to the nearest following `>`. An opening `<` with no
/// closing `>` after it ends the scan.
fn tokens(template: &str) -> impl Iterator<Item = &str> {
    let mut rest = template;
    std::iter::from_fn(move || {
        let open = rest.find('<')?;
        let after_open = &rest[open + 1..];
        let close = after_open.find('>')?;
        let token = &after_open[..close];
        rest = &after_open[close + 1..];
        Some(token)
    })
}
