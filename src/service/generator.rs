//! Alias generator.
//!
//! Interprets a template against resolved formatting options:
//!
//! - `<slug>` becomes `slug_length` words joined by `slug_separator`. All but the
//!   last word are adjectives and the last is a noun, so `slug_length=1` is a
//!   single noun and `slug_length=2` reads like `gentle_otter`.
//! - `<hex>` becomes exactly `hex_length` lowercase hex characters, encoded from
//!   `ceil(hex_length / 2)` random bytes.
//!
//! Segments are joined with `alias_separator`, then the optional prefix and suffix
//! are attached with the same separator.

use rand::rngs::ThreadRng;
use rand::{Rng, RngCore};

use crate::domain::FormattingConfig;
use crate::domain::options::keys;
use crate::error::{AliasError, AliasResult};
use crate::service::template::{TemplatePart, TemplateSpec};
use crate::service::words::{ADJECTIVES, NOUNS};

/// Source of randomness for alias generation.
pub trait EntropySource {
    /// Pick an index in `0..bound`. `bound` is never zero.
    fn index(&mut self, bound: usize) -> usize;

    /// Fill `buf` with random bytes.
    fn fill(&mut self, buf: &mut [u8]);
}

/// The thread-local generator is a CSPRNG seeded from the OS.
impl EntropySource for ThreadRng {
    fn index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }

    fn fill(&mut self, buf: &mut [u8]) {
        RngCore::fill_bytes(self, buf);
    }
}

/// Generate an alias using the thread-local CSPRNG.
///
/// # Errors
///
/// Returns [`AliasError::InvalidTemplatePart`] when the template names an unknown
/// part, and [`AliasError::InvalidOptionValue`] when it names no part at all.
pub fn generate(template: &str, formatting: &FormattingConfig) -> AliasResult<String> {
    generate_with(template, formatting, &mut rand::rng())
}

/// Generate an alias drawing randomness from `entropy`.
///
/// The whole template is validated before the first draw.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_with<E>(
    template: &str,
    formatting: &FormattingConfig,
    entropy: &mut E,
) -> AliasResult<String>
where
    E: EntropySource + ?Sized,
{
    let spec = TemplateSpec::parse(template)?;
    if spec.is_empty() {
        return Err(AliasError::InvalidOptionValue {
            key: keys::TEMPLATE.to_string(),
            value: template.to_string(),
            reason: "must name at least one part, such as <slug> or <hex>".to_string(),
        });
    }

    let segments: Vec<String> = spec
        .parts()
        .iter()
        .map(|part| match part {
            TemplatePart::Slug => slug(formatting.slug_length, &formatting.slug_separator, entropy),
            TemplatePart::Hex => hex_string(formatting.hex_length, entropy),
        })
        .collect();

    let separator = formatting.alias_separator.as_str();
    let mut alias = segments.join(separator);

    if !formatting.prefix.is_empty() {
        alias = format!("{}{separator}{alias}", formatting.prefix);
    }
    if !formatting.suffix.is_empty() {
        alias = format!("{alias}{separator}{}", formatting.suffix);
    }

    Ok(alias)
}

/// Draw `words` words, adjectives first and a noun last.
fn slug<E: EntropySource + ?Sized>(words: usize, separator: &str, entropy: &mut E) -> String {
    (0..words)
        .map(|i| {
            let list: &[&str] = if i + 1 == words { &NOUNS } else { &ADJECTIVES };
            list[entropy.index(list.len()) % list.len()]
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Exactly `length` lowercase hex characters.
fn hex_string<E: EntropySource + ?Sized>(length: usize, entropy: &mut E) -> String {
    let mut bytes = vec![0u8; length.div_ceil(2)];
    entropy.fill(&mut bytes);
    let mut encoded = hex::encode(bytes);
    encoded.truncate(length);
    encoded
}
