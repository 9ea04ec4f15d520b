//! Option parser.
//!
//! Turns `domain=example.com,destination=me@example.com,template=<slug>-<hex>`
//! into [`AliasOptions`].

use crate::domain::options::keys;
use crate::domain::{AliasOptions, DEFAULT_TEMPLATE, FormattingConfig, OptionSet};
use crate::error::{AliasError, AliasResult};

/// Largest accepted `slug_length`.
pub const MAX_SLUG_LENGTH: usize = 16;

/// Largest accepted `hex_length`.
pub const MAX_HEX_LENGTH: usize = 64;

/// Build an option set from `key=value` tokens.
///
/// Tokens without `=` are skipped. Keys and values are trimmed, and the value keeps
/// everything after the first `=`.
pub fn collect_options<I, S>(tokens: I) -> OptionSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = OptionSet::new();
    for token in tokens {
        if let Some((key, value)) = token.as_ref().split_once('=') {
            options.insert(key.trim(), value.trim());
        }
    }
    options
}

/// Parse option tokens and resolve them into alias options.
///
/// # Errors
///
/// Returns [`AliasError::MissingRequiredOption`] when `domain` or `destination` is
/// absent and [`AliasError::InvalidOptionValue`] for unusable numeric values.
pub fn parse<I, S>(tokens: I) -> AliasResult<AliasOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    resolve(&collect_options(tokens))
}

/// Parse a raw comma-separated option string.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_str(raw: &str) -> AliasResult<AliasOptions> {
    parse(raw.split(','))
}

/// Resolve an option set into alias options, applying defaults.
///
/// # Errors
///
/// See [`parse`].
pub fn resolve(options: &OptionSet) -> AliasResult<AliasOptions> {
    let (Some(domain), Some(destination)) =
        (options.get(keys::DOMAIN), options.get(keys::DESTINATION))
    else {
        return Err(AliasError::MissingRequiredOption);
    };

    let defaults = FormattingConfig::default();
    let text = |key: &str, default: String| options.get(key).map_or(default, ToString::to_string);

    let formatting = FormattingConfig {
        slug_length: length(options, keys::SLUG_LENGTH, defaults.slug_length, MAX_SLUG_LENGTH)?,
        hex_length: length(options, keys::HEX_LENGTH, defaults.hex_length, MAX_HEX_LENGTH)?,
        prefix: text(keys::PREFIX, defaults.prefix),
        suffix: text(keys::SUFFIX, defaults.suffix),
        alias_separator: text(keys::ALIAS_SEPARATOR, defaults.alias_separator),
        slug_separator: text(keys::SLUG_SEPARATOR, defaults.slug_separator),
    };

    Ok(AliasOptions {
        domain: domain.to_string(),
        destination: destination.to_string(),
        template: options
            .get(keys::TEMPLATE)
            .unwrap_or(DEFAULT_TEMPLATE)
            .to_string(),
        formatting,
    })
}

/// Read a non-negative integer option bounded by `max`.
fn length(options: &OptionSet, key: &str, default: usize, max: usize) -> AliasResult<usize> {
    let Some(raw) = options.get(key) else {
        return Ok(default);
    };

    let invalid = |reason: String| AliasError::InvalidOptionValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason,
    };

    let value: usize = raw
        .parse()
        .map_err(|_| invalid("expected a non-negative integer".to_string()))?;

    if value > max {
        return Err(invalid(format!("must be at most {max}")));
    }

    Ok(value)
}
