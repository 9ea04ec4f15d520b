//! Alias option types.
//!
//! These types carry the caller's `key=value` options from the raw request
//! string through to the resolved formatting knobs the generator consumes.

use std::collections::BTreeMap;

/// Recognized option names.
pub mod keys {
    /// Domain the forwarder is created on (required).
    pub const DOMAIN: &str = "domain";
    /// Address mail is forwarded to (required).
    pub const DESTINATION: &str = "destination";
    /// Alias template, e.g. `<slug>-<hex>`.
    pub const TEMPLATE: &str = "template";
    /// Text placed before the generated body.
    pub const PREFIX: &str = "prefix";
    /// Text placed after the generated body.
    pub const SUFFIX: &str = "suffix";
    /// Separator between alias segments.
    pub const ALIAS_SEPARATOR: &str = "alias_separator";
    /// Separator between words of a slug.
    pub const SLUG_SEPARATOR: &str = "slug_separator";
    /// Number of words in a slug.
    pub const SLUG_LENGTH: &str = "slug_length";
    /// Number of characters in a hex segment.
    pub const HEX_LENGTH: &str = "hex_length";

    /// All recognized names.
    pub const ALL: &[&str] = &[
        DOMAIN,
        DESTINATION,
        TEMPLATE,
        PREFIX,
        SUFFIX,
        ALIAS_SEPARATOR,
        SLUG_SEPARATOR,
        SLUG_LENGTH,
        HEX_LENGTH,
    ];
}

/// Template used when the caller does not supply one.
pub const DEFAULT_TEMPLATE: &str = "<slug>";

/// Raw option mapping, as supplied by the caller.
///
/// Unrecognized keys are retained so they can be reported, but nothing reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: BTreeMap<String, String>,
}

impl OptionSet {
    /// Create an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option; a later insert of the same key overwrites.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a non-empty option value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Number of stored options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no options are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys that are not recognized options.
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| !keys::ALL.contains(k))
    }
}

/// Resolved formatting knobs for a single generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingConfig {
    /// Prepended (with `alias_separator`) when non-empty.
    pub prefix: String,
    /// Appended (with `alias_separator`) when non-empty.
    pub suffix: String,
    /// Joins alias segments.
    pub alias_separator: String,
    /// Joins slug words.
    pub slug_separator: String,
    /// Words per slug.
    pub slug_length: usize,
    /// Characters per hex segment.
    pub hex_length: usize,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            alias_separator: "_".to_string(),
            slug_separator: "_".to_string(),
            slug_length: 2,
            hex_length: 6,
        }
    }
}

/// Fully resolved options for creating one forwarder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasOptions {
    /// Domain the forwarder is created on.
    pub domain: String,
    /// Address mail is forwarded to.
    pub destination: String,
    /// Alias template.
    pub template: String,
    /// Formatting knobs.
    pub formatting: FormattingConfig,
}
