//! Forwarder types exchanged with the upstream provider.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Body of a forwarder creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewForwarder {
    /// Local part of the forwarding address.
    pub alias: String,
    /// Addresses mail is forwarded to.
    pub destinations: Vec<String>,
}

impl NewForwarder {
    /// Create a forwarder with a single destination.
    #[must_use]
    pub fn new(alias: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            destinations: vec![destination.into()],
        }
    }
}

/// A forwarder created by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedForwarder {
    /// Generated alias.
    pub alias: String,
    /// Domain the forwarder lives on.
    pub domain: String,
}

impl CreatedForwarder {
    /// Full forwarding address, `alias@domain`.
    #[must_use]
    pub fn email(&self) -> String {
        format!("{}@{}", self.alias, self.domain)
    }
}

/// An `alias@domain` address split into its halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwarderAddress {
    /// Local part.
    pub alias: String,
    /// Domain part.
    pub domain: String,
}

impl FromStr for ForwarderAddress {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut halves = s.split('@');
        match (halves.next(), halves.next(), halves.next()) {
            (Some(alias), Some(domain), None) if !alias.is_empty() && !domain.is_empty() => {
                Ok(Self {
                    alias: alias.to_string(),
                    domain: domain.to_string(),
                })
            }
            _ => Err(AppError::InvalidEmail(s.to_string())),
        }
    }
}
