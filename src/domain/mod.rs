//! Domain models for the alias gateway.
//!
//! This module contains the option, forwarder, and API contract types.

pub mod dto;
pub mod forwarder;
pub mod options;

pub use dto::{AddAliasRequest, DataResponse, EmailData, MessageResponse};
pub use forwarder::{CreatedForwarder, ForwarderAddress, NewForwarder};
pub use options::{AliasOptions, DEFAULT_TEMPLATE, FormattingConfig, OptionSet};
