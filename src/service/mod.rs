//! Service layer module.
//!
//! Contains the alias generation core and forwarder management.

pub mod forwarder;
pub mod generator;
pub mod options;
pub mod template;
pub mod token;
pub mod words;

pub use forwarder::ForwarderService;
pub use generator::{EntropySource, generate, generate_with};
pub use template::{TemplatePart, TemplateSpec};
pub use token::{TokenCheck, TokenVerifier};
