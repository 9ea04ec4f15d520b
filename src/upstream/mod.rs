//! Upstream provider module.
//!
//! Forwarders live at the email provider; this module hides the provider's REST
//! API behind the [`ForwarderProvider`] trait.

pub mod factory;
pub mod mxroute;
pub mod traits;

pub use factory::create_provider;
pub use mxroute::MxrouteClient;
pub use traits::ForwarderProvider;
