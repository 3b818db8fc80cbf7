//! Message-type routing and protocol discovery for DIDComm-style agents.
//!
//! msgroute resolves incoming message-type URIs to registered handlers using
//! major/minor version compatibility, and answers "which protocols do I
//! support" for discover-features exchanges.
//!
//! # Crate Structure
//!
//! - [`types`]: MTURI/PIURI parsing and version-compatibility rules
//! - [`registry`]: Ordered handler registry and protocol capability queries

/// Re-export type URI parsing and compatibility rules.
pub mod types {
    pub use msgroute_types::*;
}

/// Re-export the handler registry.
pub mod registry {
    pub use msgroute_registry::*;
}
