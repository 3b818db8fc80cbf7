//! Ordered message handler registry with version-aware dispatch resolution.
//!
//! Handlers are registered once at startup, in order. Resolution scans them
//! in registration order and returns the first whose declared message types
//! accept the incoming type, so overlapping registrations are resolved by
//! position rather than rejected.
//!
//! The registry also derives the locally supported protocol list used by
//! discover-features exchanges. It does not run handlers or middleware;
//! that belongs to whatever owns the dispatch loop.

pub mod capability;
pub mod config;
pub mod error;
pub mod handler;
pub mod manifest;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{HandlerError, RegistryError, Result};
pub use handler::{
    AgentMessage, FallbackMessageHandler, HandlerResult, InboundMessage, MessageHandler,
    MessageHandlerMiddleware, MessageShape, OutboundMessage, SupportedMessage,
};
pub use manifest::{HandlerManifest, HandlerSpec, ManifestHandler, MAX_MANIFEST_SIZE};
pub use registry::MessageHandlerRegistry;
