use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use msgroute_types::{
    can_handle_message_type, parse_message_type, replace_legacy_did_sov_prefix,
    MessageTypeDescriptor,
};
use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::handler::{
    FallbackMessageHandler, HandlerResult, InboundMessage, MessageHandler,
    MessageHandlerMiddleware, MessageShape, SupportedMessage,
};

/// Registration-ordered message handlers, middleware and fallback.
///
/// Registration takes `&mut self` and resolution takes `&self`: populate the
/// registry at startup, then share it (e.g. behind an `Arc`) with dispatch.
#[derive(Default)]
pub struct MessageHandlerRegistry {
    handlers: Vec<Arc<dyn MessageHandler>>,
    middlewares: Vec<Arc<dyn MessageHandlerMiddleware>>,
    fallback: Option<FallbackMessageHandler>,
    config: RegistryConfig,
}

impl MessageHandlerRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            handlers: Vec::new(),
            middlewares: Vec::new(),
            fallback: None,
            config,
        }
    }

    /// Append a handler. Overlapping declarations are allowed; earlier
    /// registrations win.
    pub fn register_message_handler(&mut self, handler: Arc<dyn MessageHandler>) {
        debug!(
            handler = handler.name(),
            messages = handler.supported_messages().len(),
            position = self.handlers.len(),
            "registered message handler"
        );
        self.handlers.push(handler);
    }

    /// Append handlers in order.
    pub fn register_message_handlers<I>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = Arc<dyn MessageHandler>>,
    {
        for handler in handlers {
            self.register_message_handler(handler);
        }
    }

    /// Append a middleware. The registry stores middleware but never runs it.
    pub fn register_message_handler_middleware(
        &mut self,
        middleware: Arc<dyn MessageHandlerMiddleware>,
    ) {
        debug!(middleware = middleware.name(), "registered message handler middleware");
        self.middlewares.push(middleware);
    }

    /// Set the handler used when nothing registered accepts a message.
    /// Replaces any previous fallback.
    pub fn set_fallback_message_handler<F>(&mut self, fallback: F)
    where
        F: Fn(&InboundMessage) -> HandlerResult + Send + Sync + 'static,
    {
        if self.fallback.is_some() {
            debug!("replacing fallback message handler");
        }
        self.fallback = Some(Arc::new(fallback));
    }

    pub fn fallback_message_handler(&self) -> Option<&FallbackMessageHandler> {
        self.fallback.as_ref()
    }

    /// Fallback, or `NoFallbackConfigured`.
    pub fn require_fallback_message_handler(&self) -> Result<&FallbackMessageHandler> {
        self.fallback
            .as_ref()
            .ok_or(RegistryError::NoFallbackConfigured)
    }

    pub fn message_handlers(&self) -> &[Arc<dyn MessageHandler>] {
        &self.handlers
    }

    pub fn message_handler_middlewares(&self) -> &[Arc<dyn MessageHandlerMiddleware>] {
        &self.middlewares
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// First registered handler that accepts `message_type`.
    pub fn get_handler_for_message_type(
        &self,
        message_type: &str,
    ) -> Result<Option<Arc<dyn MessageHandler>>> {
        Ok(self
            .find_match(message_type)?
            .map(|(handler, _)| Arc::clone(handler)))
    }

    /// Shape of the first declaration that accepts `message_type`.
    pub fn get_message_class_for_message_type(
        &self,
        message_type: &str,
    ) -> Result<Option<MessageShape>> {
        Ok(self
            .find_match(message_type)?
            .map(|(_, supported)| supported.shape().clone()))
    }

    /// Handler for `message_type`, or `UnsupportedMessageType`.
    pub fn require_handler_for_message_type(
        &self,
        message_type: &str,
    ) -> Result<Arc<dyn MessageHandler>> {
        self.get_handler_for_message_type(message_type)?
            .ok_or_else(|| RegistryError::UnsupportedMessageType(message_type.to_string()))
    }

    fn find_match(
        &self,
        message_type: &str,
    ) -> Result<Option<(&Arc<dyn MessageHandler>, &SupportedMessage)>> {
        let incoming = self.parse_incoming(message_type)?;

        for handler in &self.handlers {
            for supported in handler.supported_messages() {
                if can_handle_message_type(supported.message_type(), &incoming) {
                    trace!(
                        message_type,
                        handler = handler.name(),
                        shape = supported.shape().name(),
                        "resolved message type"
                    );
                    return Ok(Some((handler, supported)));
                }
            }
        }

        trace!(message_type, "no handler accepts message type");
        Ok(None)
    }

    fn parse_incoming(&self, message_type: &str) -> Result<MessageTypeDescriptor> {
        let raw = if self.config.accept_legacy_did_sov_prefix {
            replace_legacy_did_sov_prefix(message_type)
        } else {
            Cow::Borrowed(message_type)
        };
        Ok(parse_message_type(&raw)?)
    }
}

impl fmt::Debug for MessageHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: Vec<&str> = self.handlers.iter().map(|h| h.name()).collect();
        let middlewares: Vec<&str> = self.middlewares.iter().map(|m| m.name()).collect();
        f.debug_struct("MessageHandlerRegistry")
            .field("handlers", &handlers)
            .field("middlewares", &middlewares)
            .field("fallback", &self.fallback.is_some())
            .field("config", &self.config)
            .finish()
    }
}
