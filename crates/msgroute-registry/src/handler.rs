use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use msgroute_types::{parse_message_type, MessageTypeDescriptor};
use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// Opaque handle to the concrete shape a message body deserializes into.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MessageShape {
    name: Arc<str>,
    type_id: Option<TypeId>,
}

impl MessageShape {
    /// Shape backed by a Rust type.
    pub fn of<T: 'static>() -> Self {
        Self {
            name: Arc::from(std::any::type_name::<T>()),
            type_id: Some(TypeId::of::<T>()),
        }
    }

    /// Shape known only by name (e.g. JSON bodies declared in a manifest).
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            type_id: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// True if this shape was created with `MessageShape::of::<T>()`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == Some(TypeId::of::<T>())
    }
}

impl fmt::Debug for MessageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageShape").field(&self.name).finish()
    }
}

/// A message shape that declares its own message type URI.
pub trait AgentMessage {
    const TYPE: &'static str;
}

/// Pairing of a message shape with the message type it declares support for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedMessage {
    shape: MessageShape,
    message_type: MessageTypeDescriptor,
}

impl SupportedMessage {
    pub fn new(shape: MessageShape, message_type: MessageTypeDescriptor) -> Self {
        Self {
            shape,
            message_type,
        }
    }

    /// Parse `raw` and pair it with `shape`.
    pub fn parse(shape: MessageShape, raw: &str) -> msgroute_types::Result<Self> {
        Ok(Self::new(shape, parse_message_type(raw)?))
    }

    /// Declaration for an [`AgentMessage`] type.
    pub fn of<T: AgentMessage + 'static>() -> msgroute_types::Result<Self> {
        Self::parse(MessageShape::of::<T>(), T::TYPE)
    }

    pub fn shape(&self) -> &MessageShape {
        &self.shape
    }

    pub fn message_type(&self) -> &MessageTypeDescriptor {
        &self.message_type
    }
}

/// Message handed to handlers, middleware and the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "@type")]
    pub message_type: String,
    #[serde(flatten)]
    pub body: serde_json::Value,
}

impl InboundMessage {
    pub fn new(message_type: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            message_type: message_type.into(),
            body,
        }
    }
}

/// Reply produced by a handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    #[serde(rename = "@type")]
    pub message_type: String,
    #[serde(flatten)]
    pub body: serde_json::Value,
}

pub type HandlerResult = std::result::Result<Option<OutboundMessage>, HandlerError>;

/// A unit of logic that processes one or more declared message types.
pub trait MessageHandler: Send + Sync {
    /// Declared message types, in match priority order.
    fn supported_messages(&self) -> &[SupportedMessage];

    fn handle(&self, message: &InboundMessage) -> HandlerResult;

    /// Name used in logs and diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Cross-cutting step wrapped around handler execution.
///
/// Implementations call `next` to continue the chain, or return early to
/// short-circuit it.
pub trait MessageHandlerMiddleware: Send + Sync {
    fn call(
        &self,
        message: &InboundMessage,
        next: &dyn Fn(&InboundMessage) -> HandlerResult,
    ) -> HandlerResult;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Handler invoked when nothing registered accepts a message.
pub type FallbackMessageHandler = Arc<dyn Fn(&InboundMessage) -> HandlerResult + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    impl AgentMessage for Ping {
        const TYPE: &'static str = "https://didcomm.org/trust_ping/1.0/ping";
    }

    struct Broken;

    impl AgentMessage for Broken {
        const TYPE: &'static str = "trust_ping";
    }

    #[test]
    fn shape_of_type_is_tagged() {
        let shape = MessageShape::of::<Ping>();
        assert!(shape.is::<Ping>());
        assert!(!shape.is::<Broken>());
        assert!(shape.name().ends_with("Ping"));
    }

    #[test]
    fn named_shapes_compare_by_name() {
        assert_eq!(MessageShape::named("ping"), MessageShape::named("ping"));
        assert_ne!(MessageShape::named("ping"), MessageShape::of::<Ping>());
        assert!(MessageShape::named("ping").type_id().is_none());
    }

    #[test]
    fn supported_message_from_agent_message() {
        let supported = SupportedMessage::of::<Ping>().unwrap();
        assert!(supported.shape().is::<Ping>());
        assert_eq!(supported.message_type().message_name(), "ping");
        assert!(SupportedMessage::of::<Broken>().is_err());
    }

    #[test]
    fn inbound_message_uses_at_type_on_the_wire() {
        let message: InboundMessage = serde_json::from_str(
            r#"{"@type":"https://didcomm.org/basicmessage/1.0/message","content":"hi"}"#,
        )
        .unwrap();

        assert_eq!(
            message.message_type,
            "https://didcomm.org/basicmessage/1.0/message"
        );
        assert_eq!(message.body["content"], "hi");
    }
}
