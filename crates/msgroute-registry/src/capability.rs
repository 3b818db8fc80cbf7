//! Supported message types and protocols derived from registered handlers.

use std::collections::HashSet;

use msgroute_types::{
    supports_incoming_did_comm_protocol_uri, MessageTypeDescriptor, ProtocolQuery,
    ProtocolUriDescriptor,
};

use crate::registry::MessageHandlerRegistry;

impl MessageHandlerRegistry {
    /// Every declared message type, in registration then declaration order.
    ///
    /// Recomputed on each call.
    pub fn supported_message_types(&self) -> Vec<MessageTypeDescriptor> {
        self.message_handlers()
            .iter()
            .flat_map(|handler| handler.supported_messages())
            .map(|supported| supported.message_type().clone())
            .collect()
    }

    /// Distinct protocols of the supported message types, first-seen order.
    ///
    /// Minor version is part of identity here: `1.0` and `1.1` of the same
    /// protocol are listed separately.
    pub fn supported_protocol_uris(&self) -> Vec<ProtocolUriDescriptor> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for message_type in self.supported_message_types() {
            let protocol = message_type.protocol();
            if seen.insert(protocol.clone()) {
                out.push(protocol);
            }
        }

        out
    }

    /// Local protocols that can serve at least one of the peer's protocols.
    ///
    /// The result follows local order, not the peer's.
    pub fn filter_supported_protocols_by_protocol_uris(
        &self,
        peer_declared: &[ProtocolUriDescriptor],
    ) -> Vec<ProtocolUriDescriptor> {
        self.supported_protocol_uris()
            .into_iter()
            .filter(|local| {
                peer_declared
                    .iter()
                    .any(|peer| supports_incoming_did_comm_protocol_uri(local, peer))
            })
            .collect()
    }

    /// Local protocols whose PIURI matches a discover-features query.
    pub fn query_supported_protocols(&self, query: &ProtocolQuery) -> Vec<ProtocolUriDescriptor> {
        self.supported_protocol_uris()
            .into_iter()
            .filter(|protocol| query.matches(protocol))
            .collect()
    }
}
