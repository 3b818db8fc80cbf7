//! Version-compatibility rules.
//!
//! Minor versions are additive: a capability declared at minor `N` accepts
//! any incoming minor `<= N`. Major versions never match across each other.

use crate::uri::{MessageTypeDescriptor, ProtocolUriDescriptor};

/// Whether a handler declaring `declared` can process a message typed `incoming`.
pub fn can_handle_message_type(
    declared: &MessageTypeDescriptor,
    incoming: &MessageTypeDescriptor,
) -> bool {
    declared.doc_uri() == incoming.doc_uri()
        && declared.protocol_name() == incoming.protocol_name()
        && declared.message_name() == incoming.message_name()
        && declared.protocol_major_version() == incoming.protocol_major_version()
        && incoming.protocol_minor_version() <= declared.protocol_minor_version()
}

/// Same rule as [`can_handle_message_type`], named from the receiving side.
pub fn supports_incoming_message_type(
    local: &MessageTypeDescriptor,
    incoming: &MessageTypeDescriptor,
) -> bool {
    can_handle_message_type(local, incoming)
}

/// Whether the locally supported protocol `local` can serve a peer that
/// declared `peer`.
pub fn supports_incoming_did_comm_protocol_uri(
    local: &ProtocolUriDescriptor,
    peer: &ProtocolUriDescriptor,
) -> bool {
    local.is_same_protocol(peer) && peer.protocol_minor_version() <= local.protocol_minor_version()
}
