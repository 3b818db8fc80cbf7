//! Message-type and protocol URI parsing with version-compatibility rules.
//!
//! Every routed message names its semantics with a message-type URI:
//! - A doc locator identifying the issuing spec family (`https://didcomm.org`)
//! - A protocol name (`issue-credential`)
//! - A `<major>.<minor>` protocol version (`1.0`)
//! - A message name (`offer-credential`)
//!
//! Parsing is exact: no case-folding and no prefix rewriting. Use
//! [`replace_legacy_did_sov_prefix`] explicitly when legacy peers must be
//! accepted.

pub mod compat;
pub mod error;
pub mod legacy;
pub mod query;
pub mod uri;

pub use compat::{
    can_handle_message_type, supports_incoming_did_comm_protocol_uri,
    supports_incoming_message_type,
};
pub use error::{Result, TypeUriError};
pub use legacy::{replace_legacy_did_sov_prefix, DIDCOMM_DOC_URI, LEGACY_DID_SOV_DOC_URI};
pub use query::ProtocolQuery;
pub use uri::{parse_message_type, parse_protocol_uri, MessageTypeDescriptor, ProtocolUriDescriptor};
