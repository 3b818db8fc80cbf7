use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, TypeUriError};

/// Parsed message-type URI (MTURI).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageTypeDescriptor {
    doc_uri: String,
    protocol_name: String,
    protocol_major_version: u32,
    protocol_minor_version: u32,
    message_name: String,
}

/// Parsed protocol URI (PIURI): a message type without its message name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProtocolUriDescriptor {
    doc_uri: String,
    protocol_name: String,
    protocol_major_version: u32,
    protocol_minor_version: u32,
}

/// Parse `<doc>/<protocol>/<major>.<minor>/<message>`.
pub fn parse_message_type(raw: &str) -> Result<MessageTypeDescriptor> {
    let (rest, message_name) = raw
        .rsplit_once('/')
        .ok_or_else(|| TypeUriError::malformed(raw, "missing message name segment"))?;
    validate_name_segment(raw, "message name", message_name)?;

    let protocol = split_protocol(raw, rest)?;
    Ok(MessageTypeDescriptor {
        doc_uri: protocol.doc_uri,
        protocol_name: protocol.protocol_name,
        protocol_major_version: protocol.protocol_major_version,
        protocol_minor_version: protocol.protocol_minor_version,
        message_name: message_name.to_string(),
    })
}

/// Parse `<doc>/<protocol>/<major>.<minor>`.
pub fn parse_protocol_uri(raw: &str) -> Result<ProtocolUriDescriptor> {
    split_protocol(raw, raw)
}

fn split_protocol(input: &str, value: &str) -> Result<ProtocolUriDescriptor> {
    let mut parts = value.rsplitn(3, '/');

    let version = parts
        .next()
        .ok_or_else(|| TypeUriError::malformed(input, "missing version segment"))?;
    let protocol_name = parts
        .next()
        .ok_or_else(|| TypeUriError::malformed(input, "missing protocol name segment"))?;
    let doc_uri = parts
        .next()
        .ok_or_else(|| TypeUriError::malformed(input, "missing doc URI"))?;

    validate_doc_uri(input, doc_uri)?;
    validate_name_segment(input, "protocol name", protocol_name)?;
    let (major, minor) = parse_version(input, version)?;

    Ok(ProtocolUriDescriptor {
        doc_uri: doc_uri.to_string(),
        protocol_name: protocol_name.to_string(),
        protocol_major_version: major,
        protocol_minor_version: minor,
    })
}

fn validate_doc_uri(input: &str, doc_uri: &str) -> Result<()> {
    if doc_uri.is_empty() || doc_uri.chars().any(char::is_whitespace) {
        return Err(TypeUriError::malformed(input, "invalid doc URI"));
    }
    Ok(())
}

fn validate_name_segment(input: &str, what: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(TypeUriError::malformed(input, format!("empty {what}")));
    }
    if segment
        .chars()
        .any(|c| c == '\\' || c == '/' || c.is_whitespace())
    {
        return Err(TypeUriError::malformed(
            input,
            format!("invalid character in {what} '{segment}'"),
        ));
    }
    Ok(())
}

fn parse_version(input: &str, version: &str) -> Result<(u32, u32)> {
    let mut parts = version.split('.');

    let major = parts.next().ok_or_else(|| {
        TypeUriError::malformed(input, format!("invalid version '{version}': missing major"))
    })?;
    let minor = parts.next().ok_or_else(|| {
        TypeUriError::malformed(input, format!("invalid version '{version}': missing minor"))
    })?;

    if parts.next().is_some() {
        return Err(TypeUriError::malformed(
            input,
            format!("invalid version '{version}': expected '<major>.<minor>'"),
        ));
    }

    Ok((
        parse_version_component(input, version, "major", major)?,
        parse_version_component(input, version, "minor", minor)?,
    ))
}

// `u32::from_str` accepts a leading '+', so digits are checked first.
fn parse_version_component(input: &str, version: &str, what: &str, value: &str) -> Result<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TypeUriError::malformed(
            input,
            format!("invalid version '{version}': non-numeric {what}"),
        ));
    }
    value.parse::<u32>().map_err(|_| {
        TypeUriError::malformed(
            input,
            format!("invalid version '{version}': {what} out of range"),
        )
    })
}

impl MessageTypeDescriptor {
    /// Build a descriptor from parts, applying the same segment rules as
    /// [`parse_message_type`].
    pub fn new(
        doc_uri: impl Into<String>,
        protocol_name: impl Into<String>,
        protocol_major_version: u32,
        protocol_minor_version: u32,
        message_name: impl Into<String>,
    ) -> Result<Self> {
        let protocol = ProtocolUriDescriptor::new(
            doc_uri,
            protocol_name,
            protocol_major_version,
            protocol_minor_version,
        )?;
        let message_name = message_name.into();
        validate_name_segment(
            &format!("{protocol}/{message_name}"),
            "message name",
            &message_name,
        )?;

        Ok(Self {
            doc_uri: protocol.doc_uri,
            protocol_name: protocol.protocol_name,
            protocol_major_version,
            protocol_minor_version,
            message_name,
        })
    }

    pub fn doc_uri(&self) -> &str {
        &self.doc_uri
    }

    pub fn protocol_name(&self) -> &str {
        &self.protocol_name
    }

    pub fn protocol_major_version(&self) -> u32 {
        self.protocol_major_version
    }

    pub fn protocol_minor_version(&self) -> u32 {
        self.protocol_minor_version
    }

    pub fn message_name(&self) -> &str {
        &self.message_name
    }

    /// `"<major>.<minor>"`.
    pub fn protocol_version(&self) -> String {
        format!(
            "{}.{}",
            self.protocol_major_version, self.protocol_minor_version
        )
    }

    /// The protocol this message type belongs to.
    pub fn protocol(&self) -> ProtocolUriDescriptor {
        ProtocolUriDescriptor {
            doc_uri: self.doc_uri.clone(),
            protocol_name: self.protocol_name.clone(),
            protocol_major_version: self.protocol_major_version,
            protocol_minor_version: self.protocol_minor_version,
        }
    }

    /// Canonical PIURI string of the owning protocol.
    pub fn protocol_uri(&self) -> String {
        self.protocol().to_string()
    }

    /// Canonical MTURI string.
    pub fn message_type_uri(&self) -> String {
        self.to_string()
    }
}

impl ProtocolUriDescriptor {
    /// Build a descriptor from parts, applying the same segment rules as
    /// [`parse_protocol_uri`].
    pub fn new(
        doc_uri: impl Into<String>,
        protocol_name: impl Into<String>,
        protocol_major_version: u32,
        protocol_minor_version: u32,
    ) -> Result<Self> {
        let descriptor = Self {
            doc_uri: doc_uri.into(),
            protocol_name: protocol_name.into(),
            protocol_major_version,
            protocol_minor_version,
        };
        let input = descriptor.to_string();
        validate_doc_uri(&input, &descriptor.doc_uri)?;
        validate_name_segment(&input, "protocol name", &descriptor.protocol_name)?;
        Ok(descriptor)
    }

    pub fn doc_uri(&self) -> &str {
        &self.doc_uri
    }

    pub fn protocol_name(&self) -> &str {
        &self.protocol_name
    }

    pub fn protocol_major_version(&self) -> u32 {
        self.protocol_major_version
    }

    pub fn protocol_minor_version(&self) -> u32 {
        self.protocol_minor_version
    }

    /// `"<major>.<minor>"`.
    pub fn protocol_version(&self) -> String {
        format!(
            "{}.{}",
            self.protocol_major_version, self.protocol_minor_version
        )
    }

    /// Canonical PIURI string.
    pub fn protocol_uri(&self) -> String {
        self.to_string()
    }

    /// Protocol identity: doc URI, name and major version.
    ///
    /// Minor version is a compatibility axis and is ignored here.
    pub fn is_same_protocol(&self, other: &ProtocolUriDescriptor) -> bool {
        self.doc_uri == other.doc_uri
            && self.protocol_name == other.protocol_name
            && self.protocol_major_version == other.protocol_major_version
    }
}

impl fmt::Display for MessageTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}.{}/{}",
            self.doc_uri,
            self.protocol_name,
            self.protocol_major_version,
            self.protocol_minor_version,
            self.message_name
        )
    }
}

impl fmt::Display for ProtocolUriDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}.{}",
            self.doc_uri,
            self.protocol_name,
            self.protocol_major_version,
            self.protocol_minor_version
        )
    }
}

impl FromStr for MessageTypeDescriptor {
    type Err = TypeUriError;

    fn from_str(s: &str) -> Result<Self> {
        parse_message_type(s)
    }
}

impl FromStr for ProtocolUriDescriptor {
    type Err = TypeUriError;

    fn from_str(s: &str) -> Result<Self> {
        parse_protocol_uri(s)
    }
}

impl From<&MessageTypeDescriptor> for ProtocolUriDescriptor {
    fn from(message_type: &MessageTypeDescriptor) -> Self {
        message_type.protocol()
    }
}

// Descriptors travel on the wire as their canonical URI strings.

impl Serialize for MessageTypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MessageTypeDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_message_type(&raw).map_err(de::Error::custom)
    }
}

impl Serialize for ProtocolUriDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProtocolUriDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_protocol_uri(&raw).map_err(de::Error::custom)
    }
}
