use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TypeUriError};
use crate::uri::ProtocolUriDescriptor;

/// Discover-features protocol query.
///
/// Matches a protocol URI exactly, or by prefix when the pattern ends with
/// a single `*` (`https://didcomm.org/*`, `https://didcomm.org/issue-credential/1.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolQuery {
    pattern: String,
    matcher: Matcher,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Matcher {
    Exact,
    Prefix(usize),
}

impl ProtocolQuery {
    pub fn parse(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(TypeUriError::InvalidQuery("empty pattern".to_string()));
        }

        let wildcards = pattern.matches('*').count();
        let matcher = match wildcards {
            0 => Matcher::Exact,
            1 if pattern.ends_with('*') => Matcher::Prefix(pattern.len() - 1),
            _ => {
                return Err(TypeUriError::InvalidQuery(format!(
                    "'{pattern}': '*' is only allowed once, at the end"
                )))
            }
        };

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, protocol: &ProtocolUriDescriptor) -> bool {
        self.matches_str(&protocol.protocol_uri())
    }

    pub fn matches_str(&self, protocol_uri: &str) -> bool {
        match self.matcher {
            Matcher::Exact => protocol_uri == self.pattern,
            Matcher::Prefix(len) => protocol_uri.starts_with(&self.pattern[..len]),
        }
    }
}

impl FromStr for ProtocolQuery {
    type Err = TypeUriError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ProtocolQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uri::parse_protocol_uri;

    fn protocol(raw: &str) -> ProtocolUriDescriptor {
        parse_protocol_uri(raw).unwrap()
    }

    #[test]
    fn exact_query() {
        let query = ProtocolQuery::parse("https://didcomm.org/basicmessage/1.0").unwrap();
        assert!(query.matches(&protocol("https://didcomm.org/basicmessage/1.0")));
        assert!(!query.matches(&protocol("https://didcomm.org/basicmessage/1.1")));
    }

    #[test]
    fn trailing_wildcard_matches_prefix() {
        let all = ProtocolQuery::parse("*").unwrap();
        let family = ProtocolQuery::parse("https://didcomm.org/issue-credential/1.*").unwrap();

        let v10 = protocol("https://didcomm.org/issue-credential/1.0");
        let v20 = protocol("https://didcomm.org/issue-credential/2.0");
        let other = protocol("https://example.org/chat/1.0");

        assert!(all.matches(&v10) && all.matches(&other));
        assert!(family.matches(&v10));
        assert!(!family.matches(&v20));
        assert!(!family.matches(&other));
    }

    #[test]
    fn rejects_bad_patterns() {
        for raw in ["", "   ", "https://*/chat/1.0", "https://didcomm.org/**"] {
            assert!(
                matches!(ProtocolQuery::parse(raw), Err(TypeUriError::InvalidQuery(_))),
                "{raw:?}"
            );
        }
    }
}
