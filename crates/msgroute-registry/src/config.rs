/// Controls how incoming message types are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryConfig {
    /// When true, incoming types using the legacy `did:sov:...;spec` doc URI
    /// are rewritten to `https://didcomm.org` before matching.
    pub accept_legacy_did_sov_prefix: bool,
}
