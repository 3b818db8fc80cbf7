use std::borrow::Cow;

/// Doc URI used by current DIDComm protocol definitions.
pub const DIDCOMM_DOC_URI: &str = "https://didcomm.org";

/// Doc URI used by early Aries agents.
pub const LEGACY_DID_SOV_DOC_URI: &str = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec";

/// Rewrite a legacy `did:sov:...;spec` doc prefix to [`DIDCOMM_DOC_URI`].
///
/// Inputs without the legacy prefix are returned borrowed and unchanged.
pub fn replace_legacy_did_sov_prefix(raw: &str) -> Cow<'_, str> {
    match raw.strip_prefix(LEGACY_DID_SOV_DOC_URI) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            Cow::Owned(format!("{DIDCOMM_DOC_URI}{rest}"))
        }
        _ => Cow::Borrowed(raw),
    }
}
