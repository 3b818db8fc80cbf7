use msgroute_types::{parse_protocol_uri, ProtocolQuery, ProtocolUriDescriptor};

use crate::cmd::{load_registry, DiscoverArgs};
use crate::exit::{type_uri_error, CliResult, SUCCESS};
use crate::output::{print_protocols, OutputFormat};

pub fn run(args: DiscoverArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = load_registry(&args.manifest)?;

    let protocols = match &args.query {
        Some(pattern) => {
            let query =
                ProtocolQuery::parse(pattern).map_err(|err| type_uri_error("invalid query", err))?;
            registry.query_supported_protocols(&query)
        }
        None => {
            let peer = parse_peer_protocols(&args.peer)?;
            registry.filter_supported_protocols_by_protocol_uris(&peer)
        }
    };

    tracing::debug!(matched = protocols.len(), "discovery filter applied");
    print_protocols(
        "https://schemas.3leaps.dev/msgroute/cli/v1/discovered-protocols.schema.json",
        &protocols,
        format,
    );
    Ok(SUCCESS)
}

fn parse_peer_protocols(raw: &[String]) -> CliResult<Vec<ProtocolUriDescriptor>> {
    raw.iter()
        .map(|uri| {
            parse_protocol_uri(uri).map_err(|err| type_uri_error("invalid peer protocol", err))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::DATA_INVALID;

    #[test]
    fn peer_protocols_parse_in_order() {
        let parsed = parse_peer_protocols(&[
            "https://didcomm.org/basicmessage/1.0".to_string(),
            "https://didcomm.org/trust_ping/1.0".to_string(),
        ])
        .unwrap();

        assert_eq!(parsed[0].protocol_name(), "basicmessage");
        assert_eq!(parsed[1].protocol_name(), "trust_ping");
    }

    #[test]
    fn malformed_peer_protocol_is_data_invalid() {
        let err = parse_peer_protocols(&["basicmessage".to_string()]).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }
}
