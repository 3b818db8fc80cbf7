use msgroute_types::{parse_message_type, parse_protocol_uri, ProtocolUriDescriptor};
use serde::Serialize;

use crate::cmd::ParseArgs;
use crate::exit::{type_uri_error, CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct ParseOutput {
    schema_id: &'static str,
    kind: &'static str,
    doc_uri: String,
    protocol_name: String,
    protocol_major_version: u32,
    protocol_minor_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_name: Option<String>,
    protocol_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_type_uri: Option<String>,
}

pub fn run(args: ParseArgs, format: OutputFormat) -> CliResult<i32> {
    let out = if args.protocol {
        let protocol =
            parse_protocol_uri(&args.uri).map_err(|err| type_uri_error("parse failed", err))?;
        describe(&protocol, None)
    } else {
        let message_type =
            parse_message_type(&args.uri).map_err(|err| type_uri_error("parse failed", err))?;
        describe(
            &message_type.protocol(),
            Some((
                message_type.message_name().to_string(),
                message_type.message_type_uri(),
            )),
        )
    };

    print_parse(&out, format);
    Ok(SUCCESS)
}

fn describe(protocol: &ProtocolUriDescriptor, message: Option<(String, String)>) -> ParseOutput {
    let (message_name, message_type_uri) = message.unzip();
    ParseOutput {
        schema_id: "https://schemas.3leaps.dev/msgroute/cli/v1/type-uri.schema.json",
        kind: if message_name.is_some() {
            "message-type"
        } else {
            "protocol"
        },
        doc_uri: protocol.doc_uri().to_string(),
        protocol_name: protocol.protocol_name().to_string(),
        protocol_major_version: protocol.protocol_major_version(),
        protocol_minor_version: protocol.protocol_minor_version(),
        message_name,
        protocol_uri: protocol.protocol_uri(),
        message_type_uri,
    }
}

fn print_parse(out: &ParseOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut rows = vec![
                vec!["kind".to_string(), out.kind.to_string()],
                vec!["doc_uri".to_string(), out.doc_uri.clone()],
                vec!["protocol_name".to_string(), out.protocol_name.clone()],
                vec![
                    "protocol_version".to_string(),
                    format!(
                        "{}.{}",
                        out.protocol_major_version, out.protocol_minor_version
                    ),
                ],
            ];
            if let Some(name) = &out.message_name {
                rows.push(vec!["message_name".to_string(), name.clone()]);
            }
            print_table(&["FIELD", "VALUE"], rows);
        }
        OutputFormat::Pretty => {
            println!("Type URI ({}):", out.kind);
            println!("  Doc URI:   {}", out.doc_uri);
            println!("  Protocol:  {}", out.protocol_name);
            println!(
                "  Version:   {}.{}",
                out.protocol_major_version, out.protocol_minor_version
            );
            if let Some(name) = &out.message_name {
                println!("  Message:   {name}");
            }
        }
        OutputFormat::Raw => match &out.message_type_uri {
            Some(uri) => println!("{uri}"),
            None => println!("{}", out.protocol_uri),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_message_type() {
        let parsed = parse_message_type("https://didcomm.org/trust_ping/1.0/ping").unwrap();
        let out = describe(
            &parsed.protocol(),
            Some((parsed.message_name().to_string(), parsed.message_type_uri())),
        );

        assert_eq!(out.kind, "message-type");
        assert_eq!(out.protocol_uri, "https://didcomm.org/trust_ping/1.0");
        assert_eq!(out.message_name.as_deref(), Some("ping"));
    }

    #[test]
    fn describe_protocol_omits_message_fields() {
        let parsed = parse_protocol_uri("https://didcomm.org/trust_ping/1.0").unwrap();
        let out = describe(&parsed, None);
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json["kind"], "protocol");
        assert!(json.get("message_name").is_none());
        assert!(json.get("message_type_uri").is_none());
    }
}
