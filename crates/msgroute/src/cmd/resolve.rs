use serde::Serialize;

use crate::cmd::{load_registry, ResolveArgs};
use crate::exit::{registry_error, CliError, CliResult, NOT_FOUND, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct ResolveOutput {
    schema_id: &'static str,
    message_type: String,
    handler: String,
    shape: String,
}

pub fn run(args: ResolveArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = load_registry(&args.manifest)?;

    let handler = registry
        .get_handler_for_message_type(&args.message_type)
        .map_err(|err| registry_error("resolve failed", err))?;
    let shape = registry
        .get_message_class_for_message_type(&args.message_type)
        .map_err(|err| registry_error("resolve failed", err))?;

    let (handler, shape) = match (handler, shape) {
        (Some(handler), Some(shape)) => (handler, shape),
        _ => {
            return Err(CliError::new(
                NOT_FOUND,
                format!("no handler accepts message type {}", args.message_type),
            ))
        }
    };

    let out = ResolveOutput {
        schema_id: "https://schemas.3leaps.dev/msgroute/cli/v1/resolved-handler.schema.json",
        message_type: args.message_type,
        handler: handler.name().to_string(),
        shape: shape.name().to_string(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            &["MESSAGE TYPE", "HANDLER", "SHAPE"],
            vec![vec![out.message_type, out.handler, out.shape]],
        ),
        OutputFormat::Pretty => {
            println!("{} -> {} ({})", out.message_type, out.handler, out.shape);
        }
        OutputFormat::Raw => println!("{}", out.handler),
    }

    Ok(SUCCESS)
}
