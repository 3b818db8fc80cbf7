use crate::cmd::{load_registry, ProtocolsArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_protocols, OutputFormat};

pub fn run(args: ProtocolsArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = load_registry(&args.manifest)?;
    let protocols = registry.supported_protocol_uris();

    print_protocols(
        "https://schemas.3leaps.dev/msgroute/cli/v1/supported-protocols.schema.json",
        &protocols,
        format,
    );
    Ok(SUCCESS)
}
