use std::path::{Path, PathBuf};

use clap::{ArgGroup, Args, Subcommand};
use msgroute_registry::{HandlerManifest, MessageHandlerRegistry};

use crate::exit::{registry_error, CliResult};
use crate::output::OutputFormat;

pub mod discover;
pub mod parse;
pub mod protocols;
pub mod resolve;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a message-type or protocol URI.
    Parse(ParseArgs),
    /// List protocols supported by a handler manifest.
    Protocols(ProtocolsArgs),
    /// Resolve a message type to the handler that would receive it.
    Resolve(ResolveArgs),
    /// Filter supported protocols by peer protocols or a discovery query.
    Discover(DiscoverArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Parse(args) => parse::run(args, format),
        Command::Protocols(args) => protocols::run(args, format),
        Command::Resolve(args) => resolve::run(args, format),
        Command::Discover(args) => discover::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

pub(crate) fn load_registry(path: &Path) -> CliResult<MessageHandlerRegistry> {
    let manifest = HandlerManifest::from_path(path)
        .map_err(|err| registry_error("manifest load failed", err))?;
    let registry = manifest
        .build_registry()
        .map_err(|err| registry_error("manifest invalid", err))?;

    tracing::debug!(
        path = %path.display(),
        handlers = registry.message_handlers().len(),
        "loaded handler manifest"
    );
    Ok(registry)
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// URI to parse.
    pub uri: String,
    /// Parse as a protocol URI (no trailing message name).
    #[arg(long)]
    pub protocol: bool,
}

#[derive(Args, Debug)]
pub struct ProtocolsArgs {
    /// Handler manifest (JSON).
    #[arg(long, short = 'm', value_name = "FILE")]
    pub manifest: PathBuf,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Handler manifest (JSON).
    #[arg(long, short = 'm', value_name = "FILE")]
    pub manifest: PathBuf,
    /// Incoming message type URI.
    pub message_type: String,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("filter").required(true).args(["peer", "query"])))]
pub struct DiscoverArgs {
    /// Handler manifest (JSON).
    #[arg(long, short = 'm', value_name = "FILE")]
    pub manifest: PathBuf,
    /// Protocol URI announced by the peer (repeatable).
    #[arg(long, value_name = "PIURI")]
    pub peer: Vec<String>,
    /// Discover-features query, optionally ending in '*'.
    #[arg(long, value_name = "PATTERN")]
    pub query: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
