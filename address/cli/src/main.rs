#![deny(clippy::unwrap_used)]

mod cmd;
mod deser;
mod error;
mod output;

use clap::Parser;
use cmd::AddressCommand;
use output::OutputFormat;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Inspect, build and validate XELIS addresses.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub subcommand: AddressCommand,

    /// Output format.
    #[arg(
        long,
        global = true,
        env = "XELIS_OUTPUT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Plain
    )]
    pub output_format: OutputFormat,
}

fn main() -> Result<(), anyhow::Error> {
    // Logger initialization, stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::INFO.into())
                        .from_env()?,
                )
                .with_filter(filter::filter_fn(|metadata| {
                    if let Some(module_path) = metadata.module_path() {
                        module_path.starts_with("xelis_address")
                    } else {
                        true
                    }
                })),
        )
        .init();

    let cli_arguments = Cli::parse();
    let output = cli_arguments
        .subcommand
        .run(cli_arguments.output_format)?;
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use xelis_address::Network;

    use super::Cli;
    use crate::{cmd::AddressCommand, output::OutputFormat};

    #[test]
    fn parse_global_output_format() {
        let cli = Cli::try_parse_from([
            "xelis-address",
            "validate",
            "xel:qqqq",
            "--output-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.output_format, OutputFormat::Json);
        assert!(matches!(cli.subcommand, AddressCommand::Validate { .. }));
    }

    #[test]
    fn parse_encode() {
        let cli = Cli::try_parse_from([
            "xelis-address",
            "encode",
            "--public-key",
            "00",
            "--network",
            "testnet",
            "--extra-data",
            r#"{"value": {"type": "bool", "value": true}}"#,
        ])
        .unwrap();
        let AddressCommand::Encode(arguments) = cli.subcommand else {
            panic!("expected the encode command");
        };
        assert_eq!(arguments.network, Network::Testnet);
        assert!(arguments.extra_data.is_some());
    }

    #[test]
    fn reject_invalid_extra_data() {
        let result = Cli::try_parse_from([
            "xelis-address",
            "encode",
            "--public-key",
            "00",
            "--extra-data",
            r#"{"unknown": 1}"#,
        ]);
        assert!(result.is_err());
    }
}
