mod decode;
mod encode;
mod validate;

use clap::Subcommand;
pub(crate) use encode::EncodeArguments;

use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub(crate) enum AddressCommand {
    /// Decode an address and print its network, public key and extra data.
    Decode {
        /// Address to decode.
        address: String,
    },
    /// Build an address from a public key and optional extra data.
    Encode(EncodeArguments),
    /// Check whether an address is valid.
    Validate {
        /// Address to validate.
        address: String,
    },
}

impl AddressCommand {
    /// Run the command, returning what should be printed.
    #[tracing::instrument(level = "info", skip(self), fields(command = self.name()))]
    pub fn run(self, output_format: OutputFormat) -> Result<String, anyhow::Error> {
        let output = match self {
            AddressCommand::Decode { address } => {
                output_format.format(&decode::decode(&address)?)?
            }
            AddressCommand::Encode(arguments) => {
                output_format.format(&encode::encode(arguments.try_into()?)?)?
            }
            AddressCommand::Validate { address } => {
                output_format.format(&validate::validate(&address))?
            }
        };
        Ok(output)
    }

    fn name(&self) -> &'static str {
        match self {
            AddressCommand::Decode { .. } => "decode",
            AddressCommand::Encode(_) => "encode",
            AddressCommand::Validate { .. } => "validate",
        }
    }
}
