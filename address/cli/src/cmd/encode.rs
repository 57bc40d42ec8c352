use std::fmt::Display;

use serde::Serialize;
use xelis_address::{Address, DataElement, Network, PublicKey};

use crate::{deser::ParseablePath, error::CliError};

/// The encode arguments, as passed by the user, unvalidated.
#[derive(Debug, clap::Args)]
pub(crate) struct EncodeArguments {
    /// Public key, 32 bytes encoded as hex.
    #[arg(long)]
    pub public_key: String,

    /// Network the address belongs to.
    #[arg(long, env = "XELIS_NETWORK", default_value_t = Network::Mainnet)]
    pub network: Network,

    /// Extra data to integrate, as JSON or as a path to a JSON file prefixed with `@`.
    #[arg(long, value_parser = <DataElement as ParseablePath>::parse_json)]
    pub extra_data: Option<DataElement>,
}

/// A valid encode configuration. To be created using [`EncodeConfiguration::try_from`].
#[derive(Debug)]
pub(crate) struct EncodeConfiguration {
    public_key: PublicKey,
    network: Network,
    extra_data: Option<DataElement>,
}

impl TryFrom<EncodeArguments> for EncodeConfiguration {
    type Error = CliError;

    fn try_from(value: EncodeArguments) -> Result<Self, Self::Error> {
        let public_key = value.public_key.trim();
        let bytes = hex::decode(public_key.strip_prefix("0x").unwrap_or(public_key))?;
        let public_key = PublicKey::try_from(bytes.as_slice())
            .map_err(|_| CliError::InvalidPublicKeyLength(bytes.len()))?;

        Ok(Self {
            public_key,
            network: value.network,
            extra_data: value.extra_data,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EncodedAddress {
    address: String,
}

impl Display for EncodedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}

pub(crate) fn encode(configuration: EncodeConfiguration) -> Result<EncodedAddress, CliError> {
    let mut address = Address::new(configuration.public_key, configuration.network);
    address.set_extra_data(configuration.extra_data);

    let address = address.format()?;
    tracing::debug!(%address, "encoded address");
    Ok(EncodedAddress { address })
}
