use std::fmt::Display;

use serde::Serialize;
use xelis_address::{Address, DataElement, Network, PublicKey};

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub(crate) struct DecodedAddress {
    network: Network,
    integrated: bool,
    #[serde(with = "hex::serde")]
    public_key: PublicKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra_data: Option<DataElement>,
}

impl From<Address> for DecodedAddress {
    fn from(mut address: Address) -> Self {
        Self {
            network: address.network(),
            integrated: address.is_integrated(),
            public_key: *address.public_key(),
            extra_data: address.take_extra_data(),
        }
    }
}

impl Display for DecodedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "network: {}", self.network)?;
        writeln!(
            f,
            "type: {}",
            if self.integrated { "integrated" } else { "normal" }
        )?;
        write!(f, "public key: {}", hex::encode(self.public_key))?;
        if let Some(extra_data) = &self.extra_data {
            let extra_data = serde_json::to_string(extra_data).map_err(|_| std::fmt::Error)?;
            write!(f, "\nextra data: {extra_data}")?;
        }
        Ok(())
    }
}

pub(crate) fn decode(address: &str) -> Result<DecodedAddress, CliError> {
    let address: Address = address.parse()?;
    Ok(address.into())
}
