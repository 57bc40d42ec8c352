//! Address assembly: public key, address type and optional extra data.
//!
//! Raw layout, before the text encoding:
//!
//! ```text
//! public key (32 bytes) | type (1 byte) | extra data (type 1 only)
//! ```

use std::{fmt, str::FromStr};

use crate::{
    bech32,
    bits::convert_bits,
    constants::{EXTRA_DATA_LIMIT, MAINNET_PREFIX, PUBLIC_KEY_SIZE, TESTNET_PREFIX},
    data::{DataElement, DataError, DataReader},
    Error,
};

/// Raw public key carried by an address.
pub type PublicKey = [u8; PUBLIC_KEY_SIZE];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("unknown address prefix: {0}")]
    UnknownPrefix(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("invalid address type: {0}")]
    InvalidAddressType(u8),

    #[error("expected a 32 bytes public key, got {0} bytes")]
    InvalidPublicKeyLength(usize),

    #[error("address type is missing")]
    MissingAddressType,

    #[error("extra data of {size} bytes exceeds the limit of {limit} bytes")]
    ExtraDataLimit { size: usize, limit: usize },

    #[error("{0} unexpected bytes after the address data")]
    TrailingBytes(usize),
}

/// Network an address belongs to, selects the text prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_PREFIX,
            Network::Testnet => TESTNET_PREFIX,
        }
    }

    pub fn from_prefix(prefix: &str) -> Result<Self, AddressError> {
        match prefix {
            MAINNET_PREFIX => Ok(Network::Mainnet),
            TESTNET_PREFIX => Ok(Network::Testnet),
            other => Err(AddressError::UnknownPrefix(other.to_string())),
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::Mainnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(AddressError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Whether the address carries extra data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressType {
    Normal,
    /// Integrated address.
    Data(DataElement),
}

impl AddressType {
    /// Type byte written after the public key.
    pub fn id(&self) -> u8 {
        match self {
            AddressType::Normal => 0,
            AddressType::Data(_) => 1,
        }
    }
}

/// A public key bound to a network, optionally integrated with extra data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    network: Network,
    public_key: PublicKey,
    addr_type: AddressType,
}

impl Address {
    /// Construct a plain (non integrated) address.
    pub fn new(public_key: PublicKey, network: Network) -> Self {
        Self {
            network,
            public_key,
            addr_type: AddressType::Normal,
        }
    }

    /// Construct an integrated address carrying `data`.
    pub fn new_integrated(public_key: PublicKey, network: Network, data: DataElement) -> Self {
        Self {
            network,
            public_key,
            addr_type: AddressType::Data(data),
        }
    }

    pub fn with_extra_data(mut self, data: DataElement) -> Self {
        self.set_extra_data(Some(data));
        self
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn is_mainnet(&self) -> bool {
        self.network.is_mainnet()
    }

    pub fn is_integrated(&self) -> bool {
        matches!(self.addr_type, AddressType::Data(_))
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address_type(&self) -> &AddressType {
        &self.addr_type
    }

    pub fn extra_data(&self) -> Option<&DataElement> {
        match &self.addr_type {
            AddressType::Data(data) => Some(data),
            AddressType::Normal => None,
        }
    }

    /// Replaces the extra data, `None` turns the address back into a plain one.
    pub fn set_extra_data(&mut self, data: Option<DataElement>) {
        self.addr_type = match data {
            Some(data) => AddressType::Data(data),
            None => AddressType::Normal,
        };
    }

    pub fn clear_extra_data(&mut self) {
        self.set_extra_data(None);
    }

    /// Removes and returns the extra data, leaving a plain address.
    pub fn take_extra_data(&mut self) -> Option<DataElement> {
        match std::mem::replace(&mut self.addr_type, AddressType::Normal) {
            AddressType::Data(data) => Some(data),
            AddressType::Normal => None,
        }
    }

    /// Raw address bytes, see the module documentation for the layout.
    pub fn to_data(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::with_capacity(PUBLIC_KEY_SIZE + 1);
        bytes.extend_from_slice(&self.public_key);
        bytes.push(self.addr_type.id());

        if let AddressType::Data(data) = &self.addr_type {
            let extra_data = data.to_bytes()?;
            if extra_data.len() > EXTRA_DATA_LIMIT {
                return Err(AddressError::ExtraDataLimit {
                    size: extra_data.len(),
                    limit: EXTRA_DATA_LIMIT,
                }
                .into());
            }
            bytes.extend_from_slice(&extra_data);
        }

        Ok(bytes)
    }

    /// Parses raw address bytes.
    ///
    /// The whole of `bytes` must be consumed, and the extra data of an integrated
    /// address may not take more than [`EXTRA_DATA_LIMIT`] bytes.
    pub fn from_data(bytes: &[u8], network: Network) -> Result<Self, Error> {
        let Some((public_key, rest)) = bytes.split_first_chunk::<PUBLIC_KEY_SIZE>() else {
            return Err(AddressError::InvalidPublicKeyLength(bytes.len()).into());
        };
        let Some((&id, extra_data)) = rest.split_first() else {
            return Err(AddressError::MissingAddressType.into());
        };
        tracing::trace!(id, extra_data = extra_data.len(), "parsing address data");

        let addr_type = match id {
            0 => {
                if !extra_data.is_empty() {
                    return Err(AddressError::TrailingBytes(extra_data.len()).into());
                }
                AddressType::Normal
            }
            1 => {
                let mut reader = DataReader::with_limit(extra_data, EXTRA_DATA_LIMIT);
                let data = reader.read_element().map_err(|err| match err {
                    DataError::SizeLimit { size, limit } => {
                        Error::from(AddressError::ExtraDataLimit { size, limit })
                    }
                    err => Error::from(err),
                })?;
                if reader.remaining() > 0 {
                    return Err(AddressError::TrailingBytes(reader.remaining()).into());
                }
                AddressType::Data(data)
            }
            other => return Err(AddressError::InvalidAddressType(other).into()),
        };

        Ok(Self {
            network,
            public_key: *public_key,
            addr_type,
        })
    }

    /// Text form of the address.
    pub fn format(&self) -> Result<String, Error> {
        let bytes = self.to_data()?;
        let symbols = convert_bits(&bytes, 8, 5, true)?;
        Ok(bech32::encode(self.network.prefix(), &symbols)?)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, symbols) = bech32::decode(s)?;
        let network = Network::from_prefix(&prefix)?;
        tracing::debug!(%network, symbols = symbols.len(), "decoded address text");

        let bytes = convert_bits(&symbols, 5, 8, false)?;
        Address::from_data(&bytes, network)
    }
}

/// Returns whether `address` parses as a valid address of either network.
pub fn is_valid_address(address: &str) -> bool {
    match Address::from_str(address) {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(%err, "invalid address");
            false
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let address = self.format().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&address)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let address = String::deserialize(deserializer)?;
        address.parse().map_err(serde::de::Error::custom)
    }
}
