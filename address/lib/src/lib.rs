//! XELIS address encoding.
//!
//! An address is a 32 byte public key, tagged with a network and optionally
//! integrated with a small self-describing [`DataElement`] tree, rendered as
//! checksummed text:
//!
//! ```
//! use xelis_address::{Address, DataElement, Network};
//!
//! let address = Address::new([7; 32], Network::Testnet).with_extra_data(DataElement::from(42u64));
//! let text = address.format().unwrap();
//! assert!(text.starts_with("xet:"));
//! assert_eq!(text.parse::<Address>().unwrap(), address);
//! ```

mod address;
pub mod bech32;
pub mod bits;
pub mod constants;
pub mod data;

pub use address::{is_valid_address, Address, AddressError, AddressType, Network, PublicKey};
pub use data::{DataElement, DataError, DataValue, ElementType, Fields, Hash, ValueType};

use crate::{bech32::Bech32Error, bits::ConvertBitsError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Bech32(#[from] Bech32Error),

    #[error(transparent)]
    ConvertBits(#[from] ConvertBitsError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Address(#[from] AddressError),
}
