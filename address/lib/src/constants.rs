//! Wire constants shared by every layer of the address format.
//!
//! These values are part of the deployed address format; changing any of them
//! makes existing addresses unreadable.

/// Human readable part used by mainnet addresses.
pub const MAINNET_PREFIX: &str = "xel";

/// Human readable part used by testnet addresses.
pub const TESTNET_PREFIX: &str = "xet";

/// Separates the human readable part from the checksummed payload.
pub const SEPARATOR: char = ':';

/// The 32 symbol alphabet, indexed by 5-bit value.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// BCH generator words, XORed into the checksum register.
pub const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Value the checksum register must hold after processing a valid payload.
pub const CHECKSUM_TARGET: u32 = 1;

/// Number of trailing checksum symbols.
pub const CHECKSUM_LENGTH: usize = 6;

/// Size of the raw public key carried by every address.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Maximum size in bytes of the extra data of an integrated address.
pub const EXTRA_DATA_LIMIT: usize = 1024;

/// Maximum byte length of a string scalar.
pub const MAX_STRING_SIZE: usize = u8::MAX as usize;

/// Maximum number of entries in an array or fields element.
pub const MAX_ELEMENTS: usize = u8::MAX as usize;

/// Size of a hash scalar.
pub const HASH_SIZE: usize = 32;
