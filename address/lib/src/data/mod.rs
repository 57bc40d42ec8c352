//! Self-describing tagged values carried as the extra data of integrated addresses.
//!
//! An element is a tree, every node starts with a tag byte:
//!
//! ```text
//! Element := 0x00 Value                    -- a single scalar
//!          | 0x01 count:u8 Element{count}  -- an ordered array
//!          | 0x02 count:u8 (Value Element){count}  -- a map from scalar to element
//! Value   := type:u8 payload
//! ```
//!
//! Scalar payloads are fixed-width big-endian integers, length-prefixed strings
//! (at most 255 bytes) and raw 32 byte hashes.

mod reader;
#[cfg(feature = "serde")]
mod serde;
mod writer;

use std::fmt;

use indexmap::IndexMap;
pub use reader::DataReader;
pub use writer::DataWriter;

use crate::constants::HASH_SIZE;

/// Opaque 32 byte hash scalar.
pub type Hash = [u8; HASH_SIZE];

/// Mapping held by a [`DataElement::Fields`] node.
///
/// Insertion order is the wire order; equality ignores order.
pub type Fields = IndexMap<DataValue, DataElement>;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("invalid data element type: {0}")]
    UnknownElementType(u8),

    #[error("invalid value type: {0}")]
    UnknownValueType(u8),

    #[error("invalid boolean value: {0}")]
    InvalidBool(u8),

    /// The input ended in the middle of an element.
    #[error("unexpected end of data")]
    UnexpectedEnd,

    /// A string length prefix points past the end of the input.
    #[error("string of {length} bytes exceeds the {remaining} remaining bytes")]
    InvalidStringLength { length: usize, remaining: usize },

    #[error("string is not valid UTF-8")]
    InvalidString(#[from] std::string::FromUtf8Error),

    #[error("string max limit is 255 bytes, got {0}")]
    StringTooLong(usize),

    #[error("collections are limited to 255 entries, got {0}")]
    TooManyElements(usize),

    #[error("duplicate key in fields: {0}")]
    DuplicateKey(DataValue),

    /// Reading the element required more than the allowed number of bytes.
    #[error("data needs {size} bytes, the limit is {limit} bytes")]
    SizeLimit { size: usize, limit: usize },

    #[error("{0} unexpected bytes after the data element")]
    TrailingBytes(usize),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Wire tag of a [`DataValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ValueType {
    Bool = 0,
    String = 1,
    U8 = 2,
    U16 = 3,
    U32 = 4,
    U64 = 5,
    U128 = 6,
    Hash = 7,
}

impl TryFrom<u8> for ValueType {
    type Error = DataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Bool,
            1 => Self::String,
            2 => Self::U8,
            3 => Self::U16,
            4 => Self::U32,
            5 => Self::U64,
            6 => Self::U128,
            7 => Self::Hash,
            other => return Err(DataError::UnknownValueType(other)),
        })
    }
}

/// Wire tag of a [`DataElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ElementType {
    Value = 0,
    Array = 1,
    Fields = 2,
}

impl TryFrom<u8> for ElementType {
    type Error = DataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Value,
            1 => Self::Array,
            2 => Self::Fields,
            other => return Err(DataError::UnknownElementType(other)),
        })
    }
}

/// A scalar leaf of the extra data tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataValue {
    Bool(bool),
    /// At most [`MAX_STRING_SIZE`](crate::constants::MAX_STRING_SIZE) bytes once UTF-8 encoded.
    String(String),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Hash(Hash),
}

impl DataValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            DataValue::Bool(_) => ValueType::Bool,
            DataValue::String(_) => ValueType::String,
            DataValue::U8(_) => ValueType::U8,
            DataValue::U16(_) => ValueType::U16,
            DataValue::U32(_) => ValueType::U32,
            DataValue::U64(_) => ValueType::U64,
            DataValue::U128(_) => ValueType::U128,
            DataValue::Hash(_) => ValueType::Hash,
        }
    }

    /// Number of bytes the value takes on the wire, type tag included.
    pub fn encoded_size(&self) -> usize {
        1 + match self {
            DataValue::Bool(_) | DataValue::U8(_) => 1,
            DataValue::String(s) => 1 + s.len(),
            DataValue::U16(_) => 2,
            DataValue::U32(_) => 4,
            DataValue::U64(_) => 8,
            DataValue::U128(_) => 16,
            DataValue::Hash(_) => HASH_SIZE,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&Hash> {
        match self {
            DataValue::Hash(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value of any unsigned integer variant, widened.
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            DataValue::U8(value) => Some((*value).into()),
            DataValue::U16(value) => Some((*value).into()),
            DataValue::U32(value) => Some((*value).into()),
            DataValue::U64(value) => Some((*value).into()),
            DataValue::U128(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value of any unsigned integer variant that fits in a `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_u128().and_then(|value| u64::try_from(value).ok())
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Bool(value) => write!(f, "{value}"),
            DataValue::String(value) => write!(f, "{value:?}"),
            DataValue::U8(value) => write!(f, "{value}u8"),
            DataValue::U16(value) => write!(f, "{value}u16"),
            DataValue::U32(value) => write!(f, "{value}u32"),
            DataValue::U64(value) => write!(f, "{value}u64"),
            DataValue::U128(value) => write!(f, "{value}u128"),
            DataValue::Hash(value) => {
                for byte in value {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DataValue {
                fn from(value: $ty) -> Self {
                    DataValue::$variant(value.into())
                }
            }

            impl From<$ty> for DataElement {
                fn from(value: $ty) -> Self {
                    DataElement::Value(value.into())
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    String => String,
    &str => String,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    Hash => Hash,
}

/// A node of the extra data tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataElement {
    Value(DataValue),
    /// Ordered, at most [`MAX_ELEMENTS`](crate::constants::MAX_ELEMENTS) entries.
    Array(Vec<DataElement>),
    /// Unique keys, at most [`MAX_ELEMENTS`](crate::constants::MAX_ELEMENTS) entries.
    Fields(Fields),
}

impl DataElement {
    pub fn kind(&self) -> ElementType {
        match self {
            DataElement::Value(_) => ElementType::Value,
            DataElement::Array(_) => ElementType::Array,
            DataElement::Fields(_) => ElementType::Fields,
        }
    }

    pub fn as_value(&self) -> Option<&DataValue> {
        match self {
            DataElement::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DataElement]> {
        match self {
            DataElement::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            DataElement::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks `key` up if this element is a [`DataElement::Fields`].
    pub fn get(&self, key: &DataValue) -> Option<&DataElement> {
        self.as_fields().and_then(|fields| fields.get(key))
    }

    /// Number of bytes the element takes on the wire.
    ///
    /// Does not validate the size limits, [`DataElement::to_bytes`] does.
    pub fn encoded_size(&self) -> usize {
        1 + match self {
            DataElement::Value(value) => value.encoded_size(),
            DataElement::Array(elements) => {
                1 + elements.iter().map(DataElement::encoded_size).sum::<usize>()
            }
            DataElement::Fields(fields) => {
                1 + fields
                    .iter()
                    .map(|(key, value)| key.encoded_size() + value.encoded_size())
                    .sum::<usize>()
            }
        }
    }

    /// Serializes the element.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DataError> {
        let mut buffer = Vec::with_capacity(self.encoded_size());
        DataWriter::new(&mut buffer).write_element(self)?;
        Ok(buffer)
    }

    /// Deserializes an element spanning the whole of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DataError> {
        let mut reader = DataReader::new(bytes);
        let element = reader.read_element()?;
        match reader.remaining() {
            0 => Ok(element),
            trailing => Err(DataError::TrailingBytes(trailing)),
        }
    }
}

impl From<DataValue> for DataElement {
    fn from(value: DataValue) -> Self {
        DataElement::Value(value)
    }
}

impl From<Vec<DataElement>> for DataElement {
    fn from(elements: Vec<DataElement>) -> Self {
        DataElement::Array(elements)
    }
}

impl From<Fields> for DataElement {
    fn from(fields: Fields) -> Self {
        DataElement::Fields(fields)
    }
}

impl FromIterator<DataElement> for DataElement {
    fn from_iter<I: IntoIterator<Item = DataElement>>(iter: I) -> Self {
        DataElement::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(DataValue, DataElement)> for DataElement {
    fn from_iter<I: IntoIterator<Item = (DataValue, DataElement)>>(iter: I) -> Self {
        DataElement::Fields(iter.into_iter().collect())
    }
}
