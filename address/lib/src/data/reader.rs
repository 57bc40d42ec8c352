use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use indexmap::{map::Entry, IndexMap};

use super::{DataElement, DataError, DataValue, ElementType, ValueType};
use crate::constants::HASH_SIZE;

/// Recursive descent reader over a byte buffer.
pub struct DataReader<'a> {
    cursor: Cursor<&'a [u8]>,
    limit: Option<usize>,
}

impl<'a> DataReader<'a> {
    /// Construct a new [`DataReader`] reading from the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            limit: None,
        }
    }

    /// Construct a new [`DataReader`] that refuses to consume more than `limit` bytes.
    ///
    /// Going over the limit is reported as [`DataError::SizeLimit`], even when the
    /// buffer itself would have been long enough.
    pub fn with_limit(bytes: &'a [u8], limit: usize) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            limit: Some(limit),
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Number of bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    fn check_limit(&self, size: usize) -> Result<(), DataError> {
        match self.limit {
            Some(limit) if self.position() + size > limit => Err(DataError::SizeLimit {
                size: self.position() + size,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Ensure the next `size` bytes can be consumed.
    fn reserve(&self, size: usize) -> Result<(), DataError> {
        self.check_limit(size)?;
        if size > self.remaining() {
            return Err(DataError::UnexpectedEnd);
        }
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8, DataError> {
        self.reserve(1)?;
        Ok(self.cursor.read_u8()?)
    }

    fn read_bool(&mut self) -> Result<bool, DataError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DataError::InvalidBool(other)),
        }
    }

    fn read_string(&mut self) -> Result<String, DataError> {
        let length = usize::from(self.read_u8()?);
        self.check_limit(length)?;
        let remaining = self.remaining();
        if length > remaining {
            return Err(DataError::InvalidStringLength { length, remaining });
        }

        let mut buffer = vec![0; length];
        self.cursor.read_exact(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn read_hash(&mut self) -> Result<[u8; HASH_SIZE], DataError> {
        self.reserve(HASH_SIZE)?;
        let mut hash = [0; HASH_SIZE];
        self.cursor.read_exact(&mut hash)?;
        Ok(hash)
    }

    /// Read a single scalar, type tag included.
    pub fn read_value(&mut self) -> Result<DataValue, DataError> {
        let value_type = ValueType::try_from(self.read_u8()?)?;
        let value = match value_type {
            ValueType::Bool => DataValue::Bool(self.read_bool()?),
            ValueType::String => DataValue::String(self.read_string()?),
            ValueType::U8 => DataValue::U8(self.read_u8()?),
            ValueType::U16 => {
                self.reserve(2)?;
                DataValue::U16(self.cursor.read_u16::<BigEndian>()?)
            }
            ValueType::U32 => {
                self.reserve(4)?;
                DataValue::U32(self.cursor.read_u32::<BigEndian>()?)
            }
            ValueType::U64 => {
                self.reserve(8)?;
                DataValue::U64(self.cursor.read_u64::<BigEndian>()?)
            }
            ValueType::U128 => {
                self.reserve(16)?;
                DataValue::U128(self.cursor.read_u128::<BigEndian>()?)
            }
            ValueType::Hash => DataValue::Hash(self.read_hash()?),
        };
        Ok(value)
    }

    /// Read an element and, recursively, all of its children.
    pub fn read_element(&mut self) -> Result<DataElement, DataError> {
        let element_type = ElementType::try_from(self.read_u8()?)?;
        let element = match element_type {
            ElementType::Value => DataElement::Value(self.read_value()?),
            ElementType::Array => {
                let count = usize::from(self.read_u8()?);
                let mut elements = Vec::with_capacity(count);
                for _ in 0..count {
                    elements.push(self.read_element()?);
                }
                DataElement::Array(elements)
            }
            ElementType::Fields => {
                let count = usize::from(self.read_u8()?);
                let mut fields = IndexMap::with_capacity(count);
                for _ in 0..count {
                    let key = self.read_value()?;
                    let value = self.read_element()?;
                    match fields.entry(key) {
                        Entry::Occupied(entry) => {
                            tracing::trace!(key = %entry.key(), "duplicate key in fields");
                            return Err(DataError::DuplicateKey(entry.key().clone()));
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(value);
                        }
                    }
                }
                DataElement::Fields(fields)
            }
        };
        Ok(element)
    }
}
