use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::{DataElement, DataError, DataValue};
use crate::constants::{MAX_ELEMENTS, MAX_STRING_SIZE};

/// Serializer for [`DataElement`] trees.
pub struct DataWriter<W> {
    writer: W,
}

impl<W> DataWriter<W> {
    /// Construct a new [`DataWriter`].
    ///
    /// Takes a write into which the data will be written.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn collection_length(length: usize) -> Result<u8, DataError> {
    if length > MAX_ELEMENTS {
        return Err(DataError::TooManyElements(length));
    }
    u8::try_from(length).map_err(|_| DataError::TooManyElements(length))
}

impl<W> DataWriter<W>
where
    W: Write,
{
    /// Write a single scalar, type tag included.
    ///
    /// Returns the number of bytes written.
    pub fn write_value(&mut self, value: &DataValue) -> Result<usize, DataError> {
        self.writer.write_u8(value.value_type() as u8)?;
        match value {
            DataValue::Bool(value) => self.writer.write_u8(u8::from(*value))?,
            DataValue::String(value) => {
                let bytes = value.as_bytes();
                if bytes.len() > MAX_STRING_SIZE {
                    return Err(DataError::StringTooLong(bytes.len()));
                }
                self.writer.write_u8(bytes.len() as u8)?;
                self.writer.write_all(bytes)?;
            }
            DataValue::U8(value) => self.writer.write_u8(*value)?,
            DataValue::U16(value) => self.writer.write_u16::<BigEndian>(*value)?,
            DataValue::U32(value) => self.writer.write_u32::<BigEndian>(*value)?,
            DataValue::U64(value) => self.writer.write_u64::<BigEndian>(*value)?,
            DataValue::U128(value) => self.writer.write_u128::<BigEndian>(*value)?,
            DataValue::Hash(value) => self.writer.write_all(value)?,
        }
        Ok(value.encoded_size())
    }

    /// Write an element and, recursively, all of its children.
    ///
    /// Returns the number of bytes written.
    pub fn write_element(&mut self, element: &DataElement) -> Result<usize, DataError> {
        self.writer.write_u8(element.kind() as u8)?;
        let mut written = 1;
        match element {
            DataElement::Value(value) => {
                written += self.write_value(value)?;
            }
            DataElement::Array(elements) => {
                self.writer.write_u8(collection_length(elements.len())?)?;
                written += 1;
                for element in elements {
                    written += self.write_element(element)?;
                }
            }
            DataElement::Fields(fields) => {
                self.writer.write_u8(collection_length(fields.len())?)?;
                written += 1;
                for (key, value) in fields {
                    written += self.write_value(key)?;
                    written += self.write_element(value)?;
                }
            }
        }
        Ok(written)
    }
}
