//! JSON friendly representation of extra data.
//!
//! Scalars keep their type next to the value so they can be read back without loss:
//!
//! ```json
//! {"fields": [
//!     {"key": {"type": "string", "value": "amount"}, "value": {"value": {"type": "u128", "value": "1000"}}}
//! ]}
//! ```

use indexmap::{map::Entry, IndexMap};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use super::{DataElement, DataError, DataValue, Hash};

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
enum ValueRepr {
    Bool(bool),
    String(String),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(#[serde(with = "u128_string")] u128),
    Hash(#[serde(with = "hex::serde")] Hash),
}

/// `u128` does not survive most JSON implementations as a number.
mod u128_string {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

impl From<&DataValue> for ValueRepr {
    fn from(value: &DataValue) -> Self {
        match value {
            DataValue::Bool(value) => ValueRepr::Bool(*value),
            DataValue::String(value) => ValueRepr::String(value.clone()),
            DataValue::U8(value) => ValueRepr::U8(*value),
            DataValue::U16(value) => ValueRepr::U16(*value),
            DataValue::U32(value) => ValueRepr::U32(*value),
            DataValue::U64(value) => ValueRepr::U64(*value),
            DataValue::U128(value) => ValueRepr::U128(*value),
            DataValue::Hash(value) => ValueRepr::Hash(*value),
        }
    }
}

impl From<ValueRepr> for DataValue {
    fn from(value: ValueRepr) -> Self {
        match value {
            ValueRepr::Bool(value) => DataValue::Bool(value),
            ValueRepr::String(value) => DataValue::String(value),
            ValueRepr::U8(value) => DataValue::U8(value),
            ValueRepr::U16(value) => DataValue::U16(value),
            ValueRepr::U32(value) => DataValue::U32(value),
            ValueRepr::U64(value) => DataValue::U64(value),
            ValueRepr::U128(value) => DataValue::U128(value),
            ValueRepr::Hash(value) => DataValue::Hash(value),
        }
    }
}

impl Serialize for DataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ValueRepr::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ValueRepr::deserialize(deserializer).map(DataValue::from)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum ElementRef<'a> {
    Value(&'a DataValue),
    Array(&'a [DataElement]),
    Fields(Vec<FieldRef<'a>>),
}

#[derive(Serialize)]
struct FieldRef<'a> {
    key: &'a DataValue,
    value: &'a DataElement,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum ElementRepr {
    Value(DataValue),
    Array(Vec<DataElement>),
    Fields(Vec<FieldRepr>),
}

#[derive(Deserialize)]
struct FieldRepr {
    key: DataValue,
    value: DataElement,
}

impl Serialize for DataElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            DataElement::Value(value) => ElementRef::Value(value),
            DataElement::Array(elements) => ElementRef::Array(elements),
            DataElement::Fields(fields) => ElementRef::Fields(
                fields
                    .iter()
                    .map(|(key, value)| FieldRef { key, value })
                    .collect(),
            ),
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DataElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let element = match ElementRepr::deserialize(deserializer)? {
            ElementRepr::Value(value) => DataElement::Value(value),
            ElementRepr::Array(elements) => DataElement::Array(elements),
            ElementRepr::Fields(entries) => {
                let mut fields = IndexMap::with_capacity(entries.len());
                for FieldRepr { key, value } in entries {
                    match fields.entry(key) {
                        Entry::Occupied(entry) => {
                            return Err(D::Error::custom(DataError::DuplicateKey(
                                entry.key().clone(),
                            )));
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
