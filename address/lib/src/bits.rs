//! Regrouping of bit streams between word widths.
//!
//! Used to move the address payload between 8-bit bytes and the 5-bit symbols of
//! the checksummed text encoding.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertBitsError {
    /// Widths must be in `1..=8`, the input and output words are bytes.
    #[error("unsupported conversion from {from} bits to {to} bits")]
    InvalidWidth { from: u32, to: u32 },

    #[error("invalid value {value}, does not fit in {bits} bits")]
    ValueTooWide { value: u8, bits: u32 },

    /// A whole input word (or more) was left over without padding enabled.
    #[error("illegal zero padding")]
    IllegalZeroPadding,

    #[error("non zero padding")]
    NonZeroPadding,
}

/// Regroups `data`, a sequence of `from`-bit words, into `to`-bit words,
/// most significant bit first.
///
/// With `pad` set, a trailing partial group is left-aligned and emitted.
/// Without it, the leftover must be shorter than `from` bits and all zero,
/// otherwise the input carries bits that do not form a whole output word.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, ConvertBitsError> {
    if !(1..=8).contains(&from) || !(1..=8).contains(&to) {
        return Err(ConvertBitsError::InvalidWidth { from, to });
    }

    let max_value: u32 = (1 << to) - 1;
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::with_capacity((data.len() * from as usize).div_ceil(to as usize));

    for value in data.iter().copied() {
        if u32::from(value) >> from != 0 {
            return Err(ConvertBitsError::ValueTooWide { value, bits: from });
        }
        // Only the pending bits matter, keep the accumulator from overflowing.
        acc = ((acc << from) | u32::from(value)) & 0xffff;
        bits += from;
        while bits >= to {
            bits -= to;
            result.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            result.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from {
        return Err(ConvertBitsError::IllegalZeroPadding);
    } else if (acc << (to - bits)) & max_value != 0 {
        return Err(ConvertBitsError::NonZeroPadding);
    }

    Ok(result)
}
