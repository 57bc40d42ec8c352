//! Bech32-style checksummed text encoding.
//!
//! This is the classic BIP-173 checksum (same generator, same target residue) with
//! two differences that make off-the-shelf bech32 implementations unusable:
//! the separator is `:` instead of `1`, and there is no 90 character length cap,
//! integrated addresses are routinely longer than that.
//!
//! The string grammar is `<hrp>:<symbols><checksum>`, where every symbol is one
//! character of [`CHARSET`] and the checksum is [`CHECKSUM_LENGTH`] symbols long.

use crate::constants::{CHARSET, CHECKSUM_LENGTH, CHECKSUM_TARGET, GENERATOR, SEPARATOR};

/// Reverse lookup for [`CHARSET`], `-1` marks characters outside the alphabet.
const CHARSET_REV: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut idx = 0;
    while idx < CHARSET.len() {
        table[CHARSET[idx] as usize] = idx as i8;
        idx += 1;
    }
    table
};

/// Lowest character allowed in the human readable part.
const HRP_MIN_CHAR: u8 = 33;
/// Highest character allowed in the human readable part.
const HRP_MAX_CHAR: u8 = 126;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Bech32Error {
    #[error("mix case is not allowed")]
    MixedCase,

    #[error("human readable part is empty")]
    EmptyHrp,

    /// The separator is missing (`None`), at position 0, or leaves too few
    /// characters for a checksum and at least one data symbol.
    #[error("invalid separator position: {0:?}")]
    InvalidSeparatorPosition(Option<usize>),

    #[error("invalid character value in human readable part: {0}")]
    InvalidHrpCharacter(u8),

    #[error("invalid character value in data part: {0}")]
    InvalidDataCharacter(u8),

    #[error("invalid checksum")]
    InvalidChecksum,

    /// A symbol handed to [`encode`] does not fit in 5 bits.
    #[error("invalid value: {value}, max is {max}")]
    InvalidValue { value: u8, max: u8 },
}

/// Runs `values` through the 30-bit BCH checksum register.
pub fn polymod<I>(values: I) -> u32
where
    I: IntoIterator<Item = u8>,
{
    let mut chk: u32 = 1;
    for value in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ffffff) << 5) ^ u32::from(value);
        for (idx, generator) in GENERATOR.iter().enumerate() {
            if (top >> idx) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

/// Expands the human readable part into 5-bit symbols for checksumming.
///
/// The high 3 bits of every character come first, then a zero symbol, then the
/// low 5 bits of every character.
pub fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut expanded = Vec::with_capacity(bytes.len() * 2 + 1);
    expanded.extend(bytes.iter().map(|c| c >> 5));
    expanded.push(0);
    expanded.extend(bytes.iter().map(|c| c & 31));
    expanded
}

/// Checks that `data` (checksum symbols included) is valid for `hrp`.
pub fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    polymod(hrp_expand(hrp).into_iter().chain(data.iter().copied())) == CHECKSUM_TARGET
}

/// Computes the checksum symbols to append to `data`.
pub fn create_checksum(hrp: &str, data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let values = hrp_expand(hrp)
        .into_iter()
        .chain(data.iter().copied())
        .chain([0u8; CHECKSUM_LENGTH]);
    let residue = polymod(values) ^ CHECKSUM_TARGET;

    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (idx, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((residue >> (5 * (CHECKSUM_LENGTH - 1 - idx))) & 31) as u8;
    }
    checksum
}

fn check_hrp_characters(hrp: &str) -> Result<(), Bech32Error> {
    match hrp
        .bytes()
        .find(|c| *c < HRP_MIN_CHAR || *c > HRP_MAX_CHAR)
    {
        Some(c) => Err(Bech32Error::InvalidHrpCharacter(c)),
        None => Ok(()),
    }
}

fn is_mixed_case(s: &str) -> bool {
    s.bytes().any(|c| c.is_ascii_lowercase()) && s.bytes().any(|c| c.is_ascii_uppercase())
}

/// Decodes a checksummed string into its lower-cased human readable part and data
/// symbols, with the checksum stripped.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), Bech32Error> {
    if is_mixed_case(s) {
        return Err(Bech32Error::MixedCase);
    }
    // Uppercase strings are valid, the checksum is always computed over lowercase.
    let s = s.to_ascii_lowercase();

    let pos = s
        .bytes()
        .rposition(|c| c == SEPARATOR as u8)
        .ok_or(Bech32Error::InvalidSeparatorPosition(None))?;
    if pos < 1 || s.len() - pos - 1 < CHECKSUM_LENGTH + 1 {
        return Err(Bech32Error::InvalidSeparatorPosition(Some(pos)));
    }

    let hrp = &s[..pos];
    check_hrp_characters(hrp)?;

    let data = s[pos + 1..]
        .bytes()
        .map(|c| {
            CHARSET_REV
                .get(c as usize)
                .copied()
                .filter(|idx| *idx >= 0)
                .map(|idx| idx as u8)
                .ok_or(Bech32Error::InvalidDataCharacter(c))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if !verify_checksum(hrp, &data) {
        tracing::trace!(hrp, symbols = data.len(), "checksum mismatch");
        return Err(Bech32Error::InvalidChecksum);
    }

    let mut data = data;
    data.truncate(data.len() - CHECKSUM_LENGTH);
    Ok((hrp.to_string(), data))
}

/// Encodes `data` symbols under `hrp`, appending the checksum.
///
/// The human readable part is lower-cased; every symbol must be below 32.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, Bech32Error> {
    if hrp.is_empty() {
        return Err(Bech32Error::EmptyHrp);
    }
    check_hrp_characters(hrp)?;
    if is_mixed_case(hrp) {
        return Err(Bech32Error::MixedCase);
    }
    if let Some(value) = data.iter().copied().find(|v| *v as usize >= CHARSET.len()) {
        return Err(Bech32Error::InvalidValue {
            value,
            max: (CHARSET.len() - 1) as u8,
        });
    }

    let hrp = hrp.to_ascii_lowercase();
    let checksum = create_checksum(&hrp, data);

    let mut encoded = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    encoded.push_str(&hrp);
    encoded.push(SEPARATOR);
    encoded.extend(
        data.iter()
            .chain(checksum.iter())
            .map(|symbol| CHARSET[*symbol as usize] as char),
    );
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{create_checksum, decode, encode, hrp_expand, polymod, Bech32Error};
    use crate::constants::CHARSET;

    const MAINNET_ADDRESS: &str = "xel:ys4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxznt0";

    #[test]
    fn hrp_expansion() {
        // 'x' = 0x78, 'e' = 0x65, 'l' = 0x6c
        assert_eq!(hrp_expand("xel"), vec![3, 3, 3, 0, 24, 5, 12]);
    }

    #[test]
    fn checksum_of_empty_payload() {
        let checksum = create_checksum("xel", &[]);
        let values = hrp_expand("xel").into_iter().chain(checksum);
        assert_eq!(polymod(values), 1);
    }

    #[test]
    fn roundtrip_known_address() {
        let (hrp, data) = decode(MAINNET_ADDRESS).unwrap();
        assert_eq!(hrp, "xel");
        // 33 bytes of payload, packed into 5-bit symbols
        assert_eq!(data.len(), 53);
        assert_eq!(encode(&hrp, &data).unwrap(), MAINNET_ADDRESS);
    }

    #[test]
    fn uppercase_is_accepted() {
        let (hrp, data) = decode(&MAINNET_ADDRESS.to_uppercase()).unwrap();
        assert_eq!(hrp, "xel");
        assert_eq!(encode(&hrp, &data).unwrap(), MAINNET_ADDRESS);
    }

    #[test]
    fn uppercase_hrp_is_lowered_on_encode() {
        let (_, data) = decode(MAINNET_ADDRESS).unwrap();
        assert_eq!(encode("XEL", &data).unwrap(), MAINNET_ADDRESS);
    }

    #[test]
    fn every_single_substitution_is_detected() {
        let separator = MAINNET_ADDRESS.find(':').unwrap();
        for (idx, c) in MAINNET_ADDRESS.bytes().enumerate() {
            if idx == separator {
                continue;
            }
            let replacement = if idx < separator {
                // stay within the printable range of the human readable part
                if c == b'a' {
                    b'b'
                } else {
                    b'a'
                }
            } else {
                let position = CHARSET.iter().position(|s| *s == c).unwrap();
                CHARSET[(position + 1) % CHARSET.len()]
            };
            let mut mutated = MAINNET_ADDRESS.as_bytes().to_vec();
            mutated[idx] = replacement;
            let mutated = String::from_utf8(mutated).unwrap();
            assert_eq!(
                decode(&mutated),
                Err(Bech32Error::InvalidChecksum),
                "mutation at {idx} went undetected"
            );
        }
    }

    #[test]
    fn flipped_last_character() {
        let mut mutated = MAINNET_ADDRESS.to_string();
        mutated.pop();
        mutated.push('q');
        assert_eq!(decode(&mutated), Err(Bech32Error::InvalidChecksum));
    }

    #[rstest]
    #[case("xel:YS4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxznt0", Bech32Error::MixedCase)]
    #[case("XEL:ys4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxznt0", Bech32Error::MixedCase)]
    #[case("xelys4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxznt0", Bech32Error::InvalidSeparatorPosition(None))]
    #[case(":ys4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxznt0", Bech32Error::InvalidSeparatorPosition(Some(0)))]
    #[case("xel:qqqqqq", Bech32Error::InvalidSeparatorPosition(Some(3)))]
    #[case("x l:qqqqqqq", Bech32Error::InvalidHrpCharacter(b' '))]
    #[case("x\x7fl:qqqqqqq", Bech32Error::InvalidHrpCharacter(0x7f))]
    #[case("xel:qqqqbqq", Bech32Error::InvalidDataCharacter(b'b'))]
    #[case("xel:qqqq1qq", Bech32Error::InvalidDataCharacter(b'1'))]
    #[case("xel:qqqqiqq", Bech32Error::InvalidDataCharacter(b'i'))]
    #[case("xel:qqqqqqq", Bech32Error::InvalidChecksum)]
    fn decode_failures(#[case] input: &str, #[case] expected: Bech32Error) {
        assert_eq!(decode(input), Err(expected));
    }

    #[test]
    fn non_ascii_data_character() {
        assert_eq!(
            decode("xel:qqqqéqq"),
            Err(Bech32Error::InvalidDataCharacter(0xc3))
        );
    }

    #[test]
    fn separator_search_uses_last_occurrence() {
        let encoded = encode("a:b", &[1, 2, 3]).unwrap();
        let (hrp, data) = decode(&encoded).unwrap();
        assert_eq!(hrp, "a:b");
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[rstest]
    #[case("", &[0], Bech32Error::EmptyHrp)]
    #[case("x el", &[0], Bech32Error::InvalidHrpCharacter(b' '))]
    #[case("Xel", &[0], Bech32Error::MixedCase)]
    #[case("xel", &[0, 32], Bech32Error::InvalidValue { value: 32, max: 31 })]
    fn encode_failures(#[case] hrp: &str, #[case] data: &[u8], #[case] expected: Bech32Error) {
        assert_eq!(encode(hrp, data), Err(expected));
    }
}
