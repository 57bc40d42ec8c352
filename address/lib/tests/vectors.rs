//! Known addresses produced by existing XELIS wallets.

use hex_literal::hex;
use rstest::rstest;
use xelis_address::{
    bech32::Bech32Error, is_valid_address, Address, AddressError, DataElement, DataValue, Error,
    Network,
};

const MAINNET_ADDRESS: &str = "xel:ys4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxznt0";
const PUBLIC_KEY: [u8; 32] =
    hex!("242a1cf0425bbfaf0c578378f219227613b42cf4e7291b9301ce7a327a670309");

const INTEGRATED_ADDRESS: &str = "xet:6eadzwf5xdacts6fs4y3csmnsmy4mcxewqt3xyygwfx0hm0tm32szqsrqyzkjar9d4esyqgpq4ehwmmjvsqqypgpq45x2mrvduqqzpthdaexceqpq4mk7unywvqsgqqpq4yx2mrvduqqzp2hdaexceqqqyzxvun0d5qqzp2cg4xyj5ct5udlg";
const INTEGRATED_PUBLIC_KEY: [u8; 32] =
    hex!("d67ad13934337b85c34985491c437386c95de0d97017131088724cfbedebdc55");

#[test]
fn mainnet_address() {
    let address: Address = MAINNET_ADDRESS.parse().unwrap();
    assert_eq!(address.network(), Network::Mainnet);
    assert_eq!(address.public_key(), &PUBLIC_KEY);
    assert!(!address.is_integrated());

    let data = address.to_data().unwrap();
    assert_eq!(data.len(), 33);
    assert_eq!(data[32], 0);

    assert_eq!(address.format().unwrap(), MAINNET_ADDRESS);
    assert_eq!(
        Address::new(PUBLIC_KEY, Network::Mainnet).format().unwrap(),
        MAINNET_ADDRESS
    );
}

#[test]
fn integrated_address_with_fields() {
    let address: Address = INTEGRATED_ADDRESS.parse().unwrap();
    assert_eq!(address.network(), Network::Testnet);
    assert_eq!(address.public_key(), &INTEGRATED_PUBLIC_KEY);
    assert!(address.is_integrated());

    let data = address.extra_data().unwrap();
    assert_eq!(data.as_fields().map(|fields| fields.len()), Some(3));

    let sword = data
        .get(&"items".into())
        .and_then(|items| items.get(&"sword".into()))
        .and_then(DataElement::as_value);
    assert_eq!(sword, Some(&DataValue::U8(5)));

    let hello = data
        .get(&"hello".into())
        .and_then(DataElement::as_value)
        .and_then(DataValue::as_str);
    assert_eq!(hello, Some("world"));

    let words: Vec<&str> = data
        .get(&"words".into())
        .and_then(DataElement::as_array)
        .unwrap()
        .iter()
        .filter_map(|word| word.as_value().and_then(DataValue::as_str))
        .collect();
    assert_eq!(words, vec!["Hello", "World", "from", "XELIS"]);

    assert_eq!(address.to_data().unwrap().len(), 109);
    assert_eq!(address.format().unwrap(), INTEGRATED_ADDRESS);
}

#[test]
fn rebuild_integrated_address() {
    let items: DataElement = [(DataValue::from("sword"), DataElement::from(5u8))]
        .into_iter()
        .collect();
    let words: DataElement = ["Hello", "World", "from", "XELIS"]
        .into_iter()
        .map(DataElement::from)
        .collect();
    let data: DataElement = [
        (DataValue::from("items"), items),
        (DataValue::from("hello"), DataElement::from("world")),
        (DataValue::from("words"), words),
    ]
    .into_iter()
    .collect();

    let address = Address::new_integrated(INTEGRATED_PUBLIC_KEY, Network::Testnet, data);
    assert_eq!(address.format().unwrap(), INTEGRATED_ADDRESS);
}

#[test]
fn uppercase_address() {
    let address: Address = MAINNET_ADDRESS.to_uppercase().parse().unwrap();
    assert_eq!(address.format().unwrap(), MAINNET_ADDRESS);
}

#[test]
fn every_single_substitution_is_rejected() {
    const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
    let separator = MAINNET_ADDRESS.find(':').unwrap();

    for (idx, c) in MAINNET_ADDRESS.bytes().enumerate() {
        if idx == separator {
            continue;
        }
        let replacement = if idx < separator {
            if c == b'a' {
                b'b'
            } else {
                b'a'
            }
        } else {
            let pos = CHARSET.iter().position(|s| *s == c).unwrap();
            CHARSET[(pos + 1) % CHARSET.len()]
        };

        let mut mutated = MAINNET_ADDRESS.as_bytes().to_vec();
        mutated[idx] = replacement;
        let mutated = String::from_utf8(mutated).unwrap();

        assert!(
            matches!(
                mutated.parse::<Address>(),
                Err(Error::Bech32(Bech32Error::InvalidChecksum))
            ),
            "{mutated} was not rejected"
        );
        assert!(!is_valid_address(&mutated));
    }
}

#[rstest]
#[case::mixed_case("xel:ys4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxzNt0")]
#[case::no_separator("xelys4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxznt0")]
#[case::empty("")]
#[case::too_short("xel:qqqqqq")]
#[case::bad_character("xel:ys4peuzztwl67rzhsdu0yxfzwcfmgt85uu53hycpeeary7n8qvysqmxznb0")]
fn invalid_text(#[case] text: &str) {
    assert!(matches!(text.parse::<Address>(), Err(Error::Bech32(_))));
    assert!(!is_valid_address(text));
}

#[test]
fn unknown_network_prefix() {
    // same payload, valid checksum for another prefix
    let (_, symbols) = xelis_address::bech32::decode(MAINNET_ADDRESS).unwrap();
    let text = xelis_address::bech32::encode("xls", &symbols).unwrap();
    assert!(matches!(
        text.parse::<Address>(),
        Err(Error::Address(AddressError::UnknownPrefix(_)))
    ));
}
