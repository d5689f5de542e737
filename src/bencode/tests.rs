use std::collections::BTreeMap;

use bytes::Bytes;

use super::*;

fn bstr(s: &[u8]) -> Value {
    Value::Bytes(Bytes::copy_from_slice(s))
}

#[test]
fn decode_strings() {
    assert_eq!(decode(b"5:hello").unwrap(), bstr(b"hello"));
    assert_eq!(decode(b"0:").unwrap(), bstr(b""));
    assert_eq!(decode(b"13:Hello, world!").unwrap(), bstr(b"Hello, world!"));
}

#[test]
fn decode_string_is_binary_safe() {
    let input = [b'3', b':', 0x00, 0xff, 0x7f];
    assert_eq!(decode(&input).unwrap(), bstr(&[0x00, 0xff, 0x7f]));
}

#[test]
fn decode_integers() {
    assert_eq!(decode(b"i52e").unwrap(), Value::Integer(52));
    assert_eq!(decode(b"i-52e").unwrap(), Value::Integer(-52));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
}

#[test]
fn decode_rejects_malformed_integers() {
    assert!(matches!(
        decode(b"i-0e"),
        Err(BencodeError::InvalidInteger(_))
    ));
    assert!(matches!(
        decode(b"i03e"),
        Err(BencodeError::InvalidInteger(_))
    ));
    assert!(matches!(decode(b"ie"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i-e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i42"), Err(BencodeError::UnexpectedEof)));
}

#[test]
fn decode_lists() {
    assert_eq!(decode(b"le").unwrap(), Value::List(vec![]));
    assert_eq!(
        decode(b"l5:helloi52ee").unwrap(),
        Value::List(vec![bstr(b"hello"), Value::Integer(52)])
    );
    assert_eq!(
        decode(b"l5:helloli42e4:testee").unwrap(),
        Value::List(vec![
            bstr(b"hello"),
            Value::List(vec![Value::Integer(42), bstr(b"test")]),
        ])
    );
}

#[test]
fn decode_dicts() {
    let value = decode(b"d3:foo3:bar5:helloi52ee").unwrap();
    assert_eq!(value.get(b"foo"), Some(&bstr(b"bar")));
    assert_eq!(value.get(b"hello"), Some(&Value::Integer(52)));
    assert_eq!(value.get(b"missing"), None);
}

#[test]
fn decode_rejects_non_string_key() {
    assert!(matches!(
        decode(b"di1e3:fooe"),
        Err(BencodeError::InvalidKey)
    ));
}

#[test]
fn decode_rejects_truncation() {
    assert!(matches!(decode(b"5:hi"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(decode(b"l5:hello"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(decode(b"d3:foo"), Err(BencodeError::UnexpectedEof)));
}

#[test]
fn decode_rejects_trailing_data() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::TrailingData)
    ));
}

#[test]
fn decode_rejects_runaway_nesting() {
    let mut input = vec![b'l'; 200];
    input.extend(std::iter::repeat_n(b'e', 200));
    assert!(matches!(
        decode(&input),
        Err(BencodeError::NestingTooDeep)
    ));
}

#[test]
fn decode_prefix_returns_tail() {
    let (value, rest) = decode_prefix(b"5:helloi52ee").unwrap();
    assert_eq!(value, bstr(b"hello"));
    assert_eq!(rest, b"i52ee");

    let (value, rest) = decode_prefix(b"i52e").unwrap();
    assert_eq!(value, Value::Integer(52));
    assert!(rest.is_empty());
}

#[test]
fn encode_scalars() {
    assert_eq!(encode(&Value::Integer(345)), b"i345e");
    assert_eq!(encode(&Value::Integer(-345)), b"i-345e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
    assert_eq!(encode(&bstr(b"hello")), b"5:hello");
    assert_eq!(encode(&bstr(b"")), b"0:");
}

#[test]
fn encode_list() {
    let list = Value::List(vec![bstr(b"hello"), Value::Integer(42)]);
    assert_eq!(encode(&list), b"l5:helloi42ee");
}

#[test]
fn encode_sorts_dict_keys() {
    let mut entries = BTreeMap::new();
    entries.insert(Bytes::from_static(b"b"), Value::Integer(1));
    entries.insert(Bytes::from_static(b"a"), Value::Integer(2));
    assert_eq!(encode(&Value::Dict(entries)), b"d1:ai2e1:bi1ee");
}

#[test]
fn roundtrip_canonical_input() {
    let inputs: &[&[u8]] = &[
        b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee",
        b"l4:spaml4:eggsdeee",
        b"d4:listl4:spami42eee",
        b"i-1e",
        b"0:",
    ];
    for input in inputs {
        let decoded = decode(input).unwrap();
        assert_eq!(&encode(&decoded), input);
    }
}

#[test]
fn reencode_normalizes_key_order() {
    // Keys out of order are accepted on decode but re-sorted on encode.
    let decoded = decode(b"d1:bi1e1:ai2ee").unwrap();
    assert_eq!(encode(&decoded), b"d1:ai2e1:bi1ee");
}

#[test]
fn json_rendering() {
    let value = decode(b"d3:foo3:bar5:helloi52ee").unwrap();
    assert_eq!(
        value.to_json(),
        serde_json::json!({"foo": "bar", "hello": 52})
    );

    let value = decode(b"l5:helloi-5ee").unwrap();
    assert_eq!(value.to_json(), serde_json::json!(["hello", -5]));
}
