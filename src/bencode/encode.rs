use bytes::{BufMut, BytesMut};

use super::value::Value;

/// Encodes a value to bencode bytes.
///
/// Integers emit their minimal decimal form and dictionary keys emit in
/// ascending byte order, so encoding is canonical: decoding a
/// canonically-encoded input and re-encoding it reproduces the input
/// exactly.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = BytesMut::new();
    encode_into(value, &mut buf);
    buf.to_vec()
}

fn encode_into(value: &Value, buf: &mut BytesMut) {
    match value {
        Value::Integer(i) => {
            buf.put_slice(format!("i{i}e").as_bytes());
        }
        Value::Bytes(b) => {
            buf.put_slice(format!("{}:", b.len()).as_bytes());
            buf.put_slice(b);
        }
        Value::List(items) => {
            buf.put_u8(b'l');
            for item in items {
                encode_into(item, buf);
            }
            buf.put_u8(b'e');
        }
        Value::Dict(entries) => {
            // BTreeMap iteration order is the canonical key order.
            buf.put_u8(b'd');
            for (key, val) in entries {
                buf.put_slice(format!("{}:", key.len()).as_bytes());
                buf.put_slice(key);
                encode_into(val, buf);
            }
            buf.put_u8(b'e');
        }
    }
}
